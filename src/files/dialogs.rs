//! Native file dialog integration using the rfd crate
//!
//! Open and save pickers filtered to the document types the editor handles.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extension filters for supported file types.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Opens a native file dialog for selecting a document.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_file_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Document")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_file_dialog(initial_dir: Option<&Path>, default_name: Option<&str>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Document")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(name) = default_name {
        dialog = dialog.set_file_name(name);
    }

    dialog.save_file()
}
