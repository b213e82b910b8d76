//! Editor: document engine, text widget, and formatting commands

pub mod document;
pub mod format;
pub mod widget;

pub use document::{DocumentEngine, DocumentEvent, MarkdownDocument};
pub use format::{apply_format, FormatCommand, FormatResult};
pub use widget::{EditorOutput, EditorWidget};
