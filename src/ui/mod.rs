//! UI components
//!
//! Reusable widgets: the toolbar, the sidebar (history + verses), the
//! book picker dialog, and shared modal dialogs.

mod book_picker;
mod dialogs;
mod sidebar;
mod toolbar;

pub use book_picker::{BookPicker, BookPickerResult};
pub use dialogs::{show_confirm_dialog, show_error_modal, show_settings_window, show_toast};
pub use sidebar::{show_sidebar, SidebarAction};
pub use toolbar::{show_toolbar, ToolbarAction};
