//! Toolbar
//!
//! Icon buttons for file operations, markdown formatting, and the book
//! picker, rendered in a single row above the editor.

use crate::editor::FormatCommand;
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, Ui};

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    /// Create a new document
    New,
    /// Open file dialog
    Open,
    /// Save current document
    Save,
    /// Save As dialog
    SaveAs,
    /// Apply a markdown formatting command
    Format(FormatCommand),
    /// Open the book picker to insert a reference
    InsertReference,
    /// Toggle sidebar visibility
    ToggleSidebar,
    /// Open the settings window
    OpenSettings,
}

const FORMAT_COMMANDS: &[FormatCommand] = &[
    FormatCommand::Bold,
    FormatCommand::Italic,
    FormatCommand::InlineCode,
    FormatCommand::Heading(1),
    FormatCommand::Heading(2),
    FormatCommand::BulletList,
    FormatCommand::Blockquote,
];

/// Show the toolbar, returning the action clicked this frame, if any.
pub fn show_toolbar(ui: &mut Ui, colors: &ThemeColors, is_modified: bool) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if icon_button(ui, "🗋", "New (Ctrl+N)") {
            action = Some(ToolbarAction::New);
        }
        if icon_button(ui, "🗁", "Open (Ctrl+O)") {
            action = Some(ToolbarAction::Open);
        }
        let save_label = if is_modified { "💾•" } else { "💾" };
        if icon_button(ui, save_label, "Save (Ctrl+S)") {
            action = Some(ToolbarAction::Save);
        }
        if icon_button(ui, "💾+", "Save As (Ctrl+Shift+S)") {
            action = Some(ToolbarAction::SaveAs);
        }

        ui.separator();

        for &command in FORMAT_COMMANDS {
            if icon_button(ui, command.icon(), command.tooltip()) {
                action = Some(ToolbarAction::Format(command));
            }
        }

        ui.separator();

        if ui
            .button(RichText::new("📖 Reference").color(colors.reference))
            .on_hover_text("Insert a verse reference")
            .clicked()
        {
            action = Some(ToolbarAction::InsertReference);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if icon_button(ui, "⛭", "Settings") {
                action = Some(ToolbarAction::OpenSettings);
            }
            if icon_button(ui, "☰", "Toggle Sidebar") {
                action = Some(ToolbarAction::ToggleSidebar);
            }
        });
    });

    action
}

fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str) -> bool {
    ui.button(icon).on_hover_text(tooltip).clicked()
}
