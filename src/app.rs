//! Main application module
//!
//! Implements the eframe App trait: per-frame polling of the lookup worker,
//! draining and reconciling document events, layout (toolbar, sidebar,
//! editor), keyboard shortcuts, and the modal dialogs.

use crate::editor::{apply_format, DocumentEngine, EditorWidget};
use crate::files::dialogs::{open_file_dialog, save_file_dialog};
use crate::state::AppState;
use crate::theme::ThemeColors;
use crate::ui::{
    show_confirm_dialog, show_error_modal, show_settings_window, show_sidebar, show_toast,
    show_toolbar, BookPicker, BookPickerResult, SidebarAction, ToolbarAction,
};
use eframe::egui;
use log::{debug, warn};

/// How long a toast stays visible, in seconds.
const TOAST_DURATION_SECS: f64 = 2.5;

/// Keyboard shortcut actions, detected in the input closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// New document (Ctrl+N)
    New,
    /// Open file dialog (Ctrl+O)
    Open,
    /// Save current file (Ctrl+S)
    Save,
    /// Save As dialog (Ctrl+Shift+S)
    SaveAs,
    /// Toggle sidebar (Ctrl+\)
    ToggleSidebar,
}

/// The main application.
pub struct LecternApp {
    state: AppState,
    book_picker: BookPicker,
    /// Set once an exit has been confirmed so the close request goes through.
    allowed_to_close: bool,
}

impl LecternApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();
        let colors = ThemeColors::from_theme(state.settings.theme, &cc.egui_ctx.style().visuals);
        cc.egui_ctx.set_visuals(colors.to_visuals());

        Self {
            state,
            book_picker: BookPicker::new(),
            allowed_to_close: false,
        }
    }

    fn detect_keyboard_action(&self, ctx: &egui::Context) -> Option<KeyboardAction> {
        ctx.input(|i| {
            if !i.modifiers.command {
                return None;
            }
            if i.key_pressed(egui::Key::N) {
                Some(KeyboardAction::New)
            } else if i.key_pressed(egui::Key::O) {
                Some(KeyboardAction::Open)
            } else if i.key_pressed(egui::Key::S) && i.modifiers.shift {
                Some(KeyboardAction::SaveAs)
            } else if i.key_pressed(egui::Key::S) {
                Some(KeyboardAction::Save)
            } else if i.key_pressed(egui::Key::Backslash) {
                Some(KeyboardAction::ToggleSidebar)
            } else {
                None
            }
        })
    }

    fn run_open_dialog(&mut self) {
        let initial = self
            .state
            .session
            .path()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()));
        if let Some(path) = open_file_dialog(initial.as_deref()) {
            self.state.request_open(path);
        }
    }

    fn run_save_as_dialog(&mut self) {
        let initial = self
            .state
            .session
            .path()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()));
        let default_name = self
            .state
            .session
            .path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("untitled.md")
            .to_string();
        if let Some(path) = save_file_dialog(initial.as_deref(), Some(&default_name)) {
            self.state.save_to(path);
        }
    }

    fn save(&mut self) {
        if !self.state.save() {
            self.run_save_as_dialog();
        }
    }

    fn dispatch_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::New => self.state.request_new_document(),
            ToolbarAction::Open => self.run_open_dialog(),
            ToolbarAction::Save => self.save(),
            ToolbarAction::SaveAs => self.run_save_as_dialog(),
            ToolbarAction::Format(command) => {
                let result = apply_format(
                    self.state.document.text(),
                    self.state.document.selection(),
                    self.state.document.cursor(),
                    command,
                );
                self.state.document.apply_edit(result.text, result.cursor);
            }
            ToolbarAction::InsertReference => {
                self.book_picker = BookPicker::new();
                self.state.ui.show_book_picker = true;
            }
            ToolbarAction::ToggleSidebar => {
                self.state
                    .update_settings(|s| s.show_sidebar = !s.show_sidebar);
            }
            ToolbarAction::OpenSettings => self.state.ui.show_settings = true,
        }
    }

    fn dispatch_sidebar(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::SwitchTo(index) => self.state.request_switch_history(index),
            SidebarAction::Remove(index) => self.state.remove_history(index),
            SidebarAction::CopyPath => self.copy_current_path(),
            SidebarAction::TogglePin => self.state.toggle_pin_current(),
            SidebarAction::RemovePin(position) => self.state.pinned.remove(position),
        }
    }

    fn copy_current_path(&mut self) {
        let Some(path) = self.state.session.path() else {
            return;
        };
        let text = path.display().to_string();
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
            Ok(()) => self.state.show_toast("Path copied to clipboard"),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                self.state.show_toast("Could not access clipboard");
            }
        }
    }

    fn update_toast(&mut self, ctx: &egui::Context, colors: &ThemeColors) {
        let Some(message) = self.state.ui.toast_message.clone() else {
            return;
        };
        let now = ctx.input(|i| i.time);
        let expires_at = *self
            .state
            .ui
            .toast_expires_at
            .get_or_insert(now + TOAST_DURATION_SECS);

        if now >= expires_at {
            self.state.ui.toast_message = None;
            self.state.ui.toast_expires_at = None;
        } else {
            show_toast(ctx, colors, &message);
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context, colors: &ThemeColors) {
        if self.state.ui.show_confirm_dialog {
            match show_confirm_dialog(ctx, &self.state.ui.confirm_dialog_message.clone()) {
                Some(true) => {
                    if self.state.handle_confirmed_action() {
                        self.allowed_to_close = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                Some(false) => self.state.cancel_pending_action(),
                None => {}
            }
        }

        if self.state.ui.show_error_modal
            && show_error_modal(ctx, colors, &self.state.ui.error_message.clone())
        {
            self.state.ui.show_error_modal = false;
            self.state.ui.error_message.clear();
        }

        if self.state.ui.show_settings {
            let mut open = true;
            let mut settings = self.state.settings.clone();
            let changed = show_settings_window(ctx, &mut settings, &mut open);
            if changed {
                let translation_changed = settings.translation != self.state.settings.translation;
                self.state.update_settings(|s| *s = settings.clone());
                if translation_changed {
                    self.state.set_translation(settings.translation.clone());
                }
                let colors = ThemeColors::from_theme(self.state.settings.theme, &ctx.style().visuals);
                ctx.set_visuals(colors.to_visuals());
            }
            self.state.ui.show_settings = open;
        }

        if self.state.ui.show_book_picker {
            match self.book_picker.show(ctx, colors) {
                BookPickerResult::Insert(reference) => {
                    debug!("Inserting reference {}", reference);
                    self.state
                        .document
                        .insert_at_cursor(&format!(" {} ", reference.bracketed()));
                    self.state.ui.show_book_picker = false;
                }
                BookPickerResult::Cancelled => self.state.ui.show_book_picker = false,
                BookPickerResult::None => {}
            }
        }
    }
}

impl eframe::App for LecternApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let colors = ThemeColors::from_theme(self.state.settings.theme, &ctx.style().visuals);

        // Completed verse lookups land here, once per frame
        self.state.poll_lookups();

        // An in-flight lookup needs repaints to show up without input
        if matches!(self.state.lookup_status, crate::state::LookupStatus::Pending(_)) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if let Some(action) = self.detect_keyboard_action(ctx) {
            match action {
                KeyboardAction::New => self.state.request_new_document(),
                KeyboardAction::Open => self.run_open_dialog(),
                KeyboardAction::Save => self.save(),
                KeyboardAction::SaveAs => self.run_save_as_dialog(),
                KeyboardAction::ToggleSidebar => {
                    self.state
                        .update_settings(|s| s.show_sidebar = !s.show_sidebar);
                }
            }
        }

        // Intercept the window close button while changes are unsaved
        if ctx.input(|i| i.viewport().close_requested())
            && !self.allowed_to_close
            && !self.state.request_exit()
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            if let Some(action) = show_toolbar(ui, &colors, self.state.session.is_modified()) {
                self.dispatch_toolbar(action);
            }
        });

        if self.state.settings.show_sidebar {
            egui::SidePanel::left("sidebar")
                .default_width(self.state.settings.sidebar_width)
                .show(ctx, |ui| {
                    let mut query = std::mem::take(&mut self.state.ui.history_query);
                    let action = show_sidebar(
                        ui,
                        &colors,
                        &self.state.history,
                        &mut query,
                        &self.state.lookup_status,
                        &self.state.pinned,
                    );
                    self.state.ui.history_query = query;
                    if let Some(action) = action {
                        self.dispatch_sidebar(action);
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let output = EditorWidget::new(&mut self.state.document)
                .font_size(self.state.settings.font_size)
                .word_wrap(self.state.settings.word_wrap)
                .show(ui);

            // Pointer affordance: hand cursor over a reference token
            if let Some(offset) = output.hover_offset {
                if self.state.is_over_reference(offset) {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }
            if let Some(offset) = output.clicked_offset {
                self.state.click_at_offset(offset);
            }
        });

        // Reconcile engine and flat text after the widget ran
        self.state.sync_document();

        self.show_dialogs(ctx, &colors);
        self.update_toast(ctx, &colors);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.state.window_title()));

        // Persist window size changes with the other settings
        let size = ctx.input(|i| i.screen_rect().size());
        let stored = self.state.settings.window_size;
        if (size.x - stored.width).abs() > 1.0 || (size.y - stored.height).abs() > 1.0 {
            self.state.update_settings(|s| {
                s.window_size.width = size.x;
                s.window_size.height = size.y;
            });
        }

        self.state.save_settings_if_dirty();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
