//! Shared modal dialogs and notifications
//!
//! The unsaved-changes confirmation dialog, the error modal, the settings
//! window, and the toast overlay.

use crate::config::{Settings, Theme};
use crate::theme::ThemeColors;
use eframe::egui::{self, Align2, Context, RichText};

/// Show the confirmation dialog.
///
/// Returns `Some(true)` when confirmed, `Some(false)` when cancelled, and
/// `None` while the dialog stays open.
pub fn show_confirm_dialog(ctx: &Context, message: &str) -> Option<bool> {
    let mut result = None;

    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    result = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    result = Some(false);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        result = Some(false);
    }
    result
}

/// Show the error modal. Returns `true` when dismissed.
pub fn show_error_modal(ctx: &Context, colors: &ThemeColors, message: &str) -> bool {
    let mut dismissed = false;

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(message).color(colors.error));
            ui.separator();
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }
    dismissed
}

/// Show the settings window. Returns `true` when any setting changed.
pub fn show_settings_window(ctx: &Context, settings: &mut Settings, open: &mut bool) -> bool {
    let mut changed = false;

    egui::Window::new("Settings")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Theme:");
                for &theme in Theme::all() {
                    if ui
                        .selectable_label(settings.theme == theme, theme.label())
                        .clicked()
                    {
                        settings.theme = theme;
                        changed = true;
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Font size:");
                if ui
                    .add(egui::Slider::new(
                        &mut settings.font_size,
                        Settings::MIN_FONT_SIZE..=Settings::MAX_FONT_SIZE,
                    ))
                    .changed()
                {
                    changed = true;
                }
            });

            if ui.checkbox(&mut settings.word_wrap, "Word wrap").changed() {
                changed = true;
            }

            ui.horizontal(|ui| {
                ui.label("Translation:");
                if ui.text_edit_singleline(&mut settings.translation).changed() {
                    changed = true;
                }
            });
        });

    changed
}

/// Paint the toast message near the bottom of the window.
pub fn show_toast(ctx: &Context, colors: &ThemeColors, message: &str) {
    egui::Area::new(egui::Id::new("toast"))
        .anchor(Align2::CENTER_BOTTOM, [0.0, -24.0])
        .show(ctx, |ui| {
            egui::Frame::popup(&ctx.style())
                .fill(colors.background_secondary)
                .show(ui, |ui| {
                    ui.label(RichText::new(message).color(colors.text_primary));
                });
        });
}
