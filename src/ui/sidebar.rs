//! Sidebar
//!
//! Left panel with two sections: the searchable document history list and
//! the verses panel (current lookup result plus pinned references).

use crate::history::HistoryRegistry;
use crate::scripture::PinnedVerses;
use crate::state::LookupStatus;
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, ScrollArea, Ui};

/// Actions that can be triggered from the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    /// Switch to the history entry at this registry index
    SwitchTo(usize),
    /// Remove the history entry at this registry index
    Remove(usize),
    /// Copy the current document's path to the clipboard
    CopyPath,
    /// Pin or unpin the currently loaded reference
    TogglePin,
    /// Remove the pin at this list position
    RemovePin(usize),
}

/// Show the sidebar, returning the action clicked this frame, if any.
pub fn show_sidebar(
    ui: &mut Ui,
    colors: &ThemeColors,
    history: &HistoryRegistry,
    history_query: &mut String,
    lookup_status: &LookupStatus,
    pinned: &PinnedVerses,
) -> Option<SidebarAction> {
    let mut action = None;

    ui.heading("History");
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(history_query)
                .hint_text("Search…")
                .desired_width(f32::INFINITY),
        );
    });

    ScrollArea::vertical()
        .id_source("history_list")
        .max_height(ui.available_height() * 0.45)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let matches = history.filter(history_query);
            if matches.is_empty() {
                ui.label(RichText::new("No documents").color(colors.text_muted));
            }
            for (index, entry) in matches {
                let is_active = history.active_index() == Some(index);
                ui.horizontal(|ui| {
                    let label = ui.selectable_label(is_active, &entry.display_name);
                    if label.clicked() {
                        action = Some(SidebarAction::SwitchTo(index));
                    }
                    label.on_hover_text(entry.path.display().to_string());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Remove from history").clicked() {
                            action = Some(SidebarAction::Remove(index));
                        }
                    });
                });
            }
        });

    if history.active_entry().is_some() && ui.small_button("Copy Path").clicked() {
        action = Some(SidebarAction::CopyPath);
    }

    ui.separator();
    ui.heading("Verses");

    ScrollArea::vertical()
        .id_source("verses_panel")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            match lookup_status {
                LookupStatus::Idle => {
                    ui.label(
                        RichText::new("Click a [Book 1:1] reference in the text")
                            .color(colors.text_muted),
                    );
                }
                LookupStatus::Pending(reference) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(reference.to_string());
                    });
                }
                LookupStatus::Loaded { reference, verses } => {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(reference.to_string())
                                .color(colors.reference)
                                .strong(),
                        );
                        let pin_label = if pinned.contains(reference) { "Unpin" } else { "Pin" };
                        if ui.small_button(pin_label).clicked() {
                            action = Some(SidebarAction::TogglePin);
                        }
                    });
                    for verse in verses {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("{}", verse.number))
                                    .color(colors.text_muted)
                                    .small(),
                            );
                            ui.label(&verse.text);
                        });
                    }
                    if verses.is_empty() {
                        ui.label(RichText::new("No verses found").color(colors.text_muted));
                    }
                }
                LookupStatus::Failed { reference, message } => {
                    ui.label(RichText::new(reference.to_string()).strong());
                    ui.label(RichText::new(message).color(colors.error));
                }
            }

            if !pinned.is_empty() {
                ui.separator();
                ui.label(RichText::new("Pinned").strong());
                for (position, pin) in pinned.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(pin.reference.to_string()).color(colors.reference),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.small_button("✕").on_hover_text("Unpin").clicked() {
                                    action = Some(SidebarAction::RemovePin(position));
                                }
                            },
                        );
                    });
                    for verse in &pin.verses {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("{}", verse.number))
                                    .color(colors.text_muted)
                                    .small(),
                            );
                            ui.label(&verse.text);
                        });
                    }
                }
            }
        });

    action
}
