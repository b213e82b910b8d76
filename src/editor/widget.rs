//! Text editor widget
//!
//! Wraps egui's TextEdit around a [`MarkdownDocument`] and reports, besides
//! content changes, where the pointer sits in the text: the hover offset
//! drives the reference cursor affordance and the click offset drives
//! reference selection. Screen coordinates map to byte offsets through the
//! frame's galley.

use crate::editor::document::{char_index_to_byte_offset, DocumentEngine, MarkdownDocument};
use eframe::egui::{self, FontId, ScrollArea, TextEdit, Ui};

/// Result of showing the editor widget for one frame.
pub struct EditorOutput {
    /// Whether the content was modified this frame.
    pub changed: bool,
    /// Byte offset under the pointer while hovering, if any.
    pub hover_offset: Option<usize>,
    /// Byte offset of a primary click in the text, if any.
    pub clicked_offset: Option<usize>,
}

/// The main editor widget.
///
/// # Example
///
/// ```ignore
/// EditorWidget::new(&mut document)
///     .font_size(settings.font_size)
///     .word_wrap(settings.word_wrap)
///     .show(ui);
/// ```
pub struct EditorWidget<'a> {
    document: &'a mut MarkdownDocument,
    font_size: f32,
    word_wrap: bool,
    id: Option<egui::Id>,
}

impl<'a> EditorWidget<'a> {
    pub fn new(document: &'a mut MarkdownDocument) -> Self {
        Self {
            document,
            font_size: 14.0,
            word_wrap: true,
            id: None,
        }
    }

    /// Set the font size for the editor.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set whether word wrap is enabled.
    #[must_use]
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        // Include the revision in the ID so egui treats the TextEdit as a new
        // widget when content is replaced externally (file load, history
        // switch) and re-reads from the source string.
        let base_id = self.id.unwrap_or_else(|| ui.id().with("editor"));
        let id = base_id.with(self.document.revision());

        let original_content = self.document.text().to_string();

        let font_size = self.font_size;
        let word_wrap = self.word_wrap;
        let font_id = FontId::proportional(font_size);

        let layout_font_id = font_id.clone();
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> std::sync::Arc<egui::Galley> {
            let layout_job = if word_wrap {
                egui::text::LayoutJob::simple(
                    text.to_owned(),
                    layout_font_id.clone(),
                    ui.visuals().text_color(),
                    wrap_width,
                )
            } else {
                egui::text::LayoutJob::simple_singleline(
                    text.to_owned(),
                    layout_font_id.clone(),
                    ui.visuals().text_color(),
                )
            };
            ui.fonts(|f| f.layout_job(layout_job))
        };

        let scroll_output = ScrollArea::vertical()
            .id_source(id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                TextEdit::multiline(self.document.buffer_mut())
                    .id(id)
                    .frame(false)
                    .font(font_id)
                    .desired_width(f32::INFINITY)
                    .layouter(&mut layouter)
                    .show(ui)
            });

        let text_output = scroll_output.inner;

        // TextEdit mutates the buffer directly; turn the diff into an event.
        let changed = self.document.text() != original_content;
        if changed {
            self.document.notify_edited();
        }

        // Track cursor and selection as byte offsets for toolbar commands.
        if let Some(cursor_range) = text_output.cursor_range {
            let primary = cursor_range.primary.ccursor.index;
            let secondary = cursor_range.secondary.ccursor.index;
            let byte_offset = char_index_to_byte_offset(self.document.text(), primary);
            self.document.set_cursor(byte_offset);
            if primary != secondary {
                let other = char_index_to_byte_offset(self.document.text(), secondary);
                self.document.set_selection(Some((byte_offset, other)));
            } else {
                self.document.set_selection(None);
            }
        }

        // Map the pointer position through the galley to a text offset.
        let offset_at = |pos: egui::Pos2| -> usize {
            let cursor = text_output.galley.cursor_from_pos(pos - text_output.galley_pos);
            char_index_to_byte_offset(self.document.text(), cursor.ccursor.index)
        };

        let hover_offset = text_output
            .response
            .hover_pos()
            .filter(|_| text_output.response.hovered())
            .map(offset_at);

        let clicked_offset = if text_output.response.clicked() {
            text_output.response.interact_pointer_pos().map(offset_at)
        } else {
            None
        };

        EditorOutput {
            changed,
            hover_offset,
            clicked_offset,
        }
    }
}
