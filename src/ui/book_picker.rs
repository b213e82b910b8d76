//! Book picker dialog
//!
//! Modal window for building a verse reference from the static book table:
//! testament group, book, chapter (clamped to the book's chapter count),
//! and a verse or verse range. The result is inserted into the document as
//! bracketed reference text.

use crate::scripture::{books_in, Book, Testament, VerseReference};
use crate::theme::ThemeColors;
use eframe::egui::{self, Align2, ComboBox, Context, DragValue, RichText};

/// Result from showing the book picker.
#[derive(Debug, Clone, PartialEq)]
pub enum BookPickerResult {
    /// Dialog still open, nothing chosen
    None,
    /// Dialog was cancelled
    Cancelled,
    /// Insert this reference at the cursor
    Insert(VerseReference),
}

/// State of the book picker dialog.
#[derive(Debug, Clone)]
pub struct BookPicker {
    testament: Testament,
    /// Position within the selected testament's book list
    book_index: usize,
    chapter: u32,
    verse_start: u32,
    /// Whether a verse range is being picked
    is_range: bool,
    verse_end: u32,
}

impl Default for BookPicker {
    fn default() -> Self {
        Self {
            testament: Testament::New,
            book_index: 0,
            chapter: 1,
            verse_start: 1,
            is_range: false,
            verse_end: 1,
        }
    }
}

impl BookPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected book.
    fn selected_book(&self) -> &'static Book {
        let books: Vec<&'static Book> = books_in(self.testament).collect();
        books[self.book_index.min(books.len() - 1)]
    }

    /// Clamp chapter and verse fields into the selected book's bounds.
    fn clamp_fields(&mut self) {
        let max_chapter = self.selected_book().chapters as u32;
        self.chapter = self.chapter.clamp(1, max_chapter);
        self.verse_start = self.verse_start.max(1);
        if self.verse_end < self.verse_start {
            self.verse_end = self.verse_start;
        }
    }

    /// The reference the current fields describe.
    fn reference(&self) -> VerseReference {
        VerseReference {
            book: self.selected_book().name.to_string(),
            chapter: self.chapter,
            verse_start: self.verse_start,
            verse_end: self.is_range.then_some(self.verse_end),
        }
    }

    /// Show the dialog. The caller keeps it open while the result is
    /// [`BookPickerResult::None`].
    pub fn show(&mut self, ctx: &Context, colors: &ThemeColors) -> BookPickerResult {
        let mut result = BookPickerResult::None;

        egui::Window::new("Insert Reference")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for &testament in &[Testament::Old, Testament::New] {
                        if ui
                            .selectable_label(self.testament == testament, testament.label())
                            .clicked()
                            && self.testament != testament
                        {
                            self.testament = testament;
                            self.book_index = 0;
                        }
                    }
                });

                let books: Vec<&'static Book> = books_in(self.testament).collect();
                self.book_index = self.book_index.min(books.len() - 1);

                ComboBox::from_label("Book")
                    .selected_text(books[self.book_index].name)
                    .show_ui(ui, |ui| {
                        for (i, book) in books.iter().enumerate() {
                            ui.selectable_value(&mut self.book_index, i, book.name);
                        }
                    });

                self.clamp_fields();
                let max_chapter = self.selected_book().chapters as u32;

                ui.horizontal(|ui| {
                    ui.label("Chapter:");
                    ui.add(DragValue::new(&mut self.chapter).range(1..=max_chapter));
                    ui.label("Verse:");
                    ui.add(DragValue::new(&mut self.verse_start).range(1..=200));
                    ui.checkbox(&mut self.is_range, "to");
                    if self.is_range {
                        ui.add(DragValue::new(&mut self.verse_end).range(self.verse_start..=200));
                    }
                });

                ui.label(
                    RichText::new(self.reference().bracketed())
                        .color(colors.reference)
                        .monospace(),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Insert").clicked() {
                        result = BookPickerResult::Insert(self.reference());
                    }
                    if ui.button("Cancel").clicked() {
                        result = BookPickerResult::Cancelled;
                    }
                });
            });

        result
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripture::parse_reference;

    #[test]
    fn test_default_points_at_matthew() {
        let picker = BookPicker::new();
        assert_eq!(picker.selected_book().name, "Matthew");
    }

    #[test]
    fn test_clamp_fields_respects_chapter_count() {
        let mut picker = BookPicker::new();
        picker.chapter = 999;
        picker.clamp_fields();
        assert_eq!(picker.chapter, picker.selected_book().chapters as u32);

        picker.chapter = 0;
        picker.clamp_fields();
        assert_eq!(picker.chapter, 1);
    }

    #[test]
    fn test_clamp_fields_keeps_range_ordered() {
        let mut picker = BookPicker::new();
        picker.verse_start = 10;
        picker.verse_end = 3;
        picker.clamp_fields();
        assert_eq!(picker.verse_end, 10);
    }

    #[test]
    fn test_reference_round_trips_through_parser() {
        let mut picker = BookPicker::new();
        picker.chapter = 3;
        picker.verse_start = 16;
        let reference = picker.reference();
        assert_eq!(
            parse_reference(&reference.to_string()).unwrap(),
            reference
        );

        picker.is_range = true;
        picker.verse_end = 17;
        let ranged = picker.reference();
        assert_eq!(ranged.verse_end, Some(17));
        assert_eq!(parse_reference(&ranged.to_string()).unwrap(), ranged);
    }
}
