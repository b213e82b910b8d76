//! Buffer-backed document engine
//!
//! The editor widget drives a [`MarkdownDocument`]: a flat text buffer with a
//! cursor, a revision counter, and a queue of change notifications drained by
//! the application once per frame. Replacing the content from outside (file
//! load, history switch) goes through [`DocumentEngine::set_content`], which
//! bumps the revision so the text widget re-reads its source string; only
//! edits originating in the editor itself produce events.

// ─────────────────────────────────────────────────────────────────────────────
// Notification Stream
// ─────────────────────────────────────────────────────────────────────────────

/// A change notification emitted by the document engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The content was edited inside the editor; carries the full new text.
    ContentChanged(String),
    /// The cursor or selection moved without a content change.
    SelectionChanged,
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Seam
// ─────────────────────────────────────────────────────────────────────────────

/// The structured-document engine as seen by the synchronization layer.
pub trait DocumentEngine {
    /// Replace the whole content from outside the editor.
    ///
    /// Does not emit a [`DocumentEvent`]; the caller made the change and
    /// already knows about it.
    fn set_content(&mut self, text: &str);

    /// The current flat-text projection.
    fn text(&self) -> &str;

    /// Counter bumped on every external content replacement.
    fn revision(&self) -> u64;

    /// Take all notifications queued since the last drain.
    fn drain_events(&mut self) -> Vec<DocumentEvent>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Document
// ─────────────────────────────────────────────────────────────────────────────

/// The live document behind the editor widget.
#[derive(Debug, Default)]
pub struct MarkdownDocument {
    buffer: String,
    /// Cursor position as a byte offset into `buffer`.
    cursor: usize,
    /// Selected byte range, ordered, when text is selected.
    selection: Option<(usize, usize)>,
    revision: u64,
    events: Vec<DocumentEvent>,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            ..Self::default()
        }
    }

    /// Mutable access to the buffer for the text widget.
    ///
    /// The widget edits this directly; it must call
    /// [`notify_edited`](Self::notify_edited) afterwards when the content
    /// actually changed.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Record that the widget changed the buffer, queueing the notification.
    pub fn notify_edited(&mut self) {
        self.events
            .push(DocumentEvent::ContentChanged(self.buffer.clone()));
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer and snapped to a char boundary.
    pub fn set_cursor(&mut self, offset: usize) {
        let offset = offset.min(self.buffer.len());
        self.cursor = floor_char_boundary(&self.buffer, offset);
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Record the selected byte range as reported by the widget.
    pub fn set_selection(&mut self, selection: Option<(usize, usize)>) {
        self.selection = selection.map(|(a, b)| (a.min(b), a.max(b)));
    }

    /// Insert a snippet at the cursor as if the user had typed it.
    ///
    /// Emits a [`DocumentEvent::ContentChanged`] and bumps the revision so
    /// the text widget re-reads the buffer.
    pub fn insert_at_cursor(&mut self, snippet: &str) {
        self.buffer.insert_str(self.cursor, snippet);
        self.cursor += snippet.len();
        self.revision += 1;
        self.notify_edited();
    }

    /// Replace the buffer as an editor-originated edit (e.g. a toolbar
    /// formatting command), keeping the cursor at `cursor`.
    pub fn apply_edit(&mut self, text: String, cursor: usize) {
        self.buffer = text;
        self.set_cursor(cursor);
        self.selection = None;
        self.revision += 1;
        self.notify_edited();
    }
}

impl DocumentEngine for MarkdownDocument {
    fn set_content(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.cursor.min(self.buffer.len());
        self.cursor = floor_char_boundary(&self.buffer, self.cursor);
        self.revision += 1;
    }

    fn text(&self) -> &str {
        &self.buffer
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn drain_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Offset Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Largest byte offset `<= offset` that lies on a char boundary.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut offset = offset;
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Convert a character index (as reported by the text widget's cursor) to a
/// byte offset into `text`. Indices past the end map to the text's length.
pub fn char_index_to_byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
