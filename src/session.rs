//! Document session and content synchronization
//!
//! One [`DocumentSession`] is live at a time. It owns the flat-text snapshot
//! of the open document (the value that gets saved to disk) and keeps it
//! equal to the document engine's content without echo loops.
//!
//! The echo problem: an edit inside the engine updates the snapshot, and the
//! snapshot update is itself observed by the per-frame probe, which would
//! push the same text straight back into the engine and clobber the cursor
//! and undo stack. A one-shot latch marks the probe that follows each
//! internal change so it is skipped; the latch clears unconditionally on that
//! probe, matched or not, so a missed acknowledgement can never wedge
//! synchronization permanently.

use crate::editor::DocumentEngine;
use crate::scripture::VerseReference;
use log::debug;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Sync State
// ─────────────────────────────────────────────────────────────────────────────

/// Per-document synchronization state.
///
/// `suppress_next_echo` is set for exactly one round trip after an
/// engine-originated change and cleared on the next probe.
#[derive(Debug, Clone, Default)]
struct SyncState {
    last_known_text: String,
    suppress_next_echo: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Session
// ─────────────────────────────────────────────────────────────────────────────

/// The state of the currently open document.
#[derive(Debug, Default)]
pub struct DocumentSession {
    /// Path of the open file, `None` for an unsaved new document.
    path: Option<PathBuf>,
    /// The authoritative flat-text value, as last loaded or edited.
    flat_text: String,
    /// Snapshot of `flat_text` at the last successful save.
    saved_text: String,
    sync: SyncState,
    /// The reference currently driving the verses panel.
    selected_reference: Option<VerseReference>,
}

impl DocumentSession {
    /// Start an empty, unsaved session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a freshly loaded document.
    pub fn from_file(path: PathBuf, text: String) -> Self {
        Self {
            path: Some(path),
            flat_text: text.clone(),
            saved_text: text,
            sync: SyncState::default(),
            selected_reference: None,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn flat_text(&self) -> &str {
        &self.flat_text
    }

    /// Whether the document differs from its last saved state.
    pub fn is_modified(&self) -> bool {
        self.flat_text != self.saved_text
    }

    /// Record a successful save to `path`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.saved_text = self.flat_text.clone();
    }

    pub fn selected_reference(&self) -> Option<&VerseReference> {
        self.selected_reference.as_ref()
    }

    pub fn select_reference(&mut self, reference: Option<VerseReference>) {
        self.selected_reference = reference;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Synchronization
    // ─────────────────────────────────────────────────────────────────────────

    /// Push an external text value into the engine.
    ///
    /// Idempotent: a value equal to the last known engine text is a no-op,
    /// so repeated applications never disturb the engine.
    pub fn apply_external_text(&mut self, engine: &mut dyn DocumentEngine, text: &str) {
        if text == self.sync.last_known_text {
            return;
        }
        debug!("Applying external text ({} bytes)", text.len());
        engine.set_content(text);
        self.sync.last_known_text = text.to_string();
    }

    /// Handle a content change that originated inside the engine.
    ///
    /// Arms the echo latch before the snapshot is updated, then takes the
    /// new text as the authoritative flat value.
    pub fn on_document_changed(&mut self, new_text: &str) {
        self.sync.suppress_next_echo = true;
        self.sync.last_known_text = new_text.to_string();
        self.flat_text = new_text.to_string();
    }

    /// Reconcile the engine with the current flat-text value.
    ///
    /// Runs whenever the externally held text may have changed for reasons
    /// other than an engine edit. The latch is cleared unconditionally:
    /// a probe that follows an internal change is its echo and must not
    /// mutate the engine, whether or not the values happen to differ.
    pub fn on_external_probe(&mut self, engine: &mut dyn DocumentEngine) {
        if self.sync.suppress_next_echo {
            self.sync.suppress_next_echo = false;
            return;
        }
        let text = self.flat_text.clone();
        if text != self.sync.last_known_text {
            self.apply_external_text(engine, &text);
        }
    }

    /// Replace the whole session content, as on file load or history switch.
    ///
    /// Resets synchronization state; the next probe pushes the new text
    /// into the engine.
    pub fn replace_document(&mut self, path: Option<PathBuf>, text: String) {
        debug!(
            "Replacing document: {}",
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<untitled>".to_string())
        );
        self.path = path;
        self.flat_text = text.clone();
        self.saved_text = text;
        self.sync = SyncState::default();
        self.selected_reference = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{DocumentEvent, MarkdownDocument};

    fn loaded_session(engine: &mut MarkdownDocument, text: &str) -> DocumentSession {
        let mut session = DocumentSession::new();
        session.replace_document(Some(PathBuf::from("/notes/a.md")), text.to_string());
        session.on_external_probe(engine);
        session
    }

    #[test]
    fn test_probe_pushes_loaded_text_into_engine() {
        let mut engine = MarkdownDocument::new();
        let session = loaded_session(&mut engine, "# Notes");
        assert_eq!(engine.text(), "# Notes");
        assert!(!session.is_modified());
    }

    #[test]
    fn test_apply_external_text_is_idempotent() {
        let mut engine = MarkdownDocument::new();
        let mut session = DocumentSession::new();

        session.apply_external_text(&mut engine, "hello");
        let revision = engine.revision();
        // The second application must not touch the engine at all
        session.apply_external_text(&mut engine, "hello");
        assert_eq!(engine.revision(), revision);
        assert_eq!(engine.text(), "hello");
    }

    #[test]
    fn test_internal_change_suppresses_next_probe() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "hello");

        // Simulate a user edit inside the engine
        engine.buffer_mut().push_str(" world");
        engine.notify_edited();
        for event in engine.drain_events() {
            if let DocumentEvent::ContentChanged(text) = event {
                session.on_document_changed(&text);
            }
        }
        assert_eq!(session.flat_text(), "hello world");
        assert!(session.is_modified());

        // The probe that follows must not re-apply the text
        let revision = engine.revision();
        session.on_external_probe(&mut engine);
        assert_eq!(engine.revision(), revision);
        assert_eq!(engine.text(), "hello world");
    }

    #[test]
    fn test_latch_is_one_shot() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "hello");

        session.on_document_changed("hello world");
        session.on_external_probe(&mut engine); // swallowed echo, latch cleared

        // A genuine external change after the echo must go through
        session.replace_document(None, "fresh".to_string());
        session.on_external_probe(&mut engine);
        assert_eq!(engine.text(), "fresh");
    }

    #[test]
    fn test_latch_clears_even_when_texts_match() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "hello");

        // Arm the latch without any actual difference
        session.on_document_changed("hello");
        session.on_external_probe(&mut engine);

        // Latch must be clear now: a real difference is applied
        session.replace_document(None, "other".to_string());
        session.on_external_probe(&mut engine);
        assert_eq!(engine.text(), "other");
    }

    #[test]
    fn test_no_content_drift_through_edit_cycle() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "line one");

        for addition in [" two", " three", " four"] {
            engine.buffer_mut().push_str(addition);
            engine.notify_edited();
            for event in engine.drain_events() {
                if let DocumentEvent::ContentChanged(text) = event {
                    session.on_document_changed(&text);
                }
            }
            session.on_external_probe(&mut engine);
        }

        assert_eq!(engine.text(), "line one two three four");
        assert_eq!(session.flat_text(), engine.text());
    }

    #[test]
    fn test_replace_document_resets_state() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "old");
        session.on_document_changed("old edited");
        session.select_reference(crate::scripture::parse_reference("John 3:16").ok());

        session.replace_document(Some(PathBuf::from("/notes/b.md")), "new".to_string());
        assert!(!session.is_modified());
        assert!(session.selected_reference().is_none());
        assert_eq!(session.path(), Some(&PathBuf::from("/notes/b.md")));

        // Latch from the old document must not swallow the new load
        session.on_external_probe(&mut engine);
        assert_eq!(engine.text(), "new");
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut engine = MarkdownDocument::new();
        let mut session = loaded_session(&mut engine, "text");
        session.on_document_changed("text edited");
        assert!(session.is_modified());

        session.mark_saved(PathBuf::from("/notes/a.md"));
        assert!(!session.is_modified());
    }

    #[test]
    fn test_from_file_starts_clean() {
        let session = DocumentSession::from_file(PathBuf::from("/n/x.md"), "body".to_string());
        assert!(!session.is_modified());
        assert_eq!(session.flat_text(), "body");
    }
}
