//! Central application state
//!
//! `AppState` holds all runtime state: the open document session, the live
//! document engine, the history registry, pinned verses, the lookup worker,
//! user settings, and UI flags. The eframe app layer is a thin shell over
//! the operations defined here.

use crate::config::{load_config, save_config_silent, Settings};
use crate::editor::{DocumentEngine, DocumentEvent, MarkdownDocument};
use crate::files::{read_file, write_file};
use crate::history::HistoryRegistry;
use crate::scripture::{
    LookupOutcome, LookupWorker, PinnedVerses, ReferenceScanner, Verse, VerseReference,
};
use crate::session::DocumentSession;
use log::{debug, info, warn};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Lookup Status
// ─────────────────────────────────────────────────────────────────────────────

/// State of the verses panel for the current selection.
#[derive(Debug, Clone, Default)]
pub enum LookupStatus {
    /// No reference selected
    #[default]
    Idle,
    /// A request is in flight for this reference
    Pending(VerseReference),
    /// Verses arrived for this reference
    Loaded {
        reference: VerseReference,
        verses: Vec<Verse>,
    },
    /// The request failed; shown in the panel, retried only by re-clicking
    Failed {
        reference: VerseReference,
        message: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the book picker dialog is open
    pub show_book_picker: bool,
    /// Whether the settings window is open
    pub show_settings: bool,
    /// Search query over the history list
    pub history_query: String,
    /// Whether a confirmation dialog is open (unsaved changes)
    pub show_confirm_dialog: bool,
    /// Message for the confirmation dialog
    pub confirm_dialog_message: String,
    /// Pending action after confirmation
    pub pending_action: Option<PendingAction>,
    /// Whether to show the error modal
    pub show_error_modal: bool,
    /// Error message for the modal
    pub error_message: String,
    /// Temporary toast message
    pub toast_message: Option<String>,
    /// When the toast should expire (seconds since app start)
    pub toast_expires_at: Option<f64>,
}

/// Actions that may need confirmation before execution.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Create a new document (replacing current)
    NewDocument,
    /// Open a file (replacing current)
    OpenFile(PathBuf),
    /// Switch to a history entry
    SwitchHistory(usize),
    /// Exit the application
    Exit,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
pub struct AppState {
    /// The live document engine behind the editor widget
    pub document: MarkdownDocument,
    /// The open document session (flat text, sync state, selection)
    pub session: DocumentSession,
    /// Document history registry
    pub history: HistoryRegistry,
    /// Pinned verse references
    pub pinned: PinnedVerses,
    /// State of the current verse lookup
    pub lookup_status: LookupStatus,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    scanner: ReferenceScanner,
    lookup: LookupWorker,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    ///
    /// Restores the history registry and re-opens the previously active
    /// document when there was one; a file that vanished since the last
    /// session just deactivates the pointer.
    pub fn new() -> Self {
        Self::with_settings(load_config())
    }

    /// Create an AppState from explicit settings (no config file access).
    pub fn with_settings(settings: Settings) -> Self {
        let history =
            HistoryRegistry::from_parts(settings.history.clone(), settings.active_history_index);
        let lookup = LookupWorker::new(&settings.translation);

        let mut state = Self {
            document: MarkdownDocument::new(),
            session: DocumentSession::new(),
            history,
            pinned: PinnedVerses::new(),
            lookup_status: LookupStatus::Idle,
            settings,
            ui: UiState::default(),
            scanner: ReferenceScanner::new(),
            lookup,
            settings_dirty: false,
        };
        state.restore_active_document();
        state
    }

    fn restore_active_document(&mut self) {
        let Some(entry) = self.history.active_entry() else {
            return;
        };
        let path = entry.path.clone();
        match read_file(&path) {
            Ok(text) => {
                info!("Restored document from last session: {}", path.display());
                self.session.replace_document(Some(path), text);
            }
            Err(e) => {
                warn!("Could not restore previous document: {}", e);
                self.history.deactivate();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-Frame Synchronization
    // ─────────────────────────────────────────────────────────────────────────

    /// Drain engine notifications and reconcile flat text with the engine.
    ///
    /// Runs once per frame, after the editor widget. Edits flow out of the
    /// engine into the session first; the probe then pushes any externally
    /// originated text (file load, history switch) into the engine, with
    /// the echo of an internal edit swallowed by the session's latch.
    pub fn sync_document(&mut self) {
        for event in self.document.drain_events() {
            if let DocumentEvent::ContentChanged(text) = event {
                self.session.on_document_changed(&text);
            }
        }
        self.session.on_external_probe(&mut self.document);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Selection & Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the pointer at `offset` rests on a reference token.
    pub fn is_over_reference(&self, offset: usize) -> bool {
        self.scanner.is_over_token(self.document.text(), offset)
    }

    /// Handle a click at a text offset: resolve the token under it, select
    /// the reference, and fire a lookup for it.
    pub fn click_at_offset(&mut self, offset: usize) {
        match self.scanner.resolve_at(self.document.text(), offset) {
            Some(Ok(reference)) => self.select_reference(reference),
            Some(Err(e)) => {
                debug!("Reference under pointer failed to resolve: {}", e);
                self.show_toast(format!("Cannot resolve reference: {}", e));
            }
            None => {}
        }
    }

    /// Select a reference and request its verses.
    pub fn select_reference(&mut self, reference: VerseReference) {
        info!("Selected reference {}", reference);
        self.session.select_reference(Some(reference.clone()));
        self.lookup_status = LookupStatus::Pending(reference.clone());
        self.lookup.request(reference);
    }

    /// Poll the lookup worker and apply any completed outcomes.
    pub fn poll_lookups(&mut self) {
        for outcome in self.lookup.poll_outcomes() {
            self.apply_lookup_outcome(outcome);
        }
    }

    /// Apply one lookup outcome, discarding it when stale.
    ///
    /// An outcome is stale when its reference no longer matches the current
    /// selection; applying it would let a slow response overwrite a newer
    /// one.
    fn apply_lookup_outcome(&mut self, outcome: LookupOutcome) {
        let current = self.session.selected_reference();
        if current != Some(outcome.reference()) {
            debug!("Discarding stale lookup outcome for {}", outcome.reference());
            return;
        }
        self.lookup_status = match outcome {
            LookupOutcome::Loaded { reference, verses } => {
                LookupStatus::Loaded { reference, verses }
            }
            LookupOutcome::Failed { reference, message } => {
                warn!("Verse lookup for {} failed: {}", reference, message);
                LookupStatus::Failed { reference, message }
            }
        };
    }

    /// Pin or unpin the currently loaded reference.
    pub fn toggle_pin_current(&mut self) {
        if let LookupStatus::Loaded { reference, verses } = &self.lookup_status {
            self.pinned.toggle(reference.clone(), verses.clone());
        }
    }

    /// Change the lookup translation.
    pub fn set_translation(&mut self, translation: String) {
        self.lookup.set_translation(&translation);
        self.settings.translation = translation;
        self.settings_dirty = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Request a new empty document, asking for confirmation when the
    /// current one has unsaved changes.
    pub fn request_new_document(&mut self) {
        if self.session.is_modified() {
            self.confirm(PendingAction::NewDocument, "Discard unsaved changes?");
        } else {
            self.new_document();
        }
    }

    fn new_document(&mut self) {
        self.session.replace_document(None, String::new());
        self.history.deactivate();
        self.lookup_status = LookupStatus::Idle;
        self.settings_dirty = true;
    }

    /// Request opening a file, asking for confirmation when needed.
    pub fn request_open(&mut self, path: PathBuf) {
        if self.session.is_modified() {
            self.confirm(
                PendingAction::OpenFile(path),
                "Discard unsaved changes and open another file?",
            );
        } else {
            self.open_path(path);
        }
    }

    /// Open a file, replacing the current document on success.
    ///
    /// A read failure surfaces in the error modal and leaves the session
    /// and history untouched.
    pub fn open_path(&mut self, path: PathBuf) {
        match read_file(&path) {
            Ok(text) => {
                self.session.replace_document(Some(path.clone()), text);
                self.history.record_open(&path);
                self.lookup_status = LookupStatus::Idle;
                self.settings_dirty = true;
                self.show_toast(format!("Opened {}", display_name(&path)));
            }
            Err(e) => self.show_error(format!("Failed to open file:\n{}", e)),
        }
    }

    /// Save the current document to its known path.
    ///
    /// Returns `false` when the document has no path yet and the caller
    /// should run the save-as dialog instead.
    pub fn save(&mut self) -> bool {
        let Some(path) = self.session.path().cloned() else {
            return false;
        };
        self.save_to(path);
        true
    }

    /// Save the current document to `path` and adopt it as the document's
    /// path.
    pub fn save_to(&mut self, path: PathBuf) {
        match write_file(&path, self.session.flat_text()) {
            Ok(()) => {
                self.session.mark_saved(path.clone());
                self.history.record_open(&path);
                self.settings_dirty = true;
                self.show_toast(format!("Saved {}", display_name(&path)));
            }
            Err(e) => self.show_error(format!("Failed to save file:\n{}", e)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // History Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Request switching to a history entry, confirming unsaved changes.
    pub fn request_switch_history(&mut self, index: usize) {
        if self.history.active_index() == Some(index) {
            return;
        }
        if self.session.is_modified() {
            self.confirm(
                PendingAction::SwitchHistory(index),
                "Discard unsaved changes and switch documents?",
            );
        } else {
            self.switch_history(index);
        }
    }

    fn switch_history(&mut self, index: usize) {
        let path = self.history.entries()[index].path.clone();
        match read_file(&path) {
            Ok(text) => {
                self.history.switch_to(index);
                self.session.replace_document(Some(path), text);
                self.lookup_status = LookupStatus::Idle;
                self.settings_dirty = true;
            }
            Err(e) => self.show_error(format!("Failed to open file:\n{}", e)),
        }
    }

    /// Remove a history entry.
    ///
    /// When the removed entry is the open document, the session follows the
    /// repaired active pointer, falling back to a fresh document when the
    /// registry emptied.
    pub fn remove_history(&mut self, index: usize) {
        let removed = self.history.remove(index);
        self.settings_dirty = true;

        if self.session.path() != Some(&removed.path) {
            return;
        }
        match self.history.active_entry() {
            Some(entry) => {
                let path = entry.path.clone();
                match read_file(&path) {
                    Ok(text) => {
                        self.session.replace_document(Some(path), text);
                        self.lookup_status = LookupStatus::Idle;
                    }
                    Err(e) => {
                        warn!("Could not open fallback document: {}", e);
                        self.history.deactivate();
                        self.new_document();
                    }
                }
            }
            None => self.new_document(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark them as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Save settings to the config file if modified.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            self.settings.history = self.history.entries().to_vec();
            self.settings.active_history_index = self.history.active_index();

            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Confirmation & Notifications
    // ─────────────────────────────────────────────────────────────────────────

    fn confirm(&mut self, action: PendingAction, message: &str) {
        self.ui.pending_action = Some(action);
        self.ui.confirm_dialog_message = message.to_string();
        self.ui.show_confirm_dialog = true;
    }

    /// Request application exit.
    ///
    /// Returns `true` if exit can proceed immediately, `false` if
    /// confirmation is needed.
    pub fn request_exit(&mut self) -> bool {
        if self.session.is_modified() {
            self.confirm(PendingAction::Exit, "You have unsaved changes. Exit anyway?");
            false
        } else {
            true
        }
    }

    /// Handle a confirmed pending action.
    ///
    /// Returns `true` when the confirmed action was `Exit`.
    pub fn handle_confirmed_action(&mut self) -> bool {
        let mut exit = false;
        if let Some(action) = self.ui.pending_action.take() {
            match action {
                PendingAction::NewDocument => self.new_document(),
                PendingAction::OpenFile(path) => self.open_path(path),
                PendingAction::SwitchHistory(index) => self.switch_history(index),
                PendingAction::Exit => {
                    debug!("Exit confirmed");
                    exit = true;
                }
            }
        }
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
        exit
    }

    /// Cancel the pending action.
    pub fn cancel_pending_action(&mut self) {
        self.ui.pending_action = None;
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
    }

    /// Show a short-lived toast message.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.toast_message = Some(message.into());
        // Expiry is stamped by the app layer, which knows the frame clock
        self.ui.toast_expires_at = None;
    }

    /// Show the error modal.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.ui.error_message = message;
        self.ui.show_error_modal = true;
    }

    /// Window title, with a modified marker.
    pub fn window_title(&self) -> String {
        let name = self
            .session
            .path()
            .map(|p| display_name(p))
            .unwrap_or_else(|| "Untitled".to_string());
        if self.session.is_modified() {
            format!("{} • Lectern", name)
        } else {
            format!("{} - Lectern", name)
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripture::parse_reference;

    fn state() -> AppState {
        AppState::with_settings(Settings::default())
    }

    fn temp_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_path_loads_document_and_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_doc(&dir, "a.md", "# Study");
        let mut state = state();

        state.open_path(path.clone());
        assert_eq!(state.session.flat_text(), "# Study");
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.active_index(), Some(0));

        // The probe pushes the loaded text into the engine
        state.sync_document();
        assert_eq!(state.document.text(), "# Study");
    }

    #[test]
    fn test_open_missing_path_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        state.open_path(dir.path().join("missing.md"));

        assert!(state.ui.show_error_modal);
        assert!(state.history.is_empty());
        assert_eq!(state.session.flat_text(), "");
    }

    #[test]
    fn test_save_without_path_defers_to_save_as() {
        let mut state = state();
        assert!(!state.save());
    }

    #[test]
    fn test_save_to_writes_and_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();

        state.document.buffer_mut().push_str("notes");
        state.document.notify_edited();
        state.sync_document();
        assert!(state.session.is_modified());

        let path = dir.path().join("new.md");
        state.save_to(path.clone());
        assert!(!state.session.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "notes");
        assert_eq!(state.history.active_index(), Some(0));
    }

    #[test]
    fn test_switch_history_loads_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = temp_doc(&dir, "a.md", "alpha");
        let b = temp_doc(&dir, "b.md", "beta");
        let mut state = state();

        state.open_path(a);
        state.open_path(b);
        state.request_switch_history(0);

        assert_eq!(state.history.active_index(), Some(0));
        assert_eq!(state.session.flat_text(), "alpha");
    }

    #[test]
    fn test_remove_open_history_entry_follows_repaired_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let a = temp_doc(&dir, "a.md", "alpha");
        let b = temp_doc(&dir, "b.md", "beta");
        let mut state = state();

        state.open_path(a);
        state.open_path(b);
        // Removing the open document falls back to the previous entry
        state.remove_history(1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.session.flat_text(), "alpha");
    }

    #[test]
    fn test_remove_last_history_entry_yields_fresh_document() {
        let dir = tempfile::tempdir().unwrap();
        let a = temp_doc(&dir, "a.md", "alpha");
        let mut state = state();

        state.open_path(a);
        state.remove_history(0);
        assert!(state.history.is_empty());
        assert_eq!(state.session.flat_text(), "");
        assert!(state.session.path().is_none());
    }

    #[test]
    fn test_unsaved_changes_gate_destructive_actions() {
        let mut state = state();
        state.session.on_document_changed("unsaved");

        state.request_new_document();
        assert!(state.ui.show_confirm_dialog);
        assert_eq!(state.ui.pending_action, Some(PendingAction::NewDocument));

        // Confirming performs the action
        assert!(!state.handle_confirmed_action());
        assert_eq!(state.session.flat_text(), "");
        assert!(!state.ui.show_confirm_dialog);
    }

    #[test]
    fn test_cancel_pending_action() {
        let mut state = state();
        state.session.on_document_changed("unsaved");
        state.request_new_document();

        state.cancel_pending_action();
        assert!(state.ui.pending_action.is_none());
        assert_eq!(state.session.flat_text(), "unsaved");
    }

    #[test]
    fn test_request_exit_needs_confirmation_when_modified() {
        let mut state = state();
        assert!(state.request_exit());

        state.session.on_document_changed("unsaved");
        assert!(!state.request_exit());
        assert!(state.handle_confirmed_action());
    }

    #[test]
    fn test_stale_lookup_outcome_is_discarded() {
        let mut state = state();
        let old = parse_reference("John 3:16").unwrap();
        let new = parse_reference("Romans 8:28").unwrap();

        // Selection moved on while the first request was in flight
        state.session.select_reference(Some(new.clone()));
        state.lookup_status = LookupStatus::Pending(new.clone());

        state.apply_lookup_outcome(LookupOutcome::Loaded {
            reference: old,
            verses: vec![],
        });
        assert!(matches!(state.lookup_status, LookupStatus::Pending(_)));

        // The matching outcome lands
        state.apply_lookup_outcome(LookupOutcome::Loaded {
            reference: new,
            verses: vec![],
        });
        assert!(matches!(state.lookup_status, LookupStatus::Loaded { .. }));
    }

    #[test]
    fn test_failed_outcome_is_terminal() {
        let mut state = state();
        let reference = parse_reference("John 3:16").unwrap();
        state.session.select_reference(Some(reference.clone()));
        state.lookup_status = LookupStatus::Pending(reference.clone());

        state.apply_lookup_outcome(LookupOutcome::Failed {
            reference,
            message: "timeout".to_string(),
        });
        assert!(matches!(state.lookup_status, LookupStatus::Failed { .. }));
    }

    #[test]
    fn test_click_on_reference_selects_it() {
        let mut state = state();
        state.document.set_content("see [John 3:16] here");
        state.session.replace_document(None, "see [John 3:16] here".to_string());
        state.sync_document();

        state.click_at_offset(8);
        assert_eq!(
            state.session.selected_reference(),
            Some(&parse_reference("John 3:16").unwrap())
        );
        assert!(matches!(state.lookup_status, LookupStatus::Pending(_)));
    }

    #[test]
    fn test_click_outside_reference_keeps_selection() {
        let mut state = state();
        state.session.replace_document(None, "see [John 3:16] here".to_string());
        state.sync_document();

        state.click_at_offset(8);
        state.click_at_offset(0);
        assert!(state.session.selected_reference().is_some());
    }

    #[test]
    fn test_hover_detection() {
        let mut state = state();
        state.session.replace_document(None, "see [John 3:16] here".to_string());
        state.sync_document();

        assert!(state.is_over_reference(8));
        assert!(!state.is_over_reference(1));
    }

    #[test]
    fn test_toggle_pin_current_requires_loaded_verses() {
        let mut state = state();
        state.toggle_pin_current();
        assert!(state.pinned.is_empty());

        let reference = parse_reference("John 3:16").unwrap();
        state.lookup_status = LookupStatus::Loaded {
            reference: reference.clone(),
            verses: vec![],
        };
        state.toggle_pin_current();
        assert!(state.pinned.contains(&reference));

        state.toggle_pin_current();
        assert!(state.pinned.is_empty());
    }

    #[test]
    fn test_window_title_marks_modified() {
        let mut state = state();
        assert_eq!(state.window_title(), "Untitled - Lectern");
        state.session.on_document_changed("x");
        assert!(state.window_title().contains('•'));
    }
}
