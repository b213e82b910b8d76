//! Document history registry
//!
//! Tracks every document opened during and across sessions, with one entry
//! per path and a pointer to the currently active document. Entries keep
//! their list position for the life of the session: re-opening a known
//! document refreshes its timestamp and moves the active pointer, but never
//! reorders the list. The registry is persisted with the settings so history
//! survives restarts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ─────────────────────────────────────────────────────────────────────────────
// History Entry
// ─────────────────────────────────────────────────────────────────────────────

/// One opened document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Absolute path of the document
    pub path: PathBuf,
    /// File name shown in the sidebar
    pub display_name: String,
    /// When the document was last opened
    pub opened_at: SystemTime,
}

impl HistoryEntry {
    fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            display_name,
            opened_at: SystemTime::now(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// The session's document history.
///
/// Invariants: paths are unique across entries, and `active` (when set)
/// indexes a live entry. Callers pass indices straight from the rendered
/// list, so an out-of-bounds index is a bug and fails loudly.
#[derive(Debug, Clone, Default)]
pub struct HistoryRegistry {
    entries: Vec<HistoryEntry>,
    active: Option<usize>,
}

impl HistoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from persisted parts, dropping anything invalid.
    ///
    /// Duplicate paths collapse to their first occurrence and an active
    /// index that no longer points at a live entry is discarded.
    pub fn from_parts(entries: Vec<HistoryEntry>, active: Option<usize>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            if registry.position_of(&entry.path).is_none() {
                registry.entries.push(entry);
            }
        }
        registry.active = active.filter(|&i| i < registry.entries.len());
        registry
    }

    /// Record that the document at `path` was opened and make it active.
    ///
    /// A path already in the registry keeps its position; only its timestamp
    /// is refreshed. Returns the entry's index.
    pub fn record_open(&mut self, path: &Path) -> usize {
        match self.position_of(path) {
            Some(index) => {
                self.entries[index].opened_at = SystemTime::now();
                self.active = Some(index);
                index
            }
            None => {
                self.entries.push(HistoryEntry::new(path.to_path_buf()));
                let index = self.entries.len() - 1;
                self.active = Some(index);
                index
            }
        }
    }

    /// Make the entry at `index` the active document.
    pub fn switch_to(&mut self, index: usize) -> &HistoryEntry {
        assert!(index < self.entries.len(), "history index out of bounds");
        self.entries[index].opened_at = SystemTime::now();
        self.active = Some(index);
        &self.entries[index]
    }

    /// Remove the entry at `index`, repairing the active pointer.
    ///
    /// Removing the active entry falls back to the previous entry (or the
    /// first remaining one); removing an entry before the active one shifts
    /// the pointer down so it keeps naming the same document. The pointer
    /// goes empty only when the registry does.
    pub fn remove(&mut self, index: usize) -> HistoryEntry {
        assert!(index < self.entries.len(), "history index out of bounds");
        let removed = self.entries.remove(index);
        self.active = match self.active {
            Some(active) if active == index => {
                if index > 0 {
                    Some(index - 1)
                } else if self.entries.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        removed
    }

    /// Clear the active pointer without touching the entries.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_entry(&self) -> Option<&HistoryEntry> {
        self.active.map(|i| &self.entries[i])
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose display name contains `query`, case-insensitively,
    /// paired with their registry index.
    ///
    /// An empty query matches everything. The returned indices are registry
    /// positions, valid for [`switch_to`](Self::switch_to) and
    /// [`remove`](Self::remove).
    pub fn filter<'a>(&'a self, query: &str) -> Vec<(usize, &'a HistoryEntry)> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| query.is_empty() || e.display_name.to_lowercase().contains(&query))
            .collect()
    }

    fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(format!("/notes/{}", name))
    }

    #[test]
    fn test_record_open_appends_and_activates() {
        let mut registry = HistoryRegistry::new();
        let index = registry.record_open(&path("a.md"));
        assert_eq!(index, 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.active_entry().unwrap().display_name, "a.md");
    }

    #[test]
    fn test_record_open_dedup_keeps_position() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));
        // Re-opening "a.md" must not append or reorder
        let index = registry.record_open(&path("a.md"));

        assert_eq!(index, 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.entries()[0].display_name, "a.md");
        assert_eq!(registry.entries()[1].display_name, "b.md");
    }

    #[test]
    fn test_record_open_refreshes_timestamp() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        let first = registry.entries()[0].opened_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        registry.record_open(&path("a.md"));
        assert!(registry.entries()[0].opened_at > first);
    }

    #[test]
    fn test_switch_to_moves_active_pointer() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));

        let entry = registry.switch_to(0);
        assert_eq!(entry.display_name, "a.md");
        assert_eq!(registry.active_index(), Some(0));
    }

    #[test]
    fn test_remove_before_active_shifts_pointer() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("x.md"));
        registry.record_open(&path("y.md"));
        registry.record_open(&path("z.md"));
        assert_eq!(registry.active_index(), Some(2));

        registry.remove(1);
        // The pointer still names "z.md"
        assert_eq!(registry.active_index(), Some(1));
        assert_eq!(registry.active_entry().unwrap().display_name, "z.md");
    }

    #[test]
    fn test_remove_active_falls_back_to_previous() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));

        registry.remove(1);
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.active_entry().unwrap().display_name, "a.md");
    }

    #[test]
    fn test_remove_active_head_falls_back_to_new_head() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));
        registry.switch_to(0);

        registry.remove(0);
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.active_entry().unwrap().display_name, "b.md");
    }

    #[test]
    fn test_remove_after_active_keeps_pointer() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));
        registry.switch_to(0);

        registry.remove(1);
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.active_entry().unwrap().display_name, "a.md");
    }

    #[test]
    fn test_remove_last_entry_empties_registry() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        let removed = registry.remove(0);
        assert_eq!(removed.display_name, "a.md");
        assert!(registry.is_empty());
        assert_eq!(registry.active_index(), None);
    }

    #[test]
    #[should_panic(expected = "history index out of bounds")]
    fn test_remove_out_of_bounds_panics() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.remove(1);
    }

    #[test]
    #[should_panic(expected = "history index out of bounds")]
    fn test_switch_to_out_of_bounds_panics() {
        let mut registry = HistoryRegistry::new();
        registry.switch_to(0);
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("Sermon Notes.md"));
        registry.record_open(&path("groceries.md"));
        registry.record_open(&path("sermon-draft.md"));

        let hits = registry.filter("SERMON");
        let indices: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);

        // Filtered indices still address the registry
        assert_eq!(registry.switch_to(indices[1]).display_name, "sermon-draft.md");
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        let mut registry = HistoryRegistry::new();
        registry.record_open(&path("a.md"));
        registry.record_open(&path("b.md"));
        assert_eq!(registry.filter("").len(), 2);
        assert!(registry.filter("zzz").is_empty());
    }

    #[test]
    fn test_from_parts_collapses_duplicates_and_validates_active() {
        let entries = vec![
            HistoryEntry::new(path("a.md")),
            HistoryEntry::new(path("b.md")),
            HistoryEntry::new(path("a.md")),
        ];
        let registry = HistoryRegistry::from_parts(entries.clone(), Some(2));
        assert_eq!(registry.len(), 2);
        // Index 2 no longer exists after dedup
        assert_eq!(registry.active_index(), None);

        let registry = HistoryRegistry::from_parts(entries, Some(1));
        assert_eq!(registry.active_index(), Some(1));
    }
}
