//! Pinned verse references
//!
//! Users can pin a looked-up reference so it stays visible in the sidebar
//! while they keep writing. Pins are an ordered set keyed by the formatted
//! reference text, so pinning the same reference twice toggles it off.

use crate::scripture::lookup::Verse;
use crate::scripture::reference::VerseReference;
use log::debug;

/// One pinned reference together with the verses fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedVerse {
    pub reference: VerseReference,
    pub verses: Vec<Verse>,
}

/// Ordered collection of pinned references, oldest first.
#[derive(Debug, Clone, Default)]
pub struct PinnedVerses {
    entries: Vec<PinnedVerse>,
}

impl PinnedVerses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference, or unpin it if it is already pinned.
    ///
    /// Returns `true` when the reference is pinned after the call.
    pub fn toggle(&mut self, reference: VerseReference, verses: Vec<Verse>) -> bool {
        if let Some(pos) = self.position_of(&reference) {
            debug!("Unpinning {}", reference);
            self.entries.remove(pos);
            false
        } else {
            debug!("Pinning {}", reference);
            self.entries.push(PinnedVerse { reference, verses });
            true
        }
    }

    /// Remove the pin at the given list position.
    pub fn remove(&mut self, index: usize) {
        assert!(index < self.entries.len(), "pin index out of bounds");
        self.entries.remove(index);
    }

    pub fn contains(&self, reference: &VerseReference) -> bool {
        self.position_of(reference).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinnedVerse> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, reference: &VerseReference) -> Option<usize> {
        // Keyed by formatted text so equal references compare equal even if
        // they were produced by separate lookups.
        let key = reference.to_string();
        self.entries
            .iter()
            .position(|p| p.reference.to_string() == key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripture::reference::parse_reference;

    fn verses(n: u32) -> Vec<Verse> {
        vec![Verse {
            number: n,
            text: format!("verse {}", n),
        }]
    }

    #[test]
    fn test_toggle_pins_then_unpins() {
        let mut pinned = PinnedVerses::new();
        let reference = parse_reference("John 3:16").unwrap();

        assert!(pinned.toggle(reference.clone(), verses(16)));
        assert_eq!(pinned.len(), 1);
        assert!(pinned.contains(&reference));

        assert!(!pinned.toggle(reference.clone(), verses(16)));
        assert!(pinned.is_empty());
        assert!(!pinned.contains(&reference));
    }

    #[test]
    fn test_pins_keep_insertion_order() {
        let mut pinned = PinnedVerses::new();
        pinned.toggle(parse_reference("John 3:16").unwrap(), verses(16));
        pinned.toggle(parse_reference("Romans 8:28").unwrap(), verses(28));
        pinned.toggle(parse_reference("Jude 1:3").unwrap(), verses(3));

        let books: Vec<&str> = pinned.iter().map(|p| p.reference.book.as_str()).collect();
        assert_eq!(books, vec!["John", "Romans", "Jude"]);
    }

    #[test]
    fn test_remove_by_index() {
        let mut pinned = PinnedVerses::new();
        pinned.toggle(parse_reference("John 3:16").unwrap(), verses(16));
        pinned.toggle(parse_reference("Romans 8:28").unwrap(), verses(28));

        pinned.remove(0);
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned.iter().next().unwrap().reference.book, "Romans");
    }

    #[test]
    #[should_panic(expected = "pin index out of bounds")]
    fn test_remove_out_of_bounds_panics() {
        let mut pinned = PinnedVerses::new();
        pinned.remove(0);
    }

    #[test]
    fn test_toggle_distinguishes_ranges() {
        let mut pinned = PinnedVerses::new();
        pinned.toggle(parse_reference("2 Peter 3:4").unwrap(), verses(4));
        // A range over the same start verse is a different pin
        pinned.toggle(parse_reference("2 Peter 3:4-5").unwrap(), verses(4));
        assert_eq!(pinned.len(), 2);
    }
}
