//! Verse reference parsing and formatting
//!
//! A reference names a book, a chapter, and a verse or verse range, e.g.
//! `2 Peter 3:4-5`. Raw reference text (already stripped of its enclosing
//! brackets) is resolved against the static book table, testing candidate
//! book names longest-first so that "1 John" wins over "John".

use crate::scripture::books::{books_longest_first, find_book, Book};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Resolved Reference
// ─────────────────────────────────────────────────────────────────────────────

/// A fully resolved verse reference.
///
/// Invariants: `book` is a known entry in the static book table, `chapter`
/// and `verse_start` are positive, and `verse_end` (when present) is at
/// least `verse_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    /// Canonical book name from the static table
    pub book: String,
    /// Chapter number (1-based)
    pub chapter: u32,
    /// First verse of the reference (1-based)
    pub verse_start: u32,
    /// Last verse for a range reference, `None` for a single verse
    pub verse_end: Option<u32>,
}

impl VerseReference {
    /// Look up this reference's book metadata in the static table.
    ///
    /// Always succeeds for references produced by [`parse_reference`].
    pub fn book_info(&self) -> Option<&'static Book> {
        find_book(&self.book)
    }

    /// Format as bracketed editor text, e.g. `[2 Peter 3:4-5]`.
    pub fn bracketed(&self) -> String {
        format!("[{}]", self)
    }

    /// Whether the given verse number falls inside this reference.
    pub fn contains_verse(&self, number: u32) -> bool {
        match self.verse_end {
            Some(end) => number >= self.verse_start && number <= end,
            None => number == self.verse_start,
        }
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verse_end {
            Some(end) => write!(
                f,
                "{} {}:{}-{}",
                self.book, self.chapter, self.verse_start, end
            ),
            None => write!(f, "{} {}:{}", self.book, self.chapter, self.verse_start),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution Failures
// ─────────────────────────────────────────────────────────────────────────────

/// Why a raw reference failed to resolve.
///
/// These are validation failures, reported to the caller as "no resolution";
/// they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No book name in the static table matches the start of the text
    UnknownBook,
    /// A book matched but the chapter:verse part is malformed or non-positive
    Malformed,
    /// The verse range runs backwards (end before start)
    InvertedRange { start: u32, end: u32 },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownBook => write!(f, "unknown book name"),
            ResolveError::Malformed => write!(f, "malformed chapter:verse reference"),
            ResolveError::InvertedRange { start, end } => {
                write!(f, "inverted verse range {}-{}", start, end)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse raw reference text (without brackets) into a [`VerseReference`].
///
/// Candidate book names are tested longest-first against the start of the
/// text; the remainder must match `chapter:verse` or `chapter:verse-verse`
/// exactly. Inverted ranges are rejected, not corrected.
pub fn parse_reference(raw: &str) -> Result<VerseReference, ResolveError> {
    let raw = raw.trim();

    for book in books_longest_first() {
        if let Some(rest) = raw.strip_prefix(book.name) {
            let rest = rest.trim();
            match parse_chapter_verse(rest) {
                Some((chapter, verse_start, verse_end)) => {
                    if chapter == 0 || verse_start == 0 {
                        return Err(ResolveError::Malformed);
                    }
                    if let Some(end) = verse_end {
                        if end < verse_start {
                            return Err(ResolveError::InvertedRange {
                                start: verse_start,
                                end,
                            });
                        }
                    }
                    return Ok(VerseReference {
                        book: book.name.to_string(),
                        chapter,
                        verse_start,
                        verse_end,
                    });
                }
                // This book is a prefix but the remainder isn't chapter:verse;
                // a shorter book name may still match.
                None => continue,
            }
        }
    }

    Err(ResolveError::UnknownBook)
}

/// Parse `chapter:verse` or `chapter:verse-verse`, consuming the whole input.
fn parse_chapter_verse(text: &str) -> Option<(u32, u32, Option<u32>)> {
    let (chapter_part, verse_part) = text.split_once(':')?;
    let chapter: u32 = parse_number(chapter_part)?;

    match verse_part.split_once('-') {
        Some((start_part, end_part)) => {
            let start = parse_number(start_part)?;
            let end = parse_number(end_part)?;
            Some((chapter, start, Some(end)))
        }
        None => {
            let start = parse_number(verse_part)?;
            Some((chapter, start, None))
        }
    }
}

/// Parse a run of ASCII digits with no surrounding junk.
fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
