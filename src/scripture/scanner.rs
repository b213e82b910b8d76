//! Reference token scanning and pointer hit-testing
//!
//! This module locates bracketed verse references like `[2 Peter 3:4-5]` in
//! the document's flat-text projection and picks the best token for a given
//! text offset (resolved from a pointer position by the editor widget).
//!
//! Scanning is purely lexical: a token only has to match the bracket grammar.
//! Semantic resolution against the book table happens separately, so an
//! unknown book still produces a token but fails to resolve.

use crate::scripture::reference::{parse_reference, ResolveError, VerseReference};
use regex::Regex;

/// Bracketed reference grammar: `[Book 3:16]` or `[Book 3:4-5]`.
///
/// The book-name part is a greedy run of letters, digits, and spaces up to
/// the final digit group that reads as `chapter:verse[-verse]`.
const TOKEN_PATTERN: &str = r"\[([A-Za-z0-9 ]+?)\s+(\d+):(\d+)(?:-(\d+))?\]";

// ─────────────────────────────────────────────────────────────────────────────
// Reference Token
// ─────────────────────────────────────────────────────────────────────────────

/// A bracketed reference span found in the text.
///
/// `start..end` is a half-open byte range over the scanned text, covering
/// the brackets themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceToken {
    /// Byte offset of the opening bracket
    pub start: usize,
    /// Byte offset one past the closing bracket
    pub end: usize,
    /// The matched text, brackets included
    pub raw: String,
}

impl ReferenceToken {
    /// The reference text without its enclosing brackets.
    pub fn reference_text(&self) -> &str {
        self.raw
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(&self.raw)
    }

    /// Whether the given offset falls on this token.
    ///
    /// Inclusive of both ends so a pointer resting on either bracket
    /// still counts as a hit.
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Distance from the offset to the token's midpoint, scaled by two to
    /// stay in integer arithmetic.
    fn midpoint_distance(&self, offset: usize) -> usize {
        (2 * offset).abs_diff(self.start + self.end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// Scans text for reference tokens and resolves hits under a text offset.
#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    pattern: Regex,
}

impl ReferenceScanner {
    pub fn new() -> Self {
        Self {
            // The pattern is a compile-time constant; failure here is a bug.
            pattern: Regex::new(TOKEN_PATTERN).expect("reference token pattern is valid"),
        }
    }

    /// Find all reference tokens in the text, left to right.
    ///
    /// Matches are non-overlapping by construction: each match consumes its
    /// span and scanning resumes after its end, so the returned tokens have
    /// pairwise-disjoint spans in non-decreasing start order.
    pub fn scan(&self, text: &str) -> Vec<ReferenceToken> {
        self.pattern
            .find_iter(text)
            .map(|m| ReferenceToken {
                start: m.start(),
                end: m.end(),
                raw: m.as_str().to_string(),
            })
            .collect()
    }

    /// Find the token under the given text offset, if any.
    ///
    /// When adjacent tokens abut, an offset on the shared boundary is inside
    /// both; the token whose midpoint is closest wins, with ties broken by
    /// the earlier start offset.
    pub fn token_at<'a>(
        &self,
        tokens: &'a [ReferenceToken],
        offset: usize,
    ) -> Option<&'a ReferenceToken> {
        let mut best: Option<&ReferenceToken> = None;
        for token in tokens.iter().filter(|t| t.contains_offset(offset)) {
            // Strict comparison keeps the earliest-started token on a tie,
            // since tokens arrive in start order.
            match best {
                Some(b) if token.midpoint_distance(offset) >= b.midpoint_distance(offset) => {}
                _ => best = Some(token),
            }
        }
        best
    }

    /// Scan the text and resolve the token under `offset` into a reference.
    ///
    /// Returns `None` when no token contains the offset, and
    /// `Some(Err(_))` when a token is there but fails semantic resolution
    /// (unknown book, inverted range).
    pub fn resolve_at(
        &self,
        text: &str,
        offset: usize,
    ) -> Option<Result<VerseReference, ResolveError>> {
        let tokens = self.scan(text);
        self.token_at(&tokens, offset)
            .map(|token| parse_reference(token.reference_text()))
    }

    /// Whether the offset rests on any token at all.
    ///
    /// Used for the hover cursor affordance on every pointer movement, so it
    /// performs no resolution and has no side effects.
    pub fn is_over_token(&self, text: &str, offset: usize) -> bool {
        self.scan(text).iter().any(|t| t.contains_offset(offset))
    }
}

impl Default for ReferenceScanner {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new()
    }

    #[test]
    fn test_scan_finds_single_token() {
        let text = "See [John 3:16] for details.";
        let tokens = scanner().scan(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw, "[John 3:16]");
        assert_eq!(tokens[0].start, 4);
        assert_eq!(tokens[0].end, 15);
    }

    #[test]
    fn test_scan_finds_range_token() {
        let tokens = scanner().scan("[2 Peter 3:4-5]");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].reference_text(), "2 Peter 3:4-5");
    }

    #[test]
    fn test_scan_tokens_are_disjoint_and_ordered() {
        let text = "[John 3:16] middle [Romans 8:28] and [Jude 1:3] end";
        let tokens = scanner().scan(text);
        assert_eq!(tokens.len(), 3);
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_scan_empty_text() {
        assert!(scanner().scan("").is_empty());
        assert!(scanner().scan("no references here").is_empty());
    }

    #[test]
    fn test_scan_ignores_malformed_brackets() {
        // Missing colon, missing closing bracket, empty brackets
        let tokens = scanner().scan("[John 316] [John 3:16 []");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_scan_syntactic_match_with_unknown_book() {
        // The bracket grammar matches even though the book is unknown;
        // resolution is a separate step and fails there.
        let tokens = scanner().scan("[Nonexistent 1:1]");
        assert_eq!(tokens.len(), 1);
        assert!(parse_reference(tokens[0].reference_text()).is_err());
    }

    #[test]
    fn test_token_at_inside_span() {
        let s = scanner();
        let text = "see [John 3:16] here";
        let tokens = s.scan(text);
        assert!(s.token_at(&tokens, 8).is_some());
        assert!(s.token_at(&tokens, 0).is_none());
        assert!(s.token_at(&tokens, 18).is_none());
    }

    #[test]
    fn test_token_at_inclusive_ends() {
        let s = scanner();
        let tokens = s.scan("[John 3:16]");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 11);
        assert!(s.token_at(&tokens, 0).is_some());
        assert!(s.token_at(&tokens, 11).is_some());
        assert!(s.token_at(&tokens, 12).is_none());
    }

    #[test]
    fn test_token_at_adjacent_tokens_midpoint_tiebreak() {
        // Two abutting synthetic tokens A=[0,10) and B=[10,20); offset 10 is
        // inside both. Midpoints are 5 and 15, both distance 5 away, so the
        // earlier token wins the tie.
        let a = ReferenceToken {
            start: 0,
            end: 10,
            raw: "[A 1:1]".to_string(),
        };
        let b = ReferenceToken {
            start: 10,
            end: 20,
            raw: "[B 1:1]".to_string(),
        };
        let tokens = vec![a.clone(), b];
        let hit = scanner().token_at(&tokens, 10).unwrap();
        assert_eq!(*hit, a);
    }

    #[test]
    fn test_token_at_adjacent_tokens_closer_midpoint_wins() {
        // B is shorter, so its midpoint is closer to the shared boundary.
        let a = ReferenceToken {
            start: 0,
            end: 10,
            raw: "[A 1:1]".to_string(),
        };
        let b = ReferenceToken {
            start: 10,
            end: 14,
            raw: "[B 1:1]".to_string(),
        };
        let tokens = vec![a, b.clone()];
        let hit = scanner().token_at(&tokens, 10).unwrap();
        assert_eq!(*hit, b);
    }

    #[test]
    fn test_resolve_at_hit() {
        let s = scanner();
        let resolved = s.resolve_at("read [2 Peter 3:4-5] today", 10).unwrap();
        let reference = resolved.unwrap();
        assert_eq!(reference.book, "2 Peter");
        assert_eq!(reference.chapter, 3);
        assert_eq!(reference.verse_start, 4);
        assert_eq!(reference.verse_end, Some(5));
    }

    #[test]
    fn test_resolve_at_miss() {
        let s = scanner();
        assert!(s.resolve_at("read [John 3:16] today", 0).is_none());
    }

    #[test]
    fn test_resolve_at_unknown_book_reports_failure() {
        let s = scanner();
        let resolved = s.resolve_at("[Nonexistent 1:1]", 3).unwrap();
        assert!(resolved.is_err());
    }

    #[test]
    fn test_resolve_at_inverted_range_reports_failure() {
        let s = scanner();
        let resolved = s.resolve_at("[John 3:16-2]", 3).unwrap();
        assert!(matches!(
            resolved,
            Err(crate::scripture::reference::ResolveError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_is_over_token() {
        let s = scanner();
        let text = "see [John 3:16] here";
        assert!(s.is_over_token(text, 8));
        assert!(!s.is_over_token(text, 1));
    }

    #[test]
    fn test_scan_round_trip_through_formatting() {
        // Formatting a resolved reference back to bracketed text and
        // re-scanning it yields an equal reference.
        let s = scanner();
        let original = s.resolve_at("[2 Peter 3:4-5]", 4).unwrap().unwrap();
        let rendered = original.bracketed();
        let rescanned = s.resolve_at(&rendered, 4).unwrap().unwrap();
        assert_eq!(original, rescanned);
    }
}
