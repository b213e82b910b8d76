//! Verse lookup collaborator
//!
//! Fetches chapter text from the bolls.life API and normalizes the response
//! into a canonical verse list. The endpoint is loose about shape: it may
//! return a bare array of verses or an object wrapping a `verses` array, and
//! items may spell their fields `verse`/`number` and `text`/`content`. All of
//! that is flattened here, at the collaborator boundary; nothing downstream
//! branches on response shape.
//!
//! Requests run on a background thread and post their outcome over a channel
//! that the application polls each frame. Outcomes carry the reference they
//! were requested for so stale responses can be discarded.

use crate::error::{Error, Result};
use crate::scripture::books::find_book;
use crate::scripture::reference::VerseReference;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Base URL of the verse text endpoint.
const LOOKUP_BASE_URL: &str = "https://bolls.life/get-text";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default translation identifier.
pub const DEFAULT_TRANSLATION: &str = "KJV";

// ─────────────────────────────────────────────────────────────────────────────
// Canonical Verse
// ─────────────────────────────────────────────────────────────────────────────

/// A single verse, normalized from whatever shape the endpoint returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Verse number within the chapter (1-based)
    pub number: u32,
    /// Cleaned verse text
    pub text: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// The two response shapes the endpoint is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChapterPayload {
    /// Bare array of verse items
    Verses(Vec<RawVerse>),
    /// Object wrapping the array
    Wrapped { verses: Vec<RawVerse> },
}

/// A verse item before normalization; field names vary by shape.
#[derive(Debug, Deserialize)]
struct RawVerse {
    #[serde(default)]
    verse: Option<u32>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Strips markup from raw verse text.
///
/// The KJV text carries Strong's concordance markers (`<S>1234</S>`) and
/// occasional residual tags; both are removed and whitespace collapsed.
#[derive(Debug, Clone)]
struct VerseTextCleaner {
    strongs: Regex,
    tags: Regex,
    whitespace: Regex,
}

impl VerseTextCleaner {
    fn new() -> Self {
        Self {
            strongs: Regex::new(r"(?i)<S>\d+</S>").expect("strongs pattern is valid"),
            tags: Regex::new(r"<[^>]*>").expect("tag pattern is valid"),
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    fn clean(&self, text: &str) -> String {
        let text = self.strongs.replace_all(text, "");
        let text = self.tags.replace_all(&text, "");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

/// Flatten a payload into the canonical verse list.
///
/// Items without a usable number or with empty cleaned text are dropped.
fn normalize(payload: ChapterPayload, cleaner: &VerseTextCleaner) -> Vec<Verse> {
    let items = match payload {
        ChapterPayload::Verses(items) => items,
        ChapterPayload::Wrapped { verses } => verses,
    };

    items
        .into_iter()
        .filter_map(|item| {
            let number = item.verse.or(item.number)?;
            let raw_text = item.text.or(item.content)?;
            let text = cleaner.clean(&raw_text);
            if text.is_empty() {
                return None;
            }
            Some(Verse { number, text })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocking Client
// ─────────────────────────────────────────────────────────────────────────────

/// Blocking HTTP client for the verse endpoint.
///
/// Lives on the worker thread; the UI never calls it directly.
pub struct VerseClient {
    client: reqwest::blocking::Client,
    translation: String,
    cleaner: VerseTextCleaner,
}

impl VerseClient {
    /// Create a client for the given translation.
    pub fn new(translation: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            translation: translation.to_string(),
            cleaner: VerseTextCleaner::new(),
        })
    }

    /// Fetch all verses of one chapter, normalized and cleaned.
    pub fn fetch_chapter(&self, book_number: u8, chapter: u32) -> Result<Vec<Verse>> {
        let url = format!(
            "{}/{}/{}/{}/",
            LOOKUP_BASE_URL, self.translation, book_number, chapter
        );
        debug!("Fetching verses from {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Lookup {
                message: format!("server returned {}", response.status()),
            });
        }

        let payload: ChapterPayload = response.json()?;
        Ok(normalize(payload, &self.cleaner))
    }
}

/// Restrict a chapter's verses to the range named by the reference.
pub fn filter_to_reference(verses: Vec<Verse>, reference: &VerseReference) -> Vec<Verse> {
    verses
        .into_iter()
        .filter(|v| reference.contains_verse(v.number))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Background Worker
// ─────────────────────────────────────────────────────────────────────────────

/// Result of one lookup request, tagged with the reference it was made for.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// Verses arrived, already filtered to the reference's range
    Loaded {
        reference: VerseReference,
        verses: Vec<Verse>,
    },
    /// The request failed; no retry is attempted
    Failed {
        reference: VerseReference,
        message: String,
    },
}

impl LookupOutcome {
    /// The reference this outcome belongs to, for stale-response checks.
    pub fn reference(&self) -> &VerseReference {
        match self {
            LookupOutcome::Loaded { reference, .. } | LookupOutcome::Failed { reference, .. } => {
                reference
            }
        }
    }
}

/// Runs verse lookups off the UI thread.
///
/// Each request spawns a short-lived thread that performs the fetch and posts
/// a [`LookupOutcome`] back over the channel. The application polls outcomes
/// once per frame; this is non-blocking.
pub struct LookupWorker {
    sender: Sender<LookupOutcome>,
    receiver: Receiver<LookupOutcome>,
    translation: String,
}

impl LookupWorker {
    pub fn new(translation: &str) -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            translation: translation.to_string(),
        }
    }

    /// Change the translation used for subsequent requests.
    pub fn set_translation(&mut self, translation: &str) {
        self.translation = translation.to_string();
    }

    /// Fire off a lookup for the given reference.
    ///
    /// The outcome arrives via [`poll_outcomes`](Self::poll_outcomes); a
    /// request has no cancellation, so callers must discard outcomes for
    /// references that are no longer selected.
    pub fn request(&self, reference: VerseReference) {
        let Some(book) = find_book(&reference.book) else {
            // Resolution guarantees a known book; reaching this is a caller bug.
            warn!("Lookup requested for unknown book '{}'", reference.book);
            return;
        };
        let book_number = book.number;
        let chapter = reference.chapter;
        let translation = self.translation.clone();
        let sender = self.sender.clone();

        thread::spawn(move || {
            let outcome = match fetch_for_reference(&translation, book_number, chapter, &reference)
            {
                Ok(verses) => LookupOutcome::Loaded { reference, verses },
                Err(err) => LookupOutcome::Failed {
                    reference,
                    message: err.to_string(),
                },
            };
            // The receiver is gone only during shutdown; dropping is fine.
            let _ = sender.send(outcome);
        });
    }

    /// Poll for completed lookups. Non-blocking.
    pub fn poll_outcomes(&self) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

fn fetch_for_reference(
    translation: &str,
    book_number: u8,
    chapter: u32,
    reference: &VerseReference,
) -> Result<Vec<Verse>> {
    let client = VerseClient::new(translation)?;
    let verses = client.fetch_chapter(book_number, chapter)?;
    Ok(filter_to_reference(verses, reference))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
