//! Scripture support: book metadata, reference scanning, and verse lookup

pub mod books;
pub mod lookup;
pub mod pinned;
pub mod reference;
pub mod scanner;

pub use books::{books_in, find_book, Book, Testament, BOOKS};
pub use lookup::{LookupOutcome, LookupWorker, Verse, DEFAULT_TRANSLATION};
pub use pinned::{PinnedVerse, PinnedVerses};
pub use reference::{parse_reference, ResolveError, VerseReference};
pub use scanner::{ReferenceScanner, ReferenceToken};
