//! Static Bible book metadata
//!
//! The canonical table of the 66 books: display name, canonical number
//! (1-66, as used by the verse lookup endpoint), chapter count, and
//! testament partition for the book picker UI. The table is immutable
//! and loaded once as a const array.

// ─────────────────────────────────────────────────────────────────────────────
// Testament Partition
// ─────────────────────────────────────────────────────────────────────────────

/// Which testament a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// Get a display label for the testament group.
    pub fn label(&self) -> &'static str {
        match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Book Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    /// Canonical display name (e.g. "2 Peter")
    pub name: &'static str,
    /// Canonical book number (1-66), used by the lookup endpoint
    pub number: u8,
    /// Number of chapters in the book
    pub chapters: u16,
    /// Testament partition
    pub testament: Testament,
}

/// All 66 books in canonical order.
pub const BOOKS: [Book; 66] = [
    // Old Testament (39 books)
    book("Genesis", 1, 50, Testament::Old),
    book("Exodus", 2, 40, Testament::Old),
    book("Leviticus", 3, 27, Testament::Old),
    book("Numbers", 4, 36, Testament::Old),
    book("Deuteronomy", 5, 34, Testament::Old),
    book("Joshua", 6, 24, Testament::Old),
    book("Judges", 7, 21, Testament::Old),
    book("Ruth", 8, 4, Testament::Old),
    book("1 Samuel", 9, 31, Testament::Old),
    book("2 Samuel", 10, 24, Testament::Old),
    book("1 Kings", 11, 22, Testament::Old),
    book("2 Kings", 12, 25, Testament::Old),
    book("1 Chronicles", 13, 29, Testament::Old),
    book("2 Chronicles", 14, 36, Testament::Old),
    book("Ezra", 15, 10, Testament::Old),
    book("Nehemiah", 16, 13, Testament::Old),
    book("Esther", 17, 10, Testament::Old),
    book("Job", 18, 42, Testament::Old),
    book("Psalms", 19, 150, Testament::Old),
    book("Proverbs", 20, 31, Testament::Old),
    book("Ecclesiastes", 21, 12, Testament::Old),
    book("Song of Songs", 22, 8, Testament::Old),
    book("Isaiah", 23, 66, Testament::Old),
    book("Jeremiah", 24, 52, Testament::Old),
    book("Lamentations", 25, 5, Testament::Old),
    book("Ezekiel", 26, 48, Testament::Old),
    book("Daniel", 27, 12, Testament::Old),
    book("Hosea", 28, 14, Testament::Old),
    book("Joel", 29, 3, Testament::Old),
    book("Amos", 30, 9, Testament::Old),
    book("Obadiah", 31, 1, Testament::Old),
    book("Jonah", 32, 4, Testament::Old),
    book("Micah", 33, 7, Testament::Old),
    book("Nahum", 34, 3, Testament::Old),
    book("Habakkuk", 35, 3, Testament::Old),
    book("Zephaniah", 36, 3, Testament::Old),
    book("Haggai", 37, 2, Testament::Old),
    book("Zechariah", 38, 14, Testament::Old),
    book("Malachi", 39, 4, Testament::Old),
    // New Testament (27 books)
    book("Matthew", 40, 28, Testament::New),
    book("Mark", 41, 16, Testament::New),
    book("Luke", 42, 24, Testament::New),
    book("John", 43, 21, Testament::New),
    book("Acts", 44, 28, Testament::New),
    book("Romans", 45, 16, Testament::New),
    book("1 Corinthians", 46, 16, Testament::New),
    book("2 Corinthians", 47, 13, Testament::New),
    book("Galatians", 48, 6, Testament::New),
    book("Ephesians", 49, 6, Testament::New),
    book("Philippians", 50, 4, Testament::New),
    book("Colossians", 51, 4, Testament::New),
    book("1 Thessalonians", 52, 5, Testament::New),
    book("2 Thessalonians", 53, 3, Testament::New),
    book("1 Timothy", 54, 6, Testament::New),
    book("2 Timothy", 55, 4, Testament::New),
    book("Titus", 56, 3, Testament::New),
    book("Philemon", 57, 1, Testament::New),
    book("Hebrews", 58, 13, Testament::New),
    book("James", 59, 5, Testament::New),
    book("1 Peter", 60, 5, Testament::New),
    book("2 Peter", 61, 3, Testament::New),
    book("1 John", 62, 5, Testament::New),
    book("2 John", 63, 1, Testament::New),
    book("3 John", 64, 1, Testament::New),
    book("Jude", 65, 1, Testament::New),
    book("Revelation", 66, 22, Testament::New),
];

const fn book(name: &'static str, number: u8, chapters: u16, testament: Testament) -> Book {
    Book {
        name,
        number,
        chapters,
        testament,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Find a book by its exact display name.
pub fn find_book(name: &str) -> Option<&'static Book> {
    BOOKS.iter().find(|b| b.name == name)
}

/// All books sorted by descending name length.
///
/// Used by reference parsing so that a two-word book name ("1 John") is
/// preferred over a shorter name that happens to be a prefix ("John").
pub fn books_longest_first() -> Vec<&'static Book> {
    let mut books: Vec<&'static Book> = BOOKS.iter().collect();
    books.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
    books
}

/// Iterate books in the given testament, in canonical order.
pub fn books_in(testament: Testament) -> impl Iterator<Item = &'static Book> {
    BOOKS.iter().filter(move |b| b.testament == testament)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_66_books_in_canonical_order() {
        assert_eq!(BOOKS.len(), 66);
        for (i, book) in BOOKS.iter().enumerate() {
            assert_eq!(book.number as usize, i + 1, "book {} out of order", book.name);
        }
    }

    #[test]
    fn test_testament_partition() {
        assert_eq!(books_in(Testament::Old).count(), 39);
        assert_eq!(books_in(Testament::New).count(), 27);
        assert_eq!(books_in(Testament::Old).last().unwrap().name, "Malachi");
        assert_eq!(books_in(Testament::New).next().unwrap().name, "Matthew");
    }

    #[test]
    fn test_find_book() {
        let book = find_book("2 Peter").expect("2 Peter should exist");
        assert_eq!(book.number, 61);
        assert_eq!(book.chapters, 3);
        assert_eq!(book.testament, Testament::New);

        assert!(find_book("Nonexistent").is_none());
        // Lookups are exact, not case-insensitive
        assert!(find_book("2 peter").is_none());
    }

    #[test]
    fn test_chapter_counts_spot_check() {
        assert_eq!(find_book("Psalms").unwrap().chapters, 150);
        assert_eq!(find_book("Obadiah").unwrap().chapters, 1);
        assert_eq!(find_book("Revelation").unwrap().chapters, 22);
    }

    #[test]
    fn test_books_longest_first_prefers_longer_names() {
        let sorted = books_longest_first();
        assert_eq!(sorted.len(), 66);

        // "1 John" must come before "John" so prefix matching picks it first
        let pos_1_john = sorted.iter().position(|b| b.name == "1 John").unwrap();
        let pos_john = sorted.iter().position(|b| b.name == "John").unwrap();
        assert!(pos_1_john < pos_john);

        // Lengths are non-increasing
        for pair in sorted.windows(2) {
            assert!(pair[0].name.len() >= pair[1].name.len());
        }
    }
}
