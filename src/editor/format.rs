//! Markdown formatting commands
//!
//! Toolbar formatting for the raw-markdown editor: inline wrappers (bold,
//! italic, inline code) and line prefixes (headings, lists, blockquote).
//! Commands produce a new text plus a cursor position; the caller feeds both
//! back into the document as an editor-originated edit.

use crate::editor::document::floor_char_boundary;

// ─────────────────────────────────────────────────────────────────────────────
// Format Command
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands available from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Inline code (`code`)
    InlineCode,
    /// Heading level 1-3
    Heading(u8),
    /// Bullet list
    BulletList,
    /// Blockquote
    Blockquote,
}

impl FormatCommand {
    /// Get the icon for this command (for toolbar buttons).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "𝐁",
            Self::Italic => "𝐼",
            Self::InlineCode => "</>",
            Self::Heading(1) => "H1",
            Self::Heading(2) => "H2",
            Self::Heading(_) => "H3",
            Self::BulletList => "\u{2022}",
            Self::Blockquote => "\u{275D}",
        }
    }

    /// Get the tooltip text for this command.
    pub fn tooltip(&self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::InlineCode => "Inline Code",
            Self::Heading(1) => "Heading 1",
            Self::Heading(2) => "Heading 2",
            Self::Heading(_) => "Heading 3",
            Self::BulletList => "Bullet List",
            Self::Blockquote => "Blockquote",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Applying Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a format command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new full text.
    pub text: String,
    /// Byte offset where the cursor should land.
    pub cursor: usize,
}

/// Apply a formatting command at the cursor, wrapping the selection if any.
///
/// `selection` is a byte range over `text`; when absent, inline commands
/// insert an empty pair and place the cursor between the markers, and line
/// commands prefix the cursor's line.
pub fn apply_format(
    text: &str,
    selection: Option<(usize, usize)>,
    cursor: usize,
    command: FormatCommand,
) -> FormatResult {
    match command {
        FormatCommand::Bold => wrap_inline(text, selection, cursor, "**"),
        FormatCommand::Italic => wrap_inline(text, selection, cursor, "*"),
        FormatCommand::InlineCode => wrap_inline(text, selection, cursor, "`"),
        FormatCommand::Heading(level) => {
            let level = level.clamp(1, 3) as usize;
            prefix_line(text, cursor, &format!("{} ", "#".repeat(level)))
        }
        FormatCommand::BulletList => prefix_line(text, cursor, "- "),
        FormatCommand::Blockquote => prefix_line(text, cursor, "> "),
    }
}

fn wrap_inline(
    text: &str,
    selection: Option<(usize, usize)>,
    cursor: usize,
    marker: &str,
) -> FormatResult {
    match selection {
        Some((start, end)) if start < end => {
            let start = floor_char_boundary(text, start.min(text.len()));
            let end = floor_char_boundary(text, end.min(text.len()));
            let mut result = String::with_capacity(text.len() + 2 * marker.len());
            result.push_str(&text[..start]);
            result.push_str(marker);
            result.push_str(&text[start..end]);
            result.push_str(marker);
            result.push_str(&text[end..]);
            FormatResult {
                text: result,
                cursor: end + 2 * marker.len(),
            }
        }
        _ => {
            let cursor = floor_char_boundary(text, cursor.min(text.len()));
            let mut result = String::with_capacity(text.len() + 2 * marker.len());
            result.push_str(&text[..cursor]);
            result.push_str(marker);
            result.push_str(marker);
            result.push_str(&text[cursor..]);
            FormatResult {
                text: result,
                cursor: cursor + marker.len(),
            }
        }
    }
}

fn prefix_line(text: &str, cursor: usize, prefix: &str) -> FormatResult {
    let cursor = floor_char_boundary(text, cursor.min(text.len()));
    let line_start = text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);

    let mut result = String::with_capacity(text.len() + prefix.len());
    result.push_str(&text[..line_start]);
    result.push_str(prefix);
    result.push_str(&text[line_start..]);
    FormatResult {
        text: result,
        cursor: cursor + prefix.len(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
