//! User settings and preferences
//!
//! The `Settings` struct holds all user-configurable options plus the
//! persisted document history for session restore, with serde support
//! for JSON persistence.

use crate::history::HistoryEntry;
use crate::scripture::DEFAULT_TRANSLATION;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Get a display label for the theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// All user-configurable options.
///
/// Unknown fields in a persisted file are ignored and missing fields take
/// their defaults, so older config files keep loading across upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Font size for the editor (in points)
    pub font_size: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Behavior
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether to enable word wrap
    pub word_wrap: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Sidebar
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether the sidebar (history + verses) is visible
    pub show_sidebar: bool,

    /// Width of the sidebar in pixels
    pub sidebar_width: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Scripture
    // ─────────────────────────────────────────────────────────────────────────
    /// Translation identifier for verse lookups
    pub translation: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Session & History
    // ─────────────────────────────────────────────────────────────────────────
    /// Document history entries, in registry order
    pub history: Vec<HistoryEntry>,

    /// Index of the active history entry (for session restoration)
    pub active_history_index: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 14.0,
            word_wrap: true,
            show_sidebar: true,
            sidebar_width: 280.0,
            translation: DEFAULT_TRANSLATION.to_string(),
            history: Vec::new(),
            active_history_index: None,
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    pub const MIN_FONT_SIZE: f32 = 8.0;
    pub const MAX_FONT_SIZE: f32 = 32.0;
    pub const MIN_SIDEBAR_WIDTH: f32 = 160.0;
    pub const MAX_SIDEBAR_WIDTH: f32 = 600.0;
    pub const MIN_WINDOW_SIZE: f32 = 400.0;
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Clamp all values into their valid ranges.
    ///
    /// Runs after every load so a hand-edited or corrupted config file
    /// cannot put the UI into an unusable state.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.sidebar_width = self
            .sidebar_width
            .clamp(Self::MIN_SIDEBAR_WIDTH, Self::MAX_SIDEBAR_WIDTH);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        if self.translation.trim().is_empty() {
            self.translation = DEFAULT_TRANSLATION.to_string();
        }

        // An active index that outran the persisted history is discarded
        if let Some(index) = self.active_history_index {
            if index >= self.history.len() {
                self.active_history_index = None;
            }
        }
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
