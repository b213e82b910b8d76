//! Theme system
//!
//! Light and dark palettes plus the egui `Visuals` derived from them.
//! The `Theme` enum in `config::settings` selects which palette is live;
//! `System` follows whatever egui detected at startup.

use crate::config::Theme;
use eframe::egui::{Color32, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Color palette for the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Primary background color
    pub background: Color32,
    /// Background for panels and the sidebar
    pub background_secondary: Color32,
    /// Subtle borders and separators
    pub border: Color32,
    /// Primary text color
    pub text_primary: Color32,
    /// De-emphasized text (timestamps, hints)
    pub text_muted: Color32,
    /// Accent color for the active selection and links
    pub accent: Color32,
    /// Highlight for scripture reference tokens
    pub reference: Color32,
    /// Error text in toasts and the error modal
    pub error: Color32,
}

impl ThemeColors {
    /// Create theme colors for the given theme variant.
    pub fn from_theme(theme: Theme, system_visuals: &Visuals) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
            Theme::System => {
                if system_visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(253, 253, 251),
            background_secondary: Color32::from_rgb(244, 243, 238),
            border: Color32::from_rgb(214, 211, 202),
            text_primary: Color32::from_rgb(42, 40, 38),
            text_muted: Color32::from_rgb(130, 126, 118),
            accent: Color32::from_rgb(125, 90, 40),
            reference: Color32::from_rgb(90, 62, 20),
            error: Color32::from_rgb(178, 52, 42),
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 29, 27),
            background_secondary: Color32::from_rgb(40, 38, 35),
            border: Color32::from_rgb(62, 59, 54),
            text_primary: Color32::from_rgb(226, 222, 214),
            text_muted: Color32::from_rgb(148, 143, 134),
            accent: Color32::from_rgb(205, 165, 100),
            reference: Color32::from_rgb(222, 188, 130),
            error: Color32::from_rgb(224, 108, 96),
        }
    }

    /// Check if this is a dark palette.
    pub fn is_dark(&self) -> bool {
        self.background.r() < 128
    }

    /// Convert the palette to egui Visuals.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };
        visuals.panel_fill = self.background;
        visuals.window_fill = self.background_secondary;
        visuals.extreme_bg_color = self.background;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.accent.linear_multiply(0.35);
        visuals.override_text_color = Some(self.text_primary);
        visuals
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ThemeColors::light(), ThemeColors::dark());
        assert!(!ThemeColors::light().is_dark());
        assert!(ThemeColors::dark().is_dark());
    }

    #[test]
    fn test_from_theme_explicit_variants() {
        let visuals = Visuals::light();
        assert_eq!(
            ThemeColors::from_theme(Theme::Light, &visuals),
            ThemeColors::light()
        );
        assert_eq!(
            ThemeColors::from_theme(Theme::Dark, &visuals),
            ThemeColors::dark()
        );
    }

    #[test]
    fn test_from_theme_system_follows_visuals() {
        assert!(ThemeColors::from_theme(Theme::System, &Visuals::dark()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::System, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_to_visuals_matches_darkness() {
        assert!(ThemeColors::dark().to_visuals().dark_mode);
        assert!(!ThemeColors::light().to_visuals().dark_mode);
    }
}
