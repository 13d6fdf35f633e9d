//! Theme management and ANSI escape sequence generation.
//!
//! Two themes ship with the plugin, `midnight` (dark, default) and
//! `daylight` (light). Custom themes are TOML files with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0def4"
//! selection_fg = "#191724"
//! selection_bg = "#c4a7e7"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#403d52"
//! search_bar_border = "#c4a7e7"
//! match_highlight_fg = "#191724"
//! match_highlight_bg = "#f6c177"
//! empty_state_fg = "#9ccfd8"
//! brand_fg = "#ebbcba"
//! like_fg = "#eb6f92"
//! following_fg = "#31748f"
//! pending_fg = "#f6c177"
//! status_live_fg = "#31748f"
//! status_stale_fg = "#eb6f92"
//! ```

use crate::domain::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "midnight";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card gutter and brand line.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, timestamps and other secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub brand_fg: String,
    pub like_fg: String,
    pub following_fg: String,
    /// Values that are still optimistic.
    pub pending_fg: String,

    pub status_live_fg: String,
    pub status_stale_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use campaign_feed::ui::Theme;
    ///
    /// assert!(Theme::from_name("daylight").is_some());
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "midnight" => include_str!("../../themes/midnight.toml"),
            "daylight" => include_str!("../../themes/daylight.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FeedError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| FeedError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `midnight` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in midnight theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::from_name("midnight").map(|t| t.name), Some("midnight".to_string()));
        assert_eq!(Theme::from_name("daylight").map(|t| t.name), Some("daylight".to_string()));
    }

    #[test]
    fn hex_colors_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let builtin = include_str!("../../themes/daylight.toml").replace("daylight", "custom");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(builtin.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();

        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn broken_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = ").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(FeedError::Theme(_))));
    }
}
