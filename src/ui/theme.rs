//! Theme management and ANSI escape sequence generation.
//!
//! A theme is a named set of hex colors. The built-in `binsmart` theme uses
//! the bin colors of the web client: blue for recyclables, green for organic
//! waste and purple for everything else. Custom themes are TOML files:
//!
//! ```toml
//! name = "high-contrast"
//!
//! [colors]
//! header_fg = "#ffffff"
//! text_normal = "#ffffff"
//! text_dim = "#bbbbbb"
//! error_fg = "#ff5555"
//! notice_fg = "#ffff55"
//! recyclable_fg = "#5555ff"
//! organic_fg = "#55ff55"
//! other_fg = "#ff55ff"
//! indicator_empty = "#555555"
//! ```
//!
//! Styling is emitted only when the theme is enabled, so the same renderer
//! produces plain text for pipes and `color = false`.
//!
//! # Example
//!
//! ```rust
//! use binsmart::ui::theme::Theme;
//!
//! let theme = Theme::default();
//! assert_eq!(theme.fg(&theme.colors.organic_fg), "\u{1b}[38;2;74;222;128m");
//! assert_eq!(Theme::default().without_color().bold(), "");
//! ```

use crate::domain::error::{BinSmartError, Result};
use crate::presenter::BinCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
    #[serde(skip, default = "enabled")]
    enabled: bool,
}

const fn enabled() -> bool {
    true
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub text_normal: String,
    /// Secondary text (footer, metadata).
    pub text_dim: String,
    pub error_fg: String,
    /// Advisories and other one-time notices.
    pub notice_fg: String,
    pub recyclable_fg: String,
    pub organic_fg: String,
    pub other_fg: String,
    /// Unfilled cells of the confidence bar.
    pub indicator_empty: String,
}

impl Theme {
    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Config`] if the file cannot be read or does
    /// not parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BinSmartError::Config(format!("failed to read theme {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| BinSmartError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Returns the same palette with all styling switched off.
    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Color of a bin category.
    #[must_use]
    pub fn category_color(&self, category: BinCategory) -> &str {
        match category {
            BinCategory::Recyclable => &self.colors.recyclable_fg,
            BinCategory::Organic => &self.colors.organic_fg,
            BinCategory::Other => &self.colors.other_fg,
        }
    }

    /// Converts a hex color to an RGB tuple.
    ///
    /// Returns white on malformed input.
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

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(&self, hex: &str) -> String {
        if !self.enabled {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold(&self) -> &'static str {
        if self.enabled {
            "\u{001b}[1m"
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn dim(&self) -> &'static str {
        if self.enabled {
            "\u{001b}[2m"
        } else {
            ""
        }
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset(&self) -> &'static str {
        if self.enabled {
            "\u{001b}[0m"
        } else {
            ""
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "binsmart".to_string(),
            colors: ThemeColors {
                header_fg: "#e5e7eb".to_string(),
                text_normal: "#e5e7eb".to_string(),
                text_dim: "#9ca3af".to_string(),
                error_fg: "#f87171".to_string(),
                notice_fg: "#facc15".to_string(),
                recyclable_fg: "#60a5fa".to_string(),
                organic_fg: "#4ade80".to_string(),
                other_fg: "#c084fc".to_string(),
                indicator_empty: "#374151".to_string(),
            },
            enabled: true,
        }
    }
}
