//! Colour palette and typography for the starter deck.

use crate::types::{Rgb, TextStyle};
use serde::{Deserialize, Serialize};

pub const DARK_BG: Rgb = Rgb::new(0x1E, 0x29, 0x3B);
pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const ACCENT: Rgb = Rgb::new(0xF5, 0x9E, 0x0B);
pub const PRIMARY: Rgb = Rgb::new(0x25, 0x63, 0xEB);
pub const LIGHT_BG: Rgb = Rgb::new(0xF8, 0xFA, 0xFC);
pub const MUTED: Rgb = Rgb::new(0x94, 0xA3, 0xB8);
pub const GREEN: Rgb = Rgb::new(0x16, 0xA3, 0x4A);
pub const PURPLE: Rgb = Rgb::new(0x7C, 0x3A, 0xED);

/// Fill of the prompt panel on lesson slides.
pub const PANEL: Rgb = Rgb::new(0x33, 0x41, 0x55);

/// Named colours used by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    pub muted: Rgb,
    pub panel: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DARK_BG,
            text: WHITE,
            accent: ACCENT,
            muted: MUTED,
            panel: PANEL,
        }
    }
}

/// Immutable style configuration threaded through deck assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub palette: Palette,
    pub font_name: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            font_name: "Segoe UI".to_string(),
        }
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different typeface for every text box.
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// A left-aligned, regular style in the theme's typeface.
    pub fn text(&self, font_size_pt: u32, colour: Rgb) -> TextStyle {
        TextStyle::new(font_size_pt, colour, self.font_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::new();
        assert_eq!(theme.font_name, "Segoe UI");
        assert_eq!(theme.palette.background, DARK_BG);
        assert_eq!(theme.palette.accent.hex(), "F59E0B");
    }

    #[test]
    fn test_theme_builders() {
        let palette = Palette {
            background: LIGHT_BG,
            ..Palette::default()
        };
        let theme = Theme {
            palette,
            ..Theme::new().with_font_name("Arial")
        };
        let style = theme.text(18, theme.palette.muted);
        assert_eq!(style.font_name, "Arial");
        assert_eq!(style.font_size_pt, 18);
        assert!(!style.bold);
        assert_eq!(theme.palette.background, LIGHT_BG);
    }
}
