//! TUI styles and color themes.
//!
//! The theme is chosen explicitly from configuration; nothing is inferred
//! from the terminal.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named theme selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme {other:?} (expected dark or light)")),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Color theme for the TUI.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    pub primary: Color,
    pub secondary: Color,
    pub warning: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::from_name(ThemeName::Dark)
    }
}

impl ColorTheme {
    /// Build the palette for a named theme.
    #[must_use]
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self {
                primary: Color::Cyan,
                secondary: Color::Blue,
                warning: Color::Yellow,
                text: Color::White,
                muted: Color::DarkGray,
                border: Color::Gray,
            },
            ThemeName::Light => Self {
                primary: Color::Blue,
                secondary: Color::Magenta,
                warning: Color::Rgb(176, 112, 0),
                text: Color::Black,
                muted: Color::Gray,
                border: Color::DarkGray,
            },
        }
    }

    /// Accent color for an odometer style hint, falling back to `primary`.
    #[must_use]
    pub fn accent(&self, hint: Option<&str>) -> Color {
        match hint.map(str::to_ascii_lowercase).as_deref() {
            Some("cyan") => Color::Cyan,
            Some("green") => Color::Green,
            Some("yellow") => Color::Yellow,
            Some("magenta") => Color::Magenta,
            Some("red") => Color::Red,
            Some("blue") => Color::Blue,
            _ => self.primary,
        }
    }

    /// Get the style for a header.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Pane borders.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get the style for normal text.
    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Get the style for muted text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style of a glyph drawn at `opacity`, or `None` when fully transparent.
    ///
    /// Terminals have no alpha, so opacity is quantized into three bands.
    #[must_use]
    pub fn glyph_style(&self, accent: Color, opacity: f64) -> Option<Style> {
        if opacity <= 0.0 {
            None
        } else if opacity < 0.34 {
            Some(Style::default().fg(self.muted).add_modifier(Modifier::DIM))
        } else if opacity < 0.67 {
            Some(Style::default().fg(self.muted))
        } else {
            Some(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        }
    }

    /// Style of the neighbouring digits on a strip.
    #[must_use]
    pub fn ghost_style(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_parse() {
        assert_eq!("Light".parse::<ThemeName>().unwrap(), ThemeName::Light);
        assert_eq!("dark".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert!("neon".parse::<ThemeName>().is_err());
        assert_eq!(ThemeName::Light.to_string(), "light");
    }

    #[test]
    fn themes_differ() {
        assert_ne!(
            ColorTheme::from_name(ThemeName::Dark),
            ColorTheme::from_name(ThemeName::Light)
        );
    }

    #[test]
    fn accent_from_hint() {
        let theme = ColorTheme::default();
        assert_eq!(theme.accent(Some("Green")), Color::Green);
        assert_eq!(theme.accent(Some("unknown")), theme.primary);
        assert_eq!(theme.accent(None), theme.primary);
    }

    #[test]
    fn glyph_style_bands() {
        let theme = ColorTheme::default();
        assert!(theme.glyph_style(Color::Cyan, 0.0).is_none());
        assert_eq!(
            theme.glyph_style(Color::Cyan, 0.5),
            Some(Style::default().fg(theme.muted))
        );
        assert_eq!(
            theme.glyph_style(Color::Cyan, 1.0).and_then(|s| s.fg),
            Some(Color::Cyan)
        );
    }
}
