//! Presentation state: font, colors, wrap mode, theme and gutter visibility.
//!
//! Everything here lives for the session only and is never written to disk.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Inclusive bounds accepted by the font size prompt
pub const FONT_SIZE_RANGE: RangeInclusive<i64> = 8..=72;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error for color text that is neither `#rrggbb` nor `r,g,b`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected #rrggbb or r,g,b but got {0:?}")]
pub struct ParseRgbError(pub String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseRgbError(trimmed.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(err());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| err());
        Ok(Rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Light or dark color preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Fixed color preset for this theme
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors::light(),
            Theme::Dark => ThemeColors::dark(),
        }
    }
}

/// Colors of every themed surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub text_bg: Rgb,
    pub text_fg: Rgb,
    pub caret: Rgb,
    pub gutter_bg: Rgb,
    pub gutter_fg: Rgb,
    pub window_bg: Rgb,
    pub window_fg: Rgb,
    pub selection_bg: Rgb,
    pub highlight_bg: Rgb,
    pub highlight_fg: Rgb,
}

impl ThemeColors {
    pub fn light() -> Self {
        Self {
            text_bg: Rgb(255, 255, 255),
            text_fg: Rgb(0, 0, 0),
            caret: Rgb(0, 0, 0),
            gutter_bg: Rgb(240, 240, 240),
            gutter_fg: Rgb(110, 110, 110),
            window_bg: Rgb(225, 225, 225),
            window_fg: Rgb(20, 20, 20),
            selection_bg: Rgb(173, 214, 255),
            highlight_bg: Rgb(255, 255, 0),
            highlight_fg: Rgb(0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            text_bg: Rgb(30, 30, 30),
            text_fg: Rgb(212, 212, 212),
            caret: Rgb(255, 255, 255),
            gutter_bg: Rgb(37, 37, 38),
            gutter_fg: Rgb(133, 133, 133),
            window_bg: Rgb(45, 45, 48),
            window_fg: Rgb(230, 230, 230),
            selection_bg: Rgb(38, 79, 120),
            highlight_bg: Rgb(255, 255, 0),
            highlight_fg: Rgb(0, 0, 0),
        }
    }
}

/// How lines longer than the view are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wrap {
    #[default]
    Word,
    None,
}

impl Wrap {
    pub fn toggled(self) -> Self {
        match self {
            Wrap::Word => Wrap::None,
            Wrap::None => Wrap::Word,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Wrap::Word
    }
}

/// Resolved style shared by the text area and the gutter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.family, self.size)
    }
}

/// Session presentation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationState {
    pub font: FontSpec,
    /// Text foreground override; `None` follows the theme
    pub font_color: Option<Rgb>,
    pub wrap: Wrap,
    pub theme: Theme,
    pub show_line_numbers: bool,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            font: FontSpec {
                family: "Consolas".to_string(),
                size: 11,
            },
            font_color: None,
            wrap: Wrap::Word,
            theme: Theme::Light,
            show_line_numbers: true,
        }
    }
}

impl PresentationState {
    /// Colors of the active theme
    pub fn colors(&self) -> ThemeColors {
        self.theme.colors()
    }

    /// Text foreground: the font color override or the theme's
    pub fn text_fg(&self) -> Rgb {
        self.font_color.unwrap_or(self.colors().text_fg)
    }

    pub fn set_font_family(&mut self, family: &str) -> bool {
        let family = family.trim();
        if family.is_empty() {
            return false;
        }
        self.font.family = family.to_string();
        true
    }

    /// Apply a font size, rejecting values outside [`FONT_SIZE_RANGE`]
    pub fn set_font_size(&mut self, size: i64) -> bool {
        if !FONT_SIZE_RANGE.contains(&size) {
            return false;
        }
        self.font.size = size as u16;
        true
    }

    pub fn set_font_color(&mut self, color: Rgb) {
        self.font_color = Some(color);
    }

    pub fn toggle_wrap(&mut self) -> Wrap {
        self.wrap = self.wrap.toggled();
        self.wrap
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.show_line_numbers = !self.show_line_numbers;
        self.show_line_numbers
    }
}
