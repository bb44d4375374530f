//! RGBA color value shared by the brush, the background and the UI pickers.

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color string is empty")]
    Empty,

    #[error("Invalid color length {0}: expected 3, 6 or 8 hex digits")]
    InvalidLength(usize),

    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// An 8-bit per channel, non-premultiplied RGBA color.
///
/// Parses from the CSS hex forms produced by color inputs:
/// `#rgb`, `#rrggbb` and `#rrggbbaa` (the `#` is optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Parse a hex color string such as `#ff0000`
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_owned()));
        }

        // Every char is an ASCII hex digit past this point, so byte slicing is safe
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(hex.to_owned()))
        };
        let short = |index: usize| channel(index..index + 1).map(|v| v * 17);

        match digits.len() {
            3 => Ok(Self::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl From<Color32> for Color {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#0000ff80").unwrap(), Color::rgba(0, 0, 255, 128));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::from_hex("#"), Err(ColorParseError::Empty));
        assert_eq!(Color::from_hex("#abcd"), Err(ColorParseError::InvalidLength(4)));
        assert!(matches!(
            Color::from_hex("#gg0000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::rgb(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_egui_conversion_keeps_channels() {
        let color = Color::rgb(12, 34, 56);
        let egui_color: Color32 = color.into();
        assert_eq!(Color::from(egui_color), color);
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(255, 255, 255)).unwrap();
        assert_eq!(json, "\"#ffffff\"");
        let parsed: Color = serde_json::from_str("\"#000\"").unwrap();
        assert_eq!(parsed, Color::BLACK);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
