//! Cell glyphs and colors handed to the render sink.

use std::fmt;
use std::str::FromStr;

/// Named palette colors understood by every render sink.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NamedColor {
    Black,
    White,
    Gray,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Goldenrod,
}

/// Foreground or background color of a cell.
///
/// Displays as the palette name (`goldenrod`) or as `rgb(r,g,b)`, and parses
/// from the same strings. This is the form passed through in styled text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Color {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Named(NamedColor::Black);
    pub const WHITE: Self = Self::Named(NamedColor::White);
    pub const RED: Self = Self::Named(NamedColor::Red);
    pub const YELLOW: Self = Self::Named(NamedColor::Yellow);
    pub const GOLDENROD: Self = Self::Named(NamedColor::Goldenrod);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => write!(f, "{named}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(named) = NamedColor::from_str(trimmed) {
            return Ok(Color::Named(named));
        }

        let channels = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseColorError(s.to_string()))?;

        let parsed: Vec<u8> = channels
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseColorError(s.to_string()))?;

        match parsed.as_slice() {
            [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A single drawable cell: character plus foreground and background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub foreground: Color,
    pub background: Color,
}

impl Glyph {
    pub const fn new(ch: char, foreground: Color, background: Color) -> Self {
        Self {
            ch,
            foreground,
            background,
        }
    }

    /// Glyph with the default white-on-black colors.
    pub const fn plain(ch: char) -> Self {
        Self::new(ch, Color::WHITE, Color::BLACK)
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::plain(' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_parse_case_insensitively() {
        assert_eq!("goldenrod".parse::<Color>(), Ok(Color::GOLDENROD));
        assert_eq!("White".parse::<Color>(), Ok(Color::WHITE));
    }

    #[test]
    fn rgb_colors_round_trip_through_display() {
        let color = Color::Rgb(12, 200, 7);
        assert_eq!(color.to_string(), "rgb(12,200,7)");
        assert_eq!("rgb(12, 200, 7)".parse::<Color>(), Ok(color));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert!("chartreuse".parse::<Color>().is_err());
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("rgb(1,2,300)".parse::<Color>().is_err());
    }
}
