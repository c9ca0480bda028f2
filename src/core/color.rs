//! Marble colors and their legend.
//!
//! The palette is closed: seventeen display colors plus an explicit
//! `Invalid` sentinel carried by default-constructed marbles.
//!
//! ## Legend
//!
//! Each color maps to a camelCase name, a one-character debug glyph, an RGB
//! triple for renderers, and the global color code used by the GUI toolkit
//! (`qt_code`). The toolkit codes are the only numbering that crosses the
//! boundary to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// A marble color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Blue,
    DarkBlue,
    Cyan,
    DarkCyan,
    Magenta,
    DarkMagenta,
    Yellow,
    DarkYellow,
    Gray,
    DarkGray,
    LightGray,
    #[default]
    Invalid,
}

impl Color {
    /// Every valid color, in legend order.
    pub const ALL: [Color; 17] = [
        Color::White,
        Color::Black,
        Color::Red,
        Color::DarkRed,
        Color::Green,
        Color::DarkGreen,
        Color::Blue,
        Color::DarkBlue,
        Color::Cyan,
        Color::DarkCyan,
        Color::Magenta,
        Color::DarkMagenta,
        Color::Yellow,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::LightGray,
    ];

    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Color::Invalid)
    }

    /// camelCase name, e.g. `darkRed`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
            Color::Red => "red",
            Color::DarkRed => "darkRed",
            Color::Green => "green",
            Color::DarkGreen => "darkGreen",
            Color::Blue => "blue",
            Color::DarkBlue => "darkBlue",
            Color::Cyan => "cyan",
            Color::DarkCyan => "darkCyan",
            Color::Magenta => "magenta",
            Color::DarkMagenta => "darkMagenta",
            Color::Yellow => "yellow",
            Color::DarkYellow => "darkYellow",
            Color::Gray => "gray",
            Color::DarkGray => "darkGray",
            Color::LightGray => "lightGray",
            Color::Invalid => "invalid",
        }
    }

    /// Single-character glyph for compact debug dumps.
    ///
    /// Bright colors are upper case, their dark variants lower case.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'K',
            Color::Red => 'R',
            Color::DarkRed => 'r',
            Color::Green => 'G',
            Color::DarkGreen => 'g',
            Color::Blue => 'B',
            Color::DarkBlue => 'b',
            Color::Cyan => 'C',
            Color::DarkCyan => 'c',
            Color::Magenta => 'M',
            Color::DarkMagenta => 'm',
            Color::Yellow => 'Y',
            Color::DarkYellow => 'y',
            Color::Gray => '+',
            Color::DarkGray => '#',
            Color::LightGray => '.',
            Color::Invalid => '?',
        }
    }

    /// RGB triple, `None` for the sentinel.
    #[must_use]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        let rgb = match self {
            Color::White => (255, 255, 255),
            Color::Black => (0, 0, 0),
            Color::Red => (255, 0, 0),
            Color::DarkRed => (128, 0, 0),
            Color::Green => (0, 255, 0),
            Color::DarkGreen => (0, 128, 0),
            Color::Blue => (0, 0, 255),
            Color::DarkBlue => (0, 0, 128),
            Color::Cyan => (0, 255, 255),
            Color::DarkCyan => (0, 128, 128),
            Color::Magenta => (255, 0, 255),
            Color::DarkMagenta => (128, 0, 128),
            Color::Yellow => (255, 255, 0),
            Color::DarkYellow => (128, 128, 0),
            Color::Gray => (160, 160, 164),
            Color::DarkGray => (128, 128, 128),
            Color::LightGray => (192, 192, 192),
            Color::Invalid => return None,
        };
        Some(rgb)
    }

    /// Global color code of the GUI toolkit, `None` for the sentinel.
    #[must_use]
    pub const fn qt_code(self) -> Option<i32> {
        let code = match self {
            Color::Black => 2,
            Color::White => 3,
            Color::DarkGray => 4,
            Color::Gray => 5,
            Color::LightGray => 6,
            Color::Red => 7,
            Color::Green => 8,
            Color::Blue => 9,
            Color::Cyan => 10,
            Color::Magenta => 11,
            Color::Yellow => 12,
            Color::DarkRed => 13,
            Color::DarkGreen => 14,
            Color::DarkBlue => 15,
            Color::DarkCyan => 16,
            Color::DarkMagenta => 17,
            Color::DarkYellow => 18,
            Color::Invalid => return None,
        };
        Some(code)
    }

    /// Inverse of [`Color::qt_code`]. Unknown codes map to `Invalid`.
    #[must_use]
    pub fn from_qt_code(code: i32) -> Self {
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.qt_code() == Some(code))
            .unwrap_or(Color::Invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = PuzzleError;

    /// Parses a color name, ignoring case (`darkred`, `darkRed`, `DARKRED`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PuzzleError::UnknownColor(s.to_string()))
    }
}
