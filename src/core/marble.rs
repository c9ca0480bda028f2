//! Marble identity.
//!
//! A marble is an immutable `(id, color)` pair. Moves permute marbles between
//! slots but never create, alter or duplicate one, so the id is a stable
//! handle across any sequence of rotations and spins.
//!
//! ## Sentinel
//!
//! `Marble::default()` carries `INVALID_ID` and `Color::Invalid`. It is what
//! queries return for a slot that does not exist (such as a position on the
//! `Invalid` leaf).
//!
//! ```
//! use spin_puzzle::core::{Color, Marble};
//!
//! let m = Marble::new(7, Color::Red);
//! assert_eq!(m.id(), 7);
//! assert!(m.is_valid());
//!
//! assert_eq!(Marble::default(), Marble::default());
//! assert!(!Marble::default().is_valid());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::color::Color;

/// Id carried by the sentinel marble.
pub const INVALID_ID: u32 = u32::MAX;

/// A single marble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marble {
    id: u32,
    color: Color,
}

impl Marble {
    #[must_use]
    pub const fn new(id: u32, color: Color) -> Self {
        Self { id, color }
    }

    #[must_use]
    pub const fn id(self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Both the id and the color are real values.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.id != INVALID_ID && self.color.is_valid()
    }
}

impl Default for Marble {
    fn default() -> Self {
        Self {
            id: INVALID_ID,
            color: Color::Invalid,
        }
    }
}

impl fmt::Display for Marble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == INVALID_ID {
            write!(f, "-:{}", self.color.symbol())
        } else {
            write!(f, "{}:{}", self.id, self.color.symbol())
        }
    }
}
