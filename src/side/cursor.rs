//! Read-only cursors over the marbles of a side.
//!
//! A cursor is a `(track, position)` pair bound to a shared borrow of the
//! side, so it cannot outlive the next mutation. Stepping returns a new
//! cursor instead of mutating in place.

use serde::{Deserialize, Serialize};

use super::puzzle_side::PuzzleSide;
use crate::core::{Color, Leaf, Marble, MARBLES_PER_LEAF, MARBLES_PER_SIDE};

/// What a cursor walks over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// The ten positions of one leaf.
    Leaf(Leaf),
    /// All thirty marbles: the border ring when it is rotatable, otherwise
    /// the North, East and West leaves back to back.
    Border,
}

impl Track {
    /// Slot count; zero for the `Invalid` leaf.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Track::Leaf(Leaf::Invalid) => 0,
            Track::Leaf(_) => MARBLES_PER_LEAF,
            Track::Border => MARBLES_PER_SIDE,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Wrap a signed position onto the track.
    #[must_use]
    pub fn wrap(self, position: isize) -> usize {
        match self.len() {
            0 => 0,
            len => position.rem_euclid(len as isize) as usize,
        }
    }
}

impl From<Leaf> for Track {
    fn from(leaf: Leaf) -> Self {
        Track::Leaf(leaf)
    }
}

/// A position on one track of a side.
#[derive(Clone, Copy, Debug)]
pub struct MarbleCursor<'a> {
    side: &'a PuzzleSide,
    track: Track,
    position: usize,
}

impl<'a> MarbleCursor<'a> {
    pub(crate) fn new(side: &'a PuzzleSide, track: Track, position: isize) -> Self {
        Self {
            side,
            track,
            position: track.wrap(position),
        }
    }

    #[must_use]
    pub fn track(&self) -> Track {
        self.track
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn marble(&self) -> Marble {
        self.side.marble_at(self.track, self.position as isize)
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.marble().id()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.marble().color()
    }

    /// Residual angle of the whole track, not of the single marble.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.side.track_angle(self.track)
    }

    /// Cursor `n` slots further along, wrapping.
    #[must_use]
    pub fn offset(self, n: isize) -> Self {
        Self::new(self.side, self.track, self.position as isize + n)
    }
}
