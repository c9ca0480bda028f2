//! Leaves, sides, trefoil status and the angular constants of the toy.
//!
//! ## Layout
//!
//! Each side carries three leaves of ten marbles. Positions `7..=9` of every
//! leaf lie on the internal disk (the *common* marbles) and travel with it.
//! Positions `0..=6` are the outer marbles that form the shared border ring
//! when the disk stands halfway between two docks.
//!
//! All angles are in degrees. Positive angles rotate clockwise as seen from
//! the active side.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LEAF_COUNT: usize = 3;
pub const MARBLES_PER_LEAF: usize = 10;
pub const MARBLES_PER_SIDE: usize = LEAF_COUNT * MARBLES_PER_LEAF;
/// Leaf positions carried by the internal disk.
pub const COMMON_MARBLES: usize = 3;
/// Outer marbles of a leaf that join the border ring.
pub const OUTER_MARBLES: usize = MARBLES_PER_LEAF - COMMON_MARBLES;
/// First leaf position carried by the internal disk.
pub const FIRST_COMMON_POSITION: usize = OUTER_MARBLES;

pub const FULL_TURN: f64 = 360.0;
/// One marble step on a leaf.
pub const LEAF_SECTOR: f64 = FULL_TURN / MARBLES_PER_LEAF as f64;
/// One marble step on the border ring.
pub const RING_SECTOR: f64 = FULL_TURN / MARBLES_PER_SIDE as f64;
/// Distance between two docking positions of the internal disk.
pub const DISK_DOCK_STEP: f64 = FULL_TURN / LEAF_COUNT as f64;
/// Offset from a dock at which the outer marbles line up into one ring.
pub const BORDER_ALIGNMENT: f64 = DISK_DOCK_STEP / 2.0;
/// Capture window around docks and border alignments.
pub const TOLERANCE_ANGLE: f64 = 5.0;
/// Window for "exactly aligned" after quantization.
pub const ALIGNMENT_EPSILON: f64 = 1e-6;
/// Residuals this close to zero are treated as snapped.
pub const SNAP_EPSILON: f64 = 1e-9;

/// Quarter turn of a spinning leaf; crossing it swaps the faces.
pub const SPIN_HALF_TURN: f64 = 90.0;
/// Leaf positions exchanged between faces by a spin.
pub const SPIN_POSITIONS: std::ops::RangeInclusive<usize> = 1..=5;

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into `(-180, 180]`.
#[must_use]
pub fn signed_degrees(angle: f64) -> f64 {
    let wrapped = normalize_degrees(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// One of the three leaves of a side, or no leaf at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leaf {
    North,
    East,
    West,
    /// Center / neutral focus. Never a rotation target.
    #[default]
    Invalid,
}

impl Leaf {
    pub const ALL: [Leaf; LEAF_COUNT] = [Leaf::North, Leaf::East, Leaf::West];

    /// Storage index, `None` for `Invalid`.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Leaf::North => Some(0),
            Leaf::East => Some(1),
            Leaf::West => Some(2),
            Leaf::Invalid => None,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Leaf::North,
            1 => Leaf::East,
            2 => Leaf::West,
            _ => Leaf::Invalid,
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Leaf::Invalid)
    }

    /// Keyboard focus cycle: North, East, West, center, North.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Leaf::North => Leaf::East,
            Leaf::East => Leaf::West,
            Leaf::West => Leaf::Invalid,
            Leaf::Invalid => Leaf::North,
        }
    }

    /// The leaf occupying the same physical spot on the other face.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Leaf::East => Leaf::West,
            Leaf::West => Leaf::East,
            other => other,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Leaf::North => "NORTH",
            Leaf::East => "EAST",
            Leaf::West => "WEST",
            Leaf::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A face of the toy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Front, Side::Back];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Front => 0,
            Side::Back => 1,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => f.write_str("FRONT"),
            Side::Back => f.write_str("BACK"),
        }
    }
}

/// Whether the leaves of a side currently form a rotatable border ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrefoilStatus {
    /// Leaves rotate individually.
    Normal,
    /// All leaves snapped and the disk aligned: only the ring may rotate.
    BorderRotation,
    /// Marble set is corrupt. Not reachable through legal moves.
    Invalid,
}

impl fmt::Display for TrefoilStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrefoilStatus::Normal => f.write_str("NORMAL"),
            TrefoilStatus::BorderRotation => f.write_str("BORDER_ROTATION"),
            TrefoilStatus::Invalid => f.write_str("INVALID"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sectors() {
        assert_eq!(LEAF_SECTOR, 36.0);
        assert_eq!(RING_SECTOR, 12.0);
        assert_eq!(DISK_DOCK_STEP, 120.0);
        assert_eq!(BORDER_ALIGNMENT, 60.0);
        assert_eq!(FIRST_COMMON_POSITION, 7);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-60.0), 300.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_signed_degrees() {
        assert_eq!(signed_degrees(300.0), -60.0);
        assert_eq!(signed_degrees(180.0), 180.0);
        assert_eq!(signed_degrees(-180.0), 180.0);
        assert_eq!(signed_degrees(60.0), 60.0);
    }

    #[test]
    fn test_leaf_cycle() {
        let mut leaf = Leaf::Invalid;
        let mut seen = Vec::new();
        for _ in 0..4 {
            leaf = leaf.next();
            seen.push(leaf);
        }
        assert_eq!(seen, vec![Leaf::North, Leaf::East, Leaf::West, Leaf::Invalid]);
    }

    #[test]
    fn test_leaf_index_roundtrip() {
        for leaf in Leaf::ALL {
            assert_eq!(Leaf::from_index(leaf.index().unwrap()), leaf);
        }
        assert_eq!(Leaf::Invalid.index(), None);
        assert_eq!(Leaf::from_index(7), Leaf::Invalid);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Leaf::North.mirrored(), Leaf::North);
        assert_eq!(Leaf::East.mirrored(), Leaf::West);
        assert_eq!(Leaf::West.mirrored(), Leaf::East);
        assert_eq!(Leaf::Invalid.mirrored(), Leaf::Invalid);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Front.other(), Side::Back);
        assert_eq!(Side::Back.other().other(), Side::Back);
        assert_eq!(Side::default(), Side::Front);
    }
}
