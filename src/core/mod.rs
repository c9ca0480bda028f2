//! Core value types: colors, marbles, leaves and sides, RNG, configuration.
//!
//! Everything here is plain data with no knowledge of how a side arranges
//! its marbles.

pub mod color;
pub mod marble;
pub mod geometry;
pub mod rng;
pub mod config;

pub use color::Color;
pub use marble::{Marble, INVALID_ID};
pub use geometry::{
    normalize_degrees, signed_degrees, Leaf, Side, TrefoilStatus, ALIGNMENT_EPSILON,
    BORDER_ALIGNMENT, COMMON_MARBLES, DISK_DOCK_STEP, FIRST_COMMON_POSITION, FULL_TURN, LEAF_COUNT,
    LEAF_SECTOR, MARBLES_PER_LEAF, MARBLES_PER_SIDE, OUTER_MARBLES, RING_SECTOR, SNAP_EPSILON,
    SPIN_HALF_TURN, SPIN_POSITIONS, TOLERANCE_ANGLE,
};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
