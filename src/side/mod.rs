//! Marble layout of a single face: leaf tracks, the internal disk and the
//! border ring, plus read-only cursors over them.

pub mod track;
pub mod cursor;
pub mod puzzle_side;

pub use track::LeafTrack;
pub use cursor::{MarbleCursor, Track};
pub use puzzle_side::PuzzleSide;
