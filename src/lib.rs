//! # spin-puzzle
//!
//! State engine for a two-faced marble puzzle: three leaves of ten marbles
//! around a rotating internal disk, with a hidden second face reached by
//! spinning a leaf over.
//!
//! ## Design Principles
//!
//! 1. **Permutations only**: every move permutes marbles between slots. No
//!    move creates, alters or duplicates a marble.
//!
//! 2. **Quantized rotation**: continuous input accumulates in a residual
//!    angle and snaps by whole marble sectors, so long drags never drift.
//!
//! 3. **Rejection, not errors**: a disallowed move returns `false` and
//!    leaves the puzzle untouched. `Result` is reserved for construction,
//!    parsing and persistence.
//!
//! ## Modules
//!
//! - `core`: colors, marbles, leaves, sides, RNG, configuration
//! - `side`: leaf tracks, internal disk, border ring, cursors
//! - `game`: the two-faced game, spins, keyboard handling, shuffling
//! - `record`: move recording and replay, high-score entries
//! - `metrics`: progress scoring
//!
//! ## Example
//!
//! ```
//! use spin_puzzle::{KeyCode, Leaf, SpinPuzzleGame};
//!
//! let mut game = SpinPuzzleGame::new();
//! game.process_key(KeyCode::East, 1.0);
//! game.process_key(KeyCode::Right, 1.0);
//! assert_eq!(game.get_side().begin(Leaf::East).id(), 19);
//! ```

pub mod core;
pub mod error;
pub mod side;
pub mod game;
pub mod record;
pub mod metrics;

// Re-export commonly used types
pub use crate::core::{Color, GameConfig, GameRng, GameRngState, Leaf, Marble, Side, TrefoilStatus};

pub use crate::error::PuzzleError;

pub use crate::side::{LeafTrack, MarbleCursor, PuzzleSide, Track};

pub use crate::game::{Command, GameSnapshot, KeyCode, KeyboardState, SpinOutcome, SpinPuzzleGame};

pub use crate::record::{Event, EventRecord, Recorder, ScoreRecord};

pub use crate::metrics::naive_disorder;
