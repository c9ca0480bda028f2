//! The two-faced game: spin moves, keyboard handling and shuffling.

mod game;
pub mod keyboard;
pub mod shuffle;

pub use game::{GameSnapshot, SpinOutcome, SpinPuzzleGame};
pub use keyboard::{Command, KeyCode, KeyboardState};
pub use shuffle::{random_key, random_keys, SHUFFLE_KEYS};
