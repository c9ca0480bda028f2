//! High-score entries.
//!
//! A [`ScoreRecord`] keeps who solved the puzzle, how long it took, at
//! which difficulty level, and the game as it stood when the entry was
//! made. Entries are persisted with bincode, one at a time or as a table.

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::game::{GameSnapshot, SpinPuzzleGame};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    username: String,
    /// Playing time in seconds.
    time: u64,
    level: u32,
    game: GameSnapshot,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(username: impl Into<String>, time: u64, level: u32, game: &SpinPuzzleGame) -> Self {
        Self {
            username: username.into(),
            time,
            level,
            game: game.snapshot(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The game at the time of the entry; [`SpinPuzzleGame::restore`] it to
    /// inspect or continue it.
    #[must_use]
    pub fn game(&self) -> &GameSnapshot {
        &self.game
    }

    pub fn update_time(&mut self, time: u64) {
        self.time = time;
    }

    pub fn update_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn save(&self) -> Result<Vec<u8>, PuzzleError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn load(bytes: &[u8]) -> Result<Self, PuzzleError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode several entries into one buffer, in order.
    pub fn save_table(records: &[ScoreRecord]) -> Result<Vec<u8>, PuzzleError> {
        Ok(bincode::serialize(records)?)
    }

    pub fn load_table(bytes: &[u8]) -> Result<Vec<ScoreRecord>, PuzzleError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
