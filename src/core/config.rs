//! Game configuration.
//!
//! `level` drives how hard the shuffle scrambles the puzzle. `speed` and
//! `realism` are carried for the presentation layer (drag gain and
//! animation granularity) and only validated here.
//!
//! ```
//! use spin_puzzle::core::GameConfig;
//!
//! let config = GameConfig::default().with_level(2).with_seed(7);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.shuffle_commands(), 100 + 32);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::PuzzleError;

pub const LEVEL_RANGE: RangeInclusive<u32> = 1..=10;
pub const SPEED_RANGE: RangeInclusive<f64> = 5.0..=20.0;
pub const REALISM_RANGE: RangeInclusive<u32> = 1..=17;

/// Commands applied by a shuffle at level 0, before the level term.
const BASE_SHUFFLE_COMMANDS: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub level: u32,
    pub speed: f64,
    pub realism: u32,
    /// Shuffle seed; `None` draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: "QSpinPuzzle".to_string(),
            level: 5,
            speed: 11.0,
            realism: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_realism(mut self, realism: u32) -> Self {
        self.realism = realism;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of random key presses a shuffle applies: `100 + level^5`.
    #[must_use]
    pub fn shuffle_commands(&self) -> usize {
        BASE_SHUFFLE_COMMANDS + (self.level as usize).pow(5)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.name.trim().is_empty() {
            return Err(PuzzleError::InvalidConfig("name must not be empty".into()));
        }
        if !LEVEL_RANGE.contains(&self.level) {
            return Err(PuzzleError::InvalidConfig(format!(
                "level {} outside {:?}",
                self.level, LEVEL_RANGE
            )));
        }
        if !SPEED_RANGE.contains(&self.speed) {
            return Err(PuzzleError::InvalidConfig(format!(
                "speed {} outside {:?}",
                self.speed, SPEED_RANGE
            )));
        }
        if !REALISM_RANGE.contains(&self.realism) {
            return Err(PuzzleError::InvalidConfig(format!(
                "realism {} outside {:?}",
                self.realism, REALISM_RANGE
            )));
        }
        Ok(())
    }
}
