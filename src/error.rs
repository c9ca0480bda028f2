//! Error type for fallible constructors, parsing and persistence.
//!
//! Disallowed moves are not errors: rotation and spin commands report
//! rejection through their `bool` return and leave the puzzle untouched.

use thiserror::Error;

use crate::core::Leaf;

/// Errors produced while building, parsing or persisting puzzle state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected {expected} marbles, found {found}")]
    MarbleCount { expected: usize, found: usize },

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown key code: {0:#x}")]
    UnknownKey(i32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("marble id {0} appears more than once")]
    DuplicateMarble(u32),

    #[error("invalid marble at {leaf} position {position}")]
    InvalidMarble { leaf: Leaf, position: usize },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for PuzzleError {
    fn from(err: bincode::Error) -> Self {
        PuzzleError::Serialization(err.to_string())
    }
}
