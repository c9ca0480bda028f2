//! Random key source for shuffling.
//!
//! A shuffle only ever presses keys a player could press, with whole-step
//! fractions, so every scramble stays inside the group of legal positions
//! and every side stays snapped between presses.

use super::keyboard::KeyCode;
use crate::core::GameRng;

/// Keys a shuffle draws from. `Cycle` and `PageDown` are left out since
/// they duplicate the effect of other keys.
pub const SHUFFLE_KEYS: [KeyCode; 8] = [
    KeyCode::North,
    KeyCode::East,
    KeyCode::West,
    KeyCode::Internal,
    KeyCode::PageUp,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::SwapSide,
];

/// Draw one shuffle key.
pub fn random_key(rng: &mut GameRng) -> KeyCode {
    SHUFFLE_KEYS[rng.gen_range_usize(0..SHUFFLE_KEYS.len())]
}

/// Draw `count` shuffle keys.
pub fn random_keys(rng: &mut GameRng, count: usize) -> impl Iterator<Item = KeyCode> + '_ {
    (0..count).map(move |_| random_key(rng))
}
