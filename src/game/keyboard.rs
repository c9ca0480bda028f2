//! Logical keys, keyboard focus and named commands.
//!
//! The presentation layer translates device input into [`KeyCode`]s (or
//! passes raw toolkit codes through [`KeyCode::try_from`]). Named
//! [`Command`]s expand into the key sequence a player would type.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::core::Leaf;
use crate::error::PuzzleError;

/// A key the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Focus the North leaf.
    North,
    East,
    West,
    /// Focus the internal disk (no leaf).
    Internal,
    /// Step focus North, East, West, center.
    Cycle,
    Left,
    Right,
    /// Spin the focused leaf.
    PageUp,
    PageDown,
    SwapSide,
}

impl KeyCode {
    pub const ALL: [KeyCode; 10] = [
        KeyCode::North,
        KeyCode::East,
        KeyCode::West,
        KeyCode::Internal,
        KeyCode::Cycle,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::PageUp,
        KeyCode::PageDown,
        KeyCode::SwapSide,
    ];

    /// Key code of the GUI toolkit.
    #[must_use]
    pub const fn qt_code(self) -> i32 {
        match self {
            KeyCode::North => 0x4E,
            KeyCode::East => 0x45,
            KeyCode::West => 0x57,
            KeyCode::Internal => 0x49,
            KeyCode::SwapSide => 0x50,
            KeyCode::Cycle => 0x0100_0001,
            KeyCode::Left => 0x0100_0012,
            KeyCode::Right => 0x0100_0014,
            KeyCode::PageUp => 0x0100_0016,
            KeyCode::PageDown => 0x0100_0017,
        }
    }

    /// Leaf a selection key focuses, if it is one.
    #[must_use]
    pub const fn selects(self) -> Option<Leaf> {
        match self {
            KeyCode::North => Some(Leaf::North),
            KeyCode::East => Some(Leaf::East),
            KeyCode::West => Some(Leaf::West),
            KeyCode::Internal => Some(Leaf::Invalid),
            _ => None,
        }
    }
}

impl TryFrom<i32> for KeyCode {
    type Error = PuzzleError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        KeyCode::ALL
            .iter()
            .copied()
            .find(|key| key.qt_code() == code)
            .ok_or(PuzzleError::UnknownKey(code))
    }
}

/// Which leaf keyboard rotation applies to; `Leaf::Invalid` is the disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyboardState {
    focus: Leaf,
}

impl KeyboardState {
    #[must_use]
    pub fn focus(&self) -> Leaf {
        self.focus
    }

    pub fn select(&mut self, leaf: Leaf) {
        self.focus = leaf;
    }

    pub fn cycle(&mut self) -> Leaf {
        self.focus = self.focus.next();
        self.focus
    }
}

/// Whole-step moves, each the equivalent of a short key sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    NorthRight,
    NorthLeft,
    NorthSpin,
    EastRight,
    EastLeft,
    EastSpin,
    WestRight,
    WestLeft,
    WestSpin,
    InternalRight,
    InternalLeft,
    SwapSide,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::NorthRight,
        Command::NorthLeft,
        Command::NorthSpin,
        Command::EastRight,
        Command::EastLeft,
        Command::EastSpin,
        Command::WestRight,
        Command::WestLeft,
        Command::WestSpin,
        Command::InternalRight,
        Command::InternalLeft,
        Command::SwapSide,
    ];

    /// Keys to press, in order.
    #[must_use]
    pub fn keys(self) -> SmallVec<[KeyCode; 2]> {
        use KeyCode as K;
        match self {
            Command::NorthRight => smallvec![K::North, K::Right],
            Command::NorthLeft => smallvec![K::North, K::Left],
            Command::NorthSpin => smallvec![K::North, K::PageUp],
            Command::EastRight => smallvec![K::East, K::Right],
            Command::EastLeft => smallvec![K::East, K::Left],
            Command::EastSpin => smallvec![K::East, K::PageUp],
            Command::WestRight => smallvec![K::West, K::Right],
            Command::WestLeft => smallvec![K::West, K::Left],
            Command::WestSpin => smallvec![K::West, K::PageUp],
            Command::InternalRight => smallvec![K::Internal, K::Right],
            Command::InternalLeft => smallvec![K::Internal, K::Left],
            Command::SwapSide => smallvec![K::SwapSide],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qt_code_roundtrip() {
        for key in KeyCode::ALL {
            assert_eq!(KeyCode::try_from(key.qt_code()), Ok(key));
        }
        assert_eq!(KeyCode::try_from(0x41), Err(PuzzleError::UnknownKey(0x41)));
    }

    #[test]
    fn test_cycle_focus() {
        let mut state = KeyboardState::default();
        assert_eq!(state.focus(), Leaf::Invalid);
        assert_eq!(state.cycle(), Leaf::North);
        assert_eq!(state.cycle(), Leaf::East);
        assert_eq!(state.cycle(), Leaf::West);
        assert_eq!(state.cycle(), Leaf::Invalid);
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(Command::EastSpin.keys().as_slice(), &[KeyCode::East, KeyCode::PageUp]);
        assert_eq!(Command::SwapSide.keys().len(), 1);
        assert!(Command::ALL
            .iter()
            .all(|c| !c.keys().spilled() && !c.keys().is_empty()));
    }

    #[test]
    fn test_selects() {
        assert_eq!(KeyCode::Internal.selects(), Some(Leaf::Invalid));
        assert_eq!(KeyCode::West.selects(), Some(Leaf::West));
        assert_eq!(KeyCode::Left.selects(), None);
    }
}
