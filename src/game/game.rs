//! The two-faced puzzle and its player-facing command surface.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keyboard::{Command, KeyCode, KeyboardState};
use super::shuffle::random_key;
use crate::core::{
    Color, GameConfig, GameRng, GameRngState, Leaf, Marble, Side, TrefoilStatus,
    BORDER_ALIGNMENT, LEAF_COUNT, LEAF_SECTOR, RING_SECTOR, SPIN_HALF_TURN, SPIN_POSITIONS,
};
use crate::error::PuzzleError;
use crate::record::Event;
use crate::side::puzzle_side::check_marbles;
use crate::side::{LeafTrack, PuzzleSide, Track};

/// A full flip of one leaf.
const FULL_SPIN: f64 = 2.0 * SPIN_HALF_TURN;

/// Result of turning a leaf about its spin axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinOutcome {
    /// Not allowed; nothing changed.
    Rejected,
    /// The spin angle changed but the faces were not exchanged.
    Turned,
    /// The leaf went over: its marbles moved to the other face.
    Flipped,
}

impl SpinOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self != SpinOutcome::Rejected
    }

    #[must_use]
    pub fn is_flipped(self) -> bool {
        self == SpinOutcome::Flipped
    }
}

/// Everything needed to put a game back exactly where it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    sides: [PuzzleSide; 2],
    active_side: Side,
    spin_angles: [f64; LEAF_COUNT],
    keyboard: KeyboardState,
    time_step: u64,
    rng: GameRngState,
}

/// Front and back face, the active-side selector and the keyboard focus.
///
/// ## Example
///
/// ```
/// use spin_puzzle::core::Leaf;
/// use spin_puzzle::game::SpinPuzzleGame;
///
/// let mut game = SpinPuzzleGame::new();
/// assert!(game.is_game_solved());
///
/// assert!(game.spin_leaf(Leaf::North));
/// assert!(!game.is_game_solved());
///
/// assert!(game.spin_leaf(Leaf::North));
/// assert!(game.is_game_solved());
/// ```
#[derive(Clone, Debug)]
pub struct SpinPuzzleGame {
    sides: [PuzzleSide; 2],
    initial: [PuzzleSide; 2],
    /// Solved color of every leaf, per side.
    canonical: [[Color; LEAF_COUNT]; 2],
    active_side: Side,
    /// Spin angle per leaf of the active side, in `[-90, 90)`.
    spin_angles: [f64; LEAF_COUNT],
    keyboard: KeyboardState,
    time_step: u64,
    rng: GameRng,
    config: GameConfig,
}

impl Default for SpinPuzzleGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinPuzzleGame {
    /// Solved game with the default configuration.
    ///
    /// Front leaves are blue, green and magenta (ids `0..30`), back leaves
    /// cyan, red and yellow (ids `30..60`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        let front = PuzzleSide::from_leaf_colors(0, [Color::Blue, Color::Green, Color::Magenta]);
        let back = PuzzleSide::from_leaf_colors(30, [Color::Cyan, Color::Red, Color::Yellow]);
        Self::build([front, back], config)
    }

    /// Game over custom faces. The faces become the reset layout and each
    /// leaf's solved color is the color of its base marble.
    pub fn from_sides(front: PuzzleSide, back: PuzzleSide) -> Result<Self, PuzzleError> {
        check_marbles(front.marbles().chain(back.marbles()))?;
        Ok(Self::build([front, back], GameConfig::default()))
    }

    fn build(sides: [PuzzleSide; 2], config: GameConfig) -> Self {
        let canonical = std::array::from_fn(|side| {
            std::array::from_fn(|leaf| {
                sides[side]
                    .leaf(Leaf::from_index(leaf))
                    .map_or(Color::Invalid, |track| track.base_marble().color())
            })
        });
        Self {
            initial: sides.clone(),
            sides,
            canonical,
            active_side: Side::Front,
            spin_angles: [0.0; LEAF_COUNT],
            keyboard: KeyboardState::default(),
            time_step: 0,
            rng: GameRng::from_seed_option(config.seed),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn get_active_side(&self) -> Side {
        self.active_side
    }

    /// The active face.
    #[must_use]
    pub fn get_side(&self) -> &PuzzleSide {
        self.side(self.active_side)
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &PuzzleSide {
        &self.sides[side.index()]
    }

    fn active_mut(&mut self) -> &mut PuzzleSide {
        &mut self.sides[self.active_side.index()]
    }

    /// Internal disk phase of the active face.
    #[must_use]
    pub fn get_phase_shift_internal_disk(&self) -> f64 {
        self.get_side().phase_shift_internal_disk()
    }

    /// Keyboard focus; `Leaf::Invalid` means the internal disk.
    #[must_use]
    pub fn get_keybord_state(&self) -> Leaf {
        self.keyboard.focus()
    }

    /// Spin angle of `leaf` on the active face, `0.0` for `Invalid`.
    #[must_use]
    pub fn spin_angle(&self, leaf: Leaf) -> f64 {
        leaf.index().map_or(0.0, |i| self.spin_angles[i])
    }

    /// Solved color of `leaf` on `side`.
    #[must_use]
    pub fn canonical_color(&self, side: Side, leaf: Leaf) -> Color {
        leaf.index()
            .map_or(Color::Invalid, |i| self.canonical[side.index()][i])
    }

    /// Accepted moves so far. Focus changes are not moves.
    #[must_use]
    pub fn current_time_step(&self) -> u64 {
        self.time_step
    }

    #[must_use]
    pub fn marble_at(&self, side: Side, track: Track, position: isize) -> Marble {
        self.side(side).marble_at(track, position)
    }

    /// Every leaf on both faces shows only its solved color.
    #[must_use]
    pub fn is_game_solved(&self) -> bool {
        Side::ALL.iter().all(|&side| {
            let puzzle_side = self.side(side);
            puzzle_side.trifoild_status() != TrefoilStatus::Invalid
                && Leaf::ALL.iter().all(|&leaf| {
                    let color = self.canonical_color(side, leaf);
                    puzzle_side
                        .leaf(leaf)
                        .is_some_and(|track| track.iter().all(|m| m.color() == color))
                })
        })
    }

    /// Both faces together hold valid, unique marbles.
    pub fn check_consistency(&self) -> Result<(), PuzzleError> {
        check_marbles(self.sides[0].marbles().chain(self.sides[1].marbles()))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn tick(&mut self, accepted: bool) -> bool {
        if accepted {
            self.time_step += 1;
        }
        accepted
    }

    /// Back to the initial layout, front side active, focus on the disk.
    pub fn reset(&mut self) {
        self.sides = self.initial.clone();
        self.active_side = Side::Front;
        self.spin_angles = [0.0; LEAF_COUNT];
        self.keyboard = KeyboardState::default();
        self.tick(true);
        log::debug!("game reset at time step {}", self.time_step);
    }

    /// Scramble with `config.shuffle_commands()` random key presses.
    pub fn shuffle(&mut self) {
        let commands = self.config.shuffle_commands();
        self.run_shuffle(commands);
    }

    /// Scramble with a fresh generator seeded by `seed`.
    pub fn shuffle_with(&mut self, seed: u64, commands: usize) {
        self.rng = GameRng::new(seed);
        self.run_shuffle(commands);
    }

    fn run_shuffle(&mut self, commands: usize) {
        log::debug!("shuffling with {commands} key presses (seed {})", self.rng.seed());
        let mut accepted = 0_usize;
        for _ in 0..commands {
            let key = random_key(&mut self.rng);
            if self.apply_key(key, 1.0) {
                accepted += 1;
            }
        }
        log::debug!("shuffle accepted {accepted} of {commands} key presses");

        let consistency = self.check_consistency();
        if let Err(err) = &consistency {
            log::warn!("shuffle left the puzzle inconsistent: {err}");
        }
        debug_assert!(consistency.is_ok(), "shuffle broke the marble set");
        self.tick(true);
    }

    /// Make the other face active. Marbles stay where they are; the spin
    /// angles are seen mirrored from the other face.
    pub fn swap_side(&mut self) {
        self.toggle_side();
        self.tick(true);
    }

    fn toggle_side(&mut self) {
        let old = self.spin_angles;
        for leaf in Leaf::ALL {
            if let (Some(from), Some(to)) = (leaf.index(), leaf.mirrored().index()) {
                self.spin_angles[to] = wrap_spin(-old[from]).1;
            }
        }
        self.active_side = self.active_side.other();
        log::debug!("active side is now {}", self.active_side);
    }

    /// Turn one leaf of the active face.
    pub fn rotate_marbles(&mut self, leaf: Leaf, delta: f64) -> bool {
        let accepted = self.active_mut().rotate_marbles(leaf, delta);
        self.tick(accepted)
    }

    /// Turn the border ring of the active face.
    pub fn rotate_border(&mut self, delta: f64) -> bool {
        let accepted = self.active_mut().rotate_border(delta);
        self.tick(accepted)
    }

    /// Turn the internal disk of the active face.
    pub fn rotate_internal_disk(&mut self, delta: f64) -> bool {
        let accepted = self.active_mut().rotate_internal_disk(delta);
        self.tick(accepted)
    }

    /// Pull the internal disk of the active face onto a nearby dock or
    /// border alignment.
    pub fn snap_internal_disk(&mut self) -> bool {
        let accepted = self.active_mut().snap_internal_disk();
        self.tick(accepted)
    }

    /// Flip `leaf` over completely. Applying it twice restores both faces.
    ///
    /// Rejected for `Leaf::Invalid`, while either affected leaf is between
    /// two marble positions, and while either face is in border rotation.
    pub fn spin_leaf(&mut self, leaf: Leaf) -> bool {
        self.spin_leaf_by(leaf, FULL_SPIN).is_flipped()
    }

    /// Turn `leaf` about its spin axis by `angle` degrees. Each crossing of
    /// the edge-on position exchanges positions `1..=5` with the mirrored
    /// leaf of the other face.
    pub fn spin_leaf_by(&mut self, leaf: Leaf, angle: f64) -> SpinOutcome {
        let outcome = self.turn_leaf(leaf, angle);
        self.tick(outcome.is_accepted());
        outcome
    }

    fn can_spin(&self, leaf: Leaf) -> bool {
        let active = self.get_side();
        let other = self.side(self.active_side.other());
        !active.is_in_border_rotation()
            && !other.is_in_border_rotation()
            && active.leaf(leaf).is_some_and(LeafTrack::is_snapped)
            && other.leaf(leaf.mirrored()).is_some_and(LeafTrack::is_snapped)
    }

    fn turn_leaf(&mut self, leaf: Leaf, angle: f64) -> SpinOutcome {
        let Some(index) = leaf.index() else {
            return SpinOutcome::Rejected;
        };
        if !angle.is_finite() || !self.can_spin(leaf) {
            return SpinOutcome::Rejected;
        }

        let (flips, residual) = wrap_spin(self.spin_angles[index] + angle);
        self.spin_angles[index] = residual;
        if flips % 2 == 0 {
            return SpinOutcome::Turned;
        }
        self.exchange_leaf(leaf);
        log::trace!("{leaf} leaf flipped to the {} side", self.active_side.other());
        SpinOutcome::Flipped
    }

    /// Swap the spin positions of `leaf` with its mirror on the other face.
    fn exchange_leaf(&mut self, leaf: Leaf) {
        let [front, back] = &mut self.sides;
        let (active, other) = match self.active_side {
            Side::Front => (front, back),
            Side::Back => (back, front),
        };
        let (Some(near), Some(far)) = (active.leaf_mut(leaf), other.leaf_mut(leaf.mirrored()))
        else {
            return;
        };
        for position in SPIN_POSITIONS {
            let marble = near.marble(position);
            let displaced = far.replace(position, marble);
            near.replace(position, displaced);
        }
    }

    /// Handle one key press. `fraction` scales the rotation step of the
    /// arrow keys: a leaf turns `36 * fraction` degrees, the border ring
    /// `12 * fraction` and the internal disk `60 * fraction`.
    pub fn process_key(&mut self, key: KeyCode, fraction: f64) -> bool {
        let accepted = self.apply_key(key, fraction);
        let moved = !matches!(
            key,
            KeyCode::North | KeyCode::East | KeyCode::West | KeyCode::Internal | KeyCode::Cycle
        );
        self.tick(accepted && moved);
        accepted
    }

    /// [`SpinPuzzleGame::process_key`] for a raw toolkit key code.
    /// Unknown codes are rejected.
    pub fn process_key_code(&mut self, code: i32, fraction: f64) -> bool {
        KeyCode::try_from(code).is_ok_and(|key| self.process_key(key, fraction))
    }

    /// Press every key of `command` with whole steps.
    pub fn process_command(&mut self, command: Command) -> bool {
        let mut accepted = true;
        for key in command.keys() {
            accepted &= self.process_key(key, 1.0);
        }
        accepted
    }

    fn apply_key(&mut self, key: KeyCode, fraction: f64) -> bool {
        match key {
            KeyCode::North | KeyCode::East | KeyCode::West | KeyCode::Internal => {
                self.keyboard.select(key.selects().unwrap_or_default());
                true
            }
            KeyCode::Cycle => {
                self.keyboard.cycle();
                true
            }
            KeyCode::Left | KeyCode::Right => {
                let direction = if key == KeyCode::Right { 1.0 } else { -1.0 };
                let focus = self.keyboard.focus();
                let side = self.active_mut();
                if !focus.is_valid() {
                    side.rotate_internal_disk(direction * BORDER_ALIGNMENT * fraction)
                } else if side.is_in_border_rotation() {
                    side.rotate_border(direction * RING_SECTOR * fraction)
                } else {
                    side.rotate_marbles(focus, direction * LEAF_SECTOR * fraction)
                }
            }
            KeyCode::PageUp => self.turn_leaf(self.keyboard.focus(), FULL_SPIN).is_flipped(),
            KeyCode::PageDown => self.turn_leaf(self.keyboard.focus(), -FULL_SPIN).is_flipped(),
            KeyCode::SwapSide => {
                self.toggle_side();
                true
            }
        }
    }

    /// Replay one recorded event. Returns whether it was accepted.
    pub fn apply(&mut self, event: &Event) -> bool {
        match *event {
            Event::RotateMarbles { leaf, angle } => self.rotate_marbles(leaf, angle),
            Event::RotateBorder { angle } => self.rotate_border(angle),
            Event::RotateInternalDisk { angle } => self.rotate_internal_disk(angle),
            Event::SpinLeafAngle { leaf, angle } => self.spin_leaf_by(leaf, angle).is_accepted(),
            Event::SpinLeaf { leaf } => self.spin_leaf(leaf),
            Event::SwapSide => {
                self.swap_side();
                true
            }
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            sides: self.sides.clone(),
            active_side: self.active_side,
            spin_angles: self.spin_angles,
            keyboard: self.keyboard,
            time_step: self.time_step,
            rng: self.rng.state(),
        }
    }

    /// Put the game back to `snapshot`, time step included.
    pub fn restore(&mut self, snapshot: &GameSnapshot) {
        self.sides = snapshot.sides.clone();
        self.active_side = snapshot.active_side;
        self.spin_angles = snapshot.spin_angles;
        self.keyboard = snapshot.keyboard;
        self.time_step = snapshot.time_step;
        self.rng = GameRng::from_state(&snapshot.rng);
    }
}

/// Split a spin angle into face exchanges and a residual in `[-90, 90)`.
fn wrap_spin(angle: f64) -> (i64, f64) {
    let (steps, residual) = crate::side::track::quantize(-angle, FULL_SPIN);
    let residual = if residual == 0.0 { 0.0 } else { -residual };
    (-steps, residual)
}

impl fmt::Display for SpinPuzzleGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "active side: {}, focus: {}, time step: {}",
            self.active_side,
            self.keyboard.focus(),
            self.time_step
        )?;
        for side in Side::ALL {
            writeln!(f, "[{side}]")?;
            writeln!(f, "{}", self.side(side))?;
        }
        Ok(())
    }
}
