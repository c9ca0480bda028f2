//! Move recorder with replay.
//!
//! `rec` captures a snapshot of the game and starts an empty history. The
//! caller appends every move the game accepted. Playback restores the
//! snapshot and re-applies the history, either in one go or step by step.
//!
//! ## Usage
//!
//! ```
//! use spin_puzzle::core::Leaf;
//! use spin_puzzle::game::SpinPuzzleGame;
//! use spin_puzzle::record::{Event, Recorder};
//!
//! let mut game = SpinPuzzleGame::new();
//! let mut recorder = Recorder::new();
//! recorder.rec(&game);
//!
//! let event = Event::RotateMarbles { leaf: Leaf::North, angle: 36.0 };
//! if game.apply(&event) {
//!     recorder.record(event, game.current_time_step());
//! }
//! recorder.stop();
//!
//! let end = game.get_side().clone();
//! recorder.replay(&mut game);
//! assert_eq!(game.get_side(), &end);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::{Event, EventRecord};
use crate::error::PuzzleError;
use crate::game::{GameSnapshot, SpinPuzzleGame};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recorder {
    start: Option<GameSnapshot>,
    events: Vector<EventRecord>,
    /// Index of the next event playback applies.
    cursor: usize,
    #[serde(skip)]
    recording: bool,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `game` and start a fresh history.
    pub fn rec(&mut self, game: &SpinPuzzleGame) {
        self.start = Some(game.snapshot());
        self.events = Vector::new();
        self.cursor = 0;
        self.recording = true;
        log::debug!("recording from time step {}", game.current_time_step());
    }

    /// Append an accepted move. Ignored unless recording.
    pub fn record(&mut self, event: Event, time_step: u64) -> bool {
        if !self.recording {
            return false;
        }
        self.events.push_back(EventRecord::new(event, time_step));
        self.cursor = self.events.len();
        true
    }

    pub fn stop(&mut self) {
        self.recording = false;
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Restore the starting snapshot and move the cursor to the first event.
    /// Stops recording. Returns `false` if nothing was ever recorded.
    pub fn rewind(&mut self, game: &mut SpinPuzzleGame) -> bool {
        let Some(start) = &self.start else {
            return false;
        };
        game.restore(start);
        self.cursor = 0;
        self.recording = false;
        true
    }

    /// Apply up to `steps` events from the cursor. Returns how many were
    /// applied.
    pub fn step_forward(&mut self, game: &mut SpinPuzzleGame, steps: usize) -> usize {
        let end = self.events.len().min(self.cursor.saturating_add(steps));
        let mut applied = 0;
        for record in self.events.iter().skip(self.cursor).take(end - self.cursor) {
            if !game.apply(&record.event) {
                log::warn!(
                    "recorded move rejected on replay: {} (time step {})",
                    record.event,
                    record.time_step
                );
            }
            applied += 1;
        }
        self.cursor = end;
        applied
    }

    /// Apply every remaining event.
    pub fn play(&mut self, game: &mut SpinPuzzleGame) -> usize {
        self.step_forward(game, usize::MAX)
    }

    /// Rewind and play the whole history.
    pub fn replay(&mut self, game: &mut SpinPuzzleGame) -> usize {
        if self.rewind(game) {
            self.play(game)
        } else {
            0
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn events(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    /// Encode snapshot and history with bincode.
    pub fn save(&self) -> Result<Vec<u8>, PuzzleError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a recording written by [`Recorder::save`], positioned at its
    /// end and not recording.
    pub fn load(bytes: &[u8]) -> Result<Self, PuzzleError> {
        let mut recorder: Recorder = bincode::deserialize(bytes)?;
        recorder.cursor = recorder.cursor.min(recorder.events.len());
        Ok(recorder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Leaf;

    fn record(recorder: &mut Recorder, game: &mut SpinPuzzleGame, event: Event) {
        if game.apply(&event) {
            recorder.record(event, game.current_time_step());
        }
    }

    #[test]
    fn test_record_requires_rec() {
        let mut recorder = Recorder::new();
        assert!(!recorder.record(Event::SwapSide, 1));
        assert_eq!(recorder.size(), 0);

        let mut game = SpinPuzzleGame::new();
        assert!(!recorder.rewind(&mut game));
        assert_eq!(recorder.replay(&mut game), 0);
    }

    #[test]
    fn test_step_forward_and_rewind() {
        let mut game = SpinPuzzleGame::new();
        let mut recorder = Recorder::new();
        recorder.rec(&game);
        record(&mut recorder, &mut game, Event::SpinLeaf { leaf: Leaf::North });
        record(&mut recorder, &mut game, Event::SwapSide);
        record(
            &mut recorder,
            &mut game,
            Event::RotateMarbles {
                leaf: Leaf::East,
                angle: 72.0,
            },
        );
        recorder.stop();
        assert_eq!(recorder.size(), 3);
        assert!(recorder.is_end());

        assert!(recorder.rewind(&mut game));
        assert!(game.is_game_solved());
        assert_eq!(recorder.current(), 0);

        assert_eq!(recorder.step_forward(&mut game, 2), 2);
        assert_eq!(recorder.current(), 2);
        assert!(!recorder.is_end());
        assert!(!game.is_game_solved());

        assert_eq!(recorder.play(&mut game), 1);
        assert!(recorder.is_end());
        assert_eq!(recorder.step_forward(&mut game, 5), 0);
    }

    #[test]
    fn test_rejected_moves_are_not_recorded() {
        let mut game = SpinPuzzleGame::new();
        let mut recorder = Recorder::new();
        recorder.rec(&game);
        record(&mut recorder, &mut game, Event::SpinLeaf { leaf: Leaf::Invalid });
        assert_eq!(recorder.size(), 0);
    }

    #[test]
    fn test_save_load() {
        let mut game = SpinPuzzleGame::new();
        let mut recorder = Recorder::new();
        recorder.rec(&game);
        record(&mut recorder, &mut game, Event::RotateInternalDisk { angle: 60.0 });
        record(&mut recorder, &mut game, Event::RotateBorder { angle: 36.0 });
        recorder.stop();

        let bytes = recorder.save().unwrap();
        let loaded = Recorder::load(&bytes).unwrap();
        assert_eq!(loaded, recorder);
        assert!(!loaded.is_recording());
    }

    #[test]
    fn test_load_garbage() {
        assert!(matches!(
            Recorder::load(&[1, 2, 3]),
            Err(PuzzleError::Serialization(_))
        ));
    }
}
