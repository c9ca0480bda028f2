//! Property-based tests for rotation quantization and move invariants.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated move sequences.

use proptest::prelude::*;
use spin_puzzle::core::{Color, Leaf, Marble, Side, TrefoilStatus};
use spin_puzzle::game::{KeyCode, SpinPuzzleGame};
use spin_puzzle::record::{Event, Recorder};
use spin_puzzle::side::{LeafTrack, PuzzleSide, Track};

fn fixture_track() -> LeafTrack {
    LeafTrack::new(std::array::from_fn(|i| Marble::new(i as u32, Color::Black)))
}

fn sorted_marbles(game: &SpinPuzzleGame) -> Vec<Marble> {
    let mut marbles: Vec<Marble> = Side::ALL
        .iter()
        .flat_map(|&side| game.side(side).marbles().map(|(_, _, m)| m).collect::<Vec<_>>())
        .collect();
    marbles.sort_by_key(|m| m.id());
    marbles
}

prop_compose! {
    fn arbitrary_leaf()(index in 0..3usize) -> Leaf {
        Leaf::from_index(index)
    }
}

prop_compose! {
    fn arbitrary_key()(index in 0..KeyCode::ALL.len()) -> KeyCode {
        KeyCode::ALL[index]
    }
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arbitrary_leaf(), -200.0..200.0f64)
            .prop_map(|(leaf, angle)| Event::RotateMarbles { leaf, angle }),
        (-40.0..40.0f64).prop_map(|angle| Event::RotateBorder { angle }),
        prop::sample::select(vec![60.0, -60.0, 120.0, -120.0, 30.0])
            .prop_map(|angle| Event::RotateInternalDisk { angle }),
        (arbitrary_leaf(), -120.0..120.0f64)
            .prop_map(|(leaf, angle)| Event::SpinLeafAngle { leaf, angle }),
        arbitrary_leaf().prop_map(|leaf| Event::SpinLeaf { leaf }),
        Just(Event::SwapSide),
    ]
}

proptest! {
    /// Leaf residual stays in (-18, 18] and whole steps plus residual add
    /// up to the total requested rotation.
    #[test]
    fn prop_leaf_rotation_has_no_drift(deltas in prop::collection::vec(-100.0..100.0f64, 1..40)) {
        let mut track = fixture_track();
        let mut total = 0.0;

        for delta in deltas {
            prop_assert!(track.rotate(delta));
            total += delta;

            let angle = track.angle();
            prop_assert!(angle > -18.0 && angle <= 18.0, "angle {}", angle);

            // base marble id k means the leaf moved -k sectors (mod 10)
            let steps = (10 - track.base_marble().id() as i64) % 10;
            let expected = (total - angle).rem_euclid(360.0);
            let actual = (steps as f64 * 36.0).rem_euclid(360.0);
            let diff = (expected - actual).abs();
            prop_assert!(diff < 1e-6 || (360.0 - diff) < 1e-6, "expected {} got {}", expected, actual);
        }
    }

    /// Rotating by anything up to a half sector never snaps.
    #[test]
    fn prop_half_sector_never_snaps(delta in 0.0..=18.0f64) {
        let mut track = fixture_track();
        track.rotate(delta);
        prop_assert_eq!(track.base_marble().id(), 0);
    }

    /// Anything past a half sector (and below a sector and a half) snaps once.
    #[test]
    fn prop_past_half_sector_snaps(epsilon in 1e-6..36.0f64) {
        let mut track = fixture_track();
        track.rotate(18.0 + epsilon);
        prop_assert_eq!(track.base_marble().id(), 9);
        prop_assert!((track.angle() - (epsilon - 18.0)).abs() < 1e-9);
    }

    /// Keys never create, lose or alter a marble, and never corrupt a side.
    #[test]
    fn prop_keys_preserve_marbles(
        keys in prop::collection::vec((arbitrary_key(), prop::sample::select(vec![0.25, 0.5, 1.0])), 0..120)
    ) {
        let mut game = SpinPuzzleGame::new();
        let expected = sorted_marbles(&game);

        for (key, fraction) in keys {
            game.process_key(key, fraction);
        }

        prop_assert_eq!(sorted_marbles(&game), expected);
        for side in Side::ALL {
            prop_assert_ne!(game.side(side).trifoild_status(), TrefoilStatus::Invalid);
        }
    }

    /// Arbitrary moves keep every face consistent.
    #[test]
    fn prop_events_preserve_marbles(events in prop::collection::vec(arbitrary_event(), 0..80)) {
        let mut game = SpinPuzzleGame::new();
        for event in &events {
            game.apply(event);
        }
        prop_assert!(game.check_consistency().is_ok());
    }

    /// Shuffles never leave an invalid side, whatever the seed.
    #[test]
    fn prop_shuffle_never_invalid(seed in any::<u64>(), commands in 0..600usize) {
        let mut game = SpinPuzzleGame::new();
        game.shuffle_with(seed, commands);
        for side in Side::ALL {
            prop_assert_ne!(game.side(side).trifoild_status(), TrefoilStatus::Invalid);
        }
    }

    /// A full spin applied twice restores both faces.
    #[test]
    fn prop_spin_twice_is_identity(seed in any::<u64>(), leaf in arbitrary_leaf()) {
        let mut game = SpinPuzzleGame::new();
        game.shuffle_with(seed, 200);
        let front = game.side(Side::Front).clone();
        let back = game.side(Side::Back).clone();

        if game.spin_leaf(leaf) {
            prop_assert!(game.spin_leaf(leaf));
        }
        prop_assert_eq!(game.side(Side::Front), &front);
        prop_assert_eq!(game.side(Side::Back), &back);
    }

    /// Swapping sides twice changes nothing but the time step.
    #[test]
    fn prop_swap_twice_is_identity(seed in any::<u64>()) {
        let mut game = SpinPuzzleGame::new();
        game.shuffle_with(seed, 150);
        let front = game.side(Side::Front).clone();
        let back = game.side(Side::Back).clone();
        let active = game.get_active_side();

        game.swap_side();
        game.swap_side();

        prop_assert_eq!(game.get_active_side(), active);
        prop_assert_eq!(game.side(Side::Front), &front);
        prop_assert_eq!(game.side(Side::Back), &back);
    }

    /// Ring rotation there and back restores the ring.
    #[test]
    fn prop_ring_rotation_reverses(delta in -200.0..200.0f64, west in any::<bool>()) {
        let mut side = PuzzleSide::default();
        side.rotate_internal_disk(if west { -60.0 } else { 60.0 });
        let before: Vec<u32> = side.iter(Track::Border).map(|c| c.id()).collect();

        prop_assert!(side.rotate_border(delta));
        prop_assert!(side.rotate_border(-delta));

        let after: Vec<u32> = side.iter(Track::Border).map(|c| c.id()).collect();
        prop_assert_eq!(after, before);
    }

    /// Replaying a recording reproduces the recorded end state.
    #[test]
    fn prop_replay_reproduces(seed in any::<u64>(), events in prop::collection::vec(arbitrary_event(), 0..60)) {
        let mut game = SpinPuzzleGame::new();
        game.shuffle_with(seed, 100);

        let mut recorder = Recorder::new();
        recorder.rec(&game);
        for event in events {
            if game.apply(&event) {
                recorder.record(event, game.current_time_step());
            }
        }
        recorder.stop();
        let end = game.snapshot();

        recorder.replay(&mut game);
        prop_assert_eq!(game.snapshot(), end);
    }
}
