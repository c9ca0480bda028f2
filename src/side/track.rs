//! Leaf track: ten marbles on a circle plus a continuous residual angle.
//!
//! ## Quantization
//!
//! Continuous input accumulates into `angle`. Whenever the residual leaves
//! `(-18, 18]` the track snaps by whole 36 degree sectors, so the residual is
//! always re-centered and never drifts. Exactly `+18` stays unsnapped.
//!
//! ## Storage
//!
//! Marbles live in a fixed array. A `base` index names the storage slot that
//! currently sits at position 0, so a snap only moves the index.
//!
//! ```
//! use spin_puzzle::core::{Color, Marble};
//! use spin_puzzle::side::LeafTrack;
//!
//! let mut track = LeafTrack::new(std::array::from_fn(|i| Marble::new(i as u32, Color::Red)));
//! track.rotate(9.0);
//! assert_eq!(track.base_marble().id(), 0);
//! track.rotate(18.0);
//! assert_eq!(track.angle(), -9.0);
//! assert_eq!(track.base_marble().id(), 9);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Marble, FULL_TURN, LEAF_SECTOR, MARBLES_PER_LEAF, SNAP_EPSILON};

/// Split `angle` into whole sectors and a residual in `(-sector/2, sector/2]`.
///
/// `sector` must divide a full turn. Steps are counted modulo a full turn,
/// so any finite angle costs at most one turn's worth of sectors.
/// Residuals within [`SNAP_EPSILON`] of zero come back as exactly `0.0`.
pub(crate) fn quantize(angle: f64, sector: f64) -> (i64, f64) {
    let half = sector / 2.0;
    let mut steps = 0_i64;
    // `%` is exact and keeps the sign, so small angles pass through as is.
    let mut residual = angle % FULL_TURN;

    while residual > half {
        residual -= sector;
        steps += 1;
    }
    while residual <= -half {
        residual += sector;
        steps -= 1;
    }

    if residual.abs() < SNAP_EPSILON {
        residual = 0.0;
    }
    (steps, residual)
}

/// One leaf of a side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafTrack {
    slots: [Marble; MARBLES_PER_LEAF],
    base: usize,
    angle: f64,
}

impl LeafTrack {
    /// Marbles in position order, snapped.
    #[must_use]
    pub fn new(marbles: [Marble; MARBLES_PER_LEAF]) -> Self {
        Self {
            slots: marbles,
            base: 0,
            angle: 0.0,
        }
    }

    /// Accumulate `delta` degrees and snap whole sectors.
    ///
    /// Returns `false` only for a non-finite `delta`, which is ignored.
    pub fn rotate(&mut self, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let (steps, residual) = quantize(self.angle + delta, LEAF_SECTOR);
        self.shift(steps);
        self.angle = residual;
        if steps != 0 {
            log::trace!("leaf snapped {steps} sector(s), residual {residual}");
        }
        true
    }

    /// Move every marble `steps` positions forward.
    pub(crate) fn shift(&mut self, steps: i64) {
        let len = MARBLES_PER_LEAF as i64;
        self.base = (self.base as i64 - steps.rem_euclid(len)).rem_euclid(len) as usize;
    }

    fn slot_index(&self, position: usize) -> usize {
        (self.base + position) % MARBLES_PER_LEAF
    }

    /// Marble at `position`, wrapping modulo ten.
    #[must_use]
    pub fn marble(&self, position: usize) -> Marble {
        self.slots[self.slot_index(position)]
    }

    #[must_use]
    pub fn base_marble(&self) -> Marble {
        self.marble(0)
    }

    /// Put `marble` at `position` and hand back the one it displaces.
    pub(crate) fn replace(&mut self, position: usize, marble: Marble) -> Marble {
        let index = self.slot_index(position);
        std::mem::replace(&mut self.slots[index], marble)
    }

    /// Residual angle in `(-18, 18]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.angle == 0.0
    }

    /// Marbles in position order.
    pub fn iter(&self) -> impl Iterator<Item = Marble> + '_ {
        (0..MARBLES_PER_LEAF).map(move |position| self.marble(position))
    }

    #[must_use]
    pub fn to_array(&self) -> [Marble; MARBLES_PER_LEAF] {
        std::array::from_fn(|position| self.marble(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn fixture() -> LeafTrack {
        LeafTrack::new(std::array::from_fn(|i| Marble::new(i as u32, Color::Black)))
    }

    fn ids(track: &LeafTrack) -> Vec<u32> {
        track.iter().map(Marble::id).collect()
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0, 36.0), (0, 0.0));
        assert_eq!(quantize(18.0, 36.0), (0, 18.0));
        assert_eq!(quantize(27.0, 36.0), (1, -9.0));
        assert_eq!(quantize(-18.0, 36.0), (-1, 18.0));
        assert_eq!(quantize(54.0, 36.0), (1, 18.0));
        assert_eq!(quantize(-53.0, 36.0), (-1, -17.0));
        assert_eq!(quantize(360.0, 36.0), (0, 0.0));
        assert_eq!(quantize(-360.0, 12.0), (0, 0.0));
        assert_eq!(quantize(6.0, 12.0), (0, 6.0));
        assert_eq!(quantize(-6.0, 12.0), (-1, 6.0));
    }

    #[test]
    fn test_quantize_snaps_near_zero() {
        let (steps, residual) = quantize(36.0 + 1e-12, 36.0);
        assert_eq!(steps, 1);
        assert_eq!(residual, 0.0);
    }

    #[test]
    fn test_quantize_large_input() {
        let (steps, residual) = quantize(36.0 * 1_000_001.0 + 9.0, 36.0);
        assert_eq!(steps.rem_euclid(10), 1);
        assert_eq!(residual, 9.0);

        // 1e21 is 280 degrees past a whole number of turns
        assert_eq!(quantize(1e21, 36.0), (8, -8.0));
        assert_eq!(quantize(1e21, 12.0), (23, 4.0));
        assert!(quantize(f64::MAX, 36.0).1.abs() <= 18.0);
    }

    #[test]
    fn test_rotate_huge_angles() {
        let mut track = fixture();
        assert!(track.rotate(1e21));
        assert_eq!(track.base_marble().id(), 2);
        assert_eq!(track.angle(), -8.0);

        // 3.48e20 is 240 degrees past a whole number of turns
        let mut track = fixture();
        assert!(track.rotate(3.48e20));
        assert_eq!(track.base_marble().id(), 3);
        assert_eq!(track.angle(), -12.0);

        let mut track = fixture();
        assert!(track.rotate(-1e21));
        assert_eq!(track.base_marble().id(), 8);
        assert_eq!(track.angle(), 8.0);

        let mut track = fixture();
        for _ in 0..50 {
            assert!(track.rotate(3.4809613348074625e20));
        }
        assert!(track.angle() > -18.0 && track.angle() <= 18.0);
    }

    #[test]
    fn test_rotate_half_sector_does_not_snap() {
        let mut track = fixture();
        assert!(track.rotate(18.0));
        assert_eq!(track.angle(), 18.0);
        assert_eq!(track.base_marble().id(), 0);
    }

    #[test]
    fn test_rotate_past_half_sector_snaps() {
        let mut track = fixture();
        track.rotate(18.5);
        assert_eq!(track.angle(), -17.5);
        assert_eq!(track.base_marble().id(), 9);
    }

    #[test]
    fn test_rotate_fixture_sequence() {
        let mut track = fixture();
        track.rotate(9.0);
        assert_eq!(track.angle(), 9.0);
        assert_eq!(track.base_marble().id(), 0);

        track.rotate(18.0);
        assert_eq!(track.angle(), -9.0);
        assert_eq!(track.base_marble().id(), 9);
    }

    #[test]
    fn test_full_sector_steps() {
        let mut track = fixture();
        track.rotate(36.0);
        assert!(track.is_snapped());
        assert_eq!(ids(&track), vec![9, 0, 1, 2, 3, 4, 5, 6, 7, 8]);

        track.rotate(-72.0);
        assert_eq!(ids(&track), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);

        track.rotate(36.0 * 11.0);
        assert_eq!(ids(&track), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut track = fixture();
        assert!(!track.rotate(f64::NAN));
        assert!(!track.rotate(f64::INFINITY));
        assert!(track.is_snapped());
        assert_eq!(track.base_marble().id(), 0);
    }

    #[test]
    fn test_replace_uses_positions() {
        let mut track = fixture();
        track.rotate(36.0);
        let old = track.replace(1, Marble::new(99, Color::White));
        assert_eq!(old.id(), 0);
        assert_eq!(track.marble(1).id(), 99);
        assert_eq!(track.marble(11).id(), 99);
    }

    #[test]
    fn test_serde() {
        let mut track = fixture();
        track.rotate(40.0);
        let json = serde_json::to_string(&track).unwrap();
        let back: LeafTrack = serde_json::from_str(&json).unwrap();
        assert_eq!(track, back);
    }
}
