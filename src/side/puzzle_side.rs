//! One face of the puzzle: three leaf tracks around a rotating internal disk.
//!
//! ## Internal disk
//!
//! Positions `7..=9` of every leaf sit on the internal disk. The disk docks
//! every 120 degrees. When a rotation sweeps into the capture window of a
//! dock, the three common groups are handed on: one dock forward sends
//! North's group to East, East's to West and West's to North. Leaves and
//! the border ring must be snapped before the disk may turn.
//!
//! ## Border ring
//!
//! Halfway between two docks (60 degrees off the current dock) the outer
//! marbles of all three leaves line up with the common groups into a single
//! thirty-slot ring. While every leaf is snapped and the disk stands exactly
//! there, the side is in [`TrefoilStatus::BorderRotation`]: single leaves are
//! locked and only [`PuzzleSide::rotate_border`] moves marbles, which is how
//! marbles migrate from one leaf to another.
//!
//! ## Status
//!
//! ```text
//! NORMAL  <->  BORDER_ROTATION        INVALID: corrupt marble set only
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cursor::{MarbleCursor, Track};
use super::track::{quantize, LeafTrack};
use crate::core::{
    normalize_degrees, signed_degrees, Color, Leaf, Marble, TrefoilStatus, ALIGNMENT_EPSILON,
    BORDER_ALIGNMENT, DISK_DOCK_STEP, FIRST_COMMON_POSITION, LEAF_COUNT, MARBLES_PER_LEAF,
    MARBLES_PER_SIDE, OUTER_MARBLES, RING_SECTOR, SNAP_EPSILON, TOLERANCE_ANGLE,
};
use crate::error::PuzzleError;

/// Three leaves, the internal disk and the border ring of one face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSide {
    leaves: [LeafTrack; LEAF_COUNT],
    /// Internal disk phase in `[0, 360)`.
    disk_phase: f64,
    /// Last dock (`0..3`) whose capture window the disk entered.
    dock: usize,
    /// Border ring residual in `(-6, 6]`.
    ring_angle: f64,
}

impl Default for PuzzleSide {
    /// Ids `0..30`, leaves black, red and green.
    fn default() -> Self {
        Self::from_leaf_colors(0, [Color::Black, Color::Red, Color::Green])
    }
}

impl PuzzleSide {
    /// Build a snapped side. Marbles `0..10` go to North, `10..20` to East
    /// and `20..30` to West, each in position order.
    #[must_use]
    pub fn new(marbles: [Marble; MARBLES_PER_SIDE]) -> Self {
        Self {
            leaves: std::array::from_fn(|leaf| {
                LeafTrack::new(std::array::from_fn(|p| marbles[leaf * MARBLES_PER_LEAF + p]))
            }),
            disk_phase: 0.0,
            dock: 0,
            ring_angle: 0.0,
        }
    }

    /// Consecutive ids from `first_id`, one uniform color per leaf.
    #[must_use]
    pub fn from_leaf_colors(first_id: u32, colors: [Color; LEAF_COUNT]) -> Self {
        Self::new(std::array::from_fn(|slot| {
            Marble::new(first_id + slot as u32, colors[slot / MARBLES_PER_LEAF])
        }))
    }

    #[must_use]
    pub fn leaf(&self, leaf: Leaf) -> Option<&LeafTrack> {
        leaf.index().map(|i| &self.leaves[i])
    }

    pub(crate) fn leaf_mut(&mut self, leaf: Leaf) -> Option<&mut LeafTrack> {
        leaf.index().map(move |i| &mut self.leaves[i])
    }

    /// Every leaf sits exactly on a marble boundary.
    #[must_use]
    pub fn leaves_snapped(&self) -> bool {
        self.leaves.iter().all(LeafTrack::is_snapped)
    }

    /// Internal disk phase in `[0, 360)`.
    #[must_use]
    pub fn phase_shift_internal_disk(&self) -> f64 {
        self.disk_phase
    }

    /// Index of the dock the common groups currently belong to.
    #[must_use]
    pub fn dock(&self) -> usize {
        self.dock
    }

    /// Residual angle of the border ring in `(-6, 6]`.
    #[must_use]
    pub fn border_angle(&self) -> f64 {
        self.ring_angle
    }

    /// Disk phase measured from the current dock, in `(-180, 180]`.
    fn disk_offset(&self) -> f64 {
        signed_degrees(self.disk_phase - self.dock as f64 * DISK_DOCK_STEP)
    }

    /// Which neighbour's common group follows each leaf's outer marbles when
    /// the disk stands exactly on a border alignment.
    fn border_alignment(&self) -> Option<usize> {
        let offset = self.disk_offset();
        if (offset - BORDER_ALIGNMENT).abs() <= ALIGNMENT_EPSILON {
            Some(0)
        } else if (offset + BORDER_ALIGNMENT).abs() <= ALIGNMENT_EPSILON {
            Some(1)
        } else {
            None
        }
    }

    /// Alignment of the active border ring, `None` outside border rotation.
    fn active_border(&self) -> Option<usize> {
        if self.leaves_snapped() {
            self.border_alignment()
        } else {
            None
        }
    }

    /// The side is in [`TrefoilStatus::BorderRotation`] (ignoring consistency).
    #[must_use]
    pub fn is_in_border_rotation(&self) -> bool {
        self.active_border().is_some()
    }

    #[must_use]
    pub fn trifoild_status(&self) -> TrefoilStatus {
        if self.check_consistency().is_err() {
            TrefoilStatus::Invalid
        } else if self.is_in_border_rotation() {
            TrefoilStatus::BorderRotation
        } else {
            TrefoilStatus::Normal
        }
    }

    /// A single leaf may turn: it is a real leaf and the border ring is not
    /// active.
    #[must_use]
    pub fn is_rotation_possible(&self, leaf: Leaf) -> bool {
        leaf.is_valid() && !self.is_in_border_rotation()
    }

    /// Leaves are snapped and the disk is within the capture window of a
    /// border alignment it has not reached exactly yet.
    #[must_use]
    pub fn is_border_rotation_possible(&self) -> bool {
        if !self.leaves_snapped() || self.border_alignment().is_some() {
            return false;
        }
        let offset = self.disk_offset().abs();
        (offset - BORDER_ALIGNMENT).abs() <= TOLERANCE_ANGLE
    }

    /// Turn one leaf by `delta` degrees.
    ///
    /// Rejected for `Leaf::Invalid` and while the border ring is active.
    pub fn rotate_marbles(&mut self, leaf: Leaf, delta: f64) -> bool {
        if !self.is_rotation_possible(leaf) {
            return false;
        }
        match self.leaf_mut(leaf) {
            Some(track) => track.rotate(delta),
            None => false,
        }
    }

    /// Turn the internal disk by `delta` degrees.
    ///
    /// Requires every leaf and the border ring to be snapped. Docks crossed
    /// on the way hand the common groups on to the next leaves.
    pub fn rotate_internal_disk(&mut self, delta: f64) -> bool {
        if !delta.is_finite() || !self.leaves_snapped() || self.ring_angle != 0.0 {
            return false;
        }

        let start = self.disk_phase;
        let end = start + delta;

        // Last dock whose capture window this sweep touched.
        let reached = if delta > 0.0 {
            let m = ((end + TOLERANCE_ANGLE) / DISK_DOCK_STEP).floor();
            (m * DISK_DOCK_STEP + TOLERANCE_ANGLE >= start).then_some(m)
        } else if delta < 0.0 {
            let m = ((end - TOLERANCE_ANGLE) / DISK_DOCK_STEP).ceil();
            (m * DISK_DOCK_STEP - TOLERANCE_ANGLE <= start).then_some(m)
        } else {
            None
        };

        if let Some(m) = reached {
            let dock = (m as i64).rem_euclid(LEAF_COUNT as i64) as usize;
            let steps = (dock + LEAF_COUNT - self.dock) % LEAF_COUNT;
            if steps != 0 {
                self.hand_on_commons(steps);
                log::trace!("internal disk docked at {dock}, commons moved {steps} leaf/leaves");
            }
            self.dock = dock;
        }

        let mut phase = normalize_degrees(end);
        let nearest = (phase / BORDER_ALIGNMENT).round() * BORDER_ALIGNMENT;
        if (phase - nearest).abs() < SNAP_EPSILON {
            phase = normalize_degrees(nearest);
        }
        self.disk_phase = phase;
        true
    }

    /// Move the disk onto a dock or border alignment within the capture
    /// window. Returns whether the disk moved.
    pub fn snap_internal_disk(&mut self) -> bool {
        let nearest = (self.disk_phase / BORDER_ALIGNMENT).round() * BORDER_ALIGNMENT;
        let delta = nearest - self.disk_phase;
        if delta == 0.0 || delta.abs() > TOLERANCE_ANGLE {
            return false;
        }
        self.rotate_internal_disk(delta)
    }

    /// Leaf `L`'s common group moves to leaf `L + steps`.
    fn hand_on_commons(&mut self, steps: usize) {
        let groups: [[Marble; 3]; LEAF_COUNT] = std::array::from_fn(|leaf| {
            std::array::from_fn(|k| self.leaves[leaf].marble(FIRST_COMMON_POSITION + k))
        });
        for (leaf, group) in groups.iter().enumerate() {
            let target = &mut self.leaves[(leaf + steps) % LEAF_COUNT];
            for (k, &marble) in group.iter().enumerate() {
                target.replace(FIRST_COMMON_POSITION + k, marble);
            }
        }
    }

    /// Leaf and position behind ring slot `slot` for a given alignment.
    fn ring_location(slot: usize, alignment: usize) -> (usize, usize) {
        let leaf = slot / MARBLES_PER_LEAF;
        let i = slot % MARBLES_PER_LEAF;
        if i < OUTER_MARBLES {
            (leaf, i)
        } else {
            (
                (leaf + alignment) % LEAF_COUNT,
                MARBLES_PER_LEAF - 1 - (i - OUTER_MARBLES),
            )
        }
    }

    /// Turn the border ring by `delta` degrees (12 degree sectors).
    ///
    /// Only accepted in border rotation. A positive snap moves the marble at
    /// ring slot `r` to slot `r + 1`.
    pub fn rotate_border(&mut self, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let Some(alignment) = self.active_border() else {
            return false;
        };

        let (steps, residual) = quantize(self.ring_angle + delta, RING_SECTOR);
        if steps != 0 {
            let locations: [(usize, usize); MARBLES_PER_SIDE] =
                std::array::from_fn(|slot| Self::ring_location(slot, alignment));
            let mut ring: [Marble; MARBLES_PER_SIDE] =
                std::array::from_fn(|slot| {
                    let (leaf, position) = locations[slot];
                    self.leaves[leaf].marble(position)
                });
            ring.rotate_right(steps.rem_euclid(MARBLES_PER_SIDE as i64) as usize);
            for (&(leaf, position), &marble) in locations.iter().zip(ring.iter()) {
                self.leaves[leaf].replace(position, marble);
            }
            log::trace!("border ring snapped {steps} sector(s)");
        }
        self.ring_angle = residual;
        true
    }

    /// Marble at `position` of `track`, wrapping. The `Invalid` leaf yields
    /// the sentinel marble.
    #[must_use]
    pub fn marble_at(&self, track: Track, position: isize) -> Marble {
        let slot = track.wrap(position);
        match track {
            Track::Leaf(leaf) => self
                .leaf(leaf)
                .map_or_else(Marble::default, |t| t.marble(slot)),
            Track::Border => {
                let (leaf, position) = match self.active_border() {
                    Some(alignment) => Self::ring_location(slot, alignment),
                    None => (slot / MARBLES_PER_LEAF, slot % MARBLES_PER_LEAF),
                };
                self.leaves[leaf].marble(position)
            }
        }
    }

    /// Residual angle of a whole track.
    #[must_use]
    pub fn track_angle(&self, track: Track) -> f64 {
        match track {
            Track::Leaf(leaf) => self.leaf(leaf).map_or(0.0, LeafTrack::angle),
            Track::Border => self.ring_angle,
        }
    }

    /// Cursor on position 0 of `track`.
    #[must_use]
    pub fn begin(&self, track: impl Into<Track>) -> MarbleCursor<'_> {
        MarbleCursor::new(self, track.into(), 0)
    }

    /// A cursor for every slot of `track`, in order.
    pub fn iter(&self, track: impl Into<Track>) -> impl Iterator<Item = MarbleCursor<'_>> {
        let track = track.into();
        (0..track.len()).map(move |p| MarbleCursor::new(self, track, p as isize))
    }

    /// Every marble with its leaf and position.
    pub fn marbles(&self) -> impl Iterator<Item = (Leaf, usize, Marble)> + '_ {
        Leaf::ALL.into_iter().flat_map(move |leaf| {
            self.leaves[leaf.index().unwrap_or_default()]
                .iter()
                .enumerate()
                .map(move |(position, marble)| (leaf, position, marble))
        })
    }

    /// All marbles valid and no id used twice.
    pub fn check_consistency(&self) -> Result<(), PuzzleError> {
        check_marbles(self.marbles())
    }
}

/// Shared validity check for one or more sides.
pub(crate) fn check_marbles(
    marbles: impl IntoIterator<Item = (Leaf, usize, Marble)>,
) -> Result<(), PuzzleError> {
    let mut seen = FxHashSet::default();
    for (leaf, position, marble) in marbles {
        if !marble.is_valid() {
            return Err(PuzzleError::InvalidMarble { leaf, position });
        }
        if !seen.insert(marble.id()) {
            return Err(PuzzleError::DuplicateMarble(marble.id()));
        }
    }
    Ok(())
}

impl TryFrom<Vec<Marble>> for PuzzleSide {
    type Error = PuzzleError;

    fn try_from(marbles: Vec<Marble>) -> Result<Self, Self::Error> {
        let found = marbles.len();
        let marbles: [Marble; MARBLES_PER_SIDE] =
            marbles.try_into().map_err(|_| PuzzleError::MarbleCount {
                expected: MARBLES_PER_SIDE,
                found,
            })?;
        Ok(Self::new(marbles))
    }
}

impl fmt::Display for PuzzleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leaf in Leaf::ALL {
            let track = &self.leaves[leaf.index().unwrap_or_default()];
            write!(f, "{:<5} {:>6.2}:", leaf.name(), track.angle())?;
            for marble in track.iter() {
                write!(f, " {marble}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "disk {:.2} (dock {}), ring {:.2}, {}",
            self.disk_phase,
            self.dock,
            self.ring_angle,
            self.trifoild_status()
        )
    }
}
