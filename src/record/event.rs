//! Recordable puzzle moves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Leaf;

/// One accepted move, as issued by the presentation layer.
///
/// Angles are in degrees and apply to the side that was active when the
/// move was made.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    RotateMarbles { leaf: Leaf, angle: f64 },
    RotateBorder { angle: f64 },
    RotateInternalDisk { angle: f64 },
    /// Partial turn about the spin axis.
    SpinLeafAngle { leaf: Leaf, angle: f64 },
    /// Full flip.
    SpinLeaf { leaf: Leaf },
    SwapSide,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RotateMarbles { leaf, angle } => write!(f, "rotate {leaf} by {angle}"),
            Event::RotateBorder { angle } => write!(f, "rotate border by {angle}"),
            Event::RotateInternalDisk { angle } => write!(f, "rotate internal disk by {angle}"),
            Event::SpinLeafAngle { leaf, angle } => write!(f, "spin {leaf} by {angle}"),
            Event::SpinLeaf { leaf } => write!(f, "spin {leaf}"),
            Event::SwapSide => f.write_str("swap side"),
        }
    }
}

/// An event with the time step at which it was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: Event,
    pub time_step: u64,
}

impl EventRecord {
    #[must_use]
    pub fn new(event: Event, time_step: u64) -> Self {
        Self { event, time_step }
    }
}
