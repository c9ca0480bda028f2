//! Progress metric for a game in play.
//!
//! [`naive_disorder`] scores how well the colors are grouped. A color that
//! is the solved color of `n` leaves contributes the marbles of that color
//! found in its `n` best leaves (on either face). The sum is divided by the
//! sixty marbles, so a solved puzzle scores `1.0` and a thoroughly shuffled
//! one drifts toward the share a random layout would give.

use rustc_hash::FxHashMap;

use crate::core::{Color, Leaf, Side, MARBLES_PER_SIDE};
use crate::game::SpinPuzzleGame;

/// Color counts of one leaf.
fn leaf_histogram(game: &SpinPuzzleGame, side: Side, leaf: Leaf) -> FxHashMap<Color, usize> {
    let mut counts = FxHashMap::default();
    if let Some(track) = game.side(side).leaf(leaf) {
        for marble in track.iter() {
            *counts.entry(marble.color()).or_insert(0) += 1;
        }
    }
    counts
}

/// Share of marbles sitting in the best leaves for their color, in `(0, 1]`.
#[must_use]
pub fn naive_disorder(game: &SpinPuzzleGame) -> f64 {
    let histograms: Vec<_> = Side::ALL
        .iter()
        .flat_map(|&side| Leaf::ALL.iter().map(move |&leaf| (side, leaf)))
        .map(|(side, leaf)| leaf_histogram(game, side, leaf))
        .collect();

    // leaves owned by each solved color
    let mut owners: FxHashMap<Color, usize> = FxHashMap::default();
    for side in Side::ALL {
        for leaf in Leaf::ALL {
            *owners.entry(game.canonical_color(side, leaf)).or_insert(0) += 1;
        }
    }

    let grouped: usize = owners
        .iter()
        .map(|(color, &leaves)| {
            let mut counts: Vec<usize> = histograms
                .iter()
                .map(|counts| counts.get(color).copied().unwrap_or(0))
                .collect();
            counts.sort_unstable_by(|a, b| b.cmp(a));
            counts.iter().take(leaves).sum::<usize>()
        })
        .sum();

    grouped as f64 / (2 * MARBLES_PER_SIDE) as f64
}

/// Leaves, over both faces, that show a single color.
#[must_use]
pub fn solved_leaves(game: &SpinPuzzleGame) -> usize {
    Side::ALL
        .iter()
        .map(|&side| {
            Leaf::ALL
                .iter()
                .filter(|&&leaf| leaf_histogram(game, side, leaf).len() == 1)
                .count()
        })
        .sum()
}
