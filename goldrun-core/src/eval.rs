//! Position evaluation
//!
//! Scores are absolute: positive favours the Player (maximizer), negative
//! favours the Monster (minimizer).

use crate::game::{BoardState, Outcome};
use serde::{Deserialize, Serialize};

/// Search score
pub type Score = i32;

/// Terminal value magnitude (effectively infinite)
pub const WIN_VALUE: Score = 1_000_000;

/// Heuristic scores are clamped to this range so they stay below any
/// terminal value, depth bonus included
pub const HEURISTIC_LIMIT: Score = WIN_VALUE / 2;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Per step of Monster-to-Player distance
    pub monster_distance_weight: Score,
    /// Flat bonus once the gold is held
    pub gold_bonus: Score,
    /// Per step of Player-to-objective distance (subtracted)
    pub objective_distance_weight: Score,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            monster_distance_weight: 10,
            gold_bonus: 200,
            objective_distance_weight: 15,
        }
    }
}

/// Evaluate a non-terminal position
pub fn evaluate(state: &BoardState, heuristics: &Heuristics) -> Score {
    let grid_size = state.grid_size() as u32;
    // Walled-off targets count as farther than any reachable cell
    let unreachable = grid_size * grid_size;

    let monster_gap = state
        .path_distance(state.monster_pos(), state.player_pos())
        .unwrap_or(unreachable) as Score;
    let objective_gap = state
        .path_distance(state.player_pos(), state.objective())
        .unwrap_or(unreachable) as Score;

    let mut score = heuristics.monster_distance_weight.saturating_mul(monster_gap);
    if state.has_gold() {
        score = score.saturating_add(heuristics.gold_bonus);
    }
    score = score.saturating_sub(heuristics.objective_distance_weight.saturating_mul(objective_gap));

    score.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
}

/// Terminal score; `remaining_depth` rewards the side that gets there sooner
pub fn terminal_value(outcome: Outcome, remaining_depth: u32) -> Score {
    match outcome {
        Outcome::Win => WIN_VALUE + remaining_depth as Score,
        Outcome::Capture | Outcome::Timeout => loss_value(remaining_depth),
    }
}

/// Player loss (capture, timeout, or walled in with no action left)
pub fn loss_value(remaining_depth: u32) -> Score {
    -(WIN_VALUE + remaining_depth as Score)
}
