//! Minimax search with alpha-beta pruning
//!
//! The Player maximizes and the Monster minimizes the absolute score from
//! [`crate::eval`]. Every node is a private clone of its parent, so the
//! caller's board is never touched.

use crate::eval::{evaluate, loss_value, terminal_value, Heuristics, Score};
use crate::error::SearchError;
use crate::game::{Action, Agent, BoardState};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default search depth in plies
pub const DEFAULT_MAX_DEPTH: u32 = 8;

// ============================================================================
// CONFIGURATION AND RESULTS
// ============================================================================

/// Search parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched before falling back to the static evaluation
    pub max_depth: u32,
    pub heuristics: Heuristics,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            heuristics: Heuristics::default(),
        }
    }
}

/// Counters for a single search call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes expanded (including the root)
    pub nodes_visited: u64,
    /// Sibling branches skipped by alpha-beta cutoffs
    pub branches_pruned: u64,
    /// Cutoffs that skipped at least one sibling
    pub cutoffs: u64,
    /// Deepest ply reached
    pub depth_reached: u32,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.branches_pruned += other.branches_pruned;
        self.cutoffs += other.cutoffs;
        self.depth_reached = self.depth_reached.max(other.depth_reached);
    }
}

/// Chosen action with its backed-up value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub action: Action,
    pub value: Score,
    pub stats: SearchStats,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI, usable for either agent
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub config: SearchConfig,
}

impl AlphaBetaAI {
    pub fn new(max_depth: u32, heuristics: Heuristics) -> Self {
        Self {
            config: SearchConfig {
                max_depth,
                heuristics,
            },
        }
    }

    pub fn from_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Best Monster action for the current position
    pub fn choose_monster_action(&self, state: &BoardState) -> Result<SearchResult, SearchError> {
        self.search(state, Agent::Monster, true)
    }

    /// Best Player action for the current position
    pub fn choose_player_action(&self, state: &BoardState) -> Result<SearchResult, SearchError> {
        self.search(state, Agent::Player, true)
    }

    /// Same search without pruning; slow, used to check pruned results
    pub fn exhaustive(&self, state: &BoardState, agent: Agent) -> Result<SearchResult, SearchError> {
        self.search(state, agent, false)
    }

    /// Unpruned minimax value of the position with `agent` to move
    pub fn minimax_value(&self, state: &BoardState, agent: Agent) -> Result<Score, SearchError> {
        self.exhaustive(state, agent).map(|result| result.value)
    }

    /// Static evaluation of a position
    pub fn evaluate(&self, state: &BoardState) -> Score {
        evaluate(state, &self.config.heuristics)
    }

    fn search(&self, state: &BoardState, agent: Agent, prune: bool) -> Result<SearchResult, SearchError> {
        let mut searcher = Searcher {
            heuristics: &self.config.heuristics,
            max_depth: self.config.max_depth.max(1),
            prune,
            stats: SearchStats::default(),
        };
        let (action, value) = searcher.root(state, agent)?;

        tracing::debug!(
            agent = ?agent,
            action = %action,
            value,
            nodes = searcher.stats.nodes_visited,
            pruned = searcher.stats.branches_pruned,
            cutoffs = searcher.stats.cutoffs,
            depth = searcher.stats.depth_reached,
            "search complete"
        );

        Ok(SearchResult {
            action,
            value,
            stats: searcher.stats,
        })
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::from_config(SearchConfig::default())
    }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Per-call search state; counters live here rather than in globals
struct Searcher<'a> {
    heuristics: &'a Heuristics,
    max_depth: u32,
    prune: bool,
    stats: SearchStats,
}

impl Searcher<'_> {
    /// Pick the root action; ties keep the first action in legal order
    fn root(&mut self, state: &BoardState, agent: Agent) -> Result<(Action, Score), SearchError> {
        self.stats.nodes_visited += 1;

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions(agent));
        }

        let maximizing = agent == Agent::Player;
        let mut alpha = Score::MIN;
        let mut beta = Score::MAX;
        let mut best: Option<(Action, Score)> = None;

        for action in actions {
            let score = self.child_value(state, action, agent, self.max_depth, alpha, beta)?;
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((action, score));
                if maximizing {
                    alpha = score;
                } else {
                    beta = score;
                }
            }
        }

        best.ok_or(SearchError::NoLegalActions(agent))
    }

    /// Value of `node` with `to_move` about to act and `depth` plies left
    fn value(
        &mut self,
        node: &BoardState,
        to_move: Agent,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, SearchError> {
        self.stats.nodes_visited += 1;

        let actions = node.legal_actions(to_move);
        if actions.is_empty() {
            return match to_move {
                Agent::Player => Ok(loss_value(depth)),
                Agent::Monster => Err(SearchError::NoLegalActions(Agent::Monster)),
            };
        }

        let maximizing = to_move == Agent::Player;
        let mut best = if maximizing { Score::MIN } else { Score::MAX };

        for (index, &action) in actions.iter().enumerate() {
            let score = self.child_value(node, action, to_move, depth, alpha, beta)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.prune && alpha >= beta {
                let skipped = (actions.len() - index - 1) as u64;
                if skipped > 0 {
                    self.stats.cutoffs += 1;
                    self.stats.branches_pruned += skipped;
                }
                break;
            }
        }

        Ok(best)
    }

    /// Apply `action` for `mover` on a clone of `node` and score the result
    fn child_value(
        &mut self,
        node: &BoardState,
        action: Action,
        mover: Agent,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchError> {
        let child = node.with_action(action, mover)?;
        let remaining = depth - 1;
        self.stats.depth_reached = self.stats.depth_reached.max(self.max_depth - remaining);

        if let Some(outcome) = child.is_terminal_for(mover) {
            return Ok(terminal_value(outcome, remaining));
        }

        if mover == Agent::Player {
            // Stepping onto the Monster or spending the last move is already
            // lost: the Monster can stay put whatever the remaining depth
            if child.is_terminal_for(Agent::Monster).is_some() {
                return Ok(loss_value(remaining));
            }
            // Walled-in Player loses before the Monster moves
            if child.legal_actions(Agent::Player).is_empty() {
                return Ok(loss_value(remaining));
            }
        }

        if remaining == 0 {
            return Ok(evaluate(&child, self.heuristics));
        }

        self.value(&child, mover.opponent(), remaining, alpha, beta)
    }
}

// ============================================================================
// RANDOM AI
// ============================================================================

/// Uniformly random legal actions (baseline opponent)
#[derive(Clone, Debug)]
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn choose(&mut self, state: &BoardState, agent: Agent) -> Result<Action, SearchError> {
        state
            .legal_actions(agent)
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalActions(agent))
    }
}

// ============================================================================
// STRATEGY
// ============================================================================

/// An agent's decision with optional search details
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub action: Action,
    pub value: Option<Score>,
    pub stats: SearchStats,
}

/// Pluggable action source for either agent
#[derive(Clone, Debug)]
pub enum Strategy {
    AlphaBeta(AlphaBetaAI),
    Random(RandomAI),
}

impl Strategy {
    pub fn choose(&mut self, state: &BoardState, agent: Agent) -> Result<Choice, SearchError> {
        match self {
            Strategy::AlphaBeta(ai) => {
                let result = ai.search(state, agent, true)?;
                Ok(Choice {
                    action: result.action,
                    value: Some(result.value),
                    stats: result.stats,
                })
            }
            Strategy::Random(ai) => Ok(Choice {
                action: ai.choose(state, agent)?,
                value: None,
                stats: SearchStats::default(),
            }),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
