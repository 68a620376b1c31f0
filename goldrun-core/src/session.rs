//! Game session - turn sequencing for one game

use std::fmt;

use crate::error::GameError;
use crate::game::{Action, Agent, BoardState, Outcome};
use serde::{Deserialize, Serialize};

/// Result of a game from the Player's side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won,
    Lost,
    /// Unreachable under the current rules, kept for reporting
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::Ongoing => "ONGOING",
            GameResult::Won => "WON",
            GameResult::Lost => "LOST",
            GameResult::Draw => "DRAW",
        };
        f.write_str(text)
    }
}

/// One game: the real board, whose turn it is, and what happened so far
#[derive(Clone, Debug)]
pub struct Session {
    state: BoardState,
    to_move: Agent,
    result: GameResult,
    /// How the game ended, if by a board outcome
    outcome: Option<Outcome>,
    history: Vec<(Agent, Action)>,
}

impl Session {
    pub fn new(state: BoardState) -> Self {
        let mut session = Self {
            state,
            to_move: Agent::Player,
            result: GameResult::Ongoing,
            outcome: None,
            history: Vec::new(),
        };
        // A Player boxed in from the start never gets a turn
        if session.state.legal_actions(Agent::Player).is_empty() {
            session.result = GameResult::Lost;
        }
        session
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn to_move(&self) -> Agent {
        self.to_move
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn history(&self) -> &[(Agent, Action)] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Apply the next action for whichever agent is due and settle the result
    ///
    /// After a Player action: reaching the exit with gold wins, having no
    /// action left loses. After a Monster action: capture or timeout loses.
    pub fn play(&mut self, action: Action) -> Result<GameResult, GameError> {
        let agent = self.to_move;
        if self.is_over() {
            return Err(GameError::IllegalAction { agent, action });
        }

        self.state.apply(action, agent)?;
        self.history.push((agent, action));

        match agent {
            Agent::Player => {
                if let Some(outcome) = self.state.is_terminal_for(Agent::Player) {
                    self.finish(GameResult::Won, Some(outcome));
                } else if self.state.legal_actions(Agent::Player).is_empty() {
                    self.finish(GameResult::Lost, None);
                }
            }
            Agent::Monster => {
                if let Some(outcome) = self.state.is_terminal_for(Agent::Monster) {
                    self.finish(GameResult::Lost, Some(outcome));
                }
            }
        }

        self.to_move = agent.opponent();
        Ok(self.result)
    }

    fn finish(&mut self, result: GameResult, outcome: Option<Outcome>) {
        tracing::debug!(%result, ?outcome, moves = self.state.move_count(), "game over");
        self.result = result;
        self.outcome = outcome;
    }
}
