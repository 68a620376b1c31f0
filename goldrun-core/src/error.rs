//! Error types

use crate::board::Cell;
use crate::game::{Action, Agent};
use thiserror::Error;

/// Errors raised by the board state model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action '{action}' for {agent:?}")]
    IllegalAction { agent: Agent, action: Action },

    #[error("Unknown action token: {0:?}")]
    UnknownToken(String),
}

/// Fatal search failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("No legal actions available for {0:?}")]
    NoLegalActions(Agent),

    #[error("Inconsistent board state during search: {0}")]
    InvalidState(#[from] GameError),
}

/// Invalid initial layouts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Grid size must be positive, got {0}")]
    InvalidSize(i16),

    #[error("{what} at {cell} is outside a {size}x{size} grid")]
    OutOfBounds { what: &'static str, cell: Cell, size: i16 },

    #[error("{what} at {cell} is on a wall")]
    OnWall { what: &'static str, cell: Cell },
}

pub type Result<T> = std::result::Result<T, GameError>;
