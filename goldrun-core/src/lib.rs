//! GOLDRUN Core - Game engine and AI
//!
//! This crate provides the core game logic for GOLDRUN:
//! - Board geometry (square grid, row/column coordinates)
//! - Board state, legal actions and terminal checks
//! - Position evaluation with path-distance heuristics
//! - Minimax AI with alpha-beta pruning
//! - Layouts, game sessions and text rendering

pub mod board;
pub mod error;
pub mod game;
pub mod eval;
pub mod ai;
pub mod layout;
pub mod render;
pub mod session;

// Re-exports for convenient access
pub use board::{Cell, Direction, DIRECTIONS};
pub use error::{GameError, LayoutError, SearchError};
pub use game::{Action, Agent, BoardState, Outcome};
pub use eval::{evaluate, Heuristics, Score, WIN_VALUE};
pub use ai::{AlphaBetaAI, Choice, RandomAI, SearchConfig, SearchResult, SearchStats, Strategy};
pub use layout::Layout;
pub use render::render_board;
pub use session::{GameResult, Session};
