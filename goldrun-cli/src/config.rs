//! Shared configuration for commands
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use goldrun_core::{AlphaBetaAI, Heuristics, Layout, RandomAI, SearchConfig, Strategy};

/// Monster strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MonsterKind {
    /// Minimax search with alpha-beta pruning
    #[default]
    AlphaBeta,
    /// Uniformly random legal moves
    Random,
}

/// Player strategy for simulated games
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Minimax search from the Player's side
    #[default]
    Search,
    /// Uniformly random legal actions
    Random,
}

/// Load a layout file, or the classic board when none is given
pub fn load_layout(path: Option<&Path>) -> Result<Layout> {
    match path {
        Some(path) => Layout::load(path)
            .with_context(|| format!("Failed to load layout: {}", path.display())),
        None => Ok(Layout::default()),
    }
}

/// Load search settings from JSON, then apply a depth override
pub fn load_search_config(path: Option<&Path>, depth: Option<u32>) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read search config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid search config: {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(depth) = depth {
        config.max_depth = depth;
    }
    Ok(config)
}

pub fn monster_strategy(kind: MonsterKind, config: &SearchConfig, seed: u64) -> Strategy {
    match kind {
        MonsterKind::AlphaBeta => Strategy::AlphaBeta(AlphaBetaAI::from_config(config.clone())),
        MonsterKind::Random => Strategy::Random(RandomAI::new(seed)),
    }
}

pub fn player_strategy(kind: PlayerKind, depth: u32, seed: u64) -> Strategy {
    match kind {
        PlayerKind::Search => Strategy::AlphaBeta(AlphaBetaAI::new(depth, Heuristics::default())),
        PlayerKind::Random => Strategy::Random(RandomAI::new(seed)),
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
