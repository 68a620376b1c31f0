//! Simulate command - AI Player against the Monster, many games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::Rng;

use goldrun_core::{Agent, GameResult, Layout, Outcome, SearchConfig, SearchStats, Session};

use crate::config::{
    create_rng, load_layout, load_search_config, monster_strategy, player_strategy, MonsterKind,
    PlayerKind,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Layout JSON file (defaults to the classic 5x5 board)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Search config JSON file for the Monster
    #[arg(long, value_name = "FILE")]
    pub search: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Monster search depth in plies (overrides --search)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Monster strategy
    #[arg(long, value_enum, default_value_t = MonsterKind::AlphaBeta)]
    pub monster: MonsterKind,

    /// Player strategy
    #[arg(long, value_enum, default_value_t = PlayerKind::Search)]
    pub player: PlayerKind,

    /// Player search depth (for --player search)
    #[arg(long, default_value = "6")]
    pub player_depth: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    outcome: Option<Outcome>,
    player_moves: u32,
    monster_stats: SearchStats,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SimulationResults {
    games: Vec<GameRecord>,
    wins: usize,
    losses: usize,
    draws: usize,
    avg_moves: f32,
    total_stats: SearchStats,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Load layout and search settings
/// 2. Play all games
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let layout = load_layout(args.layout.as_deref())?;
    let config = load_search_config(args.search.as_deref(), args.depth)?;

    tracing::info!(
        "Simulating {} games on '{}' (player={:?}, monster={:?}, depth={})",
        args.games,
        layout.name,
        args.player,
        args.monster,
        config.max_depth
    );

    let results = play_games(&layout, &config, &args, seed)?;
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(
    layout: &Layout,
    config: &SearchConfig,
    args: &SimulateArgs,
    seed: Option<u64>,
) -> Result<SimulationResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(layout, config, args, game_num + 1, rng.gen())?;

        tracing::info!(
            "Game {}: {} ({:?}) after {} moves",
            record.game_number,
            record.result,
            record.outcome,
            record.player_moves
        );

        games.push(record);
    }

    Ok(compute_statistics(games))
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion with both sides automated
fn play_single_game(
    layout: &Layout,
    config: &SearchConfig,
    args: &SimulateArgs,
    game_number: usize,
    seed: u64,
) -> Result<GameRecord> {
    let mut session = Session::new(layout.to_board_state()?);
    let mut player = player_strategy(args.player, args.player_depth, seed);
    let mut monster = monster_strategy(args.monster, config, seed.wrapping_add(1));
    let mut monster_stats = SearchStats::default();

    while !session.is_over() {
        let (strategy, agent) = match session.to_move() {
            Agent::Player => (&mut player, Agent::Player),
            Agent::Monster => (&mut monster, Agent::Monster),
        };
        let choice = strategy.choose(session.state(), agent)?;
        if agent == Agent::Monster {
            monster_stats.merge(&choice.stats);
        }
        session.play(choice.action)?;
    }

    Ok(GameRecord {
        game_number,
        result: session.result(),
        outcome: session.outcome(),
        player_moves: session.state().move_count(),
        monster_stats,
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let wins = games.iter().filter(|g| g.result == GameResult::Won).count();
    let losses = games.iter().filter(|g| g.result == GameResult::Lost).count();
    let draws = games.len() - wins - losses;

    let total_moves: u32 = games.iter().map(|g| g.player_moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    let mut total_stats = SearchStats::default();
    for game in &games {
        total_stats.merge(&game.monster_stats);
    }

    SimulationResults {
        games,
        wins,
        losses,
        draws,
        avg_moves,
        total_stats,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &SimulationResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: String,
        outcome: Option<Outcome>,
        player_moves: u32,
        monster_stats: SearchStats,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        wins: usize,
        losses: usize,
        draws: usize,
        avg_moves: f32,
        win_rate: f32,
        monster_stats: SearchStats,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        wins: results.wins,
        losses: results.losses,
        draws: results.draws,
        avg_moves: results.avg_moves,
        win_rate: percent(results.wins, total) / 100.0,
        monster_stats: results.total_stats,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result.to_string(),
                outcome: g.outcome,
                player_moves: g.player_moves,
                monster_stats: g.monster_stats,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &SimulationResults) {
    let total = results.games.len();

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!("Won:         {} ({:.1}%)", results.wins, percent(results.wins, total));
    println!("Lost:        {} ({:.1}%)", results.losses, percent(results.losses, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!(
        "Monster search: {} nodes, {} branches pruned",
        results.total_stats.nodes_visited, results.total_stats.branches_pruned
    );

    println!("\nGame details:");
    for game in &results.games {
        let how = game
            .outcome
            .map(|o| format!("{:?}", o))
            .unwrap_or_else(|| "Trapped".to_string());
        println!(
            "  Game {}: {} by {} in {} moves",
            game.game_number, game.result, how, game.player_moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
