//! Play command - human Player against the Monster
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: setup_session(), run_game(), report_result()
//! - Level 3: player_turn(), monster_turn()
//! - Level 4: prompt formatting

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;

use goldrun_core::{render_board, Action, Agent, GameResult, Session, Strategy};

use crate::config::{load_layout, load_search_config, monster_strategy, MonsterKind};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Layout JSON file (defaults to the classic 5x5 board)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Search config JSON file (depth and heuristic weights)
    #[arg(long, value_name = "FILE")]
    pub search: Option<PathBuf>,

    /// Monster search depth in plies (overrides --search)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Monster strategy
    #[arg(long, value_enum, default_value_t = MonsterKind::AlphaBeta)]
    pub monster: MonsterKind,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the session and Monster strategy
/// 2. Alternate turns until the game ends
/// 3. Report the result
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let (mut session, mut monster) = setup_session(&args, seed)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_game(&mut session, &mut monster, &mut stdin.lock(), &mut stdout.lock())?;

    report_result(result, &mut io::stdout())?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn setup_session(args: &PlayArgs, seed: Option<u64>) -> Result<(Session, Strategy)> {
    let layout = load_layout(args.layout.as_deref())?;
    let config = load_search_config(args.search.as_deref(), args.depth)?;
    let state = layout.to_board_state()?;

    tracing::info!(
        "Starting game on '{}' ({}x{}, {} moves, monster={:?}, depth={})",
        layout.name,
        layout.grid_size,
        layout.grid_size,
        state.max_moves(),
        args.monster,
        config.max_depth
    );

    let monster = monster_strategy(args.monster, &config, seed.unwrap_or(0));
    Ok((Session::new(state), monster))
}

/// Alternate human and Monster turns until the game is decided
pub fn run_game<R: BufRead, W: Write>(
    session: &mut Session,
    monster: &mut Strategy,
    input: &mut R,
    output: &mut W,
) -> Result<GameResult> {
    write!(output, "{}", render_board(session.state()))?;

    while !session.is_over() {
        player_turn(session, input, output)?;
        write!(output, "{}", render_board(session.state()))?;
        if session.is_over() {
            break;
        }

        monster_turn(session, monster, output)?;
        write!(output, "{}", render_board(session.state()))?;
    }

    Ok(session.result())
}

fn report_result<W: Write>(result: GameResult, output: &mut W) -> Result<()> {
    writeln!(output, "GAME OVER")?;
    let message = match result {
        GameResult::Won => "You Won!",
        GameResult::Lost => "You Lost!",
        GameResult::Draw | GameResult::Ongoing => "It was a draw!",
    };
    writeln!(output, "{}", message)?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Prompt until the human enters one of the legal tokens
fn player_turn<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Player's Move # {}", session.state().move_count() + 1)?;
    let legal = session.state().legal_actions(Agent::Player);
    let prompt = format!("Choose your move {}: ", format_tokens(&legal));

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            bail!("Input closed before the game ended");
        }

        match parse_choice(line.trim(), &legal) {
            Some(action) => {
                session.play(action)?;
                return Ok(());
            }
            None => writeln!(output, "Not a valid move")?,
        }
    }
}

fn monster_turn<W: Write>(session: &mut Session, monster: &mut Strategy, output: &mut W) -> Result<()> {
    let start = Instant::now();
    let choice = monster.choose(session.state(), Agent::Monster)?;
    let elapsed = start.elapsed();

    session.play(choice.action)?;

    writeln!(output, "COMP MOVE TIME = {:.2} seconds", elapsed.as_secs_f64())?;
    if let Some(value) = choice.value {
        tracing::info!(
            action = %choice.action,
            value,
            nodes = choice.stats.nodes_visited,
            pruned = choice.stats.branches_pruned,
            "monster move"
        );
        writeln!(
            output,
            "Branches pruned: {} ({} nodes searched)",
            choice.stats.branches_pruned, choice.stats.nodes_visited
        )?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// `['w', 'wb', 'd']`
fn format_tokens(actions: &[Action]) -> String {
    let tokens: Vec<String> = actions.iter().map(|a| format!("'{}'", a)).collect();
    format!("[{}]", tokens.join(", "))
}

/// Match a typed token against the legal list; anything else is rejected
fn parse_choice(token: &str, legal: &[Action]) -> Option<Action> {
    let action: Action = token.parse().ok()?;
    legal.contains(&action).then_some(action)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use goldrun_core::{AlphaBetaAI, Direction, Heuristics, Layout, RandomAI};
    use std::io::Cursor;

    fn classic_session() -> Session {
        Session::new(Layout::default().to_board_state().unwrap())
    }

    #[test]
    fn test_format_tokens() {
        let actions = [Action::Move(Direction::Up), Action::Build(Direction::Up)];
        assert_eq!(format_tokens(&actions), "['w', 'wb']");
    }

    #[test]
    fn test_parse_choice() {
        let legal = [Action::Move(Direction::Up)];
        assert_eq!(parse_choice("w", &legal), Some(Action::Move(Direction::Up)));
        assert_eq!(parse_choice("d", &legal), None);
        assert_eq!(parse_choice("", &legal), None);
        assert_eq!(parse_choice("zz", &legal), None);
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let mut session = classic_session();
        let mut input = Cursor::new("x\nd\nw\n");
        let mut output = Vec::new();
        player_turn(&mut session, &mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Not a valid move").count(), 2);
        assert_eq!(session.state().move_count(), 1);
        assert_eq!(session.to_move(), Agent::Monster);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut session = classic_session();
        let mut monster = Strategy::Random(RandomAI::new(3));
        let mut input = Cursor::new("w\n");
        let mut output = Vec::new();
        // One Monster move from (0,0) cannot reach the Player at (3,0)
        let err = run_game(&mut session, &mut monster, &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("Input closed"));
        assert_eq!(session.state().move_count(), 1);
    }

    #[test]
    fn test_scripted_game_finishes() {
        let mut session = classic_session();
        let mut monster = Strategy::AlphaBeta(AlphaBetaAI::new(4, Heuristics::default()));
        // Keep stepping back and forth; the game must end by capture or timeout
        let script = "w\ns\n".repeat(20);
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        let result = run_game(&mut session, &mut monster, &mut input, &mut output).unwrap();

        assert_eq!(result, GameResult::Lost);
        assert!(session.state().move_count() <= session.state().max_moves());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("COMP MOVE TIME"));
    }

    #[test]
    fn test_report_result() {
        let mut output = Vec::new();
        report_result(GameResult::Won, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "GAME OVER\nYou Won!\n");
    }
}
