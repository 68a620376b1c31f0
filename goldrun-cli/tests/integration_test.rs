//! Integration tests for GOLDRUN
//!
//! Tests the full stack: board rules, sessions, and the search AI

use goldrun_core::{
    ai::{AlphaBetaAI, RandomAI, Strategy},
    board::{Cell, Direction},
    eval::{Heuristics, WIN_VALUE},
    game::{Action, Agent, BoardState, Outcome},
    layout::Layout,
    session::{GameResult, Session},
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn classic() -> BoardState {
    Layout::default().to_board_state().unwrap()
}

/// Layout with a few walls and room to build
fn arena() -> Layout {
    Layout {
        name: "arena".to_string(),
        grid_size: 4,
        obstacles: vec![Cell::new(1, 1), Cell::new(2, 2)],
        player: Cell::new(3, 0),
        monster: Cell::new(0, 3),
        gold: Cell::new(0, 0),
        exit: Cell::new(3, 3),
    }
}

fn play_tokens(state: &mut BoardState, agent: Agent, tokens: &[&str]) {
    for token in tokens {
        state.apply(token.parse().unwrap(), agent).unwrap();
    }
}

/// Play one game with random actions, checking board invariants after every ply
fn random_game_with_checks(layout: &Layout, seed: u64) -> Session {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = Session::new(layout.to_board_state().unwrap());
    let mut player_actions = 0;

    while !session.is_over() {
        let agent = session.to_move();
        let before = session.state().clone();

        let monster_actions = before.legal_actions(Agent::Monster);
        assert!(monster_actions.contains(&Action::Stay));

        let action = *before.legal_actions(agent).choose(&mut rng).unwrap();
        session.play(action).unwrap();
        let after = session.state();

        // Walls only grow
        for wall in before.obstacles() {
            assert!(after.is_obstacle(wall));
        }
        // Gold is never dropped
        assert!(!before.has_gold() || after.has_gold());
        // Occupants are never buried
        for cell in [after.player_pos(), after.monster_pos(), after.exit_pos()] {
            assert!(!after.is_obstacle(cell));
            assert!(cell.is_valid(after.grid_size()));
        }
        if !after.has_gold() {
            assert!(!after.is_obstacle(after.gold_pos()));
        }

        if let Action::Build(dir) = action {
            let target = before.player_pos().neighbor(dir);
            assert!(!before.is_obstacle(target));
            assert!(after.is_obstacle(target));
            assert_eq!(after.obstacles().len(), before.obstacles().len() + 1);
        }
        if agent == Agent::Player {
            player_actions += 1;
            if after.player_pos() == after.gold_pos() {
                assert!(after.has_gold());
            }
        }
        assert_eq!(after.move_count(), player_actions);
        assert!(after.move_count() <= after.max_moves());
    }

    session
}

// ============================================================================
// BOARD RULES
// ============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..50 {
        let session = random_game_with_checks(&Layout::default(), seed);
        assert_ne!(session.result(), GameResult::Ongoing);
    }
    for seed in 0..50 {
        random_game_with_checks(&arena(), seed);
    }
}

#[test]
fn test_gold_flips_once() {
    for seed in 0..30 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut session = Session::new(classic());
        let mut flips = 0;
        while !session.is_over() {
            let had_gold = session.state().has_gold();
            let agent = session.to_move();
            let action = *session.state().legal_actions(agent).choose(&mut rng).unwrap();
            session.play(action).unwrap();
            if !had_gold && session.state().has_gold() {
                flips += 1;
            }
        }
        assert!(flips <= 1);
    }
}

#[test]
fn test_classic_win_scenario() {
    let mut state = classic();
    play_tokens(&mut state, Agent::Player, &["w", "d", "d", "w", "w"]);
    assert_eq!(state.player_pos(), state.gold_pos());
    assert!(state.has_gold());
    play_tokens(&mut state, Agent::Player, &["s", "s", "a", "a"]);
    assert_eq!(state.player_pos(), Cell::new(3, 0));
    assert_eq!(state.is_terminal_for(Agent::Player), Some(Outcome::Win));
}

#[test]
fn test_classic_blocked_route() {
    // Straight up the left edge then right runs into the (1,1) wall
    let mut state = classic();
    play_tokens(&mut state, Agent::Player, &["w", "w", "w"]);
    assert!(state
        .apply(Action::Move(Direction::Right), Agent::Player)
        .is_err());
}

#[test]
fn test_capture_detected_before_search() {
    let mut state = classic();
    // Monster walks down the left edge while the Player heads up it
    play_tokens(&mut state, Agent::Player, &["w"]);
    play_tokens(&mut state, Agent::Monster, &["s"]);
    play_tokens(&mut state, Agent::Player, &["w"]);
    assert_eq!(state.is_terminal_for(Agent::Monster), None);
    play_tokens(&mut state, Agent::Monster, &["s"]);
    assert_eq!(state.player_pos(), state.monster_pos());
    assert_eq!(state.is_terminal_for(Agent::Monster), Some(Outcome::Capture));
}

#[test]
fn test_timeout_scenario() {
    let mut session = Session::new(classic());
    for i in 0..session.state().max_moves() {
        let token = if i % 2 == 0 { "w" } else { "s" };
        assert_eq!(session.play(token.parse().unwrap()).unwrap(), GameResult::Ongoing);
        let result = session.play(Action::Stay).unwrap();
        if i + 1 < session.state().max_moves() {
            assert_eq!(result, GameResult::Ongoing);
        }
    }
    assert_eq!(session.outcome(), Some(Outcome::Timeout));
    assert_eq!(session.state().move_count(), 11);
    assert!(!session.state().has_gold());
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_pruned_and_exhaustive_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let ai = AlphaBetaAI::new(5, Heuristics::default());

    for _ in 0..15 {
        let mut session = Session::new(arena().to_board_state().unwrap());
        let plies = rng.gen_range(0..6);
        for _ in 0..plies {
            if session.is_over() {
                break;
            }
            let agent = session.to_move();
            let action = *session.state().legal_actions(agent).choose(&mut rng).unwrap();
            session.play(action).unwrap();
        }
        if session.is_over() {
            continue;
        }

        let agent = session.to_move();
        let state = session.state();
        let pruned = match agent {
            Agent::Monster => ai.choose_monster_action(state).unwrap(),
            Agent::Player => ai.choose_player_action(state).unwrap(),
        };
        let full = ai.exhaustive(state, agent).unwrap();
        assert_eq!(pruned.value, full.value);
        assert_eq!(pruned.action, full.action);
        assert_eq!(ai.minimax_value(state, agent).unwrap(), pruned.value);
    }
}

#[test]
fn test_exit_beats_monster_standing_on_it() {
    // The Player's win is checked before the Monster gets to capture
    let mut state = BoardState::new(
        5,
        [],
        Cell::new(2, 0),
        Cell::new(4, 1),
        Cell::new(2, 1),
        Cell::new(3, 1),
    );
    play_tokens(&mut state, Agent::Player, &["d"]);
    assert!(state.has_gold());
    play_tokens(&mut state, Agent::Monster, &["w"]);
    assert_eq!(state.monster_pos(), state.exit_pos());

    let ai = AlphaBetaAI::new(2, Heuristics::default());
    let result = ai.choose_player_action(&state).unwrap();
    assert_eq!(result.action, Action::Move(Direction::Down));
    assert_eq!(result.value, WIN_VALUE + 1);

    let mut session = Session::new(state);
    assert_eq!(session.play(result.action).unwrap(), GameResult::Won);
}

#[test]
fn test_default_depth_search_on_classic() {
    let state = classic();
    let ai = AlphaBetaAI::default();
    let result = ai.choose_monster_action(&state).unwrap();
    assert!(state.is_legal(result.action, Agent::Monster));
    assert!(result.stats.branches_pruned > 0);
    assert_eq!(state, classic());
}

#[test]
fn test_search_player_vs_search_monster() {
    let mut session = Session::new(classic());
    let mut player = Strategy::AlphaBeta(AlphaBetaAI::new(4, Heuristics::default()));
    let mut monster = Strategy::AlphaBeta(AlphaBetaAI::new(4, Heuristics::default()));

    while !session.is_over() {
        let agent = session.to_move();
        let strategy = match agent {
            Agent::Player => &mut player,
            Agent::Monster => &mut monster,
        };
        let choice = strategy.choose(session.state(), agent).unwrap();
        session.play(choice.action).unwrap();
    }

    assert_ne!(session.result(), GameResult::Ongoing);
    assert!(session.state().move_count() <= session.state().max_moves());
}

#[test]
fn test_search_monster_beats_random_player_often() {
    let mut losses = 0;
    for seed in 0..10 {
        let mut session = Session::new(classic());
        let mut player = Strategy::Random(RandomAI::new(seed));
        let mut monster = Strategy::AlphaBeta(AlphaBetaAI::new(4, Heuristics::default()));
        while !session.is_over() {
            let agent = session.to_move();
            let strategy = match agent {
                Agent::Player => &mut player,
                Agent::Monster => &mut monster,
            };
            let choice = strategy.choose(session.state(), agent).unwrap();
            session.play(choice.action).unwrap();
        }
        if session.result() == GameResult::Lost {
            losses += 1;
        }
    }
    assert!(losses >= 8, "random player lost only {} of 10", losses);
}
