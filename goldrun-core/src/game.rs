//! Board state, actions and terminal checks

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::board::{Cell, Direction, DIRECTIONS};
use crate::error::{GameError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Turn-taking actor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Agent {
    Player,
    Monster,
}

impl Agent {
    pub fn opponent(self) -> Self {
        match self {
            Agent::Player => Agent::Monster,
            Agent::Monster => Agent::Player,
        }
    }
}

/// Terminal condition reported by `BoardState::is_terminal_for`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player reached the exit holding the gold
    Win,
    /// Monster and Player share a cell
    Capture,
    /// Player used up all moves
    Timeout,
}

/// A single agent action
///
/// Player: `Move` or `Build` in any direction. Monster: `Move` or `Stay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Build(Direction),
    Stay,
}

impl Action {
    /// Canonical token: `w`, `s`, `a`, `d`, the same with a `b` suffix for
    /// builds, and the empty string for `Stay`
    pub fn token(&self) -> String {
        match self {
            Action::Move(dir) => dir.key().to_string(),
            Action::Build(dir) => format!("{}b", dir.key()),
            Action::Stay => String::new(),
        }
    }

    pub fn from_token(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Ok(Action::Stay);
        }
        let (key, build) = match token.strip_suffix('b') {
            Some(key) => (key, true),
            None => (token, false),
        };
        match Direction::from_key(key) {
            Some(dir) if build => Ok(Action::Build(dir)),
            Some(dir) => Ok(Action::Move(dir)),
            None => Err(GameError::UnknownToken(token.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Action::from_token(s)
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Full game state (clone for hypothetical play)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    grid_size: i16,

    /// Wall cells; only ever grows
    obstacles: FxHashSet<Cell>,

    player_pos: Cell,
    monster_pos: Cell,
    gold_pos: Cell,
    exit_pos: Cell,

    has_gold: bool,

    /// Player actions taken so far
    move_count: u32,
    max_moves: u32,

    /// `move_count` at the moment the gold was picked up
    gold_taken_at: Option<u32>,
}

impl BoardState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a board from already-validated positions (see `Layout`)
    pub fn new(
        grid_size: i16,
        obstacles: impl IntoIterator<Item = Cell>,
        player_pos: Cell,
        monster_pos: Cell,
        gold_pos: Cell,
        exit_pos: Cell,
    ) -> Self {
        Self {
            grid_size,
            obstacles: obstacles.into_iter().collect(),
            player_pos,
            monster_pos,
            gold_pos,
            exit_pos,
            has_gold: false,
            move_count: 0,
            max_moves: 2 * grid_size as u32 + 1,
            gold_taken_at: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid_size(&self) -> i16 {
        self.grid_size
    }

    pub fn player_pos(&self) -> Cell {
        self.player_pos
    }

    pub fn monster_pos(&self) -> Cell {
        self.monster_pos
    }

    pub fn gold_pos(&self) -> Cell {
        self.gold_pos
    }

    pub fn exit_pos(&self) -> Cell {
        self.exit_pos
    }

    pub fn has_gold(&self) -> bool {
        self.has_gold
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    pub fn gold_taken_at(&self) -> Option<u32> {
        self.gold_taken_at
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Wall cells in row-major order
    pub fn obstacles(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.obstacles.iter().copied().collect();
        cells.sort();
        cells
    }

    /// Where the Player is heading: the gold until it is held, then the exit
    pub fn objective(&self) -> Cell {
        if self.has_gold {
            self.exit_pos
        } else {
            self.gold_pos
        }
    }

    /// In bounds and not a wall
    pub fn is_passable(&self, cell: Cell) -> bool {
        cell.is_valid(self.grid_size) && !self.obstacles.contains(&cell)
    }

    /// Passable and holding nothing a wall could bury
    fn is_empty(&self, cell: Cell) -> bool {
        self.is_passable(cell)
            && cell != self.monster_pos
            && cell != self.player_pos
            && cell != self.exit_pos
            && (self.has_gold || cell != self.gold_pos)
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All legal actions for `agent`, in a fixed direction order
    pub fn legal_actions(&self, agent: Agent) -> Vec<Action> {
        match agent {
            Agent::Player => self.player_actions(),
            Agent::Monster => self.monster_actions(),
        }
    }

    fn player_actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(8);
        for dir in DIRECTIONS {
            let target = self.player_pos.neighbor(dir);
            if !self.is_passable(target) {
                continue;
            }
            actions.push(Action::Move(dir));
            if self.is_empty(target) {
                actions.push(Action::Build(dir));
            }
        }
        actions
    }

    fn monster_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = DIRECTIONS
            .iter()
            .copied()
            .filter(|&dir| self.is_passable(self.monster_pos.neighbor(dir)))
            .map(Action::Move)
            .collect();
        actions.push(Action::Stay);
        actions
    }

    pub fn is_legal(&self, action: Action, agent: Agent) -> bool {
        self.legal_actions(agent).contains(&action)
    }

    // ========================================================================
    // APPLY
    // ========================================================================

    /// Apply an action in place
    pub fn apply(&mut self, action: Action, agent: Agent) -> Result<()> {
        if !self.is_legal(action, agent) {
            return Err(GameError::IllegalAction { agent, action });
        }

        match (agent, action) {
            (Agent::Player, Action::Move(dir)) => {
                self.player_pos = self.player_pos.neighbor(dir);
                self.move_count += 1;
                if !self.has_gold && self.player_pos == self.gold_pos {
                    self.has_gold = true;
                    self.gold_taken_at = Some(self.move_count);
                }
            }
            (Agent::Player, Action::Build(dir)) => {
                self.obstacles.insert(self.player_pos.neighbor(dir));
                self.move_count += 1;
            }
            (Agent::Monster, Action::Move(dir)) => {
                self.monster_pos = self.monster_pos.neighbor(dir);
            }
            (Agent::Monster, Action::Stay) => {}
            // Filtered out by the legality check above
            (Agent::Player, Action::Stay) | (Agent::Monster, Action::Build(_)) => {
                return Err(GameError::IllegalAction { agent, action });
            }
        }

        Ok(())
    }

    /// Apply to a copy, leaving `self` untouched
    pub fn with_action(&self, action: Action, agent: Agent) -> Result<Self> {
        let mut next = self.clone();
        next.apply(action, agent)?;
        Ok(next)
    }

    // ========================================================================
    // TERMINAL CHECKS
    // ========================================================================

    /// Terminal condition from `agent`'s point of view, checked after it acts
    pub fn is_terminal_for(&self, agent: Agent) -> Option<Outcome> {
        match agent {
            Agent::Player => {
                (self.has_gold && self.player_pos == self.exit_pos).then_some(Outcome::Win)
            }
            Agent::Monster => {
                if self.player_pos == self.monster_pos {
                    Some(Outcome::Capture)
                } else if self.move_count == self.max_moves {
                    Some(Outcome::Timeout)
                } else {
                    None
                }
            }
        }
    }

    // ========================================================================
    // DISTANCES
    // ========================================================================

    /// Shortest walking distance around walls, `None` if walled off
    pub fn path_distance(&self, from: Cell, to: Cell) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let size = self.grid_size as usize;
        let index = |c: Cell| c.row as usize * size + c.col as usize;

        let mut seen = vec![false; size * size];
        let mut queue = VecDeque::new();
        seen[index(from)] = true;
        queue.push_back((from, 0u32));

        while let Some((cell, dist)) = queue.pop_front() {
            for dir in DIRECTIONS {
                let next = cell.neighbor(dir);
                if !self.is_passable(next) || seen[index(next)] {
                    continue;
                }
                if next == to {
                    return Some(dist + 1);
                }
                seen[index(next)] = true;
                queue.push_back((next, dist + 1));
            }
        }

        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
