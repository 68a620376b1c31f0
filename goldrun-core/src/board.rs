//! Square grid geometry with (row, col) coordinates

use serde::{Deserialize, Serialize};

/// Grid cell, row-major with (0, 0) in the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Check if this cell lies on a `grid_size` x `grid_size` board
    pub fn is_valid(&self, grid_size: i16) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < grid_size && self.col < grid_size
    }

    /// Manhattan distance between two cells
    pub fn distance_to(&self, other: Cell) -> i16 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Adjacent cell in a direction (may be off the board)
    pub fn neighbor(&self, direction: Direction) -> Cell {
        let (dr, dc) = direction.delta();
        Cell::new(self.row + dr, self.col + dc)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i16, i16)> for Cell {
    fn from((row, col): (i16, i16)) -> Self {
        Cell::new(row, col)
    }
}

/// Movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed generation order for every direction-indexed action list
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Row/column delta
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Single-key token (`w`/`s`/`a`/`d`)
    pub const fn key(self) -> &'static str {
        match self {
            Direction::Up => "w",
            Direction::Down => "s",
            Direction::Left => "a",
            Direction::Right => "d",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        DIRECTIONS.iter().copied().find(|d| d.key() == key)
    }
}
