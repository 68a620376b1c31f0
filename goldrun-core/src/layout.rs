//! Layout - initial board definition

use crate::board::Cell;
use crate::error::LayoutError;
use crate::game::BoardState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting arrangement of walls, agents, gold and exit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_name")]
    pub name: String,
    pub grid_size: i16,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    pub player: Cell,
    pub monster: Cell,
    pub gold: Cell,
    pub exit: Cell,
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Layout {
    /// Check bounds and that nothing starts on a wall
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid_size <= 0 {
            return Err(LayoutError::InvalidSize(self.grid_size));
        }

        let size = self.grid_size;
        let wall_cells = self.obstacles.iter().map(|&cell| ("wall", cell));
        let named = [
            ("player", self.player),
            ("monster", self.monster),
            ("gold", self.gold),
            ("exit", self.exit),
        ];

        for (what, cell) in wall_cells.chain(named) {
            if !cell.is_valid(size) {
                return Err(LayoutError::OutOfBounds { what, cell, size });
            }
        }

        for (what, cell) in named {
            if self.obstacles.contains(&cell) {
                return Err(LayoutError::OnWall { what, cell });
            }
        }

        Ok(())
    }

    /// Convert to a fresh BoardState
    pub fn to_board_state(&self) -> Result<BoardState, LayoutError> {
        self.validate()?;
        Ok(BoardState::new(
            self.grid_size,
            self.obstacles.iter().copied(),
            self.player,
            self.monster,
            self.gold,
            self.exit,
        ))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout: Layout = serde_json::from_str(&content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Empty square board with the agents in opposite corners
    pub fn open(grid_size: i16) -> Self {
        let far = grid_size - 1;
        Self {
            name: format!("open-{}", grid_size),
            grid_size,
            obstacles: Vec::new(),
            player: Cell::new(far, 0),
            monster: Cell::new(0, far),
            gold: Cell::new(0, 0),
            exit: Cell::new(far, far),
        }
    }
}

impl Default for Layout {
    /// The classic 5x5 board
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            grid_size: 5,
            obstacles: vec![
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(1, 3),
                Cell::new(1, 4),
                Cell::new(4, 1),
                Cell::new(4, 2),
                Cell::new(4, 4),
            ],
            player: Cell::new(4, 0),
            monster: Cell::new(0, 0),
            gold: Cell::new(1, 2),
            exit: Cell::new(3, 0),
        }
    }
}
