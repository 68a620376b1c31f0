//! Text rendering of the board

use std::fmt::Write;

use crate::board::Cell;
use crate::game::BoardState;

pub const MONSTER_SYMBOL: char = 'M';
pub const PLAYER_SYMBOL: char = 'P';
pub const GOLD_SYMBOL: char = 'G';
pub const WALL_SYMBOL: char = '#';
pub const EXIT_SYMBOL: char = 'E';

/// Symbol drawn in a cell; the Monster hides everything, the gold hides the Player
pub fn cell_symbol(state: &BoardState, cell: Cell) -> char {
    if cell == state.monster_pos() {
        MONSTER_SYMBOL
    } else if cell == state.gold_pos() && !state.has_gold() {
        GOLD_SYMBOL
    } else if cell == state.player_pos() {
        PLAYER_SYMBOL
    } else if state.is_obstacle(cell) {
        WALL_SYMBOL
    } else if cell == state.exit_pos() {
        EXIT_SYMBOL
    } else {
        ' '
    }
}

/// Bordered grid with 1-based row and column numbers
///
/// Numbers and cells share one width, so boards of 10 or more stay aligned.
pub fn render_board(state: &BoardState) -> String {
    let size = state.grid_size();
    let width = size.to_string().len();
    let border = format!(
        "{:width$}{}\n",
        "",
        "-".repeat((width + 1) * size as usize + 1)
    );
    let mut out = String::new();

    let _ = write!(out, "{:width$}", "");
    for col in 0..size {
        let _ = write!(out, " {:>width$}", col + 1);
    }
    out.push('\n');

    for row in 0..size {
        out.push_str(&border);
        let _ = write!(out, "{:>width$}", row + 1);
        for col in 0..size {
            let _ = write!(out, "|{:<width$}", cell_symbol(state, Cell::new(row, col)));
        }
        out.push_str("|\n");
    }
    out.push_str(&border);

    out
}
