//! ASCII map of a generated grid
//!
//! One character per cell, one line per grid row (`x`), columns (`y`) left
//! to right.

use crate::spatial::{CellState, CityGrid};

/// Character for one cell state
pub fn cell_char(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::RoadH => '-',
        CellState::RoadV => '|',
        CellState::Claimed => '#',
    }
}

/// Render the whole grid
pub fn render_grid(grid: &CityGrid) -> String {
    let n = grid.size();
    let mut out = String::with_capacity(n * (n + 1));
    for (cell, state) in grid.iter() {
        out.push(cell_char(state));
        if cell.y as usize + 1 == n {
            out.push('\n');
        }
    }
    out
}
