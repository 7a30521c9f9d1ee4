//! Local road topology classification
//!
//! Each road cell is classified from its own orientation and its four
//! neighbours. "Right"/"left" are relative to the road's forward direction
//! (+y for horizontal roads, +x for vertical ones); "frontal" means the road
//! also continues forward past the junction.

use serde::{Deserialize, Serialize};

use crate::spatial::{CellState, CityGrid};

/// Junction code of a road cell; the code doubles as the crossing variant index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Junction {
    /// Plain segment, no junction
    Straight,
    BranchRight,
    BranchLeft,
    BranchBoth,
    FrontalRight,
    FrontalLeft,
    /// Full four-way crossing
    FrontalBoth,
    /// Road ends ahead
    DeadEndForward,
    /// Road ends behind
    DeadEndBackward,
}

impl Junction {
    pub fn code(self) -> usize {
        match self {
            Junction::Straight => 0,
            Junction::BranchRight => 1,
            Junction::BranchLeft => 2,
            Junction::BranchBoth => 3,
            Junction::FrontalRight => 4,
            Junction::FrontalLeft => 5,
            Junction::FrontalBoth => 6,
            Junction::DeadEndForward => 7,
            Junction::DeadEndBackward => 8,
        }
    }

    pub fn from_code(code: usize) -> Option<Self> {
        Some(match code {
            0 => Junction::Straight,
            1 => Junction::BranchRight,
            2 => Junction::BranchLeft,
            3 => Junction::BranchBoth,
            4 => Junction::FrontalRight,
            5 => Junction::FrontalLeft,
            6 => Junction::FrontalBoth,
            7 => Junction::DeadEndForward,
            8 => Junction::DeadEndBackward,
            _ => return None,
        })
    }

    pub fn is_straight(self) -> bool {
        self == Junction::Straight
    }
}

/// Classify the road cell at `(x, y)`
///
/// Non-road and out-of-bounds cells classify as `Straight`.
pub fn classify(grid: &CityGrid, x: i32, y: i32) -> Junction {
    let code = match grid.get(x, y) {
        Some(CellState::RoadH) => {
            let mut code = 0;
            if grid.is(x + 1, y, CellState::RoadV) {
                code += 2;
            }
            if grid.is(x - 1, y, CellState::RoadV) {
                code += 1;
            }
            dead_ends(
                grid,
                code,
                grid.is(x, y + 1, CellState::RoadH),
                (x, y + 1),
                (x, y - 1),
            )
        }
        Some(CellState::RoadV) => {
            let mut code = 0;
            if grid.is(x, y + 1, CellState::RoadH) {
                code += 1;
            }
            if grid.is(x, y - 1, CellState::RoadH) {
                code += 2;
            }
            dead_ends(
                grid,
                code,
                grid.is(x + 1, y, CellState::RoadV),
                (x + 1, y),
                (x - 1, y),
            )
        }
        _ => 0,
    };

    Junction::from_code(code).unwrap_or(Junction::Straight)
}

fn dead_ends(
    grid: &CityGrid,
    side_code: usize,
    continues_forward: bool,
    ahead: (i32, i32),
    behind: (i32, i32),
) -> usize {
    if side_code != 0 {
        return if continues_forward {
            side_code + 3
        } else {
            side_code
        };
    }
    if grid.is_open_or_outside(ahead.0, ahead.1) {
        return Junction::DeadEndForward.code();
    }
    if grid.is_open_or_outside(behind.0, behind.1) {
        return Junction::DeadEndBackward.code();
    }
    0
}
