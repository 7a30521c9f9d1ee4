//! Square city grid holding one cell state per cell
//!
//! The road carver and the building solver deliberately probe one cell past
//! the edge as a stopping condition, so every accessor takes signed
//! coordinates and treats out-of-bounds as a normal negative answer.

use serde::{Deserialize, Serialize};

use crate::core::types::{CellCoord, Direction};

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Unassigned; buildable or plantable
    #[default]
    Empty,
    /// Horizontal road segment (carved by RIGHT/LEFT walks)
    RoadH,
    /// Vertical road segment (carved by UP/DOWN walks)
    RoadV,
    /// Occupied by a building footprint
    Claimed,
}

impl CellState {
    #[inline]
    pub fn is_road(self) -> bool {
        matches!(self, CellState::RoadH | CellState::RoadV)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }

    /// Road orientation carved by a walk in `dir`
    pub fn road_for(dir: Direction) -> Self {
        if dir.is_horizontal() {
            CellState::RoadH
        } else {
            CellState::RoadV
        }
    }
}

/// N×N grid of cell states
///
/// Writes are monotonic: a cell can only leave `Empty`, never return to it
/// or change between non-empty states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityGrid {
    size: usize,
    cells: Vec<CellState>,
}

impl CityGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    /// Side length `N`
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length as a signed coordinate bound
    #[inline]
    pub fn extent(&self) -> i32 {
        self.size as i32
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(x as usize * self.size + y as usize)
        } else {
            None
        }
    }

    /// Cell state, `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    #[inline]
    pub fn get_at(&self, coord: CellCoord) -> Option<CellState> {
        self.get(coord.x, coord.y)
    }

    /// True when `(x, y)` is inside the grid and holds `state`
    #[inline]
    pub fn is(&self, x: i32, y: i32, state: CellState) -> bool {
        self.get(x, y) == Some(state)
    }

    /// True when `(x, y)` is inside the grid and holds a road
    #[inline]
    pub fn is_road(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(CellState::is_road)
    }

    /// True when `(x, y)` is outside the grid or still empty
    #[inline]
    pub fn is_open_or_outside(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, CellState::is_empty)
    }

    /// Write `state` into an empty cell
    ///
    /// Returns `false` without writing when the cell is outside the grid,
    /// already non-empty, or `state` is `Empty`.
    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> bool {
        if state == CellState::Empty {
            return false;
        }
        match self.index(x, y) {
            Some(i) if self.cells[i] == CellState::Empty => {
                self.cells[i] = state;
                true
            }
            _ => false,
        }
    }

    /// Neighbour state one step along `dir`
    pub fn neighbor(&self, coord: CellCoord, dir: Direction) -> Option<CellState> {
        self.get_at(coord.step(dir))
    }

    /// Count of cells currently holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Row-major iteration over `(coord, state)`
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(i, &state)| {
            (
                CellCoord::new((i / size) as i32, (i % size) as i32),
                state,
            )
        })
    }
}
