//! Recursive road network generator
//!
//! A walk carves road cells from a start cell along one direction for a
//! random run length. At every step it may fork into one or both
//! perpendicular directions; each fork is a new walk with half the fork
//! chance. A walk stops early when the cell it is about to carve already has
//! a parallel road right next to it, which keeps roads from doubling up.

use rand::Rng;

use crate::core::random::{percent_roll, range_inclusive};
use crate::core::types::{CellCoord, Direction};
use crate::spatial::{CellState, CityGrid};

/// Percent chance that a fork branches both ways at once
pub const DOUBLE_FORK_CHANCE: u32 = 30;

/// One recursive carving request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadWalk {
    pub start: CellCoord,
    pub direction: Direction,
    /// Percent chance of forking at each eligible step
    pub fork_chance: u32,
    /// Top-level trunk road: runs to the grid edge
    pub first: bool,
    /// Walk spawned by a fork on the previous step of its parent
    pub fork_continuation: bool,
}

impl RoadWalk {
    /// The trunk road: center of the first row, heading RIGHT
    pub fn trunk(grid: &CityGrid, fork_chance: u32) -> Self {
        Self {
            start: CellCoord::new(grid.extent() / 2, 0),
            direction: Direction::Right,
            fork_chance,
            first: true,
            fork_continuation: false,
        }
    }

    /// Child walk branching off at `from` toward `direction`
    fn fork(&self, from: CellCoord, direction: Direction) -> Self {
        Self {
            start: from.step(direction),
            direction,
            fork_chance: self.fork_chance / 2,
            first: false,
            fork_continuation: true,
        }
    }
}

/// Carve the whole network: one trunk walk and everything it forks into
pub fn carve_network<R: Rng + ?Sized>(grid: &mut CityGrid, fork_chance: u32, rng: &mut R) {
    let trunk = RoadWalk::trunk(grid, fork_chance);
    carve(grid, trunk, rng);
}

/// Carve one walk and, recursively, its forks
///
/// Does nothing unless the start cell is inside the grid and empty.
pub fn carve<R: Rng + ?Sized>(grid: &mut CityGrid, walk: RoadWalk, rng: &mut R) {
    if !grid.is(walk.start.x, walk.start.y, CellState::Empty) {
        return;
    }

    let road = CellState::road_for(walk.direction);
    let run = run_cells(grid, &walk, rng);
    let last = run.len().saturating_sub(1);

    let mut fork_continuation = walk.fork_continuation;
    let mut forked_last_step = false;

    for (step, cell) in run.into_iter().enumerate() {
        if parallel_road_alongside(grid, cell, walk.direction) {
            tracing::trace!(x = cell.x, y = cell.y, "walk stopped by parallel road");
            break;
        }

        // Crossing an existing road leaves it untouched
        grid.set(cell.x, cell.y, road);

        let roll = percent_roll(rng);
        let mut forked = false;
        if roll < walk.fork_chance
            && !fork_continuation
            && !forked_last_step
            && step > 0
            && step != last
        {
            forked = true;
            fork_at(grid, &walk, cell, rng);
        }

        fork_continuation = false;
        forked_last_step = forked;
    }
}

fn fork_at<R: Rng + ?Sized>(grid: &mut CityGrid, walk: &RoadWalk, cell: CellCoord, rng: &mut R) {
    let [positive, negative] = walk.direction.perpendicular();

    if percent_roll(rng) < DOUBLE_FORK_CHANCE {
        tracing::debug!(x = cell.x, y = cell.y, "road forks both ways");
        carve(grid, walk.fork(cell, positive), rng);
        carve(grid, walk.fork(cell, negative), rng);
    } else {
        let direction = if rng.gen_bool(0.5) { positive } else { negative };
        tracing::debug!(x = cell.x, y = cell.y, ?direction, "road forks");
        carve(grid, walk.fork(cell, direction), rng);
    }
}

/// Cells a walk would visit if nothing stops it
///
/// Forward walks (RIGHT/UP) run to an exclusive end drawn from at least
/// halfway to the far edge. Reverse walks (LEFT/DOWN) run down to an
/// inclusive stop drawn between the near edge and half the start coordinate.
/// The trunk walk always spans the full remaining extent.
fn run_cells<R: Rng + ?Sized>(grid: &CityGrid, walk: &RoadWalk, rng: &mut R) -> Vec<CellCoord> {
    let n = grid.extent();
    let along = if walk.direction.is_horizontal() {
        walk.start.y
    } else {
        walk.start.x
    };

    let positions: Vec<i32> = if walk.direction.is_reverse() {
        let stop = if walk.first {
            0
        } else {
            range_inclusive(rng, 0, along / 2)
        };
        (stop..=along).rev().collect()
    } else {
        let end = if walk.first {
            n
        } else {
            range_inclusive(rng, along + (n - along) / 2, n)
        };
        (along..end).collect()
    };

    positions
        .into_iter()
        .map(|p| {
            if walk.direction.is_horizontal() {
                CellCoord::new(walk.start.x, p)
            } else {
                CellCoord::new(p, walk.start.y)
            }
        })
        .collect()
}

/// True when a road of the walk's own orientation lies on either side of `cell`
fn parallel_road_alongside(grid: &CityGrid, cell: CellCoord, direction: Direction) -> bool {
    let road = CellState::road_for(direction);
    direction
        .perpendicular()
        .iter()
        .any(|&side| grid.neighbor(cell, side) == Some(road))
}
