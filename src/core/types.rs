//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Catalog style tag selecting a family of interchangeable variants
pub type StyleId = u8;

/// Integer cell coordinate on the city grid
///
/// `x` is the row and `y` the column; world placement maps `x` to world X
/// and `y` to world Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour one step along `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Walk direction of the road carver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +y
    Right,
    /// -y
    Left,
    /// +x
    Up,
    /// -x
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Cell delta `(dx, dy)` of one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
        }
    }

    /// RIGHT/LEFT carve horizontal roads, UP/DOWN vertical ones
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    /// LEFT and DOWN walk toward the near edge of the grid
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Left | Direction::Down)
    }

    /// The two directions a fork may branch into, positive side first
    pub fn perpendicular(self) -> [Direction; 2] {
        if self.is_horizontal() {
            [Direction::Up, Direction::Down]
        } else {
            [Direction::Right, Direction::Left]
        }
    }
}

/// One of the four canonical rotations about the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Indexed rotation table shared by the building roles (index = quarter turns)
    pub const TABLE: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Candidate order used when scattering trees
    pub const TREE_ORDER: [Rotation; 4] = [
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
        Rotation::Deg0,
    ];

    pub fn from_quarter_turns(turns: usize) -> Self {
        Self::TABLE[turns % 4]
    }

    pub fn degrees(self) -> f32 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => 90.0,
            Rotation::Deg180 => 180.0,
            Rotation::Deg270 => 270.0,
        }
    }

    pub fn radians(self) -> f32 {
        self.degrees().to_radians()
    }
}
