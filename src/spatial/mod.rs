//! Grid state and placement frames

pub mod frame;
pub mod grid;

pub use frame::Frame;
pub use grid::{CellState, CityGrid};
