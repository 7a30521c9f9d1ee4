//! Road network - carving, topology classification and tile emission

pub mod generator;
pub mod render;
pub mod topology;

pub use generator::{carve, carve_network, RoadWalk};
pub use render::{render_road_cell, RoadTile, RowState};
pub use topology::{classify, Junction};
