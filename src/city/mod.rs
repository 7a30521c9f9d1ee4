//! City layer - urbanization, decoration and the generation sweep

pub mod ascii;
pub mod decoration;
pub mod generator;
pub mod urbanization;

pub use ascii::render_grid;
pub use decoration::plant_trees;
pub use generator::{generate_city, generate_with_rng, CityGenerator, CitySummary, GeneratedCity};
pub use urbanization::{Urbanization, Zone};
