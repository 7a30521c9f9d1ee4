pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::CityConfig;
pub use error::{CityError, Result};
pub use types::{CellCoord, Direction, Rotation, StyleId};
