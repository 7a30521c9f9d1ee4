//! City generation configuration with documented defaults
//!
//! All generation knobs are collected here. Percent values are compared
//! against rolls drawn from `0..=100` (see `core::random`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{CityError, Result};

/// Largest accepted `city_size`
pub const MAX_CITY_SIZE: usize = 4096;

/// Largest accepted floor bound; stacks are built one recursive call per floor
pub const MAX_FLOORS: u32 = 200;

/// Configuration consumed by the city generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Side length `N` of the square grid (cells)
    pub city_size: usize,

    /// Minimum floor count of generated buildings
    pub min_floors: u32,

    /// Maximum floor count of generated buildings
    ///
    /// Raised to at least 3 before generation.
    pub max_floors: u32,

    /// Percent chance that a road forks at a given step
    ///
    /// Halved (integer division) for every level of fork recursion, so the
    /// network thins out away from the trunk road.
    pub fork_chance: u32,

    /// Percent chance of attempting a building on an empty cell
    pub building_chance: u32,

    /// Percent chance of planting trees on an empty cell when no building
    /// was attempted there
    pub tree_chance: u32,

    /// Percent of the grid radius treated as urban core
    ///
    /// The core gets taller buildings and fewer trees; the ring outside it
    /// is rural.
    pub urbanization: u32,

    /// Seed for the generator RNG; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            city_size: 30,
            min_floors: 1,
            max_floors: 5,
            fork_chance: 30,
            building_chance: 50,
            tree_chance: 30,
            urbanization: 75,
            seed: None,
        }
    }
}

impl CityConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string; missing keys keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: CityConfig =
            toml::from_str(content).map_err(|e| CityError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.city_size == 0 {
            return Err(CityError::InvalidConfig(
                "city_size must be at least 1".into(),
            ));
        }

        if self.city_size > MAX_CITY_SIZE {
            return Err(CityError::InvalidConfig(format!(
                "city_size ({}) exceeds {}",
                self.city_size, MAX_CITY_SIZE
            )));
        }

        for (name, value) in [
            ("min_floors", self.min_floors),
            ("max_floors", self.max_floors),
        ] {
            if value > MAX_FLOORS {
                return Err(CityError::InvalidConfig(format!(
                    "{} ({}) exceeds {}",
                    name, value, MAX_FLOORS
                )));
            }
        }

        for (name, value) in [
            ("fork_chance", self.fork_chance),
            ("building_chance", self.building_chance),
            ("tree_chance", self.tree_chance),
            ("urbanization", self.urbanization),
        ] {
            if value > 100 {
                return Err(CityError::InvalidConfig(format!(
                    "{} ({}) must be a percentage in 0..=100",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Clamp floor bounds the way the generator expects them
    ///
    /// `max_floors >= 3`, `min_floors >= 1` and `min_floors <= max_floors`.
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();

        if config.max_floors < 3 {
            tracing::warn!(max_floors = config.max_floors, "max_floors raised to 3");
            config.max_floors = 3;
        }
        if config.min_floors < 1 {
            tracing::warn!(min_floors = config.min_floors, "min_floors raised to 1");
            config.min_floors = 1;
        }
        if config.min_floors > config.max_floors {
            tracing::warn!(
                min_floors = config.min_floors,
                max_floors = config.max_floors,
                "min_floors lowered to max_floors"
            );
            config.min_floors = config.max_floors;
        }

        config
    }
}
