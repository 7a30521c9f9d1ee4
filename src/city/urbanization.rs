//! Urbanization gradient
//!
//! The city has an urban core around the grid center and a rural ring along
//! the edges. The urbanization percent sets how much of the grid radius the
//! core covers. Rural cells get low houses and more trees; urban cells get
//! taller buildings and fewer trees.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Floor count below which nothing is built in the urban core
const URBAN_MIN_FLOORS: u32 = 2;
/// Tallest rural building unless `min_floors` is higher
const RURAL_MAX_FLOORS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Urban,
    Rural,
}

impl Zone {
    /// Floor counts a building in this zone may have
    pub fn floor_range(self, min_floors: u32, max_floors: u32) -> RangeInclusive<u32> {
        match self {
            Zone::Rural => min_floors..=min_floors.max(RURAL_MAX_FLOORS),
            Zone::Urban => min_floors.max(URBAN_MIN_FLOORS)..=max_floors,
        }
    }

    /// Most trees one cell in this zone can get
    pub fn max_trees(self) -> u32 {
        match self {
            Zone::Rural => 2,
            Zone::Urban => 1,
        }
    }
}

/// Zone lookup for one grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Urbanization {
    size: f32,
    /// Width of the rural ring as a fraction of the grid side
    rural_rate: f32,
}

impl Urbanization {
    pub fn new(city_size: usize, urbanization: u32) -> Self {
        Self {
            size: city_size as f32,
            rural_rate: 1.0 - urbanization.min(100) as f32 / 100.0,
        }
    }

    pub fn zone(&self, x: i32, y: i32) -> Zone {
        let ring = self.size * self.rural_rate;
        let (x, y) = (x as f32, y as f32);
        let rural = x < ring || x > self.size - ring || y < ring || y > self.size - ring;
        if rural {
            Zone::Rural
        } else {
            Zone::Urban
        }
    }

    pub fn is_rural(&self, x: i32, y: i32) -> bool {
        self.zone(x, y) == Zone::Rural
    }
}
