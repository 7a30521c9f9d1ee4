//! City orchestrator
//!
//! Builds the grid, carves the road network once, then sweeps every cell in
//! row-major order: empty cells may get a building or trees, road cells get
//! their tile, and cells claimed by an earlier building are skipped.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::{find_footprint, place_building, BuildingStyle};
use crate::catalog::{ModelCatalog, VariantId};
use crate::city::decoration::plant_trees;
use crate::city::urbanization::Urbanization;
use crate::core::config::CityConfig;
use crate::core::error::Result;
use crate::core::random::{percent_roll, range_inclusive};
use crate::roads::{carve_network, render_road_cell, RoadTile, RowState};
use crate::scene::SceneSink;
use crate::spatial::{CellState, CityGrid, Frame};

/// Counts collected over one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    /// Seed of the run; `None` when the caller supplied its own RNG
    pub seed: Option<u64>,
    pub city_size: usize,
    pub road_cells: usize,
    pub crossings: usize,
    pub crosswalks: usize,
    /// Footprints placed
    pub buildings: usize,
    /// Cells covered by those footprints
    pub building_cells: usize,
    pub trees: usize,
    /// Total scene sink calls
    pub placements: usize,
}

/// Grid and summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCity {
    pub grid: CityGrid,
    pub summary: CitySummary,
}

/// Seeded city generator
pub struct CityGenerator<'a> {
    config: CityConfig,
    catalog: &'a ModelCatalog,
    seed: u64,
}

impl<'a> CityGenerator<'a> {
    /// Validate and normalize `config`; draws a seed when none is set
    pub fn new(config: &CityConfig, catalog: &'a ModelCatalog) -> Result<Self> {
        config.validate()?;
        let config = config.normalized();
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Ok(Self {
            config,
            catalog,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Normalized configuration the run will use
    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Generate the city into `sink`
    pub fn generate<S: SceneSink + ?Sized>(&self, sink: &mut S) -> Result<GeneratedCity> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut city = generate_with_rng(&self.config, self.catalog, sink, &mut rng)?;
        city.summary.seed = Some(self.seed);
        Ok(city)
    }
}

/// Generate a city from `config` into `sink`
pub fn generate_city<S: SceneSink + ?Sized>(
    config: &CityConfig,
    catalog: &ModelCatalog,
    sink: &mut S,
) -> Result<GeneratedCity> {
    CityGenerator::new(config, catalog)?.generate(sink)
}

/// Generate a city drawing every random decision from `rng`
///
/// `config.seed` is ignored.
pub fn generate_with_rng<R, S>(
    config: &CityConfig,
    catalog: &ModelCatalog,
    sink: &mut S,
    rng: &mut R,
) -> Result<GeneratedCity>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    config.validate()?;
    let config = config.normalized();
    let start = std::time::Instant::now();

    let mut grid = CityGrid::new(config.city_size);
    let mut sink = CountingSink::new(sink);
    let mut summary = CitySummary {
        city_size: config.city_size,
        ..CitySummary::default()
    };

    // 1. Road network
    tracing::info!(city_size = config.city_size, "generating roads");
    carve_network(&mut grid, config.fork_chance, rng);
    summary.road_cells = grid.count(CellState::RoadH) + grid.count(CellState::RoadV);
    tracing::info!(road_cells = summary.road_cells, "roads generated");

    // 2. Buildings, trees and road tiles
    let context = SweepContext {
        config: &config,
        urbanization: Urbanization::new(config.city_size, config.urbanization),
        catalog,
    };
    let n = grid.extent();
    for x in 0..n {
        let mut row = RowState::default();
        for y in 0..n {
            match grid.get(x, y) {
                Some(CellState::Empty) => {
                    sweep_open_cell(&mut grid, x, y, &context, &mut sink, &mut summary, rng)?
                }
                Some(CellState::RoadH | CellState::RoadV) => {
                    match render_road_cell(&grid, x, y, catalog, &mut sink, &mut row, rng)? {
                        Some(RoadTile::Crossing(_)) => summary.crossings += 1,
                        Some(RoadTile::Crosswalk) => summary.crosswalks += 1,
                        Some(RoadTile::Segment) | None => {}
                    }
                }
                Some(CellState::Claimed) | None => {}
            }
        }
    }

    summary.placements = sink.count;
    tracing::info!(
        buildings = summary.buildings,
        trees = summary.trees,
        placements = summary.placements,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "buildings and trees generated"
    );

    Ok(GeneratedCity { grid, summary })
}

/// Read-only inputs of the cell sweep
struct SweepContext<'a> {
    config: &'a CityConfig,
    urbanization: Urbanization,
    catalog: &'a ModelCatalog,
}

fn sweep_open_cell<R, S>(
    grid: &mut CityGrid,
    x: i32,
    y: i32,
    context: &SweepContext<'_>,
    sink: &mut S,
    summary: &mut CitySummary,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    let SweepContext {
        config,
        urbanization,
        catalog,
    } = context;
    let zone = urbanization.zone(x, y);

    // A building attempt that finds no site does not fall back to trees
    if percent_roll(rng) <= config.building_chance {
        let floors = rng.gen_range(zone.floor_range(config.min_floors, config.max_floors));
        let style = if floors > 2 && rng.gen_bool(0.5) {
            BuildingStyle::Tower
        } else {
            BuildingStyle::Simple
        };

        if let Some(footprint) = find_footprint(grid, x, y, floors, style, catalog, rng)? {
            summary.building_cells += place_building(grid, &footprint, catalog, sink, rng)?;
            summary.buildings += 1;
        }
    } else if percent_roll(rng) <= config.tree_chance {
        let count = range_inclusive(rng, 0, zone.max_trees() as i32) as u32;
        summary.trees += plant_trees(x, y, count, catalog, sink, rng)? as usize;
    }

    Ok(())
}

/// Forwards placements and counts them
struct CountingSink<'s, S: ?Sized> {
    inner: &'s mut S,
    count: usize,
}

impl<'s, S: SceneSink + ?Sized> CountingSink<'s, S> {
    fn new(inner: &'s mut S) -> Self {
        Self { inner, count: 0 }
    }
}

impl<S: SceneSink + ?Sized> SceneSink for CountingSink<'_, S> {
    fn place(&mut self, variant: &VariantId, name: &str, frame: &Frame) {
        self.count += 1;
        self.inner.place(variant, name, frame);
    }
}
