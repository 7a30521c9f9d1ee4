//! Emits the tile for one road cell

use rand::Rng;

use crate::catalog::{ModelCatalog, Part, DEFAULT_STYLE};
use crate::core::error::Result;
use crate::core::random::percent_roll;
use crate::roads::topology::{classify, Junction};
use crate::scene::SceneSink;
use crate::spatial::{CellState, CityGrid, Frame};

/// Percent chance of a crosswalk on a straight horizontal segment
pub const CROSSWALK_CHANCE: u32 = 10;

/// Crosswalks allowed per grid row
pub const MAX_CROSSWALKS_PER_ROW: u32 = 2;

/// Road variant index of the plain segment
const SEGMENT_VARIANT: usize = 0;
/// Road variant index of the crosswalk segment
const CROSSWALK_VARIANT: usize = 1;

/// Which tile a road cell received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadTile {
    Segment,
    Crosswalk,
    Crossing(Junction),
}

/// Per-row rendering state
#[derive(Debug, Clone, Copy, Default)]
pub struct RowState {
    pub crosswalks: u32,
}

/// Place the tile for the road cell at `(x, y)`
///
/// Returns `None` when the cell is not a road.
pub fn render_road_cell<R, S>(
    grid: &CityGrid,
    x: i32,
    y: i32,
    catalog: &ModelCatalog,
    sink: &mut S,
    row: &mut RowState,
    rng: &mut R,
) -> Result<Option<RoadTile>>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    let horizontal = match grid.get(x, y) {
        Some(CellState::RoadH) => true,
        Some(CellState::RoadV) => false,
        _ => return Ok(None),
    };
    let frame = Frame::road_tile(horizontal, x, y);

    let junction = classify(grid, x, y);
    tracing::trace!(x, y, ?junction, "road cell");

    if !junction.is_straight() {
        let variant = catalog.variant(Part::Crossing, DEFAULT_STYLE, junction.code())?;
        sink.place(variant, &format!("crossing_{}_{}", x, y), &frame);
        return Ok(Some(RoadTile::Crossing(junction)));
    }

    if percent_roll(rng) < CROSSWALK_CHANCE
        && horizontal
        && row.crosswalks < MAX_CROSSWALKS_PER_ROW
    {
        row.crosswalks += 1;
        let variant = catalog.variant(Part::Road, DEFAULT_STYLE, CROSSWALK_VARIANT)?;
        sink.place(variant, &format!("crosswalk_{}_{}", x, y), &frame);
        return Ok(Some(RoadTile::Crosswalk));
    }

    let variant = catalog.variant(Part::Road, DEFAULT_STYLE, SEGMENT_VARIANT)?;
    sink.place(variant, &format!("road_{}_{}", x, y), &frame);
    Ok(Some(RoadTile::Segment))
}
