//! Building sites: road adjacency, footprint search and per-cell roles
//!
//! A building only goes where a road touches its origin cell. Low buildings
//! take a single cell facing the road; taller ones try to grow a rectangular
//! footprint of up to 3x3 cells over empty ground toward +x and +y. Each cell
//! of a footprint gets a role (corner, edge or interior) that decides its
//! orientation and which roof piece covers it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::stack::{
    build_stack, RoofOverride, StackLevel, StackRequest, STYLE_SIMPLE, STYLE_TOWER,
};
use crate::catalog::{ModelCatalog, Part};
use crate::core::error::Result;
use crate::core::random::{pick_index, range_inclusive};
use crate::core::types::{CellCoord, Rotation, StyleId};
use crate::scene::SceneSink;
use crate::spatial::{CellState, CityGrid, Frame};

/// Buildings below this many floors take a single cell
pub const MIN_BLOCK_FLOORS: u32 = 4;
/// Buildings below this many floors are never towers
pub const MIN_TOWER_FLOORS: u32 = 6;
/// Largest footprint side
pub const MAX_FOOTPRINT_SIDE: i32 = 3;

/// Architectural style of a whole building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildingStyle {
    #[default]
    Simple,
    Tower,
}

impl BuildingStyle {
    pub fn style_id(self) -> StyleId {
        match self {
            BuildingStyle::Simple => STYLE_SIMPLE,
            BuildingStyle::Tower => STYLE_TOWER,
        }
    }

    pub fn is_simple(self) -> bool {
        self == BuildingStyle::Simple
    }
}

/// Orientation a building on `(x, y)` takes to face an adjacent road
///
/// Returns `None` when no road touches the cell. Claimed cells do not count.
/// A road at -x or -y wins outright; otherwise roads at +x and +y are
/// candidates and one is picked at random.
pub fn site_rotation<R: Rng + ?Sized>(
    grid: &CityGrid,
    x: i32,
    y: i32,
    rng: &mut R,
) -> Option<Rotation> {
    if grid.is_road(x - 1, y) {
        return Some(Rotation::Deg0);
    }
    if grid.is_road(x, y - 1) {
        return Some(Rotation::Deg270);
    }

    let mut candidates = Vec::with_capacity(2);
    if grid.is_road(x + 1, y) {
        candidates.push(Rotation::Deg90);
    }
    if grid.is_road(x, y + 1) {
        candidates.push(Rotation::Deg180);
    }

    match candidates.len() {
        0 => None,
        1 => Some(candidates[0]),
        _ => Some(candidates[pick_index(rng, candidates.len())]),
    }
}

/// A claimed rectangle of cells and what to build on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub origin: CellCoord,
    /// Cells along +x
    pub rows: i32,
    /// Cells along +y
    pub columns: i32,
    pub style: BuildingStyle,
    pub floors: u32,
    /// Floor variant shared by every cell
    pub floor_variant: usize,
    /// Orientation toward the road at the origin cell
    pub facing: Rotation,
}

impl Footprint {
    pub fn is_single(&self) -> bool {
        self.rows == 1 && self.columns == 1
    }

    pub fn cell_count(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let origin = self.origin;
        (0..self.rows).flat_map(move |dx| {
            (0..self.columns).map(move |dy| CellCoord::new(origin.x + dx, origin.y + dy))
        })
    }
}

/// Try to site a building of `floors` floors with its origin at `(x, y)`
///
/// `style` is the style a tall enough building would take.
pub fn find_footprint<R: Rng + ?Sized>(
    grid: &CityGrid,
    x: i32,
    y: i32,
    floors: u32,
    style: BuildingStyle,
    catalog: &ModelCatalog,
    rng: &mut R,
) -> Result<Option<Footprint>> {
    if !grid.is(x, y, CellState::Empty) {
        return Ok(None);
    }
    let Some(facing) = site_rotation(grid, x, y, rng) else {
        return Ok(None);
    };

    if floors < MIN_BLOCK_FLOORS {
        let floor_variant = pick_index(rng, catalog.variant_count(Part::Floor, STYLE_SIMPLE)?);
        return Ok(Some(Footprint {
            origin: CellCoord::new(x, y),
            rows: 1,
            columns: 1,
            style: BuildingStyle::Simple,
            floors,
            floor_variant,
            facing,
        }));
    }

    let (available_rows, available_columns) = open_extent(grid, x, y);
    if available_rows < 2 || available_columns < 2 {
        return Ok(None);
    }

    let rows = range_inclusive(rng, 2, available_rows.min(MAX_FOOTPRINT_SIDE));
    let columns = range_inclusive(rng, 2, available_columns.min(MAX_FOOTPRINT_SIDE));
    let style = if floors < MIN_TOWER_FLOORS {
        BuildingStyle::Simple
    } else {
        style
    };

    // The index is used against both the simple and the body style lists
    let variants = catalog
        .variant_count(Part::Floor, STYLE_SIMPLE)?
        .min(catalog.variant_count(Part::Floor, style.style_id())?);
    let floor_variant = pick_index(rng, variants);

    Ok(Some(Footprint {
        origin: CellCoord::new(x, y),
        rows,
        columns,
        style,
        floors,
        floor_variant,
        facing,
    }))
}

/// Rows of empty cells starting at `(x, y)` going +x, and the shortest run
/// of empty cells going +y among those rows
fn open_extent(grid: &CityGrid, x: i32, y: i32) -> (i32, i32) {
    let mut rows = 0;
    let mut columns = i32::MAX;
    let mut xi = x;
    while grid.is(xi, y, CellState::Empty) {
        let run = (y..grid.extent())
            .take_while(|&yi| grid.is(xi, yi, CellState::Empty))
            .count() as i32;
        columns = columns.min(run);
        rows += 1;
        xi += 1;
    }
    (rows, if rows == 0 { 0 } else { columns })
}

/// Position of a cell inside its footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    /// The whole footprint
    Single,
    Origin,
    /// Opposite the origin
    FarCorner,
    LastRowFirstColumn,
    FirstRowLastColumn,
    LastRowEdge,
    LastColumnEdge,
    FirstRowEdge,
    FirstColumnEdge,
    Interior,
}

impl CellRole {
    /// Role of `cell` inside `footprint`
    pub fn of(footprint: &Footprint, cell: CellCoord) -> Self {
        if footprint.is_single() {
            return CellRole::Single;
        }
        let first_row = cell.x == footprint.origin.x;
        let first_column = cell.y == footprint.origin.y;
        let last_row = cell.x == footprint.origin.x + footprint.rows - 1;
        let last_column = cell.y == footprint.origin.y + footprint.columns - 1;

        match (first_row, last_row, first_column, last_column) {
            (_, true, _, true) => CellRole::FarCorner,
            (_, true, true, _) => CellRole::LastRowFirstColumn,
            (true, _, _, true) => CellRole::FirstRowLastColumn,
            (_, true, _, _) => CellRole::LastRowEdge,
            (_, _, _, true) => CellRole::LastColumnEdge,
            (true, _, true, _) => CellRole::Origin,
            (true, _, _, _) => CellRole::FirstRowEdge,
            (_, _, true, _) => CellRole::FirstColumnEdge,
            _ => CellRole::Interior,
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            CellRole::Single
                | CellRole::Origin
                | CellRole::FarCorner
                | CellRole::LastRowFirstColumn
                | CellRole::FirstRowLastColumn
        )
    }
}

/// Everything a role decides for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlan {
    pub cell: CellCoord,
    pub role: CellRole,
    /// Orientation of the floor modules
    pub rotation: Rotation,
    /// Roof piece index into the per-cell roof style
    pub roof_piece: usize,
    pub roof_rotation: Rotation,
    /// Style of the body floors of this cell
    pub body_style: StyleId,
}

impl CellPlan {
    pub fn new(footprint: &Footprint, cell: CellCoord) -> Self {
        let role = CellRole::of(footprint, cell);
        let simple = footprint.style.is_simple();
        let pick = |a: usize, b: usize| if simple { a } else { b };
        let turn = |a: Rotation, b: Rotation| if simple { a } else { b };
        let style = footprint.style.style_id();

        let (rotation, roof_piece, roof_turns, body_style) = match role {
            CellRole::Single => (footprint.facing, 0, 0, STYLE_SIMPLE),
            CellRole::FarCorner => (turn(Rotation::Deg0, Rotation::Deg90), 0, pick(2, 0), style),
            CellRole::LastRowFirstColumn => {
                (turn(Rotation::Deg0, Rotation::Deg180), 0, pick(3, 0), style)
            }
            CellRole::FirstRowLastColumn => (Rotation::Deg0, 0, pick(1, 0), style),
            CellRole::LastRowEdge => (
                turn(Rotation::Deg180, Rotation::Deg90),
                pick(1, 0),
                pick(3, 0),
                STYLE_SIMPLE,
            ),
            CellRole::LastColumnEdge => (Rotation::Deg90, pick(1, 0), pick(2, 0), STYLE_SIMPLE),
            CellRole::Origin => (turn(footprint.facing, Rotation::Deg270), 0, 0, style),
            CellRole::FirstRowEdge => (Rotation::Deg0, pick(1, 0), pick(1, 0), STYLE_SIMPLE),
            CellRole::FirstColumnEdge => (Rotation::Deg270, pick(1, 0), 0, STYLE_SIMPLE),
            CellRole::Interior => (Rotation::Deg0, pick(2, 0), 0, STYLE_SIMPLE),
        };

        Self {
            cell,
            role,
            rotation,
            roof_piece,
            roof_rotation: Rotation::from_quarter_turns(roof_turns),
            body_style,
        }
    }

    /// Stack request for this cell of `footprint`
    pub fn stack_request(&self, footprint: &Footprint) -> StackRequest {
        let name_prefix = format!("building_{}_{}", self.cell.x, self.cell.y);
        if self.role == CellRole::Single {
            return StackRequest {
                name_prefix,
                ..StackRequest::single(self.cell, footprint.floors, Some(footprint.floor_variant))
            };
        }

        let upper_body_only = self.role != CellRole::Origin;
        let mut target_floors = footprint.floors;
        // Cells with a raised base need one more level to line up
        if upper_body_only && self.body_style == STYLE_SIMPLE {
            target_floors = target_floors.saturating_add(1);
        }
        if self.body_style == STYLE_TOWER {
            target_floors = target_floors.saturating_add(1);
        }

        let roof = match footprint.style {
            BuildingStyle::Tower => RoofOverride::Skip,
            BuildingStyle::Simple => RoofOverride::Variant(self.roof_piece),
        };

        StackRequest {
            style: self.body_style,
            name_prefix,
            target_floors,
            cell: self.cell,
            roof,
            roof_rotation: self.roof_rotation,
            upper_body_only,
            fixed_floor_variant: Some(footprint.floor_variant),
        }
    }
}

/// Claim every cell of `footprint` and build a stack on each
///
/// Returns the number of cells built on.
pub fn place_building<R, S>(
    grid: &mut CityGrid,
    footprint: &Footprint,
    catalog: &ModelCatalog,
    sink: &mut S,
    rng: &mut R,
) -> Result<usize>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    for cell in footprint.cells() {
        grid.set(cell.x, cell.y, CellState::Claimed);
    }

    tracing::debug!(
        x = footprint.origin.x,
        y = footprint.origin.y,
        rows = footprint.rows,
        columns = footprint.columns,
        floors = footprint.floors,
        style = ?footprint.style,
        "placing building"
    );

    for cell in footprint.cells() {
        let plan = CellPlan::new(footprint, cell);
        let request = plan.stack_request(footprint);
        let ground = Frame::at_cell(plan.rotation, cell.x, cell.y);
        build_stack(&request, StackLevel::ground(ground), catalog, sink, rng)?;
    }

    Ok(footprint.cell_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CityError;
    use crate::scene::PlacementRecorder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn road_column(size: usize, y: i32) -> CityGrid {
        let mut grid = CityGrid::new(size);
        for x in 0..size as i32 {
            grid.set(x, y, CellState::RoadV);
        }
        grid
    }

    fn footprint(rows: i32, columns: i32, style: BuildingStyle) -> Footprint {
        Footprint {
            origin: CellCoord::new(1, 1),
            rows,
            columns,
            style,
            floors: 6,
            floor_variant: 0,
            facing: Rotation::Deg270,
        }
    }

    #[test]
    fn test_site_rotation_per_side() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = road_column(5, 1);
        assert_eq!(site_rotation(&grid, 2, 2, &mut rng), Some(Rotation::Deg270));
        assert_eq!(site_rotation(&grid, 2, 0, &mut rng), Some(Rotation::Deg180));
        assert_eq!(site_rotation(&grid, 2, 4, &mut rng), None);

        let mut grid = CityGrid::new(5);
        grid.set(3, 2, CellState::RoadH);
        assert_eq!(site_rotation(&grid, 2, 2, &mut rng), Some(Rotation::Deg90));
        grid.set(1, 2, CellState::RoadH);
        assert_eq!(site_rotation(&grid, 2, 2, &mut rng), Some(Rotation::Deg0));
    }

    #[test]
    fn test_claimed_cells_are_not_roads() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = CityGrid::new(3);
        grid.set(1, 0, CellState::Claimed);
        assert_eq!(site_rotation(&grid, 1, 1, &mut rng), None);
    }

    #[test]
    fn test_two_candidates_pick_either() {
        let mut grid = CityGrid::new(3);
        grid.set(2, 1, CellState::RoadH);
        grid.set(1, 2, CellState::RoadV);
        let mut seen = Vec::new();
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            seen.push(site_rotation(&grid, 1, 1, &mut rng).unwrap());
        }
        assert!(seen.contains(&Rotation::Deg90));
        assert!(seen.contains(&Rotation::Deg180));
    }

    #[test]
    fn test_low_building_takes_one_cell() {
        let catalog = ModelCatalog::with_defaults();
        let grid = road_column(6, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let fp = find_footprint(&grid, 2, 1, 3, BuildingStyle::Tower, &catalog, &mut rng)
            .unwrap()
            .unwrap();
        assert!(fp.is_single());
        assert_eq!(fp.style, BuildingStyle::Simple);
        assert_eq!(fp.facing, Rotation::Deg270);
    }

    #[test]
    fn test_no_road_no_building() {
        let catalog = ModelCatalog::with_defaults();
        let grid = road_column(6, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for floors in [1, 5, 8] {
            let fp = find_footprint(&grid, 2, 3, floors, BuildingStyle::Simple, &catalog, &mut rng)
                .unwrap();
            assert!(fp.is_none());
        }
    }

    #[test]
    fn test_tall_building_needs_two_by_two() {
        let catalog = ModelCatalog::with_defaults();
        let mut grid = road_column(6, 0);
        grid.set(2, 2, CellState::Claimed);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        // Only one open column next to the claimed cell in row 2
        let fp = find_footprint(&grid, 2, 1, 5, BuildingStyle::Simple, &catalog, &mut rng).unwrap();
        assert!(fp.is_none());
    }

    #[test]
    fn test_footprint_capped_at_three() {
        let catalog = ModelCatalog::with_defaults();
        let grid = road_column(20, 0);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let fp = find_footprint(&grid, 0, 1, 9, BuildingStyle::Tower, &catalog, &mut rng)
                .unwrap()
                .unwrap();
            assert!((2..=3).contains(&fp.rows));
            assert!((2..=3).contains(&fp.columns));
            assert_eq!(fp.style, BuildingStyle::Tower);
        }
    }

    #[test]
    fn test_short_block_is_never_a_tower() {
        let catalog = ModelCatalog::with_defaults();
        let grid = road_column(10, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let fp = find_footprint(&grid, 0, 1, 5, BuildingStyle::Tower, &catalog, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(fp.style, BuildingStyle::Simple);
    }

    #[test]
    fn test_roles_of_three_by_three() {
        let fp = footprint(3, 3, BuildingStyle::Simple);
        let role = |x, y| CellRole::of(&fp, CellCoord::new(x, y));
        assert_eq!(role(1, 1), CellRole::Origin);
        assert_eq!(role(3, 3), CellRole::FarCorner);
        assert_eq!(role(3, 1), CellRole::LastRowFirstColumn);
        assert_eq!(role(1, 3), CellRole::FirstRowLastColumn);
        assert_eq!(role(3, 2), CellRole::LastRowEdge);
        assert_eq!(role(2, 3), CellRole::LastColumnEdge);
        assert_eq!(role(1, 2), CellRole::FirstRowEdge);
        assert_eq!(role(2, 1), CellRole::FirstColumnEdge);
        assert_eq!(role(2, 2), CellRole::Interior);
    }

    #[test]
    fn test_simple_plans() {
        let fp = footprint(2, 2, BuildingStyle::Simple);
        let origin = CellPlan::new(&fp, CellCoord::new(1, 1));
        assert_eq!(origin.rotation, Rotation::Deg270);
        let far = CellPlan::new(&fp, CellCoord::new(2, 2));
        assert_eq!(far.roof_rotation, Rotation::Deg180);
        assert_eq!(far.rotation, Rotation::Deg0);

        let request = far.stack_request(&fp);
        assert!(request.upper_body_only);
        assert_eq!(request.target_floors, 7);
        assert_eq!(request.roof, RoofOverride::Variant(0));

        let request = origin.stack_request(&fp);
        assert!(!request.upper_body_only);
        assert_eq!(request.target_floors, 6);
    }

    #[test]
    fn test_tower_plans_skip_roofs() {
        let fp = footprint(3, 3, BuildingStyle::Tower);
        let corner = CellPlan::new(&fp, CellCoord::new(3, 3));
        assert_eq!(corner.rotation, Rotation::Deg90);
        assert_eq!(corner.body_style, STYLE_TOWER);
        let request = corner.stack_request(&fp);
        assert_eq!(request.roof, RoofOverride::Skip);
        assert_eq!(request.target_floors, 7);

        let interior = CellPlan::new(&fp, CellCoord::new(2, 2));
        assert_eq!(interior.body_style, STYLE_SIMPLE);
        assert_eq!(interior.stack_request(&fp).target_floors, 7);
    }

    #[test]
    fn test_oversized_floor_count_is_an_error() {
        let fp = Footprint {
            floors: u32::MAX,
            ..footprint(3, 3, BuildingStyle::Tower)
        };
        let corner = CellPlan::new(&fp, CellCoord::new(3, 3));
        assert_eq!(corner.stack_request(&fp).target_floors, u32::MAX);

        let catalog = ModelCatalog::with_defaults();
        let mut grid = CityGrid::new(5);
        let mut sink = PlacementRecorder::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = place_building(&mut grid, &fp, &catalog, &mut sink, &mut rng);
        assert!(matches!(result, Err(CityError::InvalidConfig(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_place_building_claims_every_cell() {
        let catalog = ModelCatalog::with_defaults();
        let mut grid = road_column(8, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let fp = find_footprint(&grid, 2, 1, 7, BuildingStyle::Tower, &catalog, &mut rng)
            .unwrap()
            .unwrap();
        let mut sink = PlacementRecorder::new();
        let cells = place_building(&mut grid, &fp, &catalog, &mut sink, &mut rng).unwrap();

        assert_eq!(cells, fp.cell_count());
        for cell in fp.cells() {
            assert_eq!(grid.get_at(cell), Some(CellState::Claimed));
            let prefix = format!("building_{}_{}_", cell.x, cell.y);
            assert!(sink.with_prefix(&prefix).count() > 0);
        }
        assert_eq!(grid.count(CellState::Claimed), fp.cell_count());
    }
}
