//! Building stack builder
//!
//! A building cell is a vertical stack of modules: a ground module, body
//! floors, and a roof. The stack is built recursively one floor per call;
//! each call places one module and lifts the next one by that module's
//! catalog height. The roof is placed once, when the floor counter reaches
//! the target.

use glam::Vec3;
use rand::Rng;

use crate::catalog::{ModelCatalog, Part, VariantId, DEFAULT_STYLE};
use crate::core::config::MAX_FLOORS;
use crate::core::error::{CityError, Result};
use crate::core::random::{percent_roll, range_inclusive};
use crate::core::types::{CellCoord, Rotation, StyleId};
use crate::scene::SceneSink;
use crate::spatial::Frame;

/// Plain houses and low blocks
pub const STYLE_SIMPLE: StyleId = 0;
/// Tower buildings
pub const STYLE_TOWER: StyleId = 1;
/// Tower cap floors, per-cell roofs and the raised-base height
pub const STYLE_ACCENT: StyleId = 2;

/// Percent roll a curtain needs to beat
const CURTAIN_THRESHOLD: u32 = 80;

/// How the terminal roof is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoofOverride {
    /// Random roof of the stack's style
    #[default]
    Random,
    /// No roof; a neighbouring module covers this cell
    Skip,
    /// Exact per-cell roof variant, reoriented by the request's roof rotation
    Variant(usize),
}

/// Everything fixed for one stack, shared by every recursive call
#[derive(Debug, Clone, PartialEq)]
pub struct StackRequest {
    /// Style of the body floors
    pub style: StyleId,
    /// Instance name prefix, unique per cell
    pub name_prefix: String,
    pub target_floors: u32,
    pub cell: CellCoord,
    pub roof: RoofOverride,
    pub roof_rotation: Rotation,
    /// Cell of a multi-cell footprint other than its origin: ground floor is
    /// a block and the base moves up one level
    pub upper_body_only: bool,
    /// Floor variant shared by every cell of a footprint
    pub fixed_floor_variant: Option<usize>,
}

impl StackRequest {
    /// Standalone single-cell house
    pub fn single(cell: CellCoord, target_floors: u32, fixed_floor_variant: Option<usize>) -> Self {
        Self {
            style: STYLE_SIMPLE,
            name_prefix: format!("building_{}_{}", cell.x, cell.y),
            target_floors,
            cell,
            roof: RoofOverride::Random,
            roof_rotation: Rotation::Deg0,
            upper_body_only: false,
            fixed_floor_variant,
        }
    }
}

/// Per-call accumulator: the floor being built and where it goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLevel {
    pub floor: u32,
    /// Frame of the module below (or the ground frame)
    pub frame: Frame,
    /// Lift to apply before placing this floor's module
    pub lift: Vec3,
}

impl StackLevel {
    pub fn ground(frame: Frame) -> Self {
        Self {
            floor: 0,
            frame,
            lift: Vec3::ZERO,
        }
    }
}

/// Module chosen for one floor
struct FloorModule<'a> {
    variant: &'a VariantId,
    height: Vec3,
}

/// Tallest stack a request may ask for: the floor cap plus one alignment level
pub const MAX_STACK_FLOORS: u32 = MAX_FLOORS + 1;

/// Build the stack from `level` up to and including the roof
pub fn build_stack<R, S>(
    request: &StackRequest,
    level: StackLevel,
    catalog: &ModelCatalog,
    sink: &mut S,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    if request.target_floors > MAX_STACK_FLOORS {
        return Err(CityError::InvalidConfig(format!(
            "stack of {} floors exceeds {}",
            request.target_floors, MAX_STACK_FLOORS
        )));
    }
    if level.floor >= request.target_floors {
        return place_roof(request, level, catalog, sink, rng);
    }

    let module = choose_module(request, level.floor, catalog, rng)?;
    let frame = level.frame.offset(level.lift);
    sink.place(
        module.variant,
        &format!("{}_f{}_s{}", request.name_prefix, level.floor, request.style),
        &frame,
    );

    let next = StackLevel {
        floor: level.floor + 1,
        frame,
        lift: module.height,
    };
    build_stack(request, next, catalog, sink, rng)
}

fn place_roof<R, S>(
    request: &StackRequest,
    level: StackLevel,
    catalog: &ModelCatalog,
    sink: &mut S,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    let (variant, frame) = match request.roof {
        RoofOverride::Skip => return Ok(()),
        RoofOverride::Variant(index) => {
            let frame = Frame::at_cell(request.roof_rotation, request.cell.x, request.cell.y)
                .with_height(level.frame.origin.y);
            (catalog.variant(Part::Roof, STYLE_ACCENT, index)?, frame)
        }
        RoofOverride::Random => (
            catalog.random_variant(Part::Roof, request.style, rng)?,
            level.frame,
        ),
    };

    let lift = catalog.height(Part::Roof, request.style)? + level.lift;
    sink.place(
        variant,
        &format!("{}_roof", request.name_prefix),
        &frame.offset(lift),
    );
    Ok(())
}

fn choose_module<'a, R: Rng + ?Sized>(
    request: &StackRequest,
    floor: u32,
    catalog: &'a ModelCatalog,
    rng: &mut R,
) -> Result<FloorModule<'a>> {
    let style = request.style;
    let upper = request.upper_body_only;

    // Ground block under a raised base
    if floor == 0 && upper {
        return Ok(FloorModule {
            variant: catalog.random_variant(Part::Block, STYLE_SIMPLE, rng)?,
            height: catalog.height(Part::Block, style)?,
        });
    }

    if floor == 0 || (upper && floor == 1) {
        if upper {
            let variant = match request.fixed_floor_variant {
                Some(index) => catalog.variant(Part::Floor, STYLE_SIMPLE, index)?,
                None => catalog.random_variant(Part::Floor, STYLE_SIMPLE, rng)?,
            };
            return Ok(FloorModule {
                variant,
                height: catalog.height(Part::Base, STYLE_ACCENT)?,
            });
        }

        // The first base variant is only tall enough for buildings above two floors
        let bases = catalog.variants(Part::Base, STYLE_SIMPLE)?;
        let last = bases.len() as i32 - 1;
        let low = if request.target_floors > 2 { 0 } else { 1.min(last) };
        let index = range_inclusive(rng, low, last) as usize;
        return Ok(FloorModule {
            variant: &bases[index],
            height: catalog.height(Part::Base, style)?,
        });
    }

    if floor == 3 && style == STYLE_TOWER {
        return Ok(FloorModule {
            variant: catalog.random_variant(Part::Floor, STYLE_ACCENT, rng)?,
            height: catalog.height(Part::Floor, style)?,
        });
    }

    if style == STYLE_TOWER && (floor % 2 == 0 || (floor == 1 && !upper)) {
        let block_style = if floor == 2 { STYLE_SIMPLE } else { style };
        return Ok(FloorModule {
            variant: catalog.random_variant(Part::Block, block_style, rng)?,
            height: catalog.height(Part::Block, style)?,
        });
    }

    let first_body = floor == 1 || (upper && floor == 2);
    let separator = floor > 1 && ((upper && floor % 2 == 0) || (!upper && floor % 2 == 1));
    if style == STYLE_SIMPLE && (first_body || separator) {
        if percent_roll(rng) > CURTAIN_THRESHOLD && first_body {
            return Ok(FloorModule {
                variant: catalog.random_variant(Part::Curtain, DEFAULT_STYLE, rng)?,
                height: catalog.height(Part::Curtain, style)?,
            });
        }
        return Ok(FloorModule {
            variant: catalog.random_variant(Part::Block, style, rng)?,
            height: catalog.height(Part::Block, style)?,
        });
    }

    let variant = match request.fixed_floor_variant {
        Some(index) => catalog.variant(Part::Floor, style, index)?,
        None => catalog.random_variant(Part::Floor, style, rng)?,
    };
    Ok(FloorModule {
        variant,
        height: catalog.height(Part::Floor, style)?,
    })
}
