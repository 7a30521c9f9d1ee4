//! Buildings - site selection, footprints and stacked modules

pub mod site;
pub mod stack;

pub use site::{
    find_footprint, place_building, site_rotation, BuildingStyle, CellPlan, CellRole, Footprint,
};
pub use stack::{build_stack, RoofOverride, StackLevel, StackRequest};
