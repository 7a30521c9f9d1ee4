//! Scene sink - where generated placements go
//!
//! Mesh loading and scene assembly live outside this crate. The generators
//! only call [`SceneSink::place`]; [`PlacementRecorder`] is the in-crate sink
//! that keeps placements in emission order and writes them as JSON.

pub mod placement;

pub use placement::{Placement, PlacementFile, PlacementMetadata, PlacementRecorder};

use crate::catalog::VariantId;
use crate::spatial::Frame;

/// Receiver of placed model instances
///
/// Instance names are unique within one generation run.
pub trait SceneSink {
    fn place(&mut self, variant: &VariantId, name: &str, frame: &Frame);
}

impl<S: SceneSink + ?Sized> SceneSink for &mut S {
    fn place(&mut self, variant: &VariantId, name: &str, frame: &Frame) {
        (**self).place(variant, name, frame)
    }
}
