//! Tree scattering on open cells

use rand::Rng;

use crate::catalog::{ModelCatalog, Part};
use crate::core::error::Result;
use crate::core::random::pick_index;
use crate::core::types::Rotation;
use crate::scene::SceneSink;
use crate::spatial::Frame;

/// Place `count` trees on cell `(x, y)`, each with its own rotation
///
/// Rotations are drawn without replacement, so at most four trees fit on a
/// cell. Returns the number of trees placed.
pub fn plant_trees<R, S>(
    x: i32,
    y: i32,
    count: u32,
    catalog: &ModelCatalog,
    sink: &mut S,
    rng: &mut R,
) -> Result<u32>
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    let mut rotations = Rotation::TREE_ORDER.to_vec();
    let mut planted = 0;

    while planted < count && !rotations.is_empty() {
        let rotation = rotations.remove(pick_index(rng, rotations.len()));
        let variant = catalog.random_default_variant(Part::Tree, rng)?;
        sink.place(
            variant,
            &format!("tree_{}_{}_{}", x, y, planted),
            &Frame::at_cell(rotation, x, y),
        );
        planted += 1;
    }

    Ok(planted)
}
