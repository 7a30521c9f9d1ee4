//! Placement frames: a canonical rotation plus a world-space origin

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::types::Rotation;

/// Height at which road tiles sit below the ground plane
pub const ROAD_SINK: f32 = -0.2;

/// Rigid placement transform handed to the scene sink
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub rotation: Rotation,
    pub origin: Vec3,
}

impl Frame {
    pub fn new(rotation: Rotation, origin: Vec3) -> Self {
        Self { rotation, origin }
    }

    /// Frame for a module standing on cell `(x, y)`
    ///
    /// Modules pivot on a cell corner, so rotating them moves the pivot; the
    /// origin is shifted by one cell so the rotated module still covers
    /// `(x, y)`.
    pub fn at_cell(rotation: Rotation, x: i32, y: i32) -> Self {
        let pivot = match rotation {
            Rotation::Deg0 => Vec3::ZERO,
            Rotation::Deg90 => Vec3::X,
            Rotation::Deg180 => Vec3::X - Vec3::Z,
            Rotation::Deg270 => -Vec3::Z,
        };
        Self::new(rotation, Vec3::new(x as f32, 0.0, y as f32) + pivot)
    }

    /// Frame for a road tile on cell `(x, y)`
    pub fn road_tile(horizontal: bool, x: i32, y: i32) -> Self {
        let base = Vec3::new(x as f32, ROAD_SINK, y as f32);
        if horizontal {
            Self::new(Rotation::Deg0, base + Vec3::X)
        } else {
            Self::new(Rotation::Deg90, base + Vec3::X - Vec3::Z)
        }
    }

    /// Same frame lifted by `offset`
    pub fn offset(&self, offset: Vec3) -> Self {
        Self::new(self.rotation, self.origin + offset)
    }

    /// Same frame with the origin height replaced
    pub fn with_height(&self, y: f32) -> Self {
        let mut origin = self.origin;
        origin.y = y;
        Self::new(self.rotation, origin)
    }

    pub fn quat(&self) -> Quat {
        Quat::from_rotation_y(self.rotation.radians())
    }

    /// Affine transform for renderers that want a matrix
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.quat(), self.origin)
    }
}
