//! JSON schema types for generated placement output
//!
//! A generation run is stored as a versioned file of positioned model
//! instances with optional metadata, in the order the generator emitted them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::VariantId;
use crate::core::error::Result;
use crate::core::types::Rotation;
use crate::scene::SceneSink;
use crate::spatial::Frame;

/// Current placement file schema version
pub const PLACEMENT_FILE_VERSION: u32 = 1;

/// Root structure for placement JSON files
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlacementFile {
    /// Schema version (currently 1)
    pub version: u32,
    /// Optional metadata about this placement file
    #[serde(default)]
    pub metadata: Option<PlacementMetadata>,
    /// Placed model instances
    pub placements: Vec<Placement>,
}

/// Optional metadata for the placement file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlacementMetadata {
    /// Tool that created this file
    #[serde(default)]
    pub created_by: Option<String>,
    /// RNG seed the layout was generated from
    #[serde(default)]
    pub seed: Option<u64>,
    /// Grid side length
    #[serde(default)]
    pub city_size: Option<usize>,
}

/// A single placed model instance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Placement {
    /// Unique instance name
    pub name: String,
    /// Catalog variant (asset path) to instantiate
    pub variant: VariantId,
    /// World position [x, y, z]
    pub position: [f32; 3],
    /// Rotation about the vertical axis
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(variant: &VariantId, name: &str, frame: &Frame) -> Self {
        Self {
            name: name.to_string(),
            variant: variant.clone(),
            position: frame.origin.to_array(),
            rotation: frame.rotation,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.rotation, glam::Vec3::from_array(self.position))
    }
}

/// Sink that records every placement in emission order
#[derive(Debug, Clone, Default)]
pub struct PlacementRecorder {
    placements: Vec<Placement>,
}

impl PlacementRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements whose name starts with `prefix`
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements.iter().filter(move |p| p.name.starts_with(prefix))
    }

    pub fn into_file(self, metadata: Option<PlacementMetadata>) -> PlacementFile {
        PlacementFile {
            version: PLACEMENT_FILE_VERSION,
            metadata,
            placements: self.placements,
        }
    }
}

impl SceneSink for PlacementRecorder {
    fn place(&mut self, variant: &VariantId, name: &str, frame: &Frame) {
        self.placements.push(Placement::new(variant, name, frame));
    }
}

impl PlacementFile {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the file as pretty JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a placement file from disk
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
