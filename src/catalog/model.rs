//! Catalog entries: logical part names and their interchangeable variants

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::CityError;
use crate::core::types::StyleId;

/// Logical part name the generators ask the catalog for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Base,
    Block,
    Curtain,
    Floor,
    Roof,
    Road,
    Crossing,
    Tree,
    Ground,
}

impl Part {
    pub const ALL: [Part; 9] = [
        Part::Base,
        Part::Block,
        Part::Curtain,
        Part::Floor,
        Part::Roof,
        Part::Road,
        Part::Crossing,
        Part::Tree,
        Part::Ground,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Part::Base => "base",
            Part::Block => "block",
            Part::Curtain => "curtain",
            Part::Floor => "floor",
            Part::Roof => "roof",
            Part::Road => "road",
            Part::Crossing => "crossing",
            Part::Tree => "tree",
            Part::Ground => "ground",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(Part::Base),
            "block" => Ok(Part::Block),
            "curtain" => Ok(Part::Curtain),
            "floor" => Ok(Part::Floor),
            "roof" => Ok(Part::Roof),
            "road" => Ok(Part::Road),
            "crossing" => Ok(Part::Crossing),
            "tree" => Ok(Part::Tree),
            "ground" => Ok(Part::Ground),
            _ => Err(CityError::UnknownPart(s.to_string())),
        }
    }
}

/// Opaque identifier of a concrete asset (an asset path in practice)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VariantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Variants of one part, grouped by style, with a stacking offset per style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    variants: BTreeMap<StyleId, Vec<VariantId>>,
    heights: BTreeMap<StyleId, Vec3>,
}

impl Model {
    /// Model with a single variant registered under `style`
    pub fn new(style: StyleId, variant: impl Into<VariantId>, height: Vec3) -> Self {
        let mut model = Self::default();
        model.heights.insert(style, height);
        model.variants.entry(style).or_default().push(variant.into());
        model
    }

    /// Register another variant
    ///
    /// A style seen for the first time inherits the style-0 height.
    pub fn add_variant(&mut self, style: StyleId, variant: impl Into<VariantId>) -> &mut Self {
        if !self.heights.contains_key(&style) {
            let inherited = self.heights.get(&0).copied().unwrap_or(Vec3::ZERO);
            self.heights.insert(style, inherited);
        }
        self.variants.entry(style).or_default().push(variant.into());
        self
    }

    pub fn set_height(&mut self, style: StyleId, height: Vec3) -> &mut Self {
        self.heights.insert(style, height);
        self
    }

    pub fn variants(&self, style: StyleId) -> Option<&[VariantId]> {
        self.variants
            .get(&style)
            .map(Vec::as_slice)
            .filter(|v| !v.is_empty())
    }

    pub fn height(&self, style: StyleId) -> Option<Vec3> {
        self.heights.get(&style).copied()
    }

    pub fn styles(&self) -> impl Iterator<Item = StyleId> + '_ {
        self.variants.keys().copied()
    }
}
