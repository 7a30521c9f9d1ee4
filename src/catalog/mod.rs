//! Model catalog - maps logical parts to interchangeable asset variants
//!
//! The generators never look at mesh data. They ask the catalog for a
//! variant identifier of a part in a given style and for the vertical offset
//! to stack the next module on top of it. Asking for a style that was never
//! registered is fatal: silently substituting another style would mix
//! incompatible modules in one building.

pub mod model;

pub use model::{Model, Part, VariantId};

use ahash::AHashMap;
use glam::Vec3;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

use crate::core::error::{CityError, Result};
use crate::core::random::pick_index;
use crate::core::types::StyleId;

/// Style used when a caller does not care about the style
pub const DEFAULT_STYLE: StyleId = 0;

/// Catalog of every part the generators may place
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: AHashMap<Part, Model>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the model for `part`
    pub fn insert(&mut self, part: Part, model: Model) {
        self.models.insert(part, model);
    }

    pub fn model(&self, part: Part) -> Option<&Model> {
        self.models.get(&part)
    }

    pub fn model_mut(&mut self, part: Part) -> Option<&mut Model> {
        self.models.get_mut(&part)
    }

    /// All variants registered for `part` in `style`
    pub fn variants(&self, part: Part, style: StyleId) -> Result<&[VariantId]> {
        self.models
            .get(&part)
            .and_then(|m| m.variants(style))
            .ok_or_else(|| CityError::MissingVariant {
                part: part.to_string(),
                style,
            })
    }

    pub fn variant_count(&self, part: Part, style: StyleId) -> Result<usize> {
        self.variants(part, style).map(<[VariantId]>::len)
    }

    /// Random variant of `part` in `style`
    pub fn random_variant<R: Rng + ?Sized>(
        &self,
        part: Part,
        style: StyleId,
        rng: &mut R,
    ) -> Result<&VariantId> {
        let variants = self.variants(part, style)?;
        Ok(&variants[pick_index(rng, variants.len())])
    }

    /// Random variant of `part` in the default style
    pub fn random_default_variant<R: Rng + ?Sized>(
        &self,
        part: Part,
        rng: &mut R,
    ) -> Result<&VariantId> {
        self.random_variant(part, DEFAULT_STYLE, rng)
    }

    /// Exact variant at `index`
    pub fn variant(&self, part: Part, style: StyleId, index: usize) -> Result<&VariantId> {
        let variants = self.variants(part, style)?;
        variants
            .get(index)
            .ok_or_else(|| CityError::VariantIndexOutOfRange {
                part: part.to_string(),
                style,
                index,
                available: variants.len(),
            })
    }

    /// Vertical stacking offset of `part` in `style`
    pub fn height(&self, part: Part, style: StyleId) -> Result<Vec3> {
        self.models
            .get(&part)
            .and_then(|m| m.height(style))
            .ok_or_else(|| CityError::MissingVariant {
                part: part.to_string(),
                style,
            })
    }

    /// The modular-building and road-tile asset set the generator was tuned for
    pub fn with_defaults() -> Self {
        let building = |id: &str| format!("in/modularBuildings_{}.obj", id);
        let road = |id: &str| format!("in/roadTile_{}.obj", id);

        let base_height = Vec3::new(0.0, 0.83, 0.0);
        let block_height = Vec3::new(0.0, 0.2, 0.0);
        let curtain_height = Vec3::new(0.0, 0.2, 0.0);
        let floor_height = Vec3::new(0.0, 0.62, 0.0);

        let mut catalog = Self::new();

        // Base: style 0 index 0 is the tall base kept for buildings above two floors
        let mut base = Model::new(0, building("026a"), base_height);
        for id in ["025a", "025b"] {
            base.add_variant(0, building(id));
        }
        for id in ["038", "038a", "038b"] {
            base.add_variant(1, building(id));
        }
        base.add_variant(2, building("022"));
        base.set_height(1, floor_height).set_height(2, floor_height);
        catalog.insert(Part::Base, base);

        let mut block = Model::new(0, building("005"), block_height);
        block.add_variant(1, building("017"));
        catalog.insert(Part::Block, block);

        let mut curtain = Model::new(0, building("010"), curtain_height);
        curtain.add_variant(0, building("012"));
        catalog.insert(Part::Curtain, curtain);

        let mut floor = Model::new(0, building("021"), floor_height);
        for id in ["034", "041", "033", "035", "047", "048", "030", "029"] {
            floor.add_variant(0, building(id));
        }
        for id in ["039", "049", "050"] {
            floor.add_variant(1, building(id));
        }
        floor.add_variant(2, building("037"));
        catalog.insert(Part::Floor, floor);

        // Roof style 2 holds the per-cell roofs of multi-cell footprints:
        // 0 = corner, 1 = ridge edge, 2 = flat interior
        let mut roof = Model::new(0, building("063"), Vec3::ZERO);
        for id in ["064", "032", "051", "011"] {
            roof.add_variant(0, building(id));
        }
        roof.add_variant(1, building("045"));
        for id in ["0082", "009", "016"] {
            roof.add_variant(2, building(id));
        }
        catalog.insert(Part::Roof, roof);

        // Road: 0 = plain segment, 1 = crosswalk
        let mut road_model = Model::new(0, road("162"), Vec3::ZERO);
        road_model.add_variant(0, road("025"));
        catalog.insert(Part::Road, road_model);

        // Crossing variants are indexed by junction code 0..=8
        let mut crossing = Model::new(0, road("141"), Vec3::ZERO);
        for id in ["1501", "1502", "150", "1501", "1502", "141", "038", "0382"] {
            crossing.add_variant(0, road(id));
        }
        catalog.insert(Part::Crossing, crossing);

        catalog.insert(Part::Ground, Model::new(0, road("163"), Vec3::ZERO));

        let mut tree = Model::new(0, road("019"), Vec3::ZERO);
        tree.add_variant(0, road("020"));
        catalog.insert(Part::Tree, tree);

        catalog
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
            .map_err(|e| match e {
                CityError::CatalogParse(msg) => {
                    CityError::CatalogParse(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlCatalog =
            toml::from_str(content).map_err(|e| CityError::CatalogParse(e.to_string()))?;

        let mut catalog = Self::new();
        for part in toml_data.parts {
            let (name, model) = part.into_model()?;
            catalog.insert(name, model);
        }
        Ok(catalog)
    }
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    parts: Vec<TomlPart>,
}

/// TOML representation of one part
#[derive(Debug, Deserialize)]
struct TomlPart {
    name: String,
    styles: Vec<TomlStyle>,
}

/// TOML representation of one style of a part
#[derive(Debug, Deserialize)]
struct TomlStyle {
    style: StyleId,
    #[serde(default)]
    height: Option<[f32; 3]>,
    variants: Vec<String>,
}

impl TomlPart {
    fn into_model(self) -> Result<(Part, Model)> {
        let part: Part = self.name.parse()?;
        let mut model = Model::default();

        // Style 0 first so later styles can inherit its height
        let mut styles = self.styles;
        styles.sort_by_key(|s| s.style);

        for style in styles {
            if style.variants.is_empty() {
                return Err(CityError::CatalogParse(format!(
                    "part '{}' style {} has no variants",
                    part, style.style
                )));
            }
            for variant in style.variants {
                model.add_variant(style.style, variant.as_str());
            }
            if let Some(h) = style.height {
                model.set_height(style.style, Vec3::from_array(h));
            }
        }

        Ok((part, model))
    }
}
