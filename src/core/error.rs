use thiserror::Error;

use crate::core::types::StyleId;

#[derive(Error, Debug)]
pub enum CityError {
    #[error("Missing model variant for part '{part}' style {style}")]
    MissingVariant { part: String, style: StyleId },

    #[error("Model variant {index} out of range for part '{part}' style {style} ({available} registered)")]
    VariantIndexOutOfRange {
        part: String,
        style: StyleId,
        index: usize,
        available: usize,
    },

    #[error("Unknown model part: {0}")]
    UnknownPart(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CityError>;
