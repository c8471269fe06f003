//! Geometry error types.

use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Layer index outside `1..=NLAYR`.
    #[error("invalid layer: {0}")]
    InvalidLayer(usize),

    /// Sector index outside `1..=sectors` for the given layer.
    #[error("invalid sector {sector} for layer {layer}")]
    InvalidSector { layer: usize, sector: usize },

    /// Region index outside `1..=NREG`.
    #[error("invalid region: {0}")]
    InvalidRegion(usize),

    /// Cumulative probability outside the open interval (0, 1).
    #[error("probability out of range (0, 1): {0}")]
    ProbabilityOutOfRange(f64),

    /// Configuration file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
