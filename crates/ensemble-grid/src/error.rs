//! Error types for the fire-weather-viz workspace.

use thiserror::Error;

/// Result type alias using EnsembleError.
pub type EnsembleResult<T> = Result<T, EnsembleError>;

/// Primary error type for ensemble data preparation.
#[derive(Debug, Error)]
pub enum EnsembleError {
    // === Input validation errors ===
    #[error("time index {requested} is out of bounds for available time steps {available}")]
    TimeIndexOutOfBounds { requested: usize, available: usize },

    #[error("ensemble member {requested} is out of bounds for {available} members")]
    MemberIndexOutOfBounds { requested: usize, available: usize },

    #[error("region mode requires parameter: {0}")]
    MissingRegionParameter(String),

    #[error("unknown region mode: {0}")]
    UnknownRegionMode(String),

    #[error("country not found in lookup table: {0}")]
    UnknownCountry(String),

    #[error("channel not present in dataset: {0}")]
    UnknownChannel(String),

    // === Dataset shape errors ===
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    // === Delta composition errors ===
    #[error("structural mismatch for '{field}': {left} vs {right} points")]
    StructuralMismatch {
        field: String,
        left: usize,
        right: usize,
    },

    // === Configuration errors ===
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EnsembleError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create a MissingRegionParameter error.
    pub fn missing_region_parameter(param: impl Into<String>) -> Self {
        Self::MissingRegionParameter(param.into())
    }

    /// Create a StructuralMismatch error for a payload field.
    pub fn structural_mismatch(field: impl Into<String>, left: usize, right: usize) -> Self {
        Self::StructuralMismatch {
            field: field.into(),
            left,
            right,
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<serde_json::Error> for EnsembleError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(format!("JSON error: {}", err))
    }
}
