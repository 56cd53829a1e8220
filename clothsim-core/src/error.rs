//! Error types for cloth construction and scene loading
//!
//! Numerical divergence is deliberately absent: it is reported through the
//! scene's halt latch, not through `Result`.

use thiserror::Error;

/// Errors raised while building cloths or loading scenes
#[derive(Debug, Error)]
pub enum ClothError {
    #[error("grid needs at least 4 samples per edge, got {nx}x{ny}")]
    InsufficientSamples { nx: usize, ny: usize },

    #[error("invalid cloth parameter '{name}': {value} (must be positive and finite)")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("pinned sample ({u}, {v}) is outside the {nx}x{ny} grid")]
    PinOutOfBounds {
        u: usize,
        v: usize,
        nx: usize,
        ny: usize,
    },

    #[error("unknown cloth '{0}'")]
    UnknownCloth(String),

    #[error("duplicate cloth '{0}'")]
    DuplicateCloth(String),

    #[error("scene file error: {0}")]
    SceneFormat(#[from] serde_json::Error),

    #[error("cannot read scene file: {0}")]
    Io(#[from] std::io::Error),
}

impl ClothError {
    /// Reject a parameter that is zero, negative or non-finite
    pub fn check_positive(name: &'static str, value: f32) -> Result<f32, ClothError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ClothError::InvalidParameter { name, value })
        }
    }
}
