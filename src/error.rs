//! Crate-wide error type.
//!
//! Every failing component reports a distinct variant so callers can tell a
//! degenerate contour from a degenerate training set or a stale model file.
//! An image without plant blobs is not an error; see
//! [`CountResult::is_empty`](crate::counting::CountResult::is_empty).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A contour whose area, perimeter or spread is zero.
    #[error("degenerate contour geometry: {reason}")]
    Geometry { reason: String },

    #[error("insufficient training data: {samples} samples, at least {required} required")]
    InsufficientData { samples: usize, required: usize },

    #[error("rank-deficient descriptor matrix: rank {rank} for {features} features")]
    RankDeficient { rank: usize, features: usize },

    /// Descriptor width does not match the width the model was trained on.
    #[error("model expects {expected} features, got {actual}")]
    ModelMismatch { expected: usize, actual: usize },

    /// Model parameters that cannot produce a finite estimate.
    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    #[error("ground scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("descriptor table {path}: {reason}")]
    Table { path: String, reason: String },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image: {0}")]
    Image(#[from] image::ImageError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidScale(scale))
    }
}
