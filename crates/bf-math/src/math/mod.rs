//! Core math modules.

pub mod histogram;
pub mod kde;
pub mod savage_dickey;
pub mod summary;

use thiserror::Error;

/// Errors raised while estimating densities from draws.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DensityError {
    #[error("no draws to estimate a density from")]
    Empty,

    #[error("draw {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("all draws are identical ({0}); bandwidth would be zero")]
    Degenerate(f64),

    #[error("bandwidth must be positive and finite, got {0}")]
    InvalidBandwidth(f64),

    #[error("grid needs at least 2 points, got {0}")]
    InvalidGrid(usize),

    #[error("both densities are zero at the reference value {0}")]
    ZeroDensity(f64),
}
