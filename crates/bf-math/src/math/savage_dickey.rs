//! Savage-Dickey density ratio.
//!
//! For nested models where H0 fixes a parameter at a point, the Bayes factor
//! reduces to the ratio of prior and posterior densities at that point. The
//! orientation used here reports `BF10 = prior(ref) / posterior(ref)`: when
//! the posterior has moved mass away from the null, BF10 grows above one.

use serde::{Deserialize, Serialize};

use super::kde::{kde_grid, KdeConfig};
use super::DensityError;

/// Bayes factor pair plus the densities it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityRatio {
    pub bf10: f64,
    pub bf01: f64,
    pub prior_at_ref: f64,
    pub posterior_at_ref: f64,
}

/// Form the Bayes factor pair from the two densities at the reference value.
///
/// A zero posterior density yields `BF10 = +inf, BF01 = 0`; both densities
/// zero is undefined and reported as an error.
pub fn density_ratio(
    prior_at_ref: f64,
    posterior_at_ref: f64,
    ref_val: f64,
) -> Result<DensityRatio, DensityError> {
    for (index, value) in [prior_at_ref, posterior_at_ref].into_iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DensityError::NonFinite { index, value });
        }
    }
    if prior_at_ref == 0.0 && posterior_at_ref == 0.0 {
        return Err(DensityError::ZeroDensity(ref_val));
    }
    let bf10 = prior_at_ref / posterior_at_ref;
    Ok(DensityRatio {
        bf10,
        bf01: 1.0 / bf10,
        prior_at_ref,
        posterior_at_ref,
    })
}

/// Continuous draws: KDE both arrays and compare grid densities at `ref_val`.
///
/// Outside a grid the edge density stands in, so both factors stay finite
/// and positive wherever `ref_val` falls.
pub fn savage_dickey_continuous(
    prior: &[f64],
    posterior: &[f64],
    ref_val: f64,
    config: &KdeConfig,
) -> Result<DensityRatio, DensityError> {
    let posterior_grid = kde_grid(posterior, config)?;
    let prior_grid = kde_grid(prior, config)?;
    density_ratio(
        prior_grid.interpolate(ref_val),
        posterior_grid.interpolate(ref_val),
        ref_val,
    )
}

/// Fraction of integer draws equal to `ref_val`.
pub fn point_mass(draws: &[i64], ref_val: f64) -> Result<f64, DensityError> {
    if draws.is_empty() {
        return Err(DensityError::Empty);
    }
    let hits = draws.iter().filter(|&&d| d as f64 == ref_val).count();
    Ok(hits as f64 / draws.len() as f64)
}

/// Discrete draws: compare point masses at `ref_val`.
pub fn savage_dickey_discrete(
    prior: &[i64],
    posterior: &[i64],
    ref_val: f64,
) -> Result<DensityRatio, DensityError> {
    density_ratio(point_mass(prior, ref_val)?, point_mass(posterior, ref_val)?, ref_val)
}
