//! Statistics backends and the Bayes factor estimator contract.
//!
//! A backend exposes its Bayes factor entry point through
//! [`StatsBackend::bayes_factor`]. Backends without one return `None`, which
//! callers report as `Error::CapabilityMissing`.

mod kde_stats;

pub use kde_stats::KdeStats;

use bf_common::{Error, Result};
use bf_math::DensityError;
use serde::{Deserialize, Serialize};

use crate::data::{InferenceData, SampleArray};

/// Name of the estimator entry point a backend must provide.
pub const BAYES_FACTOR_FN: &str = "bayes_factor";

/// Bayes factor pair. `bf10 * bf01 == 1` up to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayesFactor {
    #[serde(rename = "BF10")]
    pub bf10: f64,
    #[serde(rename = "BF01")]
    pub bf01: f64,
}

/// Prior and posterior densities at the reference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityAtRef {
    pub prior: f64,
    pub posterior: f64,
}

/// Savage-Dickey style estimator.
pub trait BayesFactorEstimator: Send + Sync {
    /// Estimate the Bayes factor for `var_name` at `ref_val`.
    ///
    /// `prior` overrides the dataset's prior group. Densities at the
    /// reference value are returned only when `return_ref_vals` is set.
    fn estimate(
        &self,
        dataset: &InferenceData,
        var_name: &str,
        prior: Option<&SampleArray>,
        ref_val: f64,
        return_ref_vals: bool,
    ) -> Result<(BayesFactor, Option<DensityAtRef>)>;
}

/// A statistics provider.
pub trait StatsBackend: Send + Sync {
    fn name(&self) -> &str;

    /// The Bayes factor entry point, if this backend has one.
    fn bayes_factor(&self) -> Option<&dyn BayesFactorEstimator>;

    /// The entry point, or `CapabilityMissing` naming this backend.
    fn require_bayes_factor(&self) -> Result<&dyn BayesFactorEstimator> {
        self.bayes_factor().ok_or_else(|| {
            Error::CapabilityMissing(format!(
                "statistics backend '{}' has no attribute '{BAYES_FACTOR_FN}'",
                self.name()
            ))
        })
    }
}

/// Map a density failure for `var_name` into the unified error.
pub(crate) fn density_error(var_name: &str, err: DensityError) -> Error {
    match err {
        DensityError::Degenerate(_)
        | DensityError::NonFinite { .. }
        | DensityError::ZeroDensity(_) => {
            Error::NumericalInstability(format!("variable '{var_name}': {err}"))
        }
        DensityError::Empty | DensityError::InvalidBandwidth(_) | DensityError::InvalidGrid(_) => {
            Error::Estimation(format!("variable '{var_name}': {err}"))
        }
    }
}
