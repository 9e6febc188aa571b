//! Kernel density backend.

use bf_common::Result;
use bf_math::{savage_dickey_continuous, savage_dickey_discrete, DensityRatio, KdeConfig};
use tracing::{debug, warn};

use super::{density_error, BayesFactor, BayesFactorEstimator, DensityAtRef, StatsBackend};
use crate::data::{InferenceData, SampleArray, POSTERIOR, PRIOR};

/// Estimates densities with a Gaussian KDE for continuous draws and point
/// masses for discrete draws.
#[derive(Debug, Clone, Default)]
pub struct KdeStats {
    pub kde: KdeConfig,
}

impl KdeStats {
    pub fn new(kde: KdeConfig) -> Self {
        Self { kde }
    }

    fn ratio(
        &self,
        var_name: &str,
        prior: &SampleArray,
        posterior: &SampleArray,
        ref_val: f64,
    ) -> Result<DensityRatio> {
        let ratio = match (prior, posterior) {
            (SampleArray::Discrete(p), SampleArray::Discrete(q)) => {
                savage_dickey_discrete(p, q, ref_val)
            }
            _ => savage_dickey_continuous(&prior.to_f64(), &posterior.to_f64(), ref_val, &self.kde),
        };
        ratio.map_err(|e| density_error(var_name, e))
    }
}

impl StatsBackend for KdeStats {
    fn name(&self) -> &str {
        "kde"
    }

    fn bayes_factor(&self) -> Option<&dyn BayesFactorEstimator> {
        Some(self)
    }
}

impl BayesFactorEstimator for KdeStats {
    fn estimate(
        &self,
        dataset: &InferenceData,
        var_name: &str,
        prior: Option<&SampleArray>,
        ref_val: f64,
        return_ref_vals: bool,
    ) -> Result<(BayesFactor, Option<DensityAtRef>)> {
        let posterior = dataset.extract(var_name, POSTERIOR)?;
        let prior = match prior {
            Some(p) => p,
            None => dataset.extract(var_name, PRIOR)?,
        };

        if let Some((lo, hi)) = posterior.range() {
            if ref_val < lo || ref_val > hi {
                warn!(
                    var = %var_name,
                    ref_val,
                    min = lo,
                    max = hi,
                    "reference value lies outside the posterior draws; the Bayes factor may be unreliable"
                );
            }
        }

        let ratio = self.ratio(var_name, prior, posterior, ref_val)?;
        debug!(
            var = %var_name,
            ref_val,
            bf10 = ratio.bf10,
            prior_at_ref = ratio.prior_at_ref,
            posterior_at_ref = ratio.posterior_at_ref,
            "estimated Savage-Dickey ratio"
        );

        let bf = BayesFactor {
            bf10: ratio.bf10,
            bf01: ratio.bf01,
        };
        let densities = return_ref_vals.then_some(DensityAtRef {
            prior: ratio.prior_at_ref,
            posterior: ratio.posterior_at_ref,
        });
        Ok((bf, densities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::demo_dataset;
    use bf_common::Error;

    #[test]
    fn shifted_posterior_favours_h1() {
        let data = demo_dataset(42, 4000);
        let (bf, dens) = KdeStats::default()
            .estimate(&data, "a", None, 0.0, true)
            .unwrap();
        assert!(bf.bf10 > 1.0, "bf10 = {}", bf.bf10);
        assert!((bf.bf10 * bf.bf01 - 1.0).abs() < 1e-9);
        let dens = dens.unwrap();
        assert!((dens.prior / dens.posterior - bf.bf10).abs() < 1e-9);
    }

    #[test]
    fn densities_only_on_request() {
        let data = demo_dataset(1, 500);
        let (_, dens) = KdeStats::default()
            .estimate(&data, "a", None, 0.0, false)
            .unwrap();
        assert!(dens.is_none());
    }

    #[test]
    fn explicit_prior_skips_prior_group() {
        let data = InferenceData::new().with_var(POSTERIOR, "k", vec![0_i64, 1, 1, 2]);
        let prior = SampleArray::Discrete(vec![0, 0, 1, 2]);
        let (bf, dens) = KdeStats::default()
            .estimate(&data, "k", Some(&prior), 0.0, true)
            .unwrap();
        let dens = dens.unwrap();
        assert_eq!(dens.prior, 0.5);
        assert_eq!(dens.posterior, 0.25);
        assert_eq!(bf.bf10, 2.0);
    }

    #[test]
    fn mixed_kinds_use_kde() {
        let ints: Vec<i64> = (0..200).map(|i| i % 5).collect();
        let floats: Vec<f64> = (0..200).map(|i| (i % 7) as f64 * 0.5).collect();
        let data = InferenceData::new()
            .with_var(POSTERIOR, "a", ints.clone())
            .with_var(PRIOR, "a", floats.clone());
        let (bf, _) = KdeStats::default()
            .estimate(&data, "a", None, 1.0, false)
            .unwrap();
        let as_floats: Vec<f64> = ints.iter().map(|&i| i as f64).collect();
        let expected =
            savage_dickey_continuous(&floats, &as_floats, 1.0, &KdeConfig::default()).unwrap();
        assert_eq!(bf.bf10, expected.bf10);
    }

    #[test]
    fn missing_prior_group_is_reported() {
        let data = InferenceData::new().with_var(POSTERIOR, "a", vec![0.1, 0.2, 0.4]);
        assert!(matches!(
            KdeStats::default()
                .estimate(&data, "a", None, 0.0, true)
                .unwrap_err(),
            Error::GroupNotFound { .. }
        ));
    }

    #[test]
    fn constant_draws_are_numerically_unstable() {
        let data = InferenceData::new()
            .with_var(POSTERIOR, "a", vec![1.0; 10])
            .with_var(PRIOR, "a", vec![0.0, 1.0, 2.0]);
        assert_eq!(
            KdeStats::default()
                .estimate(&data, "a", None, 1.0, true)
                .unwrap_err()
                .code(),
            31
        );
    }
}
