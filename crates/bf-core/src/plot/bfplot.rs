//! Savage-Dickey Bayes factor: compute and plot.
//!
//! The Bayes factor is estimated by comparing a model (H1) against one in
//! which the parameter of interest is restricted to a point-null (H0). This
//! assumes the models are nested, so H0 is a special case of H1, and
//! approximates the factor with the Savage-Dickey density ratio.

use bf_common::{Error, Result};
use bf_config::PlotDefaults;
use bf_render::Axes;
use tracing::{error, info};

use super::options::{BfPlotArgs, DisplayOptions, PlotOptions};
use super::registry::RendererRegistry;
use super::{PLOT_KIND, SUBMODULE};
use crate::data::{extract, InferenceData, POSTERIOR, PRIOR};
use crate::stats::{BayesFactor, DensityAtRef, KdeStats, StatsBackend, BAYES_FACTOR_FN};

/// Full outcome of one plot call.
#[derive(Debug, Clone)]
pub struct BfPlot {
    pub bayes_factor: BayesFactor,
    pub at_ref: DensityAtRef,
    pub axes: Axes,
}

/// Binds a statistics backend, a renderer registry and plot defaults.
pub struct BfPlotter {
    stats: Box<dyn StatsBackend>,
    registry: RendererRegistry,
    defaults: PlotDefaults,
}

impl BfPlotter {
    pub fn new(
        stats: Box<dyn StatsBackend>,
        registry: RendererRegistry,
        defaults: PlotDefaults,
    ) -> Self {
        Self {
            stats,
            registry,
            defaults,
        }
    }

    /// KDE statistics and the built-in renderers, configured by `defaults`.
    pub fn from_defaults(defaults: PlotDefaults) -> Self {
        Self::new(
            Box::new(KdeStats::new(defaults.kde)),
            RendererRegistry::with_builtins(),
            defaults,
        )
    }

    pub fn defaults(&self) -> &PlotDefaults {
        &self.defaults
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Compute the Bayes factor for `var_name` and draw it.
    ///
    /// Options are validated and the renderer resolved before any numeric
    /// work, so a bad backend or display parameter produces no partial result.
    pub fn plot(&self, dataset: &InferenceData, var_name: &str, args: BfPlotArgs) -> Result<BfPlot> {
        let display = DisplayOptions::resolve(&args, &self.defaults)?;
        let renderer = self.registry.resolve(PLOT_KIND, SUBMODULE, &display.backend)?;

        let prior = match args.prior {
            Some(prior) if prior.is_empty() => {
                return Err(Error::EmptySamples {
                    group: PRIOR.to_string(),
                    var: var_name.to_string(),
                })
            }
            Some(prior) => prior,
            None => extract(dataset, var_name, PRIOR)?,
        };
        let posterior = extract(dataset, var_name, POSTERIOR)?;

        let (bayes_factor, at_ref) = self
            .stats
            .require_bayes_factor()
            .and_then(|estimator| {
                estimator.estimate(dataset, var_name, Some(&prior), args.ref_val, true)
            })
            .map_err(clarify_missing_estimator)?;
        let at_ref = at_ref.ok_or_else(|| {
            Error::Estimation(format!(
                "backend '{}' returned no densities at the reference value",
                self.stats.name()
            ))
        })?;

        let options = PlotOptions {
            var_name: var_name.to_string(),
            ref_val: args.ref_val,
            bf10: bayes_factor.bf10,
            bf01: bayes_factor.bf01,
            prior_at_ref_val: at_ref.prior,
            posterior_at_ref_val: at_ref.posterior,
            prior,
            posterior,
            display,
        };
        let axes = renderer.draw(&options)?;

        info!(
            var = %var_name,
            ref_val = args.ref_val,
            bf10 = bayes_factor.bf10,
            bf01 = bayes_factor.bf01,
            backend = %axes.backend,
            figure = %axes.figure_id,
            "bayes factor plotted"
        );
        Ok(BfPlot {
            bayes_factor,
            at_ref,
            axes,
        })
    }

    /// [`BfPlotter::plot`] reduced to the Bayes factor and the figure handle.
    pub fn plot_bf(
        &self,
        dataset: &InferenceData,
        var_name: &str,
        args: BfPlotArgs,
    ) -> Result<(BayesFactor, Axes)> {
        let plot = self.plot(dataset, var_name, args)?;
        Ok((plot.bayes_factor, plot.axes))
    }
}

impl Default for BfPlotter {
    fn default() -> Self {
        Self::from_defaults(PlotDefaults::default())
    }
}

/// Log a missing estimator entry point and restate it with the function name.
fn clarify_missing_estimator(err: Error) -> Error {
    match err {
        Error::CapabilityMissing(_) => {
            error!("Error: {err}");
            Error::EstimatorNotFound {
                function: BAYES_FACTOR_FN.to_string(),
                source: Box::new(err),
            }
        }
        other => other,
    }
}

/// Compute and plot the Bayes factor with built-in defaults.
///
/// Returns `{BF10, BF01}` and the rendered figure.
pub fn plot_bf(
    dataset: &InferenceData,
    var_name: &str,
    args: BfPlotArgs,
) -> Result<(BayesFactor, Axes)> {
    BfPlotter::default().plot_bf(dataset, var_name, args)
}
