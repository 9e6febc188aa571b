//! Built-in renderers and the scene assembly they share.

mod html;
mod svg;

pub use html::HtmlBackend;
pub use svg::SvgBackend;

use bf_common::{Error, Result};
use bf_math::{binned_histogram, integer_histogram, kde_grid, KdeConfig};
use bf_render::{Axes, BfScene, Series};
use tracing::debug;

use super::options::PlotOptions;
use crate::data::SampleArray;
use crate::stats::density_error;

const FALLBACK_BINS: usize = 100;

/// The figure to draw on: the caller's axes, or a fresh one.
fn target_axes(options: &PlotOptions, backend: &str) -> Result<Axes> {
    let display = &options.display;
    let mut ax = match &display.ax {
        Some(existing) => {
            let mut ax = existing.clone();
            ax.backend = backend.to_string();
            ax.saved_to = None;
            ax
        }
        None => Axes::new(backend, display.figsize, display.dpi)?,
    };
    if let Some(bg) = display.background {
        ax.canvas.background = bg;
    }
    Ok(ax)
}

/// KDE curve for continuous draws, histogram for discrete ones.
fn series(
    var_name: &str,
    draws: &SampleArray,
    kde: &KdeConfig,
    bins: Option<usize>,
) -> Result<Series> {
    let series = match (draws, bins) {
        (SampleArray::Continuous(xs), _) => {
            let grid = kde_grid(xs, kde).map_err(|e| density_error(var_name, e))?;
            Series::Curve {
                x: grid.x,
                y: grid.density,
            }
        }
        (SampleArray::Discrete(ks), None) => match integer_histogram(ks) {
            Ok(h) => Series::Histogram {
                edges: h.edges,
                heights: h.density,
            },
            // Range too wide for unit bins
            Err(_) => fixed_bins(var_name, draws, FALLBACK_BINS)?,
        },
        (SampleArray::Discrete(_), Some(b)) => fixed_bins(var_name, draws, b)?,
    };
    Ok(series)
}

fn fixed_bins(var_name: &str, draws: &SampleArray, bins: usize) -> Result<Series> {
    let h = binned_histogram(&draws.to_f64(), bins).map_err(|e| density_error(var_name, e))?;
    Ok(Series::Histogram {
        edges: h.edges,
        heights: h.density,
    })
}

/// Translate plot options into the backend-neutral scene.
fn scene(options: &PlotOptions) -> Result<BfScene> {
    let display = &options.display;
    let prior = series(&options.var_name, &options.prior, &display.kde, display.bins)?;
    let posterior = series(&options.var_name, &options.posterior, &display.kde, display.bins)?;
    if matches!(prior, Series::Histogram { .. }) || matches!(posterior, Series::Histogram { .. }) {
        debug!(var = %options.var_name, "drawing discrete draws as histograms");
    }
    if options.bf10.is_nan() {
        return Err(Error::NumericalInstability(format!(
            "Bayes factor for '{}' is not a number",
            options.var_name
        )));
    }
    Ok(BfScene {
        var_name: options.var_name.clone(),
        ref_val: options.ref_val,
        bf10: options.bf10,
        bf01: options.bf01,
        prior_at_ref: options.prior_at_ref_val,
        posterior_at_ref: options.posterior_at_ref_val,
        prior,
        posterior,
        colors: display.colors,
        textsize: display.textsize,
        line: display.line.clone(),
        hist_alpha: display.hist_alpha,
        title: display.title.clone(),
        legend: display.legend,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::options;
    use super::*;
    use crate::plot::options::{BfPlotArgs, HistKwargs};

    #[test]
    fn continuous_draws_become_curves() {
        let s = scene(&options(BfPlotArgs::new())).unwrap();
        assert!(matches!(s.prior, Series::Curve { .. }));
        assert!(matches!(s.posterior, Series::Curve { .. }));
    }

    #[test]
    fn discrete_draws_become_histograms() {
        let mut opts = options(BfPlotArgs::new());
        opts.posterior = SampleArray::Discrete(vec![0, 1, 1, 2]);
        let s = scene(&opts).unwrap();
        match s.posterior {
            Series::Histogram { edges, heights } => {
                assert_eq!(edges, vec![-0.5, 0.5, 1.5, 2.5]);
                assert_eq!(heights, vec![0.25, 0.5, 0.25]);
            }
            other => panic!("expected histogram, got {other:?}"),
        }
    }

    #[test]
    fn bins_override_unit_bins() {
        let mut opts = options(BfPlotArgs::new().hist_kwargs(HistKwargs {
            bins: Some(2),
            alpha: Some(0.8),
        }));
        opts.prior = SampleArray::Discrete(vec![0, 1, 2, 3, 4, 5]);
        let s = scene(&opts).unwrap();
        assert_eq!(s.hist_alpha, 0.8);
        assert!(matches!(s.prior, Series::Histogram { ref heights, .. } if heights.len() == 2));
    }

    #[test]
    fn supplied_axes_are_reused() {
        let ax = Axes::new("svg", (2.0, 2.0), 50.0).unwrap();
        let id = ax.figure_id.clone();
        let opts = options(BfPlotArgs::new().ax(ax));
        let target = target_axes(&opts, "html").unwrap();
        assert_eq!(target.figure_id, id);
        assert_eq!(target.backend, "html");
        assert_eq!(target.pixel_size(), (100.0, 100.0));
    }
}
