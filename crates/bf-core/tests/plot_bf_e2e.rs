//! End-to-end tests for `plot_bf` on a synthetic dataset.
//!
//! posterior a ~ N(1, 0.5), prior a ~ N(0, 1), 5000 draws each.

use std::io;
use std::sync::{Arc, Mutex};

use bf_core::data::synthetic::{demo_dataset, normal_draws};
use bf_core::data::{InferenceData, POSTERIOR, PRIOR};
use bf_core::plot::{BackendKwargs, BfPlotArgs, BfPlotter, RendererRegistry};
use bf_core::stats::{BayesFactorEstimator, StatsBackend};
use bf_core::{plot_bf, Error};
use bf_config::PlotDefaults;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEED: u64 = 20_240_617;
const DRAWS: usize = 5000;

fn idata() -> InferenceData {
    demo_dataset(SEED, DRAWS)
}

fn assert_valid(bf10: f64, bf01: f64) {
    assert!(bf10 > 0.0, "BF10 = {bf10}");
    assert!(bf01 > 0.0, "BF01 = {bf01}");
    assert!(
        ((bf10 * bf01) - 1.0).abs() < 1e-9,
        "BF10 * BF01 = {}",
        bf10 * bf01
    );
}

#[test]
fn basic_defaults() {
    let (bf, axes) = plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(0.0).show(false)).unwrap();
    assert_valid(bf.bf10, bf.bf01);
    assert!(bf.bf10 > 1.0, "shifted posterior should favour H1, BF10 = {}", bf.bf10);
    assert_eq!(axes.backend, "svg");
    assert!(axes.document.contains("<svg"));
    assert!(axes.saved_to.is_none());
}

#[test]
fn custom_ref_val_changes_result() {
    let (at_zero, _) = plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(0.0)).unwrap();
    let (at_one, axes) = plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(1.0)).unwrap();
    assert_valid(at_one.bf10, at_one.bf01);
    assert_ne!(at_zero.bf10, at_one.bf10);
    // At the posterior mode the posterior density dominates
    assert!(at_one.bf10 < 1.0, "BF10 at 1.0 = {}", at_one.bf10);
    assert!(!axes.document.is_empty());
}

#[test]
fn colors_do_not_change_the_bayes_factor() {
    let (default_colors, _) = plot_bf(&idata(), "a", BfPlotArgs::new()).unwrap();
    let (custom, axes) = plot_bf(&idata(), "a", BfPlotArgs::new().colors("red", "blue")).unwrap();
    assert_eq!(default_colors, custom);
    assert!(axes.document.contains("#ff0000"));
    assert!(axes.document.contains("#0000ff"));
}

#[test]
fn custom_prior_bypasses_prior_group() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let narrow = normal_draws(&mut rng, DRAWS, 0.5, 0.2);
    let wide = normal_draws(&mut rng, DRAWS, 0.0, 3.0);

    let (bf_narrow, _) = plot_bf(&idata(), "a", BfPlotArgs::new().prior(narrow.clone())).unwrap();
    let (bf_wide, _) = plot_bf(&idata(), "a", BfPlotArgs::new().prior(wide)).unwrap();
    assert_valid(bf_narrow.bf10, bf_narrow.bf01);
    assert_valid(bf_wide.bf10, bf_wide.bf01);
    assert_ne!(bf_narrow.bf10, bf_wide.bf10);

    // A dataset without any prior group still works with an explicit prior
    let posterior_only = InferenceData::new().with_var(
        POSTERIOR,
        "a",
        idata().extract("a", POSTERIOR).unwrap().clone(),
    );
    let (bf, _) = plot_bf(&posterior_only, "a", BfPlotArgs::new().prior(narrow)).unwrap();
    assert_eq!(bf, bf_narrow);
}

#[test]
fn figsize_reaches_the_renderer() {
    let (plain, _) = plot_bf(&idata(), "a", BfPlotArgs::new()).unwrap();
    let (bf, axes) = plot_bf(&idata(), "a", BfPlotArgs::new().figsize(10.0, 6.0)).unwrap();
    assert_eq!(axes.figsize, (10.0, 6.0));
    assert_eq!(axes.pixel_size(), (1000.0, 600.0));
    assert_eq!(bf, plain);
}

#[test]
fn backend_kwargs_dpi_is_accepted() {
    let (bf, axes) = plot_bf(
        &idata(),
        "a",
        BfPlotArgs::new()
            .backend_kwargs(BackendKwargs {
                dpi: Some(100.0),
                ..Default::default()
            })
            .show(false),
    )
    .unwrap();
    assert_valid(bf.bf10, bf.bf01);
    assert_eq!(axes.dpi, 100.0);
    assert!(axes.saved_to.is_none());
}

#[test]
fn html_backend_and_axes_reuse() {
    let (_, first) = plot_bf(&idata(), "a", BfPlotArgs::new().backend("html")).unwrap();
    assert_eq!(first.backend, "html");
    assert!(first.document.contains("<!DOCTYPE html>"));

    let before = first.canvas.len();
    let id = first.figure_id.clone();
    let (_, second) = plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(1.0).ax(first)).unwrap();
    assert_eq!(second.figure_id, id);
    assert_eq!(second.backend, "html");
    assert!(second.canvas.len() > before);
}

#[test]
fn unknown_backend_yields_no_result() {
    let err = plot_bf(&idata(), "a", BfPlotArgs::new().backend("bokeh")).unwrap_err();
    match err {
        Error::UnsupportedBackend { backend, available, .. } => {
            assert_eq!(backend, "bokeh");
            assert!(available.contains("svg"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn missing_variable_and_prior_group() {
    let err = plot_bf(&idata(), "b", BfPlotArgs::new()).unwrap_err();
    assert!(matches!(err, Error::VariableNotFound { .. }));

    let no_prior = InferenceData::new().with_var(POSTERIOR, "a", vec![0.1, 0.5, 0.9]);
    let err = plot_bf(&no_prior, "a", BfPlotArgs::new()).unwrap_err();
    assert!(matches!(err, Error::GroupNotFound { ref group } if group == PRIOR));
}

#[test]
fn discrete_draws_use_point_masses() {
    let data = InferenceData::new()
        .with_var(POSTERIOR, "k", vec![0_i64, 1, 1, 1, 2, 2, 3, 1])
        .with_var(PRIOR, "k", vec![0_i64, 0, 1, 2, 3, 0, 1, 2]);
    let (bf, axes) = plot_bf(&data, "k", BfPlotArgs::new()).unwrap();
    // prior mass at 0 is 3/8, posterior 1/8
    assert!((bf.bf10 - 3.0).abs() < 1e-12);
    assert!(axes.document.contains("<rect"));
}

// ----------------------------------------------------------------------------
// Capability handling
// ----------------------------------------------------------------------------

struct LegacyStats;

impl StatsBackend for LegacyStats {
    fn name(&self) -> &str {
        "legacy"
    }

    fn bayes_factor(&self) -> Option<&dyn BayesFactorEstimator> {
        None
    }
}

#[derive(Clone)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn missing_estimator_is_logged_and_clarified() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = Capture(buf.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let plotter = BfPlotter::new(
        Box::new(LegacyStats),
        RendererRegistry::with_builtins(),
        PlotDefaults::default(),
    );
    let result = tracing::subscriber::with_default(subscriber, || {
        plotter.plot_bf(&idata(), "a", BfPlotArgs::new())
    });

    let err = result.err().expect("plot must fail without an estimator");
    assert!(err.is_capability_missing());
    assert!(err.to_string().contains("bayes_factor"));
    let cause = std::error::Error::source(&err).expect("original cause is chained");
    assert!(cause.to_string().contains("legacy"));

    let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains("legacy"), "logs: {logs}");
}

// ----------------------------------------------------------------------------
// Reference values far from the draws
// ----------------------------------------------------------------------------

#[test]
fn reference_outside_narrow_prior_stays_finite() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let narrow = normal_draws(&mut rng, DRAWS, 0.5, 0.05);
    let (bf, _) = plot_bf(&idata(), "a", BfPlotArgs::new().prior(narrow)).unwrap();
    assert!(bf.bf10.is_finite(), "BF10 = {}", bf.bf10);
    assert!(bf.bf01.is_finite(), "BF01 = {}", bf.bf01);
    assert_valid(bf.bf10, bf.bf01);
}

#[test]
fn reference_far_outside_both_groups_is_estimated() {
    let plot = BfPlotter::default()
        .plot(&idata(), "a", BfPlotArgs::new().ref_val(10.0))
        .unwrap();
    assert!(plot.at_ref.prior > 0.0);
    assert!(plot.at_ref.posterior > 0.0);
    assert_valid(plot.bayes_factor.bf10, plot.bayes_factor.bf01);
}

#[test]
fn reference_outside_posterior_draws_is_warned() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = Capture(buf.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(10.0))
    });
    assert!(result.is_ok());

    let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("outside the posterior draws"), "logs: {logs}");
}

#[test]
fn reference_inside_posterior_draws_is_not_warned() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = Capture(buf.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        plot_bf(&idata(), "a", BfPlotArgs::new().ref_val(1.0))
    })
    .unwrap();

    let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    assert!(!logs.contains("outside the posterior draws"), "logs: {logs}");
}
