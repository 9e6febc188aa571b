//! Bayes factor plotting: options, renderer registry, backends, and the
//! `plot_bf` entry point.

pub mod backends;
pub mod bfplot;
pub mod options;
pub mod registry;

pub use bfplot::{plot_bf, BfPlot, BfPlotter};
pub use options::{BackendKwargs, BfPlotArgs, DisplayOptions, HistKwargs, PlotKwargs, PlotOptions};
pub use registry::{Renderer, RendererRegistry};

/// Registry key of the Bayes factor plot.
pub const PLOT_KIND: &str = "plot_bf";

/// Module name renderers of this plot live under.
pub const SUBMODULE: &str = "bfplot";
