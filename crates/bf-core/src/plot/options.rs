//! Call arguments for `plot_bf` and the option bundle handed to renderers.

use bf_common::{Error, Result};
use bf_config::PlotDefaults;
use bf_math::KdeConfig;
use bf_render::{Axes, Color, LineOverlay};
use serde::{Deserialize, Serialize};

use crate::data::SampleArray;

/// Line keywords applied to density curves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotKwargs {
    /// Line width in points.
    pub linewidth: Option<f64>,
    /// `-`, `--`, `:`, `-.` or their long names.
    pub linestyle: Option<String>,
    pub alpha: Option<f64>,
}

/// Histogram keywords; used only for discrete draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistKwargs {
    /// `None` gives one bin per integer value.
    pub bins: Option<usize>,
    pub alpha: Option<f64>,
}

/// Figure-level keywords for the selected backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendKwargs {
    pub dpi: Option<f64>,
    /// Replaces the default Bayes factor title.
    pub title: Option<String>,
    /// Figure background color.
    pub background: Option<String>,
    /// Show the prior/posterior legend (default true).
    pub legend: Option<bool>,
    /// Minify HTML output (html backend only).
    pub minify: Option<bool>,
}

/// Arguments to `plot_bf`. Every unset field falls back to the plot defaults.
#[derive(Debug, Clone, Default)]
pub struct BfPlotArgs {
    /// Replaces the dataset's prior group, e.g. for sensitivity analysis.
    pub prior: Option<SampleArray>,
    /// Point-null value.
    pub ref_val: f64,
    /// Prior color, posterior color.
    pub colors: Option<[String; 2]>,
    /// Figure size in inches.
    pub figsize: Option<(f64, f64)>,
    /// Text scaling factor for labels, titles and lines.
    pub textsize: Option<f64>,
    pub hist_kwargs: Option<HistKwargs>,
    pub plot_kwargs: Option<PlotKwargs>,
    /// Existing figure to draw onto.
    pub ax: Option<Axes>,
    pub backend: Option<String>,
    pub backend_kwargs: Option<BackendKwargs>,
    pub show: Option<bool>,
}

impl BfPlotArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ref_val(mut self, ref_val: f64) -> Self {
        self.ref_val = ref_val;
        self
    }

    pub fn prior(mut self, prior: impl Into<SampleArray>) -> Self {
        self.prior = Some(prior.into());
        self
    }

    pub fn colors(mut self, prior: impl Into<String>, posterior: impl Into<String>) -> Self {
        self.colors = Some([prior.into(), posterior.into()]);
        self
    }

    pub fn figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = Some((width, height));
        self
    }

    pub fn textsize(mut self, textsize: f64) -> Self {
        self.textsize = Some(textsize);
        self
    }

    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn backend_kwargs(mut self, kwargs: BackendKwargs) -> Self {
        self.backend_kwargs = Some(kwargs);
        self
    }

    pub fn plot_kwargs(mut self, kwargs: PlotKwargs) -> Self {
        self.plot_kwargs = Some(kwargs);
        self
    }

    pub fn hist_kwargs(mut self, kwargs: HistKwargs) -> Self {
        self.hist_kwargs = Some(kwargs);
        self
    }

    pub fn ax(mut self, ax: Axes) -> Self {
        self.ax = Some(ax);
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }
}

/// Display parameters after defaults are applied and values checked.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub backend: String,
    pub colors: [Color; 2],
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub textsize: f64,
    pub line: LineOverlay,
    pub bins: Option<usize>,
    pub hist_alpha: f64,
    pub title: Option<String>,
    pub background: Option<Color>,
    pub legend: bool,
    pub minify: bool,
    pub ax: Option<Axes>,
    pub show: bool,
    pub kde: KdeConfig,
}

impl DisplayOptions {
    /// Apply `defaults` to `args` and validate the result.
    ///
    /// A supplied `ax` fixes the figure size, dpi and (unless named) backend.
    pub fn resolve(args: &BfPlotArgs, defaults: &PlotDefaults) -> Result<Self> {
        if !args.ref_val.is_finite() {
            return Err(Error::malformed(
                "ref_val",
                format!("must be finite, got {}", args.ref_val),
            ));
        }

        let color_specs = args.colors.as_ref().unwrap_or(&defaults.colors);
        let colors = [Color::parse(&color_specs[0])?, Color::parse(&color_specs[1])?];

        let backend_kwargs = args.backend_kwargs.clone().unwrap_or_default();
        let plot_kwargs = args.plot_kwargs.clone().unwrap_or_default();
        let hist_kwargs = args.hist_kwargs.clone().unwrap_or_default();

        let backend = match (&args.backend, &args.ax) {
            (Some(b), _) => b.trim().to_ascii_lowercase(),
            (None, Some(ax)) => ax.backend.clone(),
            (None, None) => defaults.backend.clone(),
        };

        let (figsize, dpi) = match &args.ax {
            Some(ax) => (ax.figsize, ax.dpi),
            None => (
                args.figsize.unwrap_or_else(|| defaults.effective_figsize()),
                backend_kwargs.dpi.unwrap_or(defaults.dpi),
            ),
        };
        let (w, h) = figsize;
        positive("figsize", w)?;
        positive("figsize", h)?;
        positive("dpi", dpi)?;

        let textsize = args.textsize.unwrap_or_else(|| defaults.effective_textsize());
        positive("textsize", textsize)?;

        if let Some(lw) = plot_kwargs.linewidth {
            positive("plot_kwargs.linewidth", lw)?;
        }
        let line = LineOverlay {
            width: plot_kwargs.linewidth,
            dash: plot_kwargs
                .linestyle
                .as_deref()
                .map(dash_pattern)
                .transpose()?
                .flatten(),
            alpha: unit_interval("plot_kwargs.alpha", plot_kwargs.alpha.unwrap_or(1.0))?,
        };

        let bins = hist_kwargs.bins.or(defaults.hist.bins);
        if bins == Some(0) {
            return Err(Error::malformed("hist_kwargs.bins", "must be at least 1"));
        }
        let hist_alpha = unit_interval("hist_kwargs.alpha", hist_kwargs.alpha.unwrap_or(0.5))?;

        let background = backend_kwargs
            .background
            .as_deref()
            .map(|spec| {
                Color::parse(spec).map_err(|_| {
                    Error::malformed(
                        "backend_kwargs.background",
                        format!("unrecognized color specification '{spec}'"),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            backend,
            colors,
            figsize,
            dpi,
            textsize,
            line,
            bins,
            hist_alpha,
            title: backend_kwargs.title,
            background,
            legend: backend_kwargs.legend.unwrap_or(true),
            minify: backend_kwargs.minify.unwrap_or(false),
            ax: args.ax.clone(),
            show: args.show.unwrap_or(defaults.show),
            kde: defaults.kde,
        })
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::malformed(
            name,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::malformed(name, format!("must lie in [0, 1], got {value}")))
    }
}

/// SVG dash array for a matplotlib-style line style; `None` is solid.
fn dash_pattern(style: &str) -> Result<Option<String>> {
    let dash = match style.trim() {
        "-" | "solid" => None,
        "--" | "dashed" => Some("6 3"),
        ":" | "dotted" => Some("1.5 2.5"),
        "-." | "dashdot" => Some("6 2.5 1.5 2.5"),
        other => {
            return Err(Error::malformed(
                "plot_kwargs.linestyle",
                format!("unknown line style '{other}'"),
            ))
        }
    };
    Ok(dash.map(str::to_string))
}

/// Everything a renderer needs, assembled once per call.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub var_name: String,
    pub ref_val: f64,
    pub bf10: f64,
    pub bf01: f64,
    pub prior_at_ref_val: f64,
    pub posterior_at_ref_val: f64,
    pub prior: SampleArray,
    pub posterior: SampleArray,
    pub display: DisplayOptions,
}
