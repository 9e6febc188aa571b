//! Plot default settings.
//!
//! These play the role of global plotting parameters: every `Option` left
//! unset in a plot call falls back to the value here.

use bf_math::KdeConfig;
use serde::{Deserialize, Serialize};

use crate::CONFIG_SCHEMA_VERSION;

/// Built-in default backend name.
pub const DEFAULT_BACKEND: &str = "svg";

/// Matplotlib-style default figure size in inches.
pub const DEFAULT_FIGSIZE: (f64, f64) = (6.4, 4.8);

/// Complete defaults configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotDefaults {
    pub schema_version: String,

    /// Renderer used when a call does not name one.
    pub backend: String,

    /// Whether renderers display (persist) the figure by default.
    pub show: bool,

    /// Prior color, posterior color.
    pub colors: [String; 2],

    /// Figure size in inches; `None` lets the renderer decide.
    pub figsize: Option<(f64, f64)>,

    /// Text scaling factor; `None` lets the renderer decide.
    pub textsize: Option<f64>,

    pub dpi: f64,

    pub kde: KdeConfig,

    pub hist: HistDefaults,
}

impl Default for PlotDefaults {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            backend: DEFAULT_BACKEND.to_string(),
            show: false,
            colors: ["C0".to_string(), "C1".to_string()],
            figsize: None,
            textsize: None,
            dpi: 100.0,
            kde: KdeConfig::default(),
            hist: HistDefaults::default(),
        }
    }
}

impl PlotDefaults {
    /// Figure size with the built-in fallback applied.
    pub fn effective_figsize(&self) -> (f64, f64) {
        self.figsize.unwrap_or(DEFAULT_FIGSIZE)
    }

    /// Text scale with the built-in fallback applied.
    pub fn effective_textsize(&self) -> f64 {
        self.textsize.unwrap_or(1.0)
    }
}

/// Histogram settings for discrete draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistDefaults {
    /// Number of bins; `None` gives one bin per integer value.
    pub bins: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_math::Bandwidth;

    #[test]
    fn defaults_match_documented_values() {
        let d = PlotDefaults::default();
        assert_eq!(d.backend, "svg");
        assert!(!d.show);
        assert_eq!(d.colors, ["C0", "C1"]);
        assert_eq!(d.effective_figsize(), (6.4, 4.8));
        assert_eq!(d.effective_textsize(), 1.0);
        assert_eq!(d.kde.bandwidth, Bandwidth::Silverman);
        assert_eq!(d.kde.grid_points, 512);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let d: PlotDefaults =
            serde_json::from_str(r#"{"backend": "html", "figsize": [10.0, 6.0]}"#).unwrap();
        assert_eq!(d.backend, "html");
        assert_eq!(d.figsize, Some((10.0, 6.0)));
        assert_eq!(d.colors, ["C0", "C1"]);
        assert_eq!(d.dpi, 100.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let d: PlotDefaults = toml::from_str(
            r#"
            colors = ["red", "blue"]

            [kde]
            bandwidth = "scott"
            grid_points = 256
            "#,
        )
        .unwrap();
        assert_eq!(d.colors, ["red", "blue"]);
        assert_eq!(d.kde.bandwidth, Bandwidth::Scott);
        assert_eq!(d.kde.grid_points, 256);
        assert_eq!(d.kde.cut, 3.0);
        assert_eq!(d.backend, "svg");
    }
}
