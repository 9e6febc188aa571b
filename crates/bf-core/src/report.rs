//! Result document printed by the CLI.

use std::fmt::Write as _;
use std::path::PathBuf;

use bf_common::{FigureId, SCHEMA_VERSION};
use bf_render::plots::bf::format_bf;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::plot::BfPlot;

/// One Bayes factor computation and where its figure went.
///
/// Infinite Bayes factors serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BfReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub figure_id: FigureId,
    pub var_name: String,
    pub ref_val: f64,
    pub bf10: f64,
    pub bf01: f64,
    pub prior_at_ref_val: f64,
    pub posterior_at_ref_val: f64,
    pub backend: String,
    /// File the figure was written to, if any.
    pub output: Option<PathBuf>,
}

impl BfReport {
    pub fn new(var_name: &str, ref_val: f64, plot: &BfPlot, output: Option<PathBuf>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            figure_id: plot.axes.figure_id.clone(),
            var_name: var_name.to_string(),
            ref_val,
            bf10: plot.bayes_factor.bf10,
            bf01: plot.bayes_factor.bf01,
            prior_at_ref_val: plot.at_ref.prior,
            posterior_at_ref_val: plot.at_ref.posterior,
            backend: plot.axes.backend.clone(),
            output: output.or_else(|| plot.axes.saved_to.clone()),
        }
    }

    /// Short human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} (ref {}): BF10 = {}, BF01 = {}",
            self.var_name,
            self.ref_val,
            format_bf(self.bf10),
            format_bf(self.bf01)
        );
        let _ = writeln!(out, "  prior density at ref:     {:.4}", self.prior_at_ref_val);
        let _ = writeln!(out, "  posterior density at ref: {:.4}", self.posterior_at_ref_val);
        let _ = write!(out, "  figure: {} ({})", self.figure_id, self.backend);
        if let Some(path) = &self.output {
            let _ = write!(out, " -> {}", path.display());
        }
        out.push('\n');
        out
    }
}

/// JSON schema of [`BfReport`].
pub fn report_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(BfReport)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::demo_dataset;
    use crate::plot::{BfPlotArgs, BfPlotter};

    fn report() -> BfReport {
        let plot = BfPlotter::default()
            .plot(&demo_dataset(2, 800), "a", BfPlotArgs::new())
            .unwrap();
        BfReport::new("a", 0.0, &plot, Some(PathBuf::from("/tmp/a.svg")))
    }

    #[test]
    fn json_carries_all_fields() {
        let json = serde_json::to_value(report()).unwrap();
        for key in [
            "schema_version",
            "generated_at",
            "figure_id",
            "var_name",
            "ref_val",
            "bf10",
            "bf01",
            "prior_at_ref_val",
            "posterior_at_ref_val",
            "backend",
            "output",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["schema_version"], SCHEMA_VERSION);
        assert_eq!(json["backend"], "svg");
    }

    #[test]
    fn text_summary_mentions_both_factors() {
        let text = report().to_text();
        assert!(text.starts_with("a (ref 0): BF10 = "));
        assert!(text.contains("BF01 = "));
        assert!(text.contains("-> /tmp/a.svg"));
    }

    #[test]
    fn schema_describes_report() {
        let schema = report_schema();
        assert!(schema["properties"]["bf10"].is_object());
        assert!(schema["properties"]["figure_id"].is_object());
    }
}
