use bf_common::Result;
use bf_render::html::{render_page, PageSummary};
use bf_render::output::persist_temp;
use bf_render::plots::bf;
use bf_render::Axes;
use tracing::debug;

use super::{scene, target_axes};
use crate::plot::options::PlotOptions;
use crate::plot::registry::Renderer;

/// Self-contained HTML page embedding the SVG figure and a result table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

impl Renderer for HtmlBackend {
    fn backend(&self) -> &str {
        "html"
    }

    fn draw(&self, options: &PlotOptions) -> Result<Axes> {
        let mut ax = target_axes(options, self.backend())?;
        let scene = scene(options)?;
        let px_per_pt = ax.px_per_pt();
        bf::draw(&scene, &mut ax.canvas, px_per_pt)?;

        let summary = PageSummary {
            title: options
                .display
                .title
                .clone()
                .unwrap_or_else(|| format!("Bayes factor for {}", options.var_name)),
            figure_id: ax.figure_id.to_string(),
            var_name: options.var_name.clone(),
            ref_val: options.ref_val,
            bf10: options.bf10,
            bf01: options.bf01,
            prior_at_ref: options.prior_at_ref_val,
            posterior_at_ref: options.posterior_at_ref_val,
        };
        ax.document = render_page(&summary, &ax.canvas.finish_svg(), options.display.minify)?;
        debug!(figure = %ax.figure_id, bytes = ax.document.len(), "html figure drawn");
        if options.display.show {
            ax.saved_to = Some(persist_temp(&ax.document, "html")?);
        }
        Ok(ax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::backends::test_support::options;
    use crate::plot::options::{BackendKwargs, BfPlotArgs};

    #[test]
    fn page_embeds_figure_and_numbers() {
        let ax = HtmlBackend.draw(&options(BfPlotArgs::new())).unwrap();
        assert_eq!(ax.backend, "html");
        assert!(ax.document.contains("<svg"));
        assert!(ax.document.contains("Bayes factor for a"));
        assert!(ax.document.contains(ax.figure_id.as_str()));
    }

    #[test]
    fn title_kwarg_reaches_page_and_figure() {
        let ax = HtmlBackend
            .draw(&options(BfPlotArgs::new().backend_kwargs(BackendKwargs {
                title: Some("Sensitivity".into()),
                minify: Some(true),
                ..Default::default()
            })))
            .unwrap();
        assert!(ax.document.contains("Sensitivity"));
        assert!(!ax.document.contains("The BF_10 is"));
    }
}
