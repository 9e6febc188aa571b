use bf_common::Result;
use bf_render::output::persist_temp;
use bf_render::plots::bf;
use bf_render::svg::svg_document;
use bf_render::Axes;
use tracing::debug;

use super::{scene, target_axes};
use crate::plot::options::PlotOptions;
use crate::plot::registry::Renderer;

/// Standalone SVG figure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgBackend;

impl Renderer for SvgBackend {
    fn backend(&self) -> &str {
        "svg"
    }

    fn draw(&self, options: &PlotOptions) -> Result<Axes> {
        let mut ax = target_axes(options, self.backend())?;
        let scene = scene(options)?;
        let px_per_pt = ax.px_per_pt();
        bf::draw(&scene, &mut ax.canvas, px_per_pt)?;
        ax.document = svg_document(&ax.canvas);
        debug!(figure = %ax.figure_id, elements = ax.canvas.len(), "svg figure drawn");
        if options.display.show {
            ax.saved_to = Some(persist_temp(&ax.document, "svg")?);
        }
        Ok(ax)
    }
}
