//! The handle returned by every renderer.

use std::path::PathBuf;

use bf_common::FigureId;

use crate::canvas::Canvas;
use crate::{RenderError, Result};

/// A drawn figure: the canvas plus its finished document.
///
/// Passing an `Axes` back into a plot call draws onto the same canvas.
#[derive(Debug, Clone)]
pub struct Axes {
    pub figure_id: FigureId,
    pub backend: String,
    /// Size in inches.
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub canvas: Canvas,
    /// SVG or HTML text, depending on the backend.
    pub document: String,
    /// Where the document was written when the figure was shown.
    pub saved_to: Option<PathBuf>,
}

impl Axes {
    /// A blank figure of `figsize` inches at `dpi`.
    pub fn new(backend: &str, figsize: (f64, f64), dpi: f64) -> Result<Self> {
        let (w, h) = figsize;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(RenderError::parameter(
                "figsize",
                format!("width and height must be positive, got ({w}, {h})"),
            ));
        }
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(RenderError::parameter(
                "dpi",
                format!("must be positive, got {dpi}"),
            ));
        }
        Ok(Self {
            figure_id: FigureId::new(),
            backend: backend.to_string(),
            figsize,
            dpi,
            canvas: Canvas::new((w * dpi).round(), (h * dpi).round()),
            document: String::new(),
            saved_to: None,
        })
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.canvas.width, self.canvas.height)
    }

    /// Points-to-pixels factor for this figure's dpi.
    pub fn px_per_pt(&self) -> f64 {
        self.dpi / 72.0
    }
}
