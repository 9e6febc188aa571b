//! Bayes factor figure: prior and posterior densities with the reference
//! value and both densities at it marked.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::{Axis, PlotArea};
use crate::primitives::*;
use crate::{RenderError, Result};

/// One distribution as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Density curve sampled on `x`.
    Curve { x: Vec<f64>, y: Vec<f64> },
    /// Histogram with `edges.len() == heights.len() + 1`.
    Histogram { edges: Vec<f64>, heights: Vec<f64> },
}

impl Series {
    fn x_extent(&self) -> Option<(f64, f64)> {
        let xs = match self {
            Series::Curve { x, .. } => x,
            Series::Histogram { edges, .. } => edges,
        };
        Some((*xs.first()?, *xs.last()?))
    }

    fn y_max(&self) -> f64 {
        let ys = match self {
            Series::Curve { y, .. } => y,
            Series::Histogram { heights, .. } => heights,
        };
        ys.iter().copied().fold(0.0, f64::max)
    }

    fn validate(&self, which: &str) -> Result<()> {
        let ok = match self {
            Series::Curve { x, y } => x.len() >= 2 && x.len() == y.len(),
            Series::Histogram { edges, heights } => {
                !heights.is_empty() && edges.len() == heights.len() + 1
            }
        };
        if ok {
            Ok(())
        } else {
            Err(RenderError::EmptyScene(format!("{which} series has no drawable points")))
        }
    }
}

/// Line overrides taken from the caller's plot keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOverlay {
    pub width: Option<f64>,
    pub dash: Option<String>,
    pub alpha: f64,
}

impl Default for LineOverlay {
    fn default() -> Self {
        Self {
            width: None,
            dash: None,
            alpha: 1.0,
        }
    }
}

/// Everything the Bayes factor figure shows.
#[derive(Debug, Clone)]
pub struct BfScene {
    pub var_name: String,
    pub ref_val: f64,
    pub bf10: f64,
    pub bf01: f64,
    pub prior_at_ref: f64,
    pub posterior_at_ref: f64,
    pub prior: Series,
    pub posterior: Series,
    /// Prior color, posterior color.
    pub colors: [Color; 2],
    pub textsize: f64,
    pub line: LineOverlay,
    pub hist_alpha: f64,
    /// Replaces the default two-line Bayes factor title.
    pub title: Option<String>,
    pub legend: bool,
}

/// Compact rendering of a Bayes factor for titles and annotations.
pub fn format_bf(v: f64) -> String {
    if v.is_infinite() {
        "inf".to_string()
    } else if v != 0.0 && !(1e-2..1e4).contains(&v.abs()) {
        format!("{v:.2e}")
    } else {
        format!("{v:.2}")
    }
}

/// Draw the scene onto `canvas`. `px_per_pt` converts point sizes to pixels.
pub fn draw(scene: &BfScene, canvas: &mut Canvas, px_per_pt: f64) -> Result<()> {
    scene.prior.validate("prior")?;
    scene.posterior.validate("posterior")?;

    let font = 10.0 * scene.textsize * px_per_pt;
    let line_width = scene.line.width.unwrap_or(1.5) * scene.textsize * px_per_pt;

    // Data extents
    let (p_lo, p_hi) = scene.prior.x_extent().unwrap_or((scene.ref_val, scene.ref_val));
    let (q_lo, q_hi) = scene
        .posterior
        .x_extent()
        .unwrap_or((scene.ref_val, scene.ref_val));
    let x_lo = p_lo.min(q_lo).min(scene.ref_val);
    let x_hi = p_hi.max(q_hi).max(scene.ref_val);
    let y_hi = scene
        .prior
        .y_max()
        .max(scene.posterior.y_max())
        .max(scene.prior_at_ref)
        .max(scene.posterior_at_ref)
        .max(1e-12)
        * 1.1;

    let x_axis = Axis::auto_linear(x_lo, x_hi, 7).with_label(scene.var_name.clone());
    let y_axis = Axis::auto_linear(0.0, y_hi, 5).with_label("Density");

    let title_lines: Vec<String> = match &scene.title {
        Some(t) => t.lines().map(str::to_string).collect(),
        None => vec![
            format!("The BF_10 is {}", format_bf(scene.bf10)),
            format!("The BF_01 is {}", format_bf(scene.bf01)),
        ],
    };
    let area = PlotArea::auto(canvas, &y_axis, font, title_lines.len());

    let to_px = |x: f64, y: f64| {
        (
            x_axis.data_to_pixel(x, area.left, area.right()),
            y_axis.data_to_pixel(y, area.bottom(), area.top),
        )
    };

    draw_frame(canvas, &area, &x_axis, &y_axis, font, px_per_pt);

    // Distributions
    for (series, color) in [(&scene.prior, scene.colors[0]), (&scene.posterior, scene.colors[1])] {
        match series {
            Series::Curve { x, y } => {
                let points: Vec<(f64, f64)> =
                    x.iter().zip(y).map(|(&xi, &yi)| to_px(xi, yi)).collect();
                let style = LineStyle {
                    color,
                    width: line_width,
                    dash: scene.line.dash.clone(),
                    opacity: scene.line.alpha,
                };
                canvas.polyline(&points, &style);
            }
            Series::Histogram { edges, heights } => {
                let fill = Style {
                    fill: Some(color),
                    stroke: Some(color),
                    stroke_width: 0.5 * px_per_pt,
                    opacity: scene.hist_alpha,
                };
                for (edge, &h) in edges.windows(2).zip(heights) {
                    let (x0, y0) = to_px(edge[0], h);
                    let (x1, base) = to_px(edge[1], 0.0);
                    canvas.rect(x0, y0, (x1 - x0).max(0.0), (base - y0).max(0.0), &fill);
                }
            }
        }
    }

    // Reference value
    let (ref_x, _) = to_px(scene.ref_val, 0.0);
    canvas.line(
        ref_x,
        area.top,
        ref_x,
        area.bottom(),
        &LineStyle::dashed(Color::rgb(128, 128, 128), 1.0 * px_per_pt),
    );

    // Densities at the reference value
    let marker = Style::filled(Color::rgb(0, 0, 0));
    let note = TextStyle {
        size: font * 0.8,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (label, density) in [
        ("prior", scene.prior_at_ref),
        ("posterior", scene.posterior_at_ref),
    ] {
        let (mx, my) = to_px(scene.ref_val, density);
        canvas.circle_with_tooltip(
            mx,
            my,
            3.0 * px_per_pt,
            &marker,
            &format!("{label} density at {} = {density:.4}", scene.ref_val),
        );
        canvas.text(mx + 5.0 * px_per_pt, my, &format!("{density:.3}"), &note);
    }

    if scene.legend {
        draw_legend(
            canvas,
            &area,
            &[("Prior", scene.colors[0]), ("Posterior", scene.colors[1])],
            font,
            px_per_pt,
        );
    }

    // Title
    let title_style = TextStyle {
        size: font * 1.1,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    let cx = area.left + area.width / 2.0;
    for (i, line) in title_lines.iter().enumerate() {
        canvas.text(cx, 8.0 + i as f64 * font * 1.4, line, &title_style);
    }

    Ok(())
}

fn draw_frame(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    font: f64,
    px_per_pt: f64,
) {
    let frame = Style::stroked(Color::rgb(0, 0, 0), 0.8 * px_per_pt);
    canvas.rect(area.left, area.top, area.width, area.height, &frame);

    let tick = LineStyle::solid(Color::rgb(0, 0, 0), 0.8 * px_per_pt);
    let tick_len = 3.5 * px_per_pt;
    let tick_font = font * 0.9;

    let x_labels = TextStyle {
        size: tick_font,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (pos, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
        let px = x_axis.data_to_pixel(*pos, area.left, area.right());
        canvas.line(px, area.bottom(), px, area.bottom() + tick_len, &tick);
        canvas.text(px, area.bottom() + tick_len + 2.0, label, &x_labels);
    }

    let y_labels = TextStyle {
        size: tick_font,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (pos, label) in y_axis.tick_positions.iter().zip(&y_axis.tick_labels) {
        let py = y_axis.data_to_pixel(*pos, area.bottom(), area.top);
        canvas.line(area.left - tick_len, py, area.left, py, &tick);
        canvas.text(area.left - tick_len - 2.0, py, label, &y_labels);
    }

    let axis_label = TextStyle {
        size: font,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Alphabetic,
        ..Default::default()
    };
    canvas.text(
        area.left + area.width / 2.0,
        canvas.height - 10.0,
        &x_axis.label,
        &axis_label,
    );
    canvas.text_rotated(
        8.0 + font,
        area.top + area.height / 2.0,
        &y_axis.label,
        &axis_label,
        -90.0,
    );
}

fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[(&str, Color)],
    font: f64,
    px_per_pt: f64,
) {
    let text_style = TextStyle {
        size: font * 0.85,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let row_height = font + 4.0 * px_per_pt;
    let swatch_w = 14.0 * px_per_pt;
    let gap = 6.0 * px_per_pt;
    let padding = 6.0 * px_per_pt;

    let max_w = entries
        .iter()
        .map(|(label, _)| text_style.approx_width(label))
        .fold(0.0_f64, f64::max);
    let legend_w = padding + swatch_w + gap + max_w + padding;
    let legend_h = padding * 2.0 + entries.len() as f64 * row_height;

    // Top-right of plot area
    let lx = area.right() - legend_w - 5.0;
    let ly = area.top + 5.0;
    let bg = Style {
        fill: Some(Color::rgba(255, 255, 255, 0.9)),
        stroke: Some(Color::rgb(200, 200, 200)),
        stroke_width: 0.5,
        opacity: 1.0,
    };
    canvas.rect(lx, ly, legend_w, legend_h, &bg);

    for (i, (label, color)) in entries.iter().enumerate() {
        let ey = ly + padding + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;
        canvas.line(sx, ey, sx + swatch_w, ey, &LineStyle::solid(*color, 1.5 * px_per_pt));
        canvas.text(sx + swatch_w + gap, ey, label, &text_style);
    }
}
