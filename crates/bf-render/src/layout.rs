//! Axis scaling and plot-area geometry.

use crate::canvas::Canvas;
use crate::primitives::TextStyle;

/// Linear axis with "nice number" ticks and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl Axis {
    /// Auto-scale to cover `[data_min, data_max]` with about `target_ticks` ticks.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let (nice_min, nice_max, step) = nice_range(data_min, data_max, target_ticks);
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut v = nice_min;
        while v <= nice_max + step * 0.01 {
            ticks.push(v);
            labels.push(format_tick(v, step));
            v += step;
        }
        Self {
            min: nice_min,
            max: nice_max,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value - self.min) / (self.max - self.min);
        px_min + frac * (px_max - px_min)
    }
}

/// "Nice numbers" algorithm for pleasant tick spacing.
fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    if (data_max - data_min).abs() < 1e-15 {
        return (data_min - 1.0, data_max + 1.0, 1.0);
    }
    let range = data_max - data_min;
    let rough_step = range / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough_step);
    let nice_min = (data_min / step).floor() * step;
    let nice_max = (data_max / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    format!("{:.prec$}", v, prec = decimals)
}

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Margins sized from the y tick labels, axis labels, and title lines.
    pub fn auto(canvas: &Canvas, y_axis: &Axis, font_size: f64, title_lines: usize) -> Self {
        let tick_style = TextStyle {
            size: font_size * 0.9,
            ..Default::default()
        };
        let max_tick_w = y_axis
            .tick_labels
            .iter()
            .map(|l| tick_style.approx_width(l))
            .fold(0.0_f64, f64::max);

        let left = 12.0 + max_tick_w + 8.0 + font_size + 8.0;
        let bottom = 12.0 + tick_style.size + 8.0 + font_size + 8.0;
        let top = 12.0 + title_lines as f64 * font_size * 1.4;
        let right = 16.0;

        Self {
            left,
            top,
            width: (canvas.width - left - right).max(50.0),
            height: (canvas.height - top - bottom).max(50.0),
        }
    }
}
