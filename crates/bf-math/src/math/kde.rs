//! Gaussian kernel density estimation.
//!
//! Densities are fitted to one-dimensional draws with a Gaussian kernel and a
//! rule-of-thumb bandwidth, then evaluated on an evenly spaced grid that
//! extends `cut` bandwidths past the extreme draws. Point densities are read
//! off the grid by linear interpolation, clamped to the edge densities beyond
//! either end so that a reference value far from the draws still has a
//! positive density.

use serde::{Deserialize, Serialize};

use super::summary;
use super::DensityError;

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Kernels further than this many bandwidths away contribute nothing.
const KERNEL_TAIL_Z: f64 = 8.0;

/// Bandwidth selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// `0.9 · min(σ, IQR/1.349) · n^(-1/5)`, robust to heavy tails.
    #[default]
    Silverman,
    /// `σ · n^(-1/5)`.
    Scott,
    /// Caller-supplied bandwidth in data units.
    Fixed(f64),
}

impl Bandwidth {
    /// Resolve the rule into a concrete bandwidth for `xs`.
    pub fn resolve(&self, xs: &[f64]) -> Result<f64, DensityError> {
        if xs.is_empty() {
            return Err(DensityError::Empty);
        }
        let h = match *self {
            Bandwidth::Fixed(h) => h,
            Bandwidth::Scott => {
                let sd = summary::std_dev(xs);
                if sd == 0.0 {
                    return Err(DensityError::Degenerate(xs[0]));
                }
                sd * (xs.len() as f64).powf(-0.2)
            }
            Bandwidth::Silverman => {
                let sd = summary::std_dev(xs);
                if sd == 0.0 {
                    return Err(DensityError::Degenerate(xs[0]));
                }
                let spread = summary::iqr(xs) / 1.349;
                let scale = if spread > 0.0 { sd.min(spread) } else { sd };
                0.9 * scale * (xs.len() as f64).powf(-0.2)
            }
        };
        if !h.is_finite() || h <= 0.0 {
            return Err(DensityError::InvalidBandwidth(h));
        }
        Ok(h)
    }
}

/// Grid and bandwidth settings for density estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdeConfig {
    pub bandwidth: Bandwidth,
    pub grid_points: usize,
    /// Grid extension past the extreme draws, in bandwidths.
    pub cut: f64,
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self {
            bandwidth: Bandwidth::Silverman,
            grid_points: 512,
            cut: 3.0,
        }
    }
}

/// A fitted Gaussian KDE.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    draws: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to `draws`. Rejects empty, non-finite and constant input.
    pub fn fit(draws: &[f64], bandwidth: Bandwidth) -> Result<Self, DensityError> {
        if draws.is_empty() {
            return Err(DensityError::Empty);
        }
        if let Some((index, &value)) = draws.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DensityError::NonFinite { index, value });
        }
        let bandwidth = bandwidth.resolve(draws)?;
        Ok(Self {
            draws: draws.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Exact kernel sum at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let inv_h = 1.0 / self.bandwidth;
        let sum: f64 = self
            .draws
            .iter()
            .map(|&d| (x - d) * inv_h)
            .filter(|z| z.abs() < KERNEL_TAIL_Z)
            .map(|z| (-0.5 * z * z).exp())
            .sum();
        sum * INV_SQRT_2PI * inv_h / self.draws.len() as f64
    }

    /// Evaluate the density on `points` evenly spaced positions spanning the
    /// draws plus `cut` bandwidths on each side.
    pub fn evaluate_grid(&self, points: usize, cut: f64) -> Result<DensityGrid, DensityError> {
        if points < 2 {
            return Err(DensityError::InvalidGrid(points));
        }
        let (lo, hi) = summary::min_max(&self.draws).ok_or(DensityError::Empty)?;
        let pad = cut.max(0.0) * self.bandwidth;
        let (lo, hi) = (lo - pad, hi + pad);
        let step = (hi - lo) / (points - 1) as f64;
        let x: Vec<f64> = (0..points).map(|i| lo + step * i as f64).collect();
        let density = x.iter().map(|&xi| self.pdf(xi)).collect();
        Ok(DensityGrid {
            x,
            density,
            bandwidth: self.bandwidth,
        })
    }
}

/// Density values on an evenly spaced, increasing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    pub x: Vec<f64>,
    pub density: Vec<f64>,
    pub bandwidth: f64,
}

impl DensityGrid {
    /// Linear interpolation of the density at `x`.
    ///
    /// Beyond either end of the grid the edge density is returned. An empty
    /// grid or a NaN `x` yields NaN.
    pub fn interpolate(&self, x: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.x.first(), self.x.last()) else {
            return f64::NAN;
        };
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= first {
            return self.density[0];
        }
        if x >= last {
            return self.density[self.density.len() - 1];
        }
        let hi = self.x.partition_point(|&g| g < x);
        let lo = hi - 1;
        let span = self.x[hi] - self.x[lo];
        if span <= 0.0 {
            return self.density[hi];
        }
        let t = (x - self.x[lo]) / span;
        self.density[lo] + t * (self.density[hi] - self.density[lo])
    }

    /// Trapezoid integral of the density over the grid.
    pub fn integral(&self) -> f64 {
        self.x
            .windows(2)
            .zip(self.density.windows(2))
            .map(|(x, d)| (x[1] - x[0]) * (d[0] + d[1]) * 0.5)
            .sum()
    }
}

/// Fit and grid-evaluate in one step.
pub fn kde_grid(draws: &[f64], config: &KdeConfig) -> Result<DensityGrid, DensityError> {
    GaussianKde::fit(draws, config.bandwidth)?.evaluate_grid(config.grid_points, config.cut)
}
