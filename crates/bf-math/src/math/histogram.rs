//! Density-normalised histograms for discrete draws.

use super::DensityError;

/// Bin edges and per-bin densities; `edges.len() == density.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub density: Vec<f64>,
}

impl Histogram {
    /// Area under the bars; 1 for any non-empty input.
    pub fn area(&self) -> f64 {
        self.edges
            .windows(2)
            .zip(&self.density)
            .map(|(e, d)| (e[1] - e[0]) * d)
            .sum()
    }
}

/// Upper bound on unit bins before callers should switch to fixed bins.
pub const MAX_INTEGER_BINS: usize = 10_000;

/// One unit-wide bin centred on every integer between the extreme draws.
pub fn integer_histogram(draws: &[i64]) -> Result<Histogram, DensityError> {
    let (Some(&lo), Some(&hi)) = (draws.iter().min(), draws.iter().max()) else {
        return Err(DensityError::Empty);
    };
    let span = hi
        .checked_sub(lo)
        .and_then(|d| usize::try_from(d).ok())
        .filter(|&d| d < MAX_INTEGER_BINS)
        .ok_or(DensityError::InvalidGrid(MAX_INTEGER_BINS))?
        + 1;
    let mut counts = vec![0usize; span];
    for &d in draws {
        counts[(d - lo) as usize] += 1;
    }
    let n = draws.len() as f64;
    Ok(Histogram {
        edges: (0..=span).map(|i| lo as f64 - 0.5 + i as f64).collect(),
        density: counts.into_iter().map(|c| c as f64 / n).collect(),
    })
}

/// `bins` equal-width bins over `[min - 0.5, max + 0.5]`.
pub fn binned_histogram(draws: &[f64], bins: usize) -> Result<Histogram, DensityError> {
    if bins == 0 {
        return Err(DensityError::InvalidGrid(0));
    }
    if let Some((index, &value)) = draws.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DensityError::NonFinite { index, value });
    }
    let (lo, hi) = super::summary::min_max(draws).ok_or(DensityError::Empty)?;
    let (lo, hi) = (lo - 0.5, hi + 0.5);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &d in draws {
        let idx = (((d - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let n = draws.len() as f64;
    Ok(Histogram {
        edges: (0..=bins).map(|i| lo + i as f64 * width).collect(),
        density: counts.into_iter().map(|c| c as f64 / (n * width)).collect(),
    })
}
