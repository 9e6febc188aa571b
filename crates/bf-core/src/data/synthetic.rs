//! Seeded synthetic draws for demos, benches and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{InferenceData, POSTERIOR, PRIOR};

/// `n` normal draws via the Box-Muller transform.
pub fn normal_draws<R: Rng + ?Sized>(rng: &mut R, n: usize, mean: f64, sd: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        // u1 in (0, 1] keeps ln finite
        let u1: f64 = 1.0 - rng.random::<f64>();
        let u2: f64 = rng.random();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = std::f64::consts::TAU * u2;
        out.push(mean + sd * r * theta.cos());
        if out.len() < n {
            out.push(mean + sd * r * theta.sin());
        }
    }
    out
}

/// Dataset with `posterior.a ~ N(1, 0.5)` and `prior.a ~ N(0, 1)`.
pub fn demo_dataset(seed: u64, n: usize) -> InferenceData {
    let mut rng = StdRng::seed_from_u64(seed);
    let posterior = normal_draws(&mut rng, n, 1.0, 0.5);
    let prior = normal_draws(&mut rng, n, 0.0, 1.0);
    InferenceData::new()
        .with_var(POSTERIOR, "a", posterior)
        .with_var(PRIOR, "a", prior)
}
