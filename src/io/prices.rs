// src/io/prices.rs

use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Generates a price path that never changes.
pub fn generate_constant_prices(steps: usize, value: f64) -> Vec<f64> {
    vec![value; steps]
}

/// Generates a price path sampled from a Normal distribution.
///
/// Negative samples are clamped to 0.
///
/// # Arguments
/// * `steps` - Length of the path.
/// * `mean` - The average price (e.g., 100.0).
/// * `std_dev` - How far prices wander around the mean (e.g., 5.0).
/// * `rng` - Generator to sample from; pass a seeded one for reproducible paths.
pub fn generate_normal_prices<R: Rng + ?Sized>(
    steps: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> SimResult<Vec<f64>> {
    if !(std_dev >= 0.0) {
        return Err(SimError::Distribution(format!(
            "std_dev must be non-negative, got {}",
            std_dev
        )));
    }
    let normal = Normal::new(mean, std_dev).map_err(|e| {
        SimError::Distribution(format!("normal(mean={}, std_dev={}): {}", mean, std_dev, e))
    })?;

    Ok((0..steps).map(|_| normal.sample(rng).max(0.0)).collect())
}

/// Generates a straight-line markdown from `start` to `end`.
///
/// The first entry is `start` and the last is `end`; a single step yields
/// just `start`.
pub fn generate_markdown_prices(steps: usize, start: f64, end: f64) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let increment = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + increment * i as f64).collect()
        }
    }
}
