// src/generator/sampling.rs

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::model::NormalParams;
use crate::errors::{CacheboundError, Result};

/// A normal distribution built from validated [`NormalParams`], with the
/// clamping helpers the generator needs.
#[derive(Debug, Clone, Copy)]
pub struct NormalSampler {
    normal: Normal<f64>,
}

impl NormalSampler {
    pub fn new(params: NormalParams) -> Result<Self> {
        let normal = Normal::new(params.mean, params.std).map_err(|e| {
            CacheboundError::ConfigError(format!(
                "invalid normal distribution (mean {}, std {}): {e}",
                params.mean, params.std
            ))
        })?;
        Ok(Self { normal })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.normal.sample(rng)
    }

    /// `|x|`: used for quantities that cannot be negative (sizes, times).
    pub fn sample_abs<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(rng).abs()
    }

    /// `trunc(|x|)`: used for counts (children, parents).
    pub fn sample_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_abs(rng) as usize
    }
}
