//! Seeded white-noise source
//!
//! Standard normal samples are drawn with the Box-Muller transform on top of
//! the uniform stream of `StdRng`, so a given seed always yields the same
//! sequence of samples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use statespace_core::Vector;

/// Gaussian white-noise generator
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Standard normal sample
    pub fn next_gaussian(&mut self) -> f64 {
        // 1 - U maps [0, 1) onto (0, 1], keeping ln finite
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();

        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    /// Zero-mean noise vector with per-element standard deviations
    ///
    /// Elements are drawn in index order.
    pub fn white_noise_vector<const N: usize>(&mut self, std_devs: &Vector<N>) -> Vector<N> {
        Vector::<N>::from_fn(|i, _| self.next_gaussian() * std_devs[i])
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self::new(12345)
    }
}
