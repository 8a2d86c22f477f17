//! Ground-truth plant simulation
//!
//! Advances its own copy of a plant with the exact zero-order-hold
//! discretization and reports outputs corrupted by white measurement noise.

use log::trace;

use statespace_core::{ConfigurationError, LinearSystem, Vector};

use crate::noise::GaussianNoise;

/// Noisy simulation of an LTI plant
#[derive(Debug, Clone)]
pub struct PlantSimulator<const N: usize, const M: usize, const P: usize> {
    /// Ground-truth plant, including its state
    plant: LinearSystem<N, M, P>,
    /// Measurement noise standard deviation per output
    measurement_std_devs: Vector<P>,
    /// Noise source
    noise: GaussianNoise,
    /// Simulated time [s]
    time: f64,
}

impl<const N: usize, const M: usize, const P: usize> PlantSimulator<N, M, P> {
    /// Create a simulator starting from the plant's current state
    ///
    /// # Arguments
    /// * `plant` - Plant to simulate; cloned, the caller's copy is untouched
    /// * `measurement_std_devs` - Noise standard deviation per output
    /// * `seed` - Noise seed
    pub fn new(plant: &LinearSystem<N, M, P>, measurement_std_devs: Vector<P>, seed: u64) -> Self {
        Self {
            plant: plant.clone(),
            measurement_std_devs,
            noise: GaussianNoise::new(seed),
            time: 0.0,
        }
    }

    /// Advance the true state by `dt` and return a noisy measurement of it
    pub fn step(&mut self, u: &Vector<M>, dt: f64) -> Result<Vector<P>, ConfigurationError> {
        let y = self.plant.update(u, dt)?;
        self.time += dt;
        trace!("t = {:.4}s: x = {:?}", self.time, self.plant.x().as_slice());
        Ok(y + self.noise.white_noise_vector(&self.measurement_std_devs))
    }

    /// Noisy measurement of the current true state, without advancing it
    pub fn measure(&mut self, u: &Vector<M>) -> Vector<P> {
        let u = self.plant.clamp_input(u);
        self.plant.calculate_y(self.plant.x(), &u)
            + self.noise.white_noise_vector(&self.measurement_std_devs)
    }

    /// True state
    pub fn x(&self) -> &Vector<N> {
        self.plant.x()
    }

    pub fn set_x(&mut self, x: Vector<N>) {
        self.plant.set_x(x);
    }

    pub fn plant(&self) -> &LinearSystem<N, M, P> {
        &self.plant
    }

    /// Simulated time [s]
    pub fn time(&self) -> f64 {
        self.time
    }
}
