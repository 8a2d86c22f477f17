//! Discrete model and steady-state gain cache
//!
//! Everything the estimator derives from the continuous plant for one
//! sample period: Ad, Bd, Qd, Rd and the Riccati solution (P∞, K). The
//! estimator keeps exactly one of these, keyed by its dt, and rebuilds it
//! only when a different dt is requested.

use crate::config::RiccatiConfig;
use crate::dynamics::LinearSystem;
use crate::error::EstimatorError;
use crate::math::discretization::{discretize_aq, discretize_b};
use crate::math::riccati::solve_steady_state;
use crate::{Matrix, Vector};

/// Discrete model and steady-state solution for one sample period
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateModel<const N: usize, const M: usize, const P: usize> {
    /// Sample period the model was derived for [s]
    pub dt: f64,
    /// Discrete system matrix
    pub ad: Matrix<N, N>,
    /// Discrete input matrix
    pub bd: Matrix<N, M>,
    /// Discrete process noise covariance
    pub qd: Matrix<N, N>,
    /// Discrete measurement noise covariance
    pub rd: Matrix<P, P>,
    /// Steady-state error covariance
    pub p: Matrix<N, N>,
    /// Steady-state Kalman gain
    pub k: Matrix<N, P>,
    /// Riccati iterations used to reach `p`
    pub iterations: usize,
}

impl<const N: usize, const M: usize, const P: usize> SteadyStateModel<N, M, P> {
    /// Discretize the plant for `dt` and solve for the steady-state gain
    ///
    /// # Arguments
    /// * `plant` - Continuous plant
    /// * `q` - Continuous process noise covariance
    /// * `rd` - Discrete measurement noise covariance
    /// * `dt` - Sample period [s]
    /// * `config` - Riccati solver settings
    pub fn solve(
        plant: &LinearSystem<N, M, P>,
        q: &Matrix<N, N>,
        rd: Matrix<P, P>,
        dt: f64,
        config: &RiccatiConfig,
    ) -> Result<Self, EstimatorError> {
        let (ad, qd) = discretize_aq(plant.a(), q, dt)?;
        let bd = discretize_b(plant.a(), plant.b(), dt)?;
        let solution = solve_steady_state(&ad, plant.c(), &qd, &rd, config)?;

        Ok(Self {
            dt,
            ad,
            bd,
            qd,
            rd,
            p: solution.p,
            k: solution.k,
            iterations: solution.iterations,
        })
    }

    /// Whether this model was derived for exactly `dt`
    pub fn matches(&self, dt: f64) -> bool {
        self.dt == dt
    }

    /// One-step state prediction Ad·x + Bd·u
    pub fn propagate(&self, x: &Vector<N>, u: &Vector<M>) -> Vector<N> {
        self.ad * x + self.bd * u
    }
}
