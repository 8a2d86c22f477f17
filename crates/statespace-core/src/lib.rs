//! # Statespace Core
//!
//! Steady-state Kalman filtering for linear time-invariant (LTI) plants,
//! sized for a fixed-period robot control loop.
//!
//! A continuous plant model `dx/dt = Ax + Bu`, `y = Cx + Du` together with
//! per-state and per-output noise standard deviations is converted into an
//! exact discrete model, the discrete algebraic Riccati equation is solved
//! once for the steady-state error covariance and gain, and the estimator
//! then runs a constant-gain predict/correct cycle every tick.
//!
//! ## Modules
//!
//! - [`math`]: Fixed-size matrix plumbing, discretization, Riccati solver
//! - [`dynamics`]: Plant models (LTI systems, DC motor characterization)
//! - [`estimation`]: Steady-state Kalman filter and its dt-keyed cache
//! - [`config`]: Serializable estimator and solver configuration
//! - [`error`]: Configuration and numerical error types

pub mod math;
pub mod dynamics;
pub mod estimation;
pub mod config;
pub mod error;

pub use config::{EstimatorConfig, RiccatiConfig};
pub use dynamics::{DcMotor, LinearSystem};
pub use error::{ConfigurationError, EstimatorError, NumericalError};
pub use estimation::{KalmanFilter, StateEstimator, SteadyStateModel};

/// Fixed-size `R x C` matrix of doubles
pub type Matrix<const R: usize, const C: usize> = nalgebra::SMatrix<f64, R, C>;

/// Fixed-size column vector of doubles
pub type Vector<const N: usize> = nalgebra::SVector<f64, N>;
