//! State estimation
//!
//! - Steady-state (constant gain) Kalman filter for LTI plants
//! - dt-keyed cache of the discrete model and Riccati solution

pub mod kalman;
pub mod steady_state;

pub use kalman::*;
pub use steady_state::*;

use crate::error::EstimatorError;
use crate::Vector;

/// Common interface of the estimators driven once per control tick
pub trait StateEstimator<const N: usize, const M: usize, const P: usize> {
    /// Project the estimate forward by `dt` under input `u`
    fn predict(&mut self, u: &Vector<M>, dt: f64) -> Result<(), EstimatorError>;

    /// Blend measurement `y`, taken while `u` was applied, into the estimate
    fn correct(&mut self, u: &Vector<M>, y: &Vector<P>);

    /// Current state estimate
    fn xhat(&self) -> &Vector<N>;

    /// Forget the current estimate
    fn reset(&mut self);
}
