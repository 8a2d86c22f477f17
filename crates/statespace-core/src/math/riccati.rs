//! Discrete algebraic Riccati equation (DARE) solver
//!
//! Iterates the estimator form of the Riccati recursion
//!
//! P_{k+1} = Ad·P_k·Adᵀ − Ad·P_k·Cᵀ·(C·P_k·Cᵀ + Rd)⁻¹·C·P_k·Adᵀ + Qd
//!
//! from P_0 = Qd until the Frobenius norm of the update falls below a
//! tolerance relative to ‖P_k‖, then derives the steady-state gain
//!
//! K = P·Cᵀ·(C·P·Cᵀ + Rd)⁻¹

use log::{debug, warn};

use crate::config::RiccatiConfig;
use crate::error::NumericalError;
use crate::math::matrix::{checked_inverse, symmetrize};
use crate::Matrix;

const INNOVATION_COVARIANCE: &str = "innovation covariance C·P·Cᵀ + Rd";

/// Converged steady-state solution
#[derive(Debug, Clone, PartialEq)]
pub struct RiccatiSolution<const N: usize, const P: usize> {
    /// Steady-state error covariance P∞
    pub p: Matrix<N, N>,
    /// Steady-state Kalman gain
    pub k: Matrix<N, P>,
    /// Iterations used
    pub iterations: usize,
    /// Frobenius norm of the final update
    pub residual: f64,
}

/// Solve for the steady-state error covariance and Kalman gain
///
/// # Arguments
/// * `ad` - Discrete system matrix
/// * `c` - Output matrix
/// * `qd` - Discrete process noise covariance (symmetric PSD)
/// * `rd` - Discrete measurement noise covariance (symmetric PD)
/// * `config` - Tolerance, iteration cap and conditioning threshold
///
/// # Errors
/// [`NumericalError::IllConditioned`] if the innovation covariance cannot be
/// inverted at some iteration, [`NumericalError::NonFinite`] if the iterate
/// blows up, [`NumericalError::NotConverged`] if the cap is reached.
pub fn solve_steady_state<const N: usize, const P: usize>(
    ad: &Matrix<N, N>,
    c: &Matrix<P, N>,
    qd: &Matrix<N, N>,
    rd: &Matrix<P, P>,
    config: &RiccatiConfig,
) -> Result<RiccatiSolution<N, P>, NumericalError> {
    let ad_t = ad.transpose();
    let c_t = c.transpose();

    let mut p = *qd;
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let s = c * p * c_t + rd;
        let s_inv = checked_inverse(&s, INNOVATION_COVARIANCE, config.max_condition)?;

        let ad_p_ct = ad * p * c_t;
        let next = symmetrize(&(ad * p * ad_t - ad_p_ct * s_inv * ad_p_ct.transpose() + qd));

        if !next.iter().all(|v| v.is_finite()) {
            warn!("Riccati iterate became non-finite at iteration {iteration}");
            return Err(NumericalError::NonFinite {
                iterations: iteration,
            });
        }

        residual = (next - p).norm();
        let scale = p.norm();
        // ‖·‖_F overflows long before the entries do
        if !(residual.is_finite() && scale.is_finite()) {
            warn!("Riccati iterate norm overflowed at iteration {iteration}");
            return Err(NumericalError::NonFinite {
                iterations: iteration,
            });
        }
        p = next;

        if residual <= config.tolerance * scale {
            let k = steady_state_gain(&p, c, rd, config)?;
            debug!(
                "Riccati converged after {iteration} iterations (residual {residual:e}, ‖P‖ {:e})",
                p.norm()
            );
            return Ok(RiccatiSolution {
                p,
                k,
                iterations: iteration,
                residual,
            });
        }
    }

    warn!(
        "Riccati iteration hit the cap of {} iterations (residual {residual:e})",
        config.max_iterations
    );
    Err(NumericalError::NotConverged {
        iterations: config.max_iterations,
        residual,
    })
}

/// Kalman gain K = P·Cᵀ·(C·P·Cᵀ + Rd)⁻¹ for a given covariance
pub fn steady_state_gain<const N: usize, const P: usize>(
    p: &Matrix<N, N>,
    c: &Matrix<P, N>,
    rd: &Matrix<P, P>,
    config: &RiccatiConfig,
) -> Result<Matrix<N, P>, NumericalError> {
    let c_t = c.transpose();
    let s_inv = checked_inverse(&(c * p * c_t + rd), INNOVATION_COVARIANCE, config.max_condition)?;
    Ok(p * c_t * s_inv)
}
