//! Exact discretization of continuous LTI models
//!
//! Converts the continuous model
//!
//! dx/dt = A·x + B·u + w,  w ~ N(0, Q)
//! y = C·x + D·u + v,      v ~ N(0, R)
//!
//! into its zero-order-hold equivalent over a sample period dt:
//!
//! x[k+1] = Ad·x[k] + Bd·u[k] + w[k],  w[k] ~ N(0, Qd)
//! y[k] = C·x[k] + D·u[k] + v[k],      v[k] ~ N(0, Rd)
//!
//! All blocks come from matrix exponentials of augmented matrices, so the
//! results are exact for any A, including singular or nilpotent ones.

use nalgebra::DMatrix;

use crate::error::ConfigurationError;
use crate::math::matrix::{block, set_block, symmetrize, validate_timestep};
use crate::Matrix;

/// Discretize the system matrix and process noise (Van Loan's method)
///
/// Exponentiates
///
/// ```text
/// M = [ -A   Q  ] · dt
///     [  0   Aᵀ ]
/// ```
///
/// and partitions Φ = e^M into n×n blocks; Ad = Φ22ᵀ and Qd = Ad·Φ12.
///
/// # Arguments
/// * `a` - Continuous system matrix
/// * `q` - Continuous process noise intensity
/// * `dt` - Sample period [s], positive
///
/// # Returns
/// (Ad, Qd), with Qd symmetric positive-semidefinite
pub fn discretize_aq<const N: usize>(
    a: &Matrix<N, N>,
    q: &Matrix<N, N>,
    dt: f64,
) -> Result<(Matrix<N, N>, Matrix<N, N>), ConfigurationError> {
    validate_timestep(dt)?;

    let mut m = DMatrix::zeros(2 * N, 2 * N);
    set_block(&mut m, 0, 0, &(-*a * dt));
    set_block(&mut m, 0, N, &(*q * dt));
    set_block(&mut m, N, N, &(a.transpose() * dt));

    let phi = m.exp();
    let phi12: Matrix<N, N> = block(&phi, 0, N);
    let phi22: Matrix<N, N> = block(&phi, N, N);

    let ad = phi22.transpose();
    let qd = symmetrize(&(ad * phi12));

    Ok((ad, qd))
}

/// Discretize the system and input matrices together
///
/// Exponentiates
///
/// ```text
/// M = [ A  B ] · dt
///     [ 0  0 ]
/// ```
///
/// The top-left block of e^M is e^(A·dt) and the top-right block is
/// ∫₀^dt e^(Aτ)dτ·B.
///
/// # Returns
/// (Ad, Bd)
pub fn discretize_ab<const N: usize, const M: usize>(
    a: &Matrix<N, N>,
    b: &Matrix<N, M>,
    dt: f64,
) -> Result<(Matrix<N, N>, Matrix<N, M>), ConfigurationError> {
    validate_timestep(dt)?;

    let mut m = DMatrix::zeros(N + M, N + M);
    set_block(&mut m, 0, 0, &(*a * dt));
    set_block(&mut m, 0, N, &(*b * dt));

    let phi = m.exp();
    Ok((block(&phi, 0, 0), block(&phi, 0, N)))
}

/// Discretize the input matrix
pub fn discretize_b<const N: usize, const M: usize>(
    a: &Matrix<N, N>,
    b: &Matrix<N, M>,
    dt: f64,
) -> Result<Matrix<N, M>, ConfigurationError> {
    discretize_ab(a, b, dt).map(|(_, bd)| bd)
}

/// Discretize measurement noise
///
/// The continuous R is a power spectral density, so the per-sample
/// covariance is Rd = R / dt.
pub fn discretize_r<const P: usize>(
    r: &Matrix<P, P>,
    dt: f64,
) -> Result<Matrix<P, P>, ConfigurationError> {
    validate_timestep(dt)?;
    Ok(*r / dt)
}
