//! Fixed-size matrix plumbing
//!
//! Shape-parameterized helpers shared by the discretizer, the Riccati solver
//! and the estimator. Augmented block matrices whose size is a sum of const
//! generics are assembled as [`DMatrix`] and their blocks copied back into
//! fixed-size matrices.

use log::warn;
use nalgebra::DMatrix;

use crate::error::{ConfigurationError, NumericalError};
use crate::{Matrix, Vector};

/// Reject non-positive or non-finite timesteps
pub fn validate_timestep(dt: f64) -> Result<(), ConfigurationError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidTimestep(dt))
    }
}

/// Reject matrices containing NaN or infinite entries
pub fn ensure_finite<const R: usize, const C: usize>(
    name: &'static str,
    m: &Matrix<R, C>,
) -> Result<(), ConfigurationError> {
    if m.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigurationError::NonFinite { name })
    }
}

/// Build a diagonal covariance matrix diag(σ²) from standard deviations
///
/// # Arguments
/// * `name` - Label used in the error when a deviation is invalid
/// * `std_devs` - Standard deviation per channel, each positive and finite
pub fn make_covariance_matrix<const N: usize>(
    name: &'static str,
    std_devs: &Vector<N>,
) -> Result<Matrix<N, N>, ConfigurationError> {
    for (index, &value) in std_devs.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigurationError::NonPositiveStdDev { name, index, value });
        }
    }
    Ok(Matrix::<N, N>::from_diagonal(&std_devs.map(|s| s * s)))
}

/// Average a matrix with its transpose
pub fn symmetrize<const N: usize>(m: &Matrix<N, N>) -> Matrix<N, N> {
    (m + m.transpose()) * 0.5
}

/// Check symmetry entry-wise, relative to the largest entry magnitude
pub fn is_symmetric<const N: usize>(m: &Matrix<N, N>, tolerance: f64) -> bool {
    let scale = m.amax().max(1.0);
    (m - m.transpose()).amax() <= tolerance * scale
}

/// 2-norm condition number estimate σ_max / σ_min
///
/// Returns infinity for singular or non-finite matrices.
pub fn condition_number<const N: usize>(m: &Matrix<N, N>) -> f64 {
    if !m.iter().all(|v| v.is_finite()) {
        return f64::INFINITY;
    }
    let singular_values = DMatrix::from_column_slice(N, N, m.as_slice()).singular_values();
    let max = singular_values.max();
    let min = singular_values.min();
    if min > 0.0 {
        max / min
    } else {
        f64::INFINITY
    }
}

/// Invert a square matrix, refusing singular or ill-conditioned input
///
/// # Arguments
/// * `m` - Matrix to invert
/// * `context` - Name of the matrix, reported in the error
/// * `max_condition` - Largest accepted condition number
pub fn checked_inverse<const N: usize>(
    m: &Matrix<N, N>,
    context: &'static str,
    max_condition: f64,
) -> Result<Matrix<N, N>, NumericalError> {
    let condition = condition_number(m);
    if condition > max_condition {
        warn!("refusing to invert {context}: condition estimate {condition:e}");
        return Err(NumericalError::IllConditioned { context, condition });
    }
    m.try_inverse()
        .ok_or(NumericalError::IllConditioned { context, condition })
}

/// Copy a fixed-size block into a dynamic matrix at (row, col)
pub fn set_block<const R: usize, const C: usize>(
    dst: &mut DMatrix<f64>,
    row: usize,
    col: usize,
    src: &Matrix<R, C>,
) {
    dst.view_mut((row, col), (R, C)).copy_from(src);
}

/// Extract a fixed-size block of a dynamic matrix starting at (row, col)
pub fn block<const R: usize, const C: usize>(
    src: &DMatrix<f64>,
    row: usize,
    col: usize,
) -> Matrix<R, C> {
    src.fixed_view::<R, C>(row, col).into_owned()
}
