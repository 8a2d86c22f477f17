//! Estimator configuration
//!
//! Configuration parameters for the steady-state Kalman filter and the
//! Riccati solver behind it. Vectors are stored untyped so configurations
//! can be deserialized; they are validated against the plant dimensions
//! when the filter is built.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::Vector;

/// Riccati solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiccatiConfig {
    /// Convergence threshold on ‖P_{k+1} − P_k‖_F relative to ‖P_k‖_F
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Largest condition number accepted when inverting C·P·Cᵀ + Rd
    ///
    /// The check uses the 2-norm condition number, so it also rejects
    /// diagonal innovation covariances that invert exactly but whose output
    /// noise levels differ by more than this ratio, e.g. Rd = diag(2e-6, 1e7).
    /// Raise it for plants mixing very precise and very noisy sensors.
    pub max_condition: f64,
}

impl Default for RiccatiConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 10_000,
            max_condition: 1e12,
        }
    }
}

/// Steady-state Kalman filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Process noise standard deviation per state (length N)
    pub state_std_devs: Vec<f64>,
    /// Measurement noise standard deviation per output (length P)
    pub measurement_std_devs: Vec<f64>,
    /// Nominal loop period [s]
    pub dt: f64,
    /// Riccati solver settings
    #[serde(default)]
    pub riccati: RiccatiConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            state_std_devs: Vec::new(),
            measurement_std_devs: Vec::new(),
            dt: 0.020, // 50 Hz control loop
            riccati: RiccatiConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn new(state_std_devs: Vec<f64>, measurement_std_devs: Vec<f64>, dt: f64) -> Self {
        Self {
            state_std_devs,
            measurement_std_devs,
            dt,
            riccati: RiccatiConfig::default(),
        }
    }

    /// Process noise standard deviations as a fixed-size vector
    pub fn state_std_devs<const N: usize>(&self) -> Result<Vector<N>, ConfigurationError> {
        to_vector("state_std_devs", &self.state_std_devs)
    }

    /// Measurement noise standard deviations as a fixed-size vector
    pub fn measurement_std_devs<const P: usize>(&self) -> Result<Vector<P>, ConfigurationError> {
        to_vector("measurement_std_devs", &self.measurement_std_devs)
    }
}

/// Convert an untyped configuration vector into a fixed-size one
///
/// # Errors
/// `ConfigurationError::DimensionMismatch` unless `values` has exactly N entries.
pub fn to_vector<const N: usize>(
    name: &'static str,
    values: &[f64],
) -> Result<Vector<N>, ConfigurationError> {
    if values.len() != N {
        return Err(ConfigurationError::DimensionMismatch {
            name,
            expected: N,
            got: values.len(),
        });
    }
    Ok(Vector::<N>::from_column_slice(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_riccati_config() {
        let config = RiccatiConfig::default();
        assert_eq!(config.max_iterations, 10_000);
        assert!(config.tolerance > 0.0 && config.tolerance < 1e-6);
    }

    #[test]
    fn test_typed_std_devs() {
        let config = EstimatorConfig::new(vec![0.05, 1.0], vec![0.0001], 0.00505);

        let q = config.state_std_devs::<2>().unwrap();
        assert_eq!(q[0], 0.05);
        assert_eq!(q[1], 1.0);

        let r = config.measurement_std_devs::<1>().unwrap();
        assert_eq!(r[0], 0.0001);
    }

    #[test]
    fn test_dimension_mismatch() {
        let config = EstimatorConfig::new(vec![0.1; 3], vec![1.0; 3], 0.02);

        let err = config.state_std_devs::<6>().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DimensionMismatch {
                name: "state_std_devs",
                expected: 6,
                got: 3,
            }
        );
    }
}
