//! Error types
//!
//! Configuration errors are raised while building a plant or an estimator
//! and mean the caller must fix its inputs. Numerical errors are raised when
//! a solve cannot produce a trustworthy result; they carry enough context
//! (iteration count, residual, condition estimate) to diagnose the model.

use thiserror::Error;

/// Invalid model or estimator configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Invalid timestep: dt must be positive and finite, got {0}")]
    InvalidTimestep(f64),
    #[error("Invalid {name} dimension: expected {expected}, got {got}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Invalid {name}[{index}]: standard deviation must be positive and finite, got {value}")]
    NonPositiveStdDev {
        name: &'static str,
        index: usize,
        value: f64,
    },
    #[error("Invalid {name}: must be positive and finite, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },
    #[error("Invalid actuation bounds at input {index}: min {min} exceeds max {max}")]
    InvertedBounds { index: usize, min: f64, max: f64 },
    #[error("Matrix {name} contains non-finite entries")]
    NonFinite { name: &'static str },
}

/// Failure of a numerical solve
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalError {
    #[error("{context} is singular or ill-conditioned (condition estimate {condition:e})")]
    IllConditioned {
        context: &'static str,
        condition: f64,
    },
    #[error("Riccati iteration did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },
    #[error("Riccati iteration produced a non-finite covariance at iteration {iterations}")]
    NonFinite { iterations: usize },
}

/// Errors surfaced by estimator construction and time-step changes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Numerical error: {0}")]
    Numerical(#[from] NumericalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = NumericalError::NotConverged {
            iterations: 10_000,
            residual: 1.5e-3,
        };
        let msg = err.to_string();
        assert!(msg.contains("10000"));
        assert!(msg.contains("1.5e-3"));

        let err = ConfigurationError::DimensionMismatch {
            name: "state_std_devs",
            expected: 6,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid state_std_devs dimension: expected 6, got 3"
        );
    }

    #[test]
    fn test_estimator_error_from() {
        let err: EstimatorError = ConfigurationError::InvalidTimestep(0.0).into();
        assert!(matches!(
            err,
            EstimatorError::Configuration(ConfigurationError::InvalidTimestep(_))
        ));

        let err: EstimatorError = NumericalError::NonFinite { iterations: 3 }.into();
        assert!(matches!(err, EstimatorError::Numerical(_)));
    }
}
