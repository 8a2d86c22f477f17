//! Mathematical utilities for state-space estimation
//!
//! Implements fixed-size matrix helpers, exact discretization of continuous
//! LTI models (Van Loan's method), and the discrete algebraic Riccati solver.

pub mod matrix;
pub mod discretization;
pub mod riccati;

pub use matrix::*;
pub use discretization::*;
pub use riccati::*;
