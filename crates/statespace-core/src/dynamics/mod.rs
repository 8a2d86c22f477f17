//! Plant models
//!
//! - Continuous LTI systems with actuation bounds
//! - DC motor characterization for first-principles mechanism models

pub mod linear_system;
pub mod motor;

pub use linear_system::*;
pub use motor::*;
