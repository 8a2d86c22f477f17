//! # Statespace Sim
//!
//! Simulation harness for the `statespace-core` estimators.
//!
//! ## Modules
//!
//! - [`noise`]: Seeded Gaussian white noise
//! - [`simulator`]: Ground-truth plant simulation with noisy measurements
//! - [`scenarios`]: Reference plants, scenario presets and runners

pub mod noise;
pub mod simulator;
pub mod scenarios;

pub use noise::GaussianNoise;
pub use simulator::PlantSimulator;
pub use scenarios::{
    elevator_plant, planar_drive_plant, run_drive_scenario, run_tracking, ScenarioConfig,
    ScenarioReport, TrackingReport,
};
