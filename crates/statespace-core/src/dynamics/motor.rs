//! Brushed DC motor characterization
//!
//! Motor constants derived from the nominal datasheet values, used to build
//! first-principles plant models for mechanisms driven by DC motors.

use serde::{Deserialize, Serialize};

/// Conversion factor from revolutions per minute to radians per second
const RPM_TO_RAD_PER_SEC: f64 = std::f64::consts::TAU / 60.0;

/// DC motor (or gang of identical motors) parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcMotor {
    /// Voltage at which the datasheet values were measured [V]
    pub nominal_voltage: f64,
    /// Stall torque [N·m]
    pub stall_torque: f64,
    /// Stall current [A]
    pub stall_current: f64,
    /// Free-running current [A]
    pub free_current: f64,
    /// Free-running speed [rad/s]
    pub free_speed: f64,
}

impl DcMotor {
    /// Create a motor model for `num_motors` identical motors driving the same shaft
    ///
    /// Torque and currents scale with the motor count; speed does not.
    pub fn new(
        nominal_voltage: f64,
        stall_torque: f64,
        stall_current: f64,
        free_current: f64,
        free_speed: f64,
        num_motors: usize,
    ) -> Self {
        let n = num_motors as f64;
        Self {
            nominal_voltage,
            stall_torque: stall_torque * n,
            stall_current: stall_current * n,
            free_current: free_current * n,
            free_speed,
        }
    }

    /// VEX 775pro
    pub fn vex_775_pro(num_motors: usize) -> Self {
        Self::new(12.0, 0.71, 134.0, 0.7, 18730.0 * RPM_TO_RAD_PER_SEC, num_motors)
    }

    /// CIM
    pub fn cim(num_motors: usize) -> Self {
        Self::new(12.0, 2.42, 133.0, 2.7, 5310.0 * RPM_TO_RAD_PER_SEC, num_motors)
    }

    /// Winding resistance [Ω]
    pub fn resistance(&self) -> f64 {
        self.nominal_voltage / self.stall_current
    }

    /// Velocity constant Kv [rad/s per V]
    pub fn kv(&self) -> f64 {
        self.free_speed / (self.nominal_voltage - self.resistance() * self.free_current)
    }

    /// Torque constant Kt [N·m per A]
    pub fn kt(&self) -> f64 {
        self.stall_torque / self.stall_current
    }
}
