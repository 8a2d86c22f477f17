//! Continuous linear time-invariant plant model
//!
//! dx/dt = A·x + B·u
//! y = C·x + D·u
//!
//! where:
//! - x: state (N)
//! - u: control input (M), bounded element-wise by [u_min, u_max]
//! - y: measured output (P)
//!
//! The model also carries a simulation state `x`. Estimators only read the
//! matrices and actuation bounds; `x` exists for simulation and tests.

use crate::dynamics::motor::DcMotor;
use crate::error::ConfigurationError;
use crate::math::discretization::discretize_ab;
use crate::math::matrix::ensure_finite;
use crate::{Matrix, Vector};

/// Continuous LTI plant with N states, M inputs and P outputs
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<const N: usize, const M: usize, const P: usize> {
    a: Matrix<N, N>,
    b: Matrix<N, M>,
    c: Matrix<P, N>,
    d: Matrix<P, M>,
    u_min: Vector<M>,
    u_max: Vector<M>,
    x: Vector<N>,
}

impl<const N: usize, const M: usize, const P: usize> LinearSystem<N, M, P> {
    /// Create a plant model
    ///
    /// # Arguments
    /// * `a` - System matrix
    /// * `b` - Input matrix
    /// * `c` - Output matrix
    /// * `d` - Feedthrough matrix
    /// * `u_min` - Lower actuation bound per input
    /// * `u_max` - Upper actuation bound per input
    ///
    /// # Errors
    /// Non-finite matrix entries, or `u_min[i] > u_max[i]` for some input.
    pub fn new(
        a: Matrix<N, N>,
        b: Matrix<N, M>,
        c: Matrix<P, N>,
        d: Matrix<P, M>,
        u_min: Vector<M>,
        u_max: Vector<M>,
    ) -> Result<Self, ConfigurationError> {
        ensure_finite("A", &a)?;
        ensure_finite("B", &b)?;
        ensure_finite("C", &c)?;
        ensure_finite("D", &d)?;
        ensure_finite("u_min", &u_min)?;
        ensure_finite("u_max", &u_max)?;

        for index in 0..M {
            if u_min[index] > u_max[index] {
                return Err(ConfigurationError::InvertedBounds {
                    index,
                    min: u_min[index],
                    max: u_max[index],
                });
            }
        }

        Ok(Self {
            a,
            b,
            c,
            d,
            u_min,
            u_max,
            x: Vector::<N>::zeros(),
        })
    }

    pub fn a(&self) -> &Matrix<N, N> {
        &self.a
    }

    pub fn b(&self) -> &Matrix<N, M> {
        &self.b
    }

    pub fn c(&self) -> &Matrix<P, N> {
        &self.c
    }

    pub fn d(&self) -> &Matrix<P, M> {
        &self.d
    }

    pub fn u_min(&self) -> &Vector<M> {
        &self.u_min
    }

    pub fn u_max(&self) -> &Vector<M> {
        &self.u_max
    }

    /// Current simulation state
    pub fn x(&self) -> &Vector<N> {
        &self.x
    }

    /// Element `i` of the simulation state, if in range
    pub fn x_at(&self, i: usize) -> Option<f64> {
        self.x.get(i).copied()
    }

    pub fn set_x(&mut self, x: Vector<N>) {
        self.x = x;
    }

    /// Overwrite element `i` of the simulation state
    ///
    /// # Panics
    /// If `i >= N`.
    pub fn set_x_at(&mut self, i: usize, value: f64) {
        self.x[i] = value;
    }

    /// Zero the simulation state
    pub fn reset(&mut self) {
        self.x = Vector::<N>::zeros();
    }

    /// Clamp a control input element-wise to the actuation bounds
    pub fn clamp_input(&self, u: &Vector<M>) -> Vector<M> {
        Vector::<M>::from_fn(|i, _| u[i].clamp(self.u_min[i], self.u_max[i]))
    }

    /// Propagate a state over `dt` seconds under a constant input (zero-order hold)
    pub fn calculate_x(
        &self,
        x: &Vector<N>,
        u: &Vector<M>,
        dt: f64,
    ) -> Result<Vector<N>, ConfigurationError> {
        let (ad, bd) = discretize_ab(&self.a, &self.b, dt)?;
        Ok(ad * x + bd * u)
    }

    /// Output for a given state and input
    pub fn calculate_y(&self, x: &Vector<N>, u: &Vector<M>) -> Vector<P> {
        self.c * x + self.d * u
    }

    /// Advance the simulation state by `dt` under the clamped input
    ///
    /// # Returns
    /// The output y at the new state
    pub fn update(&mut self, u: &Vector<M>, dt: f64) -> Result<Vector<P>, ConfigurationError> {
        let u = self.clamp_input(u);
        self.x = self.calculate_x(&self.x, &u, dt)?;
        Ok(self.calculate_y(&self.x, &u))
    }
}

impl LinearSystem<2, 1, 1> {
    /// Elevator carriage lifted by a cable drum
    ///
    /// States are [position (m), velocity (m/s)], the input is motor voltage
    /// and the output is position.
    ///
    /// # Arguments
    /// * `motor` - Drive motor(s)
    /// * `mass` - Carriage mass [kg]
    /// * `radius` - Drum radius [m]
    /// * `gearing` - Reduction from motor to drum (output/input > 1 is a reduction)
    /// * `max_voltage` - Symmetric voltage limit [V]
    pub fn elevator(
        motor: &DcMotor,
        mass: f64,
        radius: f64,
        gearing: f64,
        max_voltage: f64,
    ) -> Result<Self, ConfigurationError> {
        positive("mass", mass)?;
        positive("radius", radius)?;
        positive("gearing", gearing)?;
        positive("max_voltage", max_voltage)?;

        let (r, kv, kt) = (motor.resistance(), motor.kv(), motor.kt());
        let a = Matrix::<2, 2>::new(
            0.0,
            1.0,
            0.0,
            -gearing * gearing * kt / (r * radius * radius * mass * kv),
        );
        let b = Matrix::<2, 1>::new(0.0, gearing * kt / (r * radius * mass));

        Self::new(
            a,
            b,
            Matrix::<1, 2>::new(1.0, 0.0),
            Matrix::<1, 1>::zeros(),
            Vector::<1>::new(-max_voltage),
            Vector::<1>::new(max_voltage),
        )
    }

    /// Single-jointed arm, gravity neglected
    ///
    /// States are [angle (rad), angular velocity (rad/s)], the input is
    /// motor voltage and the output is angle.
    pub fn single_jointed_arm(
        motor: &DcMotor,
        moment_of_inertia: f64,
        gearing: f64,
        max_voltage: f64,
    ) -> Result<Self, ConfigurationError> {
        positive("moment_of_inertia", moment_of_inertia)?;
        positive("gearing", gearing)?;
        positive("max_voltage", max_voltage)?;

        let (r, kv, kt) = (motor.resistance(), motor.kv(), motor.kt());
        let a = Matrix::<2, 2>::new(
            0.0,
            1.0,
            0.0,
            -gearing * gearing * kt / (kv * r * moment_of_inertia),
        );
        let b = Matrix::<2, 1>::new(0.0, gearing * kt / (r * moment_of_inertia));

        Self::new(
            a,
            b,
            Matrix::<1, 2>::new(1.0, 0.0),
            Matrix::<1, 1>::zeros(),
            Vector::<1>::new(-max_voltage),
            Vector::<1>::new(max_voltage),
        )
    }
}

impl LinearSystem<1, 1, 1> {
    /// Flywheel; the single state and output is angular velocity (rad/s)
    pub fn flywheel(
        motor: &DcMotor,
        moment_of_inertia: f64,
        gearing: f64,
        max_voltage: f64,
    ) -> Result<Self, ConfigurationError> {
        positive("moment_of_inertia", moment_of_inertia)?;
        positive("gearing", gearing)?;
        positive("max_voltage", max_voltage)?;

        let (r, kv, kt) = (motor.resistance(), motor.kv(), motor.kt());
        Self::new(
            Matrix::<1, 1>::new(-gearing * gearing * kt / (kv * r * moment_of_inertia)),
            Matrix::<1, 1>::new(gearing * kt / (r * moment_of_inertia)),
            Matrix::<1, 1>::new(1.0),
            Matrix::<1, 1>::zeros(),
            Vector::<1>::new(-max_voltage),
            Vector::<1>::new(max_voltage),
        )
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositiveParameter { name, value })
    }
}
