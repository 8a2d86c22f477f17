//! Reference scenarios
//!
//! Plants and configurations used to exercise the steady-state filter end to
//! end:
//! - Elevator driven by two VEX 775pro motors (2 states, 5.05 ms loop)
//! - Planar drive with pose [x, y, θ] and velocities [vx, vy, ω] (6 states)
//!
//! The drive scenarios feed the filter zero control and measurements that are
//! pure zero-mean white noise, so a healthy estimate stays near the origin.
//! The tracking run closes the loop over a [`PlantSimulator`] instead.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use statespace_core::config::to_vector;
use statespace_core::{
    ConfigurationError, DcMotor, EstimatorConfig, EstimatorError, KalmanFilter, LinearSystem,
    Matrix, Vector,
};

use crate::noise::GaussianNoise;
use crate::simulator::PlantSimulator;

/// Planar drive: 6 states, 3 inputs, 3 outputs
pub type DrivePlant = LinearSystem<6, 3, 3>;

/// Elevator carriage on a 0.0181864 m drum, 5 kg, direct drive, 12 V limit
pub fn elevator_plant() -> Result<LinearSystem<2, 1, 1>, ConfigurationError> {
    LinearSystem::elevator(&DcMotor::vex_775_pro(2), 5.0, 0.0181864, 1.0, 12.0)
}

/// Planar drive modelled as three decoupled double integrators
///
/// State [x, y, θ, vx, vy, ω], input [ax, ay, α], output [x, y, θ].
/// Accelerations are limited to ±4 m/s² and ±12 rad/s².
pub fn planar_drive_plant() -> Result<DrivePlant, ConfigurationError> {
    let mut a = Matrix::<6, 6>::zeros();
    a[(0, 3)] = 1.0;
    a[(1, 4)] = 1.0;
    a[(2, 5)] = 1.0;

    let mut b = Matrix::<6, 3>::zeros();
    let mut c = Matrix::<3, 6>::zeros();
    for i in 0..3 {
        b[(3 + i, i)] = 1.0;
        c[(i, i)] = 1.0;
    }

    LinearSystem::new(
        a,
        b,
        c,
        Matrix::<3, 3>::zeros(),
        Vector::<3>::new(-4.0, -4.0, -12.0),
        Vector::<3>::new(4.0, 4.0, 12.0),
    )
}

/// Drive scenario configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    /// Filter process noise standard deviations (6)
    pub state_std_devs: Vec<f64>,
    /// Filter measurement noise standard deviations (3)
    pub measurement_std_devs: Vec<f64>,
    /// Standard deviations of the injected measurement noise (3)
    pub noise_std_devs: Vec<f64>,
    /// Loop period [s]
    pub dt: f64,
    /// Number of correct/predict cycles
    pub cycles: usize,
    /// Noise seed
    pub seed: u64,
    /// Plant state before the run (6)
    pub initial_state: Vec<f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::stationary_drive()
    }
}

impl ScenarioConfig {
    /// Stationary drive, unit measurement noise, 2 s at 50 Hz
    pub fn stationary_drive() -> Self {
        Self {
            name: "stationary_drive".to_string(),
            state_std_devs: vec![0.1; 6],
            measurement_std_devs: vec![2.0; 3],
            noise_std_devs: vec![1.0; 3],
            dt: 0.02,
            cycles: 100,
            seed: 2,
            initial_state: vec![0.0; 6],
        }
    }

    /// Drive plant moving at 0.5 m/s in x and y, 6 s at 50 Hz
    pub fn moving_drive() -> Self {
        Self {
            name: "moving_drive".to_string(),
            state_std_devs: vec![0.1; 6],
            measurement_std_devs: vec![4.0; 3],
            noise_std_devs: vec![0.1, 0.1, 0.25],
            dt: 0.02,
            cycles: 300,
            seed: 2,
            initial_state: vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.0],
        }
    }

    /// Filter configuration for this scenario
    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig::new(
            self.state_std_devs.clone(),
            self.measurement_std_devs.clone(),
            self.dt,
        )
    }
}

/// Outcome of a drive scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    /// Estimate after the last cycle
    pub final_estimate: Vector<6>,
    /// Plant state after the run
    pub plant_state: Vector<6>,
    /// Estimated x after each cycle
    pub x_estimates: Vec<f64>,
    /// Estimated y after each cycle
    pub y_estimates: Vec<f64>,
    /// Measured x fed to each cycle
    pub x_measurements: Vec<f64>,
    /// Measured y fed to each cycle
    pub y_measurements: Vec<f64>,
}

impl ScenarioReport {
    fn new(name: &str, cycles: usize) -> Self {
        Self {
            name: name.to_string(),
            final_estimate: Vector::<6>::zeros(),
            plant_state: Vector::<6>::zeros(),
            x_estimates: Vec::with_capacity(cycles),
            y_estimates: Vec::with_capacity(cycles),
            x_measurements: Vec::with_capacity(cycles),
            y_measurements: Vec::with_capacity(cycles),
        }
    }

    /// Number of recorded cycles
    pub fn len(&self) -> usize {
        self.x_estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_estimates.is_empty()
    }
}

/// Run a drive scenario
///
/// Each cycle draws a measurement from the noise source, corrects with zero
/// input, then predicts one period ahead with zero input.
///
/// # Errors
/// Invalid configuration (dimensions, standard deviations, dt) or a failed
/// Riccati solve.
pub fn run_drive_scenario(config: &ScenarioConfig) -> Result<ScenarioReport, EstimatorError> {
    let mut plant = planar_drive_plant()?;
    plant.set_x(to_vector("initial_state", &config.initial_state)?);
    let noise_std_devs: Vector<3> = to_vector("noise_std_devs", &config.noise_std_devs)?;

    let mut kf = KalmanFilter::from_config(&plant, &config.estimator_config())?;
    let mut noise = GaussianNoise::new(config.seed);
    let mut report = ScenarioReport::new(&config.name, config.cycles);
    let u = Vector::<3>::zeros();

    info!(
        "running scenario '{}': {} cycles at {}s, seed {}",
        config.name, config.cycles, config.dt, config.seed
    );

    for _ in 0..config.cycles {
        let y = noise.white_noise_vector(&noise_std_devs);

        kf.correct(&u, &y);
        kf.predict(&u, config.dt)?;

        report.x_measurements.push(y[0]);
        report.y_measurements.push(y[1]);
        report.x_estimates.push(kf.xhat()[0]);
        report.y_estimates.push(kf.xhat()[1]);
    }

    report.final_estimate = *kf.xhat();
    report.plant_state = *plant.x();
    debug!(
        "scenario '{}' finished: xhat = {:?}",
        config.name,
        report.final_estimate.as_slice()
    );
    Ok(report)
}

/// Truth and estimate history of a tracking run
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackingReport<const N: usize> {
    /// True state after each cycle
    pub truths: Vec<Vector<N>>,
    /// Estimate after each cycle
    pub estimates: Vec<Vector<N>>,
}

impl<const N: usize> TrackingReport<N> {
    /// Truth minus estimate after the last cycle
    pub fn final_error(&self) -> Option<Vector<N>> {
        Some(self.truths.last()? - self.estimates.last()?)
    }
}

/// Track a simulated plant under a constant input
///
/// Per cycle: measure the truth, correct, predict by `dt`, then advance the
/// truth by `dt`. The filter keeps whatever estimate it starts with.
pub fn run_tracking<const N: usize, const M: usize, const P: usize>(
    kf: &mut KalmanFilter<'_, N, M, P>,
    sim: &mut PlantSimulator<N, M, P>,
    u: &Vector<M>,
    dt: f64,
    cycles: usize,
) -> Result<TrackingReport<N>, EstimatorError> {
    let mut report = TrackingReport {
        truths: Vec::with_capacity(cycles),
        estimates: Vec::with_capacity(cycles),
    };

    let mut y = sim.measure(u);
    for _ in 0..cycles {
        kf.correct(u, &y);
        kf.predict(u, dt)?;
        y = sim.step(u, dt)?;

        report.truths.push(*sim.x());
        report.estimates.push(*kf.xhat());
    }

    Ok(report)
}
