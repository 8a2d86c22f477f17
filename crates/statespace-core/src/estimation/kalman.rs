//! Steady-state Kalman filter
//!
//! Constant-gain estimator for a continuous LTI plant sampled at a fixed
//! period. Construction discretizes the plant and solves the discrete
//! algebraic Riccati equation once; afterwards each control tick costs one
//! predict (x̂ ← Ad·x̂ + Bd·u) and one correct (x̂ ← x̂ + K·(y − C·x̂ − D·u)).
//!
//! The error covariance is the steady-state solution and is never updated by
//! predict or correct. A predict with a different dt rebuilds the discrete
//! model and gain for that dt.

use log::{debug, trace};

use crate::config::{EstimatorConfig, RiccatiConfig};
use crate::dynamics::LinearSystem;
use crate::error::EstimatorError;
use crate::estimation::steady_state::SteadyStateModel;
use crate::estimation::StateEstimator;
use crate::math::discretization::discretize_r;
use crate::math::matrix::make_covariance_matrix;
use crate::{Matrix, Vector};

/// Steady-state Kalman filter over a borrowed plant model
///
/// `N` states, `M` inputs, `P` outputs.
#[derive(Debug, Clone)]
pub struct KalmanFilter<'a, const N: usize, const M: usize, const P: usize> {
    /// Plant supplying A, B, C, D and the actuation bounds
    plant: &'a LinearSystem<N, M, P>,
    /// Continuous process noise covariance
    q: Matrix<N, N>,
    /// Riccati solver settings, reused when dt changes
    riccati: RiccatiConfig,
    /// Discrete model and gain for the current dt
    model: SteadyStateModel<N, M, P>,
    /// State estimate
    xhat: Vector<N>,
}

impl<'a, const N: usize, const M: usize, const P: usize> KalmanFilter<'a, N, M, P> {
    /// Create a filter with default Riccati settings
    ///
    /// # Arguments
    /// * `plant` - Continuous plant model
    /// * `state_std_devs` - Process noise standard deviation per state
    /// * `measurement_std_devs` - Measurement noise standard deviation per output
    /// * `dt` - Nominal sample period [s]
    pub fn new(
        plant: &'a LinearSystem<N, M, P>,
        state_std_devs: &Vector<N>,
        measurement_std_devs: &Vector<P>,
        dt: f64,
    ) -> Result<Self, EstimatorError> {
        Self::with_riccati_config(
            plant,
            state_std_devs,
            measurement_std_devs,
            dt,
            RiccatiConfig::default(),
        )
    }

    /// Create a filter with explicit Riccati settings
    pub fn with_riccati_config(
        plant: &'a LinearSystem<N, M, P>,
        state_std_devs: &Vector<N>,
        measurement_std_devs: &Vector<P>,
        dt: f64,
        riccati: RiccatiConfig,
    ) -> Result<Self, EstimatorError> {
        let q = make_covariance_matrix("state_std_devs", state_std_devs)?;
        let r = make_covariance_matrix("measurement_std_devs", measurement_std_devs)?;
        let rd = discretize_r(&r, dt)?;

        let model = SteadyStateModel::solve(plant, &q, rd, dt, &riccati)?;
        debug!(
            "Kalman filter ready: {N} states, {M} inputs, {P} outputs, dt {dt}s, \
             {} Riccati iterations",
            model.iterations
        );

        Ok(Self {
            plant,
            q,
            riccati,
            model,
            xhat: Vector::<N>::zeros(),
        })
    }

    /// Create a filter from a deserialized configuration
    ///
    /// # Errors
    /// `ConfigurationError::DimensionMismatch` when the configured vectors do
    /// not have N and P entries, plus everything [`Self::new`] reports.
    pub fn from_config(
        plant: &'a LinearSystem<N, M, P>,
        config: &EstimatorConfig,
    ) -> Result<Self, EstimatorError> {
        let state_std_devs = config.state_std_devs::<N>()?;
        let measurement_std_devs = config.measurement_std_devs::<P>()?;
        Self::with_riccati_config(
            plant,
            &state_std_devs,
            &measurement_std_devs,
            config.dt,
            config.riccati.clone(),
        )
    }

    /// Project the estimate forward: x̂ ← Ad·x̂ + Bd·u
    ///
    /// `u` is clamped to the plant's actuation bounds. When `dt` differs from
    /// the cached period, Ad, Bd, Qd, P∞ and K are rebuilt for it first; Rd
    /// keeps its construction-time value.
    ///
    /// # Errors
    /// Invalid `dt` or a failed Riccati solve. The estimate and the cached
    /// model are left unchanged in that case.
    pub fn predict(&mut self, u: &Vector<M>, dt: f64) -> Result<(), EstimatorError> {
        let u = self.plant.clamp_input(u);

        if !self.model.matches(dt) {
            debug!(
                "timestep changed from {}s to {dt}s, rebuilding steady-state model",
                self.model.dt
            );
            self.model = SteadyStateModel::solve(self.plant, &self.q, self.model.rd, dt, &self.riccati)?;
        }

        self.xhat = self.model.propagate(&self.xhat, &u);
        trace!("predict: xhat = {:?}", self.xhat.as_slice());
        Ok(())
    }

    /// Blend a measurement into the estimate: x̂ ← x̂ + K·(y − (C·x̂ + D·u))
    ///
    /// `u` should be the input applied when `y` was sampled; it is clamped
    /// to the actuation bounds like in [`Self::predict`].
    pub fn correct(&mut self, u: &Vector<M>, y: &Vector<P>) {
        let u = self.plant.clamp_input(u);
        let innovation = y - self.plant.calculate_y(&self.xhat, &u);
        self.xhat += self.model.k * innovation;
        trace!("correct: innovation = {:?}", innovation.as_slice());
    }

    pub fn xhat(&self) -> &Vector<N> {
        &self.xhat
    }

    /// Element `i` of the estimate, if in range
    pub fn xhat_at(&self, i: usize) -> Option<f64> {
        self.xhat.get(i).copied()
    }

    /// Seed the estimate, e.g. from a known starting pose
    pub fn set_xhat(&mut self, xhat: Vector<N>) {
        self.xhat = xhat;
    }

    /// Overwrite element `i` of the estimate
    ///
    /// # Panics
    /// If `i >= N`.
    pub fn set_xhat_at(&mut self, i: usize, value: f64) {
        self.xhat[i] = value;
    }

    /// Steady-state error covariance
    pub fn p(&self) -> &Matrix<N, N> {
        &self.model.p
    }

    /// Entry (i, j) of the steady-state error covariance, if in range
    pub fn p_at(&self, i: usize, j: usize) -> Option<f64> {
        self.model.p.get((i, j)).copied()
    }

    /// Steady-state Kalman gain
    pub fn k(&self) -> &Matrix<N, P> {
        &self.model.k
    }

    /// Sample period of the cached discrete model [s]
    pub fn dt(&self) -> f64 {
        self.model.dt
    }

    /// Cached discrete model and Riccati solution
    pub fn discrete_model(&self) -> &SteadyStateModel<N, M, P> {
        &self.model
    }

    pub fn plant(&self) -> &'a LinearSystem<N, M, P> {
        self.plant
    }

    /// Zero the estimate; P, K and the cached model are kept
    pub fn reset(&mut self) {
        self.xhat = Vector::<N>::zeros();
    }
}

impl<const N: usize, const M: usize, const P: usize> StateEstimator<N, M, P>
    for KalmanFilter<'_, N, M, P>
{
    fn predict(&mut self, u: &Vector<M>, dt: f64) -> Result<(), EstimatorError> {
        KalmanFilter::predict(self, u, dt)
    }

    fn correct(&mut self, u: &Vector<M>, y: &Vector<P>) {
        KalmanFilter::correct(self, u, y)
    }

    fn xhat(&self) -> &Vector<N> {
        KalmanFilter::xhat(self)
    }

    fn reset(&mut self) {
        KalmanFilter::reset(self)
    }
}
