//! Estimator Validation Tests
//!
//! End-to-end checks of the steady-state Kalman filter through the public API:
//! 1. Construction on a motor-driven elevator produces a valid P∞ and K
//! 2. Discretization yields a symmetric PSD Qd for assorted plants
//! 3. The steady-state gain satisfies K = P·Cᵀ·(C·P·Cᵀ + Rd)⁻¹
//! 4. A plant without dynamics is a fixed point of predict

use approx::assert_relative_eq;
use nalgebra::{DMatrix, Matrix2, Matrix2x1, Matrix3, Vector1, Vector2, Vector3};

use statespace_core::dynamics::{DcMotor, LinearSystem};
use statespace_core::estimation::{KalmanFilter, StateEstimator};
use statespace_core::math::discretization::{discretize_aq, discretize_r};
use statespace_core::math::matrix::{is_symmetric, make_covariance_matrix};
use statespace_core::math::riccati::solve_steady_state;
use statespace_core::{EstimatorConfig, Matrix, RiccatiConfig};

fn elevator() -> LinearSystem<2, 1, 1> {
    LinearSystem::elevator(&DcMotor::vex_775_pro(2), 5.0, 0.0181864, 1.0, 12.0).unwrap()
}

fn assert_psd<const N: usize>(m: &Matrix<N, N>) {
    let eigenvalues = DMatrix::from_column_slice(N, N, m.as_slice()).symmetric_eigenvalues();
    for lambda in eigenvalues.iter() {
        assert!(*lambda >= -1e-12 * m.norm().max(1.0), "eigenvalue {lambda}");
    }
}

/// Elevator: 2 states, voltage in, position out, 5.05 ms loop
mod elevator_tests {
    use super::*;

    const DT: f64 = 0.00505;

    #[test]
    fn test_elevator_steady_state_is_valid() {
        let plant = elevator();
        let kf = KalmanFilter::new(&plant, &Vector2::new(0.05, 1.0), &Vector1::new(0.0001), DT)
            .unwrap();

        assert!(kf.p().iter().all(|v| v.is_finite()));
        assert!(kf.xhat().iter().all(|v| v.is_finite()));
        assert!(is_symmetric(kf.p(), 1e-12));
        assert_psd(kf.p());
        assert!(kf.discrete_model().iterations < RiccatiConfig::default().max_iterations);
    }

    #[test]
    fn test_elevator_from_config() {
        let plant = elevator();
        let config = EstimatorConfig::new(vec![0.05, 1.0], vec![0.0001], DT);

        let kf = KalmanFilter::from_config(&plant, &config).unwrap();

        assert_eq!(kf.dt(), DT);
        assert!(kf.k().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_elevator_position_tracks_measurements() {
        let plant = elevator();
        let mut kf =
            KalmanFilter::new(&plant, &Vector2::new(0.05, 1.0), &Vector1::new(0.0001), DT)
                .unwrap();

        // Position sensor is far more trusted than the model
        for _ in 0..200 {
            kf.correct(&Vector1::zeros(), &Vector1::new(0.5));
            kf.predict(&Vector1::zeros(), DT).unwrap();
        }

        assert_relative_eq!(kf.xhat()[0], 0.5, epsilon = 1e-3);
        assert!(kf.xhat()[1].abs() < 0.1);
    }

    #[test]
    fn test_elevator_input_saturates() {
        let plant = elevator();
        let mut a =
            KalmanFilter::new(&plant, &Vector2::new(0.05, 1.0), &Vector1::new(0.0001), DT)
                .unwrap();
        let mut b = a.clone();

        a.predict(&Vector1::new(100.0), DT).unwrap();
        b.predict(&Vector1::new(12.0), DT).unwrap();

        assert_eq!(a.xhat(), b.xhat());
        assert!(a.xhat()[1] > 0.0);
    }
}

/// Van Loan discretization: Qd must come out symmetric PSD
mod discretization_tests {
    use super::*;

    #[test]
    fn test_process_noise_is_symmetric_psd() {
        let q2 = make_covariance_matrix("q", &Vector2::new(0.05, 1.0)).unwrap();
        let q3 = make_covariance_matrix("q", &Vector3::new(0.3, 0.1, 2.0)).unwrap();

        let plant = elevator();
        let (_, qd) = discretize_aq(plant.a(), &q2, 0.00505).unwrap();
        assert!(is_symmetric(&qd, 1e-12));
        assert_psd(&qd);

        let rotation = Matrix2::new(0.0, -3.0, 3.0, -0.2);
        let (_, qd) = discretize_aq(&rotation, &q2, 0.1).unwrap();
        assert!(is_symmetric(&qd, 1e-12));
        assert_psd(&qd);

        let coupled = Matrix3::new(-1.0, 2.0, 0.0, 0.0, -0.5, 1.0, 0.3, 0.0, 0.1);
        let (_, qd) = discretize_aq(&coupled, &q3, 0.05).unwrap();
        assert!(is_symmetric(&qd, 1e-12));
        assert_psd(&qd);
    }

    #[test]
    fn test_measurement_noise_scales_inverse_dt() {
        let r = make_covariance_matrix("r", &Vector1::new(2.0)).unwrap();
        let rd = discretize_r(&r, 0.02).unwrap();
        assert_relative_eq!(rd[(0, 0)], 200.0, epsilon = 1e-9);
    }
}

/// Steady-state gain identity on the Riccati fixed point
mod gain_tests {
    use super::*;

    #[test]
    fn test_gain_identity() {
        let plant = elevator();
        let q = make_covariance_matrix("q", &Vector2::new(0.05, 1.0)).unwrap();
        let r = make_covariance_matrix("r", &Vector1::new(0.01)).unwrap();
        let dt = 0.02;

        let (ad, qd) = discretize_aq(plant.a(), &q, dt).unwrap();
        let rd = discretize_r(&r, dt).unwrap();
        let solution = solve_steady_state(&ad, plant.c(), &qd, &rd, &RiccatiConfig::default()).unwrap();

        let c = plant.c();
        let s = c * solution.p * c.transpose() + rd;
        let expected = solution.p * c.transpose() * s.try_inverse().unwrap();
        assert_relative_eq!(solution.k, expected, epsilon = 1e-12);

        // P∞ is a fixed point of the recursion
        let ad_p_ct = ad * solution.p * c.transpose();
        let next = ad * solution.p * ad.transpose()
            - ad_p_ct * s.try_inverse().unwrap() * ad_p_ct.transpose()
            + qd;
        assert!((next - solution.p).norm() <= 1e-8 * solution.p.norm());
    }
}

/// A = 0, u = 0: predict must leave the estimate alone
mod fixed_point_tests {
    use super::*;

    #[test]
    fn test_static_plant_predict_is_identity() {
        let plant = LinearSystem::<2, 1, 2>::new(
            Matrix2::zeros(),
            Matrix2x1::new(1.0, 0.0),
            Matrix2::identity(),
            Matrix2x1::zeros(),
            Vector1::new(-1.0),
            Vector1::new(1.0),
        )
        .unwrap();
        let mut kf = KalmanFilter::new(
            &plant,
            &Vector2::new(0.2, 0.2),
            &Vector2::new(1.0, 1.0),
            0.01,
        )
        .unwrap();
        kf.set_xhat(Vector2::new(-3.0, 7.5));

        let estimator: &mut dyn StateEstimator<2, 1, 2> = &mut kf;
        for _ in 0..100 {
            estimator.predict(&Vector1::zeros(), 0.01).unwrap();
        }

        assert_relative_eq!(*estimator.xhat(), Vector2::new(-3.0, 7.5), epsilon = 1e-12);
    }
}
