// src/simulation/throw_integrator_tests.rs

use std::sync::Arc;
use crate::assert_float_eq;
use crate::errors::DiceError;
use crate::faces::{is_flat, top_face, FaceAtlas};
use crate::interactions::{DiceBox, GroundPlane, OpenSpace};
use crate::models::Quaternion;
use crate::simulation::{integrate_orientation, Resolution, ThrowIntegrator, ThrowPhase};
use crate::trajectory::Trajectory;
use crate::utils::{vector_magnitude, DiceConfig};

const THROWS: [((f64, f64, f64), (f64, f64, f64)); 5] = [
    ((1.0, 0.0, 0.5), (3.0, 0.0, 2.0)),
    ((2.5, 1.0, -1.5), (10.0, -4.0, 6.0)),
    ((-3.0, 2.0, 0.0), (0.0, 15.0, -5.0)),
    ((0.0, 4.0, 4.0), (-8.0, 2.0, 1.0)),
    ((5.0, 0.5, 0.5), (1.0, 1.0, 20.0)),
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn d6_integrator(config: DiceConfig) -> ThrowIntegrator {
    ThrowIntegrator::new(config, Arc::new(FaceAtlas::standard_d6())).unwrap()
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = DiceConfig { time_step: -1.0, ..DiceConfig::default() };
    let result = ThrowIntegrator::new(config, Arc::new(FaceAtlas::standard_d6()));
    assert!(matches!(result, Err(DiceError::InvalidTime)));
}

#[test]
fn test_first_step_applies_gravity_and_drag() {
    let integrator = d6_integrator(DiceConfig::default());
    let mut state = integrator.start((0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let report = integrator.step(&mut state, &OpenSpace).unwrap();

    let dt = 1.0 / 60.0;
    let expected_vy = -9.81 * dt * 0.995;
    assert_float_eq(state.velocity().1, expected_vy, 1e-12, None);
    assert_float_eq(report.pose.position.1, 2.0 - 9.81 * dt * dt, 1e-12, Some("moved by the undamped velocity"));
    assert!(!report.grounded);
    assert!(report.outcome.is_none());
    assert_eq!(state.steps(), 1);
}

#[test]
fn test_dropped_flat_die_settles_showing_six() {
    init_logger();
    let integrator = d6_integrator(DiceConfig::default());
    let mut state = integrator.start((0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let outcome = integrator.run(&mut state, &GroundPlane::default(), None).unwrap();

    assert_eq!(outcome.face, 6);
    assert_eq!(outcome.resolution, Resolution::Settled);
    assert!(!outcome.fell_back());
    assert!(outcome.steps >= 40);
    assert_float_eq(outcome.final_pose.position.1, 0.5, 1e-6, Some("die should lie on the floor"));
    assert_eq!(state.phase(), ThrowPhase::Resolved);
}

#[test]
fn test_thrown_dice_settle_naturally_on_ground() {
    init_logger();
    let integrator = d6_integrator(DiceConfig::default());
    let atlas = FaceAtlas::standard_d6();
    for (velocity, angular_velocity) in THROWS {
        let mut state = integrator.start(velocity, angular_velocity);
        let outcome = integrator.run(&mut state, &GroundPlane::default(), None).unwrap();
        assert!(!outcome.fell_back(), "throw {:?} / {:?} did not settle", velocity, angular_velocity);
        assert!(atlas.contains(outcome.face));
        assert_eq!(outcome.face, top_face(&outcome.final_pose.orientation, &atlas));
        assert!(is_flat(&outcome.final_pose.orientation, &atlas, 10f64.to_radians()));
    }
}

#[test]
fn test_thrown_dice_settle_inside_box() {
    let integrator = d6_integrator(DiceConfig::default());
    let dice_box = DiceBox::default();
    for (velocity, angular_velocity) in THROWS {
        let mut state = integrator.start(velocity, angular_velocity);
        let outcome = integrator.run(&mut state, &dice_box, None).unwrap();
        assert!(!outcome.fell_back());
        assert!((1..=6).contains(&outcome.face));
        assert!(dice_box.contains(outcome.final_pose.position));
    }
}

#[test]
fn test_same_throw_resolves_the_same_way() {
    let integrator = d6_integrator(DiceConfig::default());
    let (velocity, angular_velocity) = THROWS[1];
    let first = integrator.run(&mut integrator.start(velocity, angular_velocity), &GroundPlane::default(), None).unwrap();
    let second = integrator.run(&mut integrator.start(velocity, angular_velocity), &GroundPlane::default(), None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_step_budget_fallback_is_observable() {
    init_logger();
    let config = DiceConfig {
        gravity: 0.0,
        linear_drag: 1.0,
        angular_drag: 1.0,
        max_steps: 500,
        ..DiceConfig::default()
    };
    let integrator = d6_integrator(config);
    let mut state = integrator.start((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let outcome = integrator.run(&mut state, &OpenSpace, None).unwrap();

    assert!(outcome.fell_back());
    assert_eq!(outcome.resolution, Resolution::StepBudgetExhausted);
    assert_eq!(outcome.steps, 500);
    assert!(FaceAtlas::standard_d6().contains(outcome.face));
}

#[test]
fn test_stepping_a_resolved_throw_fails() {
    let config = DiceConfig { max_steps: 1, ..DiceConfig::default() };
    let integrator = d6_integrator(config);
    let mut state = integrator.start((0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let report = integrator.step(&mut state, &OpenSpace).unwrap();
    assert!(report.outcome.unwrap().fell_back());

    let second = integrator.step(&mut state, &OpenSpace);
    assert!(matches!(second, Err(DiceError::InvalidState(_))));
    assert!(matches!(integrator.run(&mut state, &OpenSpace, None), Err(DiceError::InvalidState(_))));
}

#[test]
fn test_run_records_one_pose_per_step() {
    let integrator = d6_integrator(DiceConfig::default());
    let mut trajectory = Trajectory::new();
    let (velocity, angular_velocity) = THROWS[0];
    let mut state = integrator.start(velocity, angular_velocity);
    let outcome = integrator.run(&mut state, &GroundPlane::default(), Some(&mut trajectory)).unwrap();

    assert_eq!(trajectory.len(), outcome.steps);
    assert_eq!(trajectory.last(), Some(&outcome.final_pose));
}

#[test]
fn test_orientation_stays_normalized() {
    let integrator = d6_integrator(DiceConfig { max_steps: 300, ..DiceConfig::default() });
    let mut state = integrator.start((4.0, 3.0, -2.0), (25.0, -30.0, 12.0));
    let mut trajectory = Trajectory::new();
    let _ = integrator.run(&mut state, &DiceBox::default(), Some(&mut trajectory)).unwrap();
    for pose in trajectory.poses() {
        assert_float_eq(pose.orientation.magnitude(), 1.0, 1e-9, Some("orientation drifted"));
    }
}

#[test]
fn test_integrate_orientation_zero_spin_is_noop() {
    let q = Quaternion::from_axis_angle((0.3, 0.1, -0.2), 1.1);
    assert_eq!(integrate_orientation(&q, (0.0, 0.0, 0.0), 1.0 / 60.0), q);

    let turned = integrate_orientation(&Quaternion::identity(), (0.0, 0.0, 6.0), 0.25);
    assert_float_eq(turned.angle(), 1.5, 1e-10, None);
}

#[test]
fn test_tilt_correction_spins_towards_flat() {
    let integrator = d6_integrator(DiceConfig::default());
    let tilted = Quaternion::from_axis_angle((0.0, 0.0, 1.0), 0.3);
    let pose = crate::models::Pose::new((0.0, 0.5, 0.0), tilted);
    let mut state = integrator.start_from(pose, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    integrator.step(&mut state, &GroundPlane::default()).unwrap();

    // Face 6 leans towards -X; it is pushed back with a negative spin about Z
    assert!(state.angular_velocity().2 < 0.0);
    assert_float_eq(state.angular_velocity().2, -0.3 * 2.0, 1e-9, None);
}

#[test]
fn test_die_balanced_on_an_edge_never_settles() {
    let config = DiceConfig { tilt_correction_gain: 0.0, max_steps: 300, ..DiceConfig::default() };
    let integrator = d6_integrator(config);
    let on_edge = Quaternion::from_axis_angle((0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_4);
    let pose = crate::models::Pose::new((0.0, 0.5, 0.0), on_edge);
    let mut state = integrator.start_from(pose, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));

    let outcome = integrator.run(&mut state, &GroundPlane::default(), None).unwrap();

    // Motionless, but not lying on a face
    assert!(vector_magnitude(state.velocity()) < config.linear_rest_threshold);
    assert!(vector_magnitude(state.angular_velocity()) < config.angular_rest_threshold);
    assert!(!integrator.is_low_motion(&state));
    assert_eq!(state.stable_frames(), 0);
    assert!(outcome.fell_back());
    assert_eq!(outcome.steps, 300);
}

#[test]
fn test_single_disturbance_restarts_rest_count() {
    let integrator = d6_integrator(DiceConfig::default());
    let pose = crate::models::Pose::new((0.0, 0.5, 0.0), Quaternion::identity());
    let mut state = integrator.start_from(pose, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let ground = GroundPlane::default();

    for _ in 0..39 {
        let report = integrator.step(&mut state, &ground).unwrap();
        assert!(report.low_motion);
        assert!(report.outcome.is_none());
    }
    assert_eq!(state.stable_frames(), 39);

    // A small hop: just fast enough to count as motion for one step
    state.velocity = (0.0, 9.81 / 60.0 + 0.03, 0.0);
    let report = integrator.step(&mut state, &ground).unwrap();
    assert!(!report.low_motion);
    assert_eq!(state.stable_frames(), 0);

    for _ in 0..39 {
        let report = integrator.step(&mut state, &ground).unwrap();
        assert!(report.low_motion);
        assert!(report.outcome.is_none());
    }
    let report = integrator.step(&mut state, &ground).unwrap();
    let outcome = report.outcome.unwrap();
    assert_eq!(outcome.resolution, Resolution::Settled);
    assert_eq!(outcome.steps, 80);
    assert_eq!(outcome.face, 6);
}
