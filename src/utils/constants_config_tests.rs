// src/utils/constants_config_tests.rs

use crate::errors::DiceError;
use crate::utils::{DiceConfig, DEFAULT_DICE_CONFIG};

#[test]
fn test_default_config_matches_documented_values() {
    let config = DiceConfig::default();
    assert_eq!(config, DEFAULT_DICE_CONFIG);
    assert_eq!(config.max_steps, 10_000);
    assert_eq!(config.stable_frames_required, 40);
    assert_eq!(config.restitution, 0.35);
    assert_eq!(config.tangential_friction, 0.45);
    assert_eq!(config.angular_impulse_gain, 1.5);
    assert_eq!(config.linear_drag, 0.995);
    assert_eq!(config.angular_drag, 0.98);
    assert!((config.flat_tolerance_radians - 10f64.to_radians()).abs() < 1e-12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_overrides_only_given_values() {
    let config = DiceConfig::new(Some(3.7), None, Some(0.2), None, None);
    assert_eq!(config.gravity, 3.7);
    assert_eq!(config.tangential_friction, 0.2);
    assert_eq!(config.restitution, DEFAULT_DICE_CONFIG.restitution);
    assert_eq!(config.time_step, DEFAULT_DICE_CONFIG.time_step);
}

#[test]
fn test_validate_rejects_unusable_values() {
    let bad_time = DiceConfig { time_step: 0.0, ..DiceConfig::default() };
    assert_eq!(bad_time.validate(), Err(DiceError::InvalidTime));

    let bad_budget = DiceConfig { max_steps: 0, ..DiceConfig::default() };
    assert_eq!(bad_budget.validate(), Err(DiceError::InvalidStepBudget));

    let bad_frames = DiceConfig { stable_frames_required: 0, ..DiceConfig::default() };
    assert_eq!(bad_frames.validate(), Err(DiceError::InvalidStepBudget));

    let bad_drag = DiceConfig { linear_drag: 1.5, ..DiceConfig::default() };
    assert_eq!(bad_drag.validate(), Err(DiceError::InvalidCoefficient("linear_drag")));

    let bad_restitution = DiceConfig { restitution: -0.1, ..DiceConfig::default() };
    assert_eq!(bad_restitution.validate(), Err(DiceError::InvalidCoefficient("restitution")));
}

#[test]
fn test_validate_accepts_frictionless_weightless_setup() {
    let config = DiceConfig {
        gravity: 0.0,
        linear_drag: 1.0,
        angular_drag: 1.0,
        ..DiceConfig::default()
    };
    assert!(config.validate().is_ok());
}
