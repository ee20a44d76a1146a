use crate::models::Quaternion;
use crate::trajectory::PlaybackMode;
use crate::utils;

pub const DEFAULT_DICE_CONFIG: utils::DiceConfig = utils::DiceConfig {
    time_step: 1.0 / 60.0,
    max_steps: 10_000,
    gravity: 9.81,
    restitution: 0.35,
    tangential_friction: 0.45,
    angular_impulse_gain: 1.5,
    resting_contact_speed: 0.5,
    linear_drag: 0.995,
    angular_drag: 0.98,
    tilt_correction_gain: 2.0,
    linear_rest_threshold: 0.02,
    angular_rest_threshold: 0.02,
    stable_frames_required: 40,
    // 10 degrees
    flat_tolerance_radians: 0.174_532_925_199_432_95,
    steps_per_tick: None,
    start_position: (0.0, 2.0, 0.0),
    start_orientation: Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 },
    playback: PlaybackMode::Cyclic,
};
