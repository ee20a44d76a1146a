// src/utils/constants_config.rs
use crate::errors::DiceError;
use crate::models::Quaternion;
use crate::trajectory::PlaybackMode;
use crate::utils::DEFAULT_DICE_CONFIG;

/// Tunable parameters of one die instance.
///
/// Every field can be overridden independently, usually with struct update syntax:
///
/// ```
/// use rs_dice::utils::DiceConfig;
///
/// let config = DiceConfig { max_steps: 2_000, restitution: 0.5, ..DiceConfig::default() };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceConfig {
    /// Fixed integration step in seconds.
    pub time_step: f64,
    /// Steps after which a throw is force-resolved.
    pub max_steps: usize,
    /// Magnitude of the gravitational acceleration, applied against world up.
    pub gravity: f64,
    pub restitution: f64,
    pub tangential_friction: f64,
    pub angular_impulse_gain: f64,
    /// Normal impact speeds below this are absorbed instead of bounced.
    pub resting_contact_speed: f64,
    pub linear_drag: f64,
    pub angular_drag: f64,
    /// Angular velocity added per radian of tilt while the die is supported.
    pub tilt_correction_gain: f64,
    pub linear_rest_threshold: f64,
    pub angular_rest_threshold: f64,
    pub stable_frames_required: u32,
    pub flat_tolerance_radians: f64,
    /// Integrator steps per presentation tick while a throw is running.
    /// `None` resolves the whole throw on the tick that starts it.
    pub steps_per_tick: Option<usize>,
    pub start_position: (f64, f64, f64),
    pub start_orientation: Quaternion,
    pub playback: PlaybackMode,
}

impl Default for DiceConfig {
    fn default() -> Self {
        DEFAULT_DICE_CONFIG
    }
}

impl DiceConfig {
    pub fn new(
        gravity: Option<f64>,
        restitution: Option<f64>,
        tangential_friction: Option<f64>,
        linear_drag: Option<f64>,
        angular_drag: Option<f64>,
    ) -> Self {
        let default = DEFAULT_DICE_CONFIG;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            restitution: restitution.unwrap_or(default.restitution),
            tangential_friction: tangential_friction.unwrap_or(default.tangential_friction),
            linear_drag: linear_drag.unwrap_or(default.linear_drag),
            angular_drag: angular_drag.unwrap_or(default.angular_drag),
            ..default
        }
    }

    /// Checks that the configuration describes a usable simulation.
    ///
    /// Velocities and positions are never range-checked; only the parameters that would
    /// make the integrator meaningless (or never terminate) are rejected.
    pub fn validate(&self) -> Result<(), DiceError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(DiceError::InvalidTime);
        }
        if self.max_steps == 0 || self.stable_frames_required == 0 {
            return Err(DiceError::InvalidStepBudget);
        }
        if self.steps_per_tick == Some(0) {
            return Err(DiceError::InvalidStepBudget);
        }
        if self.gravity < 0.0 { return Err(DiceError::InvalidCoefficient("gravity")); }
        if self.restitution < 0.0 { return Err(DiceError::InvalidCoefficient("restitution")); }
        if self.tangential_friction < 0.0 { return Err(DiceError::InvalidCoefficient("tangential_friction")); }
        if self.angular_impulse_gain < 0.0 { return Err(DiceError::InvalidCoefficient("angular_impulse_gain")); }
        if self.resting_contact_speed < 0.0 { return Err(DiceError::InvalidCoefficient("resting_contact_speed")); }
        if !(0.0..=1.0).contains(&self.linear_drag) { return Err(DiceError::InvalidCoefficient("linear_drag")); }
        if !(0.0..=1.0).contains(&self.angular_drag) { return Err(DiceError::InvalidCoefficient("angular_drag")); }
        if self.tilt_correction_gain < 0.0 { return Err(DiceError::InvalidCoefficient("tilt_correction_gain")); }
        if self.linear_rest_threshold < 0.0 { return Err(DiceError::InvalidCoefficient("linear_rest_threshold")); }
        if self.angular_rest_threshold < 0.0 { return Err(DiceError::InvalidCoefficient("angular_rest_threshold")); }
        if self.flat_tolerance_radians < 0.0 { return Err(DiceError::InvalidCoefficient("flat_tolerance_radians")); }
        Ok(())
    }
}
