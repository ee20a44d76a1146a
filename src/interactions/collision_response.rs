// src/interactions/collision_response.rs

use crate::utils::{
    add_vectors,
    cross_product,
    dot_product,
    normalize_vector,
    scale_vector,
    subtract_vectors,
    DiceConfig,
};

/// Simplified contact response for a die hitting a static surface.
///
/// The velocity is split into a component along the contact normal and a tangential
/// remainder. The normal part is reflected and scaled by `restitution`, the tangential
/// part is scaled by `tangential_friction`. Instead of computing a true collision torque,
/// the angular velocity receives `cross(normal, v') * angular_impulse_gain`, which is
/// enough to make dice roll off their edges rather than only bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    pub restitution: f64,
    pub tangential_friction: f64,
    pub angular_impulse_gain: f64,
    /// Normal impact speeds below this are absorbed (no bounce), which lets a die lying on
    /// the floor come to rest despite gravity pushing it into the floor every step.
    /// `0.0` always bounces.
    pub resting_contact_speed: f64,
}

impl Default for CollisionResponse {
    fn default() -> Self {
        CollisionResponse::from_config(&DiceConfig::default())
    }
}

impl CollisionResponse {
    pub fn new(restitution: f64, tangential_friction: f64, angular_impulse_gain: f64) -> Self {
        CollisionResponse {
            restitution,
            tangential_friction,
            angular_impulse_gain,
            resting_contact_speed: 0.0,
        }
    }

    pub fn from_config(config: &DiceConfig) -> Self {
        CollisionResponse {
            restitution: config.restitution,
            tangential_friction: config.tangential_friction,
            angular_impulse_gain: config.angular_impulse_gain,
            resting_contact_speed: config.resting_contact_speed,
        }
    }

    /// Computes the post-contact velocity and angular velocity.
    ///
    /// # Arguments
    /// * `velocity` - Incoming linear velocity.
    /// * `angular_velocity` - Incoming angular velocity.
    /// * `contact_normal` - Surface normal at the contact; normalized here. A zero normal
    ///   leaves both velocities untouched.
    ///
    /// # Example
    /// ```
    /// use rs_dice::interactions::CollisionResponse;
    ///
    /// let response = CollisionResponse::new(0.5, 0.5, 0.0);
    /// let (v, w) = response.respond((2.0, -4.0, 0.0), (0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    /// assert_eq!(v, (1.0, 2.0, 0.0));
    /// assert_eq!(w, (0.0, 0.0, 0.0));
    /// ```
    pub fn respond(
        &self,
        velocity: (f64, f64, f64),
        angular_velocity: (f64, f64, f64),
        contact_normal: (f64, f64, f64),
    ) -> ((f64, f64, f64), (f64, f64, f64)) {
        let normal = match normalize_vector(contact_normal) {
            Some(normal) => normal,
            None => return (velocity, angular_velocity),
        };

        let normal_speed = dot_product(velocity, normal);
        let v_normal = scale_vector(normal, normal_speed);
        let v_tangent = subtract_vectors(velocity, v_normal);

        let new_normal = if normal_speed.abs() < self.resting_contact_speed {
            (0.0, 0.0, 0.0)
        } else {
            scale_vector(v_normal, -self.restitution)
        };
        let new_tangent = scale_vector(v_tangent, self.tangential_friction);
        let new_velocity = add_vectors(new_normal, new_tangent);

        let impulse = scale_vector(cross_product(normal, new_velocity), self.angular_impulse_gain);
        (new_velocity, add_vectors(angular_velocity, impulse))
    }
}
