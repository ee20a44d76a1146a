// src/simulation/throw_integrator.rs

use std::sync::Arc;
use log::{debug, trace, warn};
use crate::errors::DiceError;
use crate::faces::{is_flat, top_face, top_face_alignment, FaceAtlas};
use crate::interactions::{advance_position, CollisionResponse, Surroundings};
use crate::models::{Pose, Quaternion};
use crate::simulation::{Resolution, ThrowOutcome, ThrowState};
use crate::trajectory::Trajectory;
use crate::utils::{
    add_vectors,
    cross_product,
    normalize_vector,
    scale_vector,
    vector_magnitude,
    DiceConfig,
    WORLD_UP,
};

/// Angular speeds at or below this are treated as no rotation at all.
const ANGULAR_EPSILON: f64 = 1e-9;
/// Tilts (radians) at or below this do not receive a corrective nudge.
const TILT_EPSILON: f64 = 1e-3;

/// What happened during one integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Pose at the end of the step.
    pub pose: Pose,
    /// The die touched a surface or was supported by the floor during this step.
    pub grounded: bool,
    /// The step satisfied every rest condition.
    pub low_motion: bool,
    /// Set on the step that resolved the throw.
    pub outcome: Option<ThrowOutcome>,
}

/// Fixed-step integrator for a single die.
///
/// The integrator itself is immutable: all per-throw data lives in a [`ThrowState`]
/// which is passed to [`ThrowIntegrator::step`]. One integrator can therefore drive
/// any number of throws, also from several threads at once.
#[derive(Debug, Clone)]
pub struct ThrowIntegrator {
    config: DiceConfig,
    atlas: Arc<FaceAtlas>,
    response: CollisionResponse,
}

impl ThrowIntegrator {
    /// Creates an integrator for dice of the given model.
    ///
    /// # Errors
    /// Returns the error reported by [`DiceConfig::validate`].
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use rs_dice::faces::FaceAtlas;
    /// use rs_dice::interactions::GroundPlane;
    /// use rs_dice::simulation::ThrowIntegrator;
    /// use rs_dice::utils::DiceConfig;
    ///
    /// let integrator = ThrowIntegrator::new(DiceConfig::default(), Arc::new(FaceAtlas::standard_d6())).unwrap();
    /// let mut state = integrator.start((1.0, 0.0, 0.5), (3.0, 0.0, 2.0));
    /// let outcome = integrator.run(&mut state, &GroundPlane::default(), None).unwrap();
    /// assert!((1..=6).contains(&outcome.face));
    /// ```
    pub fn new(config: DiceConfig, atlas: Arc<FaceAtlas>) -> Result<Self, DiceError> {
        config.validate()?;
        Ok(ThrowIntegrator::assume_valid(config, atlas))
    }

    /// Skips validation; only for configurations known to be valid.
    pub(crate) fn assume_valid(config: DiceConfig, atlas: Arc<FaceAtlas>) -> Self {
        ThrowIntegrator {
            response: CollisionResponse::from_config(&config),
            config,
            atlas,
        }
    }

    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    pub fn atlas(&self) -> &Arc<FaceAtlas> {
        &self.atlas
    }

    pub fn collision_response(&self) -> &CollisionResponse {
        &self.response
    }

    /// Creates a fresh throw at the configured start pose.
    pub fn start(&self, velocity: (f64, f64, f64), angular_velocity: (f64, f64, f64)) -> ThrowState {
        self.start_from(
            Pose::new(self.config.start_position, self.config.start_orientation),
            velocity,
            angular_velocity,
        )
    }

    /// Creates a fresh throw at an explicit start pose.
    pub fn start_from(
        &self,
        pose: Pose,
        velocity: (f64, f64, f64),
        angular_velocity: (f64, f64, f64),
    ) -> ThrowState {
        ThrowState::new(
            pose.position,
            pose.orientation,
            velocity,
            angular_velocity,
            self.config.stable_frames_required,
        )
    }

    /// Advances a running throw by one fixed time step.
    ///
    /// The order of operations is: gravity, movement with collision response, damping,
    /// orientation integration, tilt correction while supported, rest detection and
    /// finally the step budget check.
    ///
    /// # Arguments
    /// * `state` - The throw to advance. Must still be running.
    /// * `surroundings` - Collision query and ground predicate for the die.
    ///
    /// # Returns
    /// A [`StepReport`] with the new pose; `outcome` is set on the resolving step.
    ///
    /// # Errors
    /// `DiceError::InvalidState` if the throw was already resolved.
    pub fn step<S: Surroundings + ?Sized>(
        &self,
        state: &mut ThrowState,
        surroundings: &S,
    ) -> Result<StepReport, DiceError> {
        if !state.is_running() {
            return Err(DiceError::InvalidState("cannot step a resolved throw".to_string()));
        }
        let dt = self.config.time_step;

        state.velocity = add_vectors(state.velocity, scale_vector(WORLD_UP, -self.config.gravity * dt));

        let displacement = scale_vector(state.velocity, dt);
        let contact = surroundings.cast(state.pose.position, displacement);
        state.pose.position = advance_position(state.pose.position, displacement, contact.as_ref());
        let mut grounded = false;
        if let Some(contact) = &contact {
            let (velocity, angular_velocity) =
                self.response.respond(state.velocity, state.angular_velocity, contact.normal);
            state.velocity = velocity;
            state.angular_velocity = angular_velocity;
            grounded = true;
            trace!("step {}: contact with normal {:?}", state.steps, contact.normal);
        }

        state.velocity = scale_vector(state.velocity, self.config.linear_drag);
        state.angular_velocity = scale_vector(state.angular_velocity, self.config.angular_drag);

        state.pose.orientation = integrate_orientation(&state.pose.orientation, state.angular_velocity, dt);

        grounded = grounded || surroundings.is_supported(state.pose.position);
        if grounded {
            self.apply_tilt_correction(state);
        }

        let low_motion = self.is_low_motion(state);
        let settled = state.detector.observe(low_motion);
        state.steps += 1;

        let outcome = if settled {
            Some(self.resolve(state, Resolution::Settled))
        } else if state.steps >= self.config.max_steps {
            warn!(
                "Throw did not come to rest within {} steps; resolving with the current top face",
                self.config.max_steps
            );
            Some(self.resolve(state, Resolution::StepBudgetExhausted))
        } else {
            None
        };

        Ok(StepReport {
            pose: state.pose,
            grounded,
            low_motion,
            outcome,
        })
    }

    /// Steps a throw until it resolves, optionally recording every pose.
    ///
    /// Always terminates: at the latest after `max_steps` steps.
    ///
    /// # Errors
    /// `DiceError::InvalidState` if the throw was already resolved.
    pub fn run<S: Surroundings + ?Sized>(
        &self,
        state: &mut ThrowState,
        surroundings: &S,
        mut trajectory: Option<&mut Trajectory>,
    ) -> Result<ThrowOutcome, DiceError> {
        loop {
            let report = self.step(state, surroundings)?;
            if let Some(trajectory) = trajectory.as_deref_mut() {
                trajectory.record(report.pose);
            }
            if let Some(outcome) = report.outcome {
                return Ok(outcome);
            }
        }
    }

    /// True if the die is slow, barely spinning and lying on a face.
    pub fn is_low_motion(&self, state: &ThrowState) -> bool {
        vector_magnitude(state.velocity) < self.config.linear_rest_threshold &&
            vector_magnitude(state.angular_velocity) < self.config.angular_rest_threshold &&
            is_flat(&state.pose.orientation, &self.atlas, self.config.flat_tolerance_radians)
    }

    // Spins the die towards lying flat on whichever face is currently closest to up,
    // so it does not come to rest balanced on an edge.
    fn apply_tilt_correction(&self, state: &mut ThrowState) {
        let top = top_face_alignment(&state.pose.orientation, &self.atlas);
        let tilt = top.tilt();
        if tilt <= TILT_EPSILON {
            return;
        }
        if let Some(axis) = normalize_vector(cross_product(top.world_direction, WORLD_UP)) {
            let nudge = scale_vector(axis, tilt * self.config.tilt_correction_gain);
            state.angular_velocity = add_vectors(state.angular_velocity, nudge);
        }
    }

    fn resolve(&self, state: &mut ThrowState, resolution: Resolution) -> ThrowOutcome {
        let outcome = ThrowOutcome {
            face: top_face(&state.pose.orientation, &self.atlas),
            resolution,
            steps: state.steps,
            final_pose: state.pose,
        };
        debug!("Throw resolved to face {} after {} steps ({:?})", outcome.face, outcome.steps, resolution);
        state.outcome = Some(outcome);
        outcome
    }
}

/// Rotates `orientation` by the world-frame angular velocity over `dt` and
/// renormalizes. Zero angular velocity leaves the orientation unchanged.
pub fn integrate_orientation(orientation: &Quaternion, angular_velocity: (f64, f64, f64), dt: f64) -> Quaternion {
    let speed = vector_magnitude(angular_velocity);
    if speed <= ANGULAR_EPSILON {
        return *orientation;
    }
    Quaternion::from_scaled_axis(scale_vector(angular_velocity, dt))
        .multiply(orientation)
        .normalized()
}
