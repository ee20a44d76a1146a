// src/apis/dice_roller.rs

use std::f64::consts::TAU;
use std::sync::Arc;
use log::{debug, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use crate::correction::{correction_for, PresentationPose};
use crate::errors::DiceError;
use crate::faces::FaceAtlas;
use crate::interactions::{DiceBox, Surroundings};
use crate::models::{Pose, Quaternion};
use crate::simulation::{ThrowIntegrator, ThrowOutcome, ThrowPhase, ThrowState};
use crate::trajectory::{Trajectory, TrajectoryPlayer};
use crate::utils::{scale_vector, DiceConfig};

/// Launch speed used by [`DiceRoller::roll_with_outcome`].
pub const DEFAULT_THROW_SPEED: f64 = 6.0;
/// Launch spin used by [`DiceRoller::roll_with_outcome`].
pub const DEFAULT_THROW_SPIN: f64 = 20.0;

/// Initial conditions of a throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowRequest {
    pub velocity: (f64, f64, f64),
    pub angular_velocity: (f64, f64, f64),
    /// Launch orientation; `None` uses the configured start orientation.
    pub orientation: Option<Quaternion>,
}

impl ThrowRequest {
    pub fn new(velocity: (f64, f64, f64), angular_velocity: (f64, f64, f64)) -> Self {
        ThrowRequest { velocity, angular_velocity, orientation: None }
    }

    pub fn with_orientation(self, orientation: Quaternion) -> Self {
        ThrowRequest { orientation: Some(orientation.normalized()), ..self }
    }

    /// Creates the throw state for this request at the configured start position.
    pub fn start(&self, integrator: &ThrowIntegrator) -> ThrowState {
        match self.orientation {
            Some(orientation) => integrator.start_from(
                Pose::new(integrator.config().start_position, orientation),
                self.velocity,
                self.angular_velocity,
            ),
            None => integrator.start(self.velocity, self.angular_velocity),
        }
    }
}

/// Result of [`DiceRoller::roll_with_outcome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeredRoll {
    /// The throw exactly as the physics resolved it.
    pub outcome: ThrowOutcome,
    /// Presentation rotation that shows the requested face instead.
    pub correction: Quaternion,
}

/// Random unit vector with a non-negative Y component, uniformly distributed over the
/// upper hemisphere.
pub fn random_upper_hemisphere<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64, f64) {
    let y: f64 = rng.random();
    let phi = TAU * rng.random::<f64>();
    let r = (1.0 - y * y).max(0.0).sqrt();
    (r * phi.cos(), y, r * phi.sin())
}

/// Uniformly distributed random rotation (Shoemake's method).
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quaternion {
    let u1: f64 = rng.random();
    let a = TAU * rng.random::<f64>();
    let b = TAU * rng.random::<f64>();
    let (r1, r2) = ((1.0 - u1).sqrt(), u1.sqrt());
    Quaternion {
        w: r2 * b.cos(),
        x: r1 * a.sin(),
        y: r1 * a.cos(),
        z: r2 * b.sin(),
    }
    .normalized()
}

/// A throw in a random upward direction with a random spin axis, launched from a random
/// orientation.
///
/// Neither the launch orientation nor the motion is related to any face, so no face is
/// favoured.
pub fn random_throw<R: Rng + ?Sized>(rng: &mut R, speed: f64, spin: f64) -> ThrowRequest {
    let orientation = random_orientation(rng);
    ThrowRequest {
        velocity: scale_vector(random_upper_hemisphere(rng), speed),
        angular_velocity: scale_vector(random_upper_hemisphere(rng), spin),
        orientation: Some(orientation),
    }
}

/// Caller-facing façade for throwing one die.
///
/// The roller owns the physical [`ThrowState`] of the current throw, the recorded
/// [`Trajectory`], a playback cursor and the cosmetic correction used for outcome
/// steering. It is driven either
///
/// * tick by tick: [`DiceRoller::trigger_throw`] latches a request which the next
///   [`DiceRoller::tick`] consumes; every tick returns the pose to display, or
/// * synchronously: [`DiceRoller::run_throw_to_completion`] returns the resolved face
///   right away.
///
/// Outcome steering never touches the physics. [`DiceRoller::steer_to`] computes a
/// correction from the resolved pose, and only the displayed poses carry it.
pub struct DiceRoller<E: Surroundings = DiceBox> {
    integrator: ThrowIntegrator,
    surroundings: E,
    pending: Option<ThrowRequest>,
    state: Option<ThrowState>,
    trajectory: Trajectory,
    player: TrajectoryPlayer,
    correction: Quaternion,
    replaying: bool,
}

impl DiceRoller<DiceBox> {
    /// A standard six-sided die with default settings, thrown into the default box.
    ///
    /// # Example
    /// ```
    /// use rs_dice::apis::DiceRoller;
    ///
    /// let mut roller = DiceRoller::new();
    /// let outcome = roller.run_throw_to_completion((1.0, 0.0, 0.5), (3.0, 0.0, 2.0)).unwrap();
    /// assert!((1..=6).contains(&outcome.face));
    /// ```
    pub fn new() -> Self {
        DiceRoller::from_integrator(
            ThrowIntegrator::assume_valid(DiceConfig::default(), Arc::new(FaceAtlas::standard_d6())),
            DiceBox::default(),
        )
    }
}

impl Default for DiceRoller<DiceBox> {
    fn default() -> Self {
        DiceRoller::new()
    }
}

impl<E: Surroundings> DiceRoller<E> {
    /// Creates a roller for a die model in custom surroundings.
    ///
    /// # Errors
    /// Returns the error reported by [`DiceConfig::validate`].
    pub fn with_config(config: DiceConfig, atlas: Arc<FaceAtlas>, surroundings: E) -> Result<Self, DiceError> {
        Ok(DiceRoller::from_integrator(ThrowIntegrator::new(config, atlas)?, surroundings))
    }

    pub fn from_integrator(integrator: ThrowIntegrator, surroundings: E) -> Self {
        let player = TrajectoryPlayer::new(integrator.config().playback);
        DiceRoller {
            integrator,
            surroundings,
            pending: None,
            state: None,
            trajectory: Trajectory::new(),
            player,
            correction: Quaternion::identity(),
            replaying: false,
        }
    }

    /// Latches a throw request; the next [`DiceRoller::tick`] starts it.
    ///
    /// # Errors
    /// `DiceError::InvalidState` if a throw is still running or a request is already
    /// latched for this tick. The running throw and the latched request are unaffected.
    pub fn trigger_throw(
        &mut self,
        velocity: (f64, f64, f64),
        angular_velocity: (f64, f64, f64),
    ) -> Result<(), DiceError> {
        self.trigger_request(ThrowRequest::new(velocity, angular_velocity))
    }

    /// Like [`DiceRoller::trigger_throw`], also allowing a launch orientation.
    pub fn trigger_request(&mut self, request: ThrowRequest) -> Result<(), DiceError> {
        self.ensure_idle()?;
        self.pending = Some(request);
        Ok(())
    }

    /// Advances the roller by one presentation tick.
    ///
    /// A latched request starts a new throw first. While a throw is running it is
    /// stepped `steps_per_tick` times (or to completion when that is `None`) and the live
    /// pose is returned. Once resolved, the recorded trajectory is replayed, or the
    /// resolved pose is held if the throw was already shown live.
    ///
    /// Returns `None` when there is nothing to show.
    pub fn tick(&mut self) -> Option<PresentationPose> {
        if let Some(request) = self.pending.take() {
            self.begin(request);
        }

        let state = self.state.as_mut()?;
        if state.is_running() {
            let budget = self.integrator.config().steps_per_tick.unwrap_or(usize::MAX);
            for _ in 0..budget {
                match self.integrator.step(state, &self.surroundings) {
                    Ok(report) => {
                        self.trajectory.record(report.pose);
                        if report.outcome.is_some() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Stopped stepping throw: {}", e);
                        break;
                    }
                }
            }
            if state.is_running() {
                return Some(PresentationPose::uncorrected(*state.pose()));
            }
        }

        let pose = if self.replaying {
            self.player.advance(&self.trajectory)?
        } else {
            *state.pose()
        };
        Some(PresentationPose::new(pose, self.correction))
    }

    /// Runs a throw synchronously and returns how it resolved.
    ///
    /// The trajectory is recorded as for a triggered throw, so it can be replayed with
    /// [`DiceRoller::tick`] afterwards.
    ///
    /// # Errors
    /// `DiceError::InvalidState` if a throw is running or latched.
    pub fn run_throw_to_completion(
        &mut self,
        velocity: (f64, f64, f64),
        angular_velocity: (f64, f64, f64),
    ) -> Result<ThrowOutcome, DiceError> {
        self.run_request(ThrowRequest::new(velocity, angular_velocity))
    }

    /// Like [`DiceRoller::run_throw_to_completion`], also allowing a launch orientation.
    pub fn run_request(&mut self, request: ThrowRequest) -> Result<ThrowOutcome, DiceError> {
        self.ensure_idle()?;
        self.begin(request);
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| DiceError::InvalidState("throw was not started".to_string()))?;
        self.integrator.run(state, &self.surroundings, Some(&mut self.trajectory))
    }

    /// Correction that would show `desired_face` on top of a die at
    /// `achieved_orientation`. Nothing is stored.
    ///
    /// # Errors
    /// `DiceError::UnknownFace` if the face is not on this die.
    pub fn request_correction(
        &self,
        achieved_orientation: &Quaternion,
        desired_face: u32,
    ) -> Result<Quaternion, DiceError> {
        correction_for(achieved_orientation, desired_face, self.integrator.atlas())
    }

    /// Steers the presentation of the resolved throw so that `desired_face` is shown.
    ///
    /// # Errors
    /// * `DiceError::UnknownFace` if the face is not on this die.
    /// * `DiceError::InvalidState` if there is no resolved throw.
    pub fn steer_to(&mut self, desired_face: u32) -> Result<Quaternion, DiceError> {
        let outcome = self
            .outcome()
            .copied()
            .ok_or_else(|| DiceError::InvalidState("no resolved throw to steer".to_string()))?;
        let correction = self.request_correction(&outcome.final_pose.orientation, desired_face)?;
        debug!("Steering face {} to {}", outcome.face, desired_face);
        self.correction = correction;
        Ok(correction)
    }

    /// Removes any steering; the physical result is shown again.
    pub fn clear_steering(&mut self) {
        self.correction = Quaternion::identity();
    }

    /// Throws the die in a random direction, lets it resolve naturally and steers the
    /// presentation to `desired_face`.
    ///
    /// # Errors
    /// * `DiceError::UnknownFace` if the face is not on this die (checked before throwing).
    /// * `DiceError::InvalidState` if a throw is running or latched.
    pub fn roll_with_outcome<R: Rng + ?Sized>(
        &mut self,
        desired_face: u32,
        rng: &mut R,
    ) -> Result<SteeredRoll, DiceError> {
        if !self.atlas().contains(desired_face) {
            return Err(DiceError::UnknownFace(desired_face));
        }
        let request = random_throw(rng, DEFAULT_THROW_SPEED, DEFAULT_THROW_SPIN);
        let outcome = self.run_request(request)?;
        let correction = self.steer_to(desired_face)?;
        Ok(SteeredRoll { outcome, correction })
    }

    /// Restarts playback of the recorded trajectory from its first pose.
    ///
    /// # Errors
    /// `DiceError::InvalidState` unless the current throw has resolved.
    pub fn replay(&mut self) -> Result<(), DiceError> {
        if self.outcome().is_none() {
            return Err(DiceError::InvalidState("only resolved throws can be replayed".to_string()));
        }
        self.player.reset();
        self.replaying = true;
        Ok(())
    }

    /// Abandons the current throw, its trajectory and any latched request.
    pub fn cancel(&mut self) {
        if self.state.as_ref().is_some_and(|state| state.is_running()) {
            debug!("Cancelling running throw");
        }
        self.pending = None;
        self.state = None;
        self.trajectory.clear();
        self.player.reset();
        self.correction = Quaternion::identity();
        self.replaying = false;
    }

    /// Phase of the current throw, `None` before the first throw or after cancelling.
    pub fn phase(&self) -> Option<ThrowPhase> {
        self.state.as_ref().map(|state| state.phase())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn outcome(&self) -> Option<&ThrowOutcome> {
        self.state.as_ref().and_then(|state| state.outcome())
    }

    pub fn throw_state(&self) -> Option<&ThrowState> {
        self.state.as_ref()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn correction(&self) -> &Quaternion {
        &self.correction
    }

    pub fn atlas(&self) -> &Arc<FaceAtlas> {
        self.integrator.atlas()
    }

    pub fn integrator(&self) -> &ThrowIntegrator {
        &self.integrator
    }

    pub fn surroundings(&self) -> &E {
        &self.surroundings
    }

    fn ensure_idle(&self) -> Result<(), DiceError> {
        if self.pending.is_some() {
            warn!("Rejected throw: another throw is already latched");
            return Err(DiceError::InvalidState("a throw is already pending".to_string()));
        }
        if self.state.as_ref().is_some_and(|state| state.is_running()) {
            warn!("Rejected throw: the current throw is still running");
            return Err(DiceError::InvalidState("a throw is still running".to_string()));
        }
        Ok(())
    }

    fn begin(&mut self, request: ThrowRequest) {
        self.trajectory.clear();
        self.player.reset();
        self.player.set_mode(self.integrator.config().playback);
        self.correction = Quaternion::identity();
        // Throws resolved in a single tick were never shown live, so they are replayed
        self.replaying = self.integrator.config().steps_per_tick.is_none();
        self.state = Some(request.start(&self.integrator));
        debug!("Starting throw: v={:?} w={:?}", request.velocity, request.angular_velocity);
    }
}

#[cfg(feature = "parallel")]
impl<E: Surroundings + Sync> DiceRoller<E> {
    /// Resolves several independent throws in parallel.
    ///
    /// Each throw gets its own state; only the die model, configuration and surroundings
    /// are shared. The roller's own throw, trajectory and steering are left alone.
    pub fn roll_batch(&self, throws: &[ThrowRequest]) -> Result<Vec<ThrowOutcome>, DiceError> {
        throws
            .par_iter()
            .map(|request| {
                let mut state = request.start(&self.integrator);
                self.integrator.run(&mut state, &self.surroundings, None)
            })
            .collect()
    }
}
