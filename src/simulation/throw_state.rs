// src/simulation/throw_state.rs

use crate::models::{Pose, Quaternion};
use crate::simulation::SettleDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowPhase {
    Running,
    Resolved,
}

/// How a throw came to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Rest was detected for the required number of consecutive steps.
    Settled,
    /// The step budget ran out first; the face is the best available reading.
    StepBudgetExhausted,
}

/// Final result of one throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowOutcome {
    pub face: u32,
    pub resolution: Resolution,
    pub steps: usize,
    /// Physical pose at resolution. Never altered by outcome steering.
    pub final_pose: Pose,
}

impl ThrowOutcome {
    /// True if the throw was force-resolved by the step budget instead of settling.
    pub fn fell_back(&self) -> bool {
        self.resolution == Resolution::StepBudgetExhausted
    }
}

/// Physical state of one in-flight throw. Only the integrator mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowState {
    pub(crate) velocity: (f64, f64, f64),
    pub(crate) angular_velocity: (f64, f64, f64),
    pub(crate) pose: Pose,
    pub(crate) detector: SettleDetector,
    pub(crate) steps: usize,
    pub(crate) outcome: Option<ThrowOutcome>,
}

impl ThrowState {
    pub fn new(
        position: (f64, f64, f64),
        orientation: Quaternion,
        velocity: (f64, f64, f64),
        angular_velocity: (f64, f64, f64),
        stable_frames_required: u32,
    ) -> Self {
        ThrowState {
            velocity,
            angular_velocity,
            pose: Pose::new(position, orientation.normalized()),
            detector: SettleDetector::new(stable_frames_required),
            steps: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> ThrowPhase {
        if self.outcome.is_some() {
            ThrowPhase::Resolved
        } else {
            ThrowPhase::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == ThrowPhase::Running
    }

    pub fn velocity(&self) -> (f64, f64, f64) {
        self.velocity
    }

    pub fn angular_velocity(&self) -> (f64, f64, f64) {
        self.angular_velocity
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn stable_frames(&self) -> u32 {
        self.detector.stable_frames()
    }

    pub fn outcome(&self) -> Option<&ThrowOutcome> {
        self.outcome.as_ref()
    }
}
