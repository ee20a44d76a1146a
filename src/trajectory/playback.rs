// src/trajectory/playback.rs

use crate::models::Pose;
use crate::trajectory::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Wrap around to the first pose after the last one.
    #[default]
    Cyclic,
    /// Stop on the last pose.
    OneShot,
}

/// Replays a recorded [`Trajectory`] one pose per presentation tick.
///
/// The player only holds a cursor; the trajectory is borrowed read-only on every call,
/// so replaying never changes what was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrajectoryPlayer {
    cursor: usize,
    mode: PlaybackMode,
    finished: bool,
}

impl TrajectoryPlayer {
    pub fn new(mode: PlaybackMode) -> Self {
        TrajectoryPlayer { cursor: 0, mode, finished: false }
    }

    /// Returns the pose for this tick and moves the cursor on.
    ///
    /// An empty trajectory yields `None`. In one-shot mode the last pose is returned
    /// again on every tick after the end has been reached.
    ///
    /// # Example
    /// ```
    /// use rs_dice::models::{Pose, Quaternion};
    /// use rs_dice::trajectory::{PlaybackMode, Trajectory, TrajectoryPlayer};
    ///
    /// let mut trajectory = Trajectory::new();
    /// trajectory.record(Pose::new((0.0, 1.0, 0.0), Quaternion::identity()));
    /// trajectory.record(Pose::new((0.0, 0.5, 0.0), Quaternion::identity()));
    ///
    /// let mut player = TrajectoryPlayer::new(PlaybackMode::Cyclic);
    /// assert_eq!(player.advance(&trajectory).unwrap().position.1, 1.0);
    /// assert_eq!(player.advance(&trajectory).unwrap().position.1, 0.5);
    /// assert_eq!(player.advance(&trajectory).unwrap().position.1, 1.0);
    /// ```
    pub fn advance(&mut self, trajectory: &Trajectory) -> Option<Pose> {
        let len = trajectory.len();
        if len == 0 {
            return None;
        }
        if self.cursor >= len {
            // The trajectory shrank underneath us
            self.cursor = match self.mode {
                PlaybackMode::Cyclic => 0,
                PlaybackMode::OneShot => len - 1,
            };
        }

        let pose = trajectory.get(self.cursor).copied();
        match self.mode {
            PlaybackMode::Cyclic => self.cursor = (self.cursor + 1) % len,
            PlaybackMode::OneShot => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                } else {
                    self.finished = true;
                }
            }
        }
        pose
    }

    /// Rewinds to the first pose.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.finished = false;
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once a one-shot replay has shown its last pose. Cyclic replays never finish.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction of `trajectory` already shown, in `[0, 1]`.
    pub fn progress(&self, trajectory: &Trajectory) -> f64 {
        if self.finished {
            return 1.0;
        }
        if trajectory.is_empty() {
            return 0.0;
        }
        (self.cursor as f64 / trajectory.len() as f64).min(1.0)
    }
}
