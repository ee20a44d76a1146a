// src/trajectory/trajectory.rs

use crate::models::Pose;

/// Poses of one throw, one per integrator step, in step order.
///
/// Recording only ever appends. Starting a new throw calls [`Trajectory::clear`] before
/// the first pose of that throw is recorded, so two throws never share a trajectory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    poses: Vec<Pose>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory { poses: Vec::new() }
    }

    pub fn record(&mut self, pose: Pose) {
        self.poses.push(pose);
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }

    pub fn get(&self, step: usize) -> Option<&Pose> {
        self.poses.get(step)
    }

    pub fn first(&self) -> Option<&Pose> {
        self.poses.first()
    }

    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}
