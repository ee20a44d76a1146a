// src/correction/presentation.rs

use crate::faces::{top_face, FaceAtlas};
use crate::models::{Pose, Quaternion};

/// What is shown to the user: a physical pose plus a cosmetic correction.
///
/// The physical pose is kept exactly as the simulation produced it; only
/// [`PresentationPose::displayed`] has the correction applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationPose {
    pub physical: Pose,
    pub correction: Quaternion,
}

impl PresentationPose {
    pub fn new(physical: Pose, correction: Quaternion) -> Self {
        PresentationPose { physical, correction }
    }

    /// A presentation identical to the physical pose.
    pub fn uncorrected(physical: Pose) -> Self {
        PresentationPose { physical, correction: Quaternion::identity() }
    }

    pub fn is_corrected(&self) -> bool {
        !self.correction.is_near_identity(1e-12)
    }

    pub fn displayed(&self) -> Pose {
        self.physical.rotated_by(&self.correction)
    }

    /// Face the viewer sees on top.
    pub fn displayed_face(&self, atlas: &FaceAtlas) -> u32 {
        top_face(&self.displayed().orientation, atlas)
    }

    /// Face the physics actually produced.
    pub fn physical_face(&self, atlas: &FaceAtlas) -> u32 {
        top_face(&self.physical.orientation, atlas)
    }
}
