use crate::models::Quaternion;

/// Position and orientation of a die at one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: (f64, f64, f64),
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: (f64, f64, f64), orientation: Quaternion) -> Self {
        Pose { position, orientation }
    }

    /// Returns a copy with `rotation` applied in world space on top of the orientation.
    /// The position is left untouched.
    pub fn rotated_by(&self, rotation: &Quaternion) -> Pose {
        Pose {
            position: self.position,
            orientation: rotation.multiply(&self.orientation).normalized(),
        }
    }
}
