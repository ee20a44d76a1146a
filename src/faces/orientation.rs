// src/faces/orientation.rs

use crate::faces::FaceAtlas;
use crate::models::Quaternion;
use crate::utils::{dot_product, WORLD_UP};

/// The face currently pointing up, its world-space direction and its alignment with
/// world up (the cosine of its tilt).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopFace {
    pub face: u32,
    pub world_direction: (f64, f64, f64),
    pub alignment: f64,
}

impl TopFace {
    /// Angle in radians between the face direction and world up.
    pub fn tilt(&self) -> f64 {
        self.alignment.clamp(-1.0, 1.0).acos()
    }
}

/// Finds the face whose outward direction is most aligned with world up.
///
/// Faces are visited in ascending order and only a strictly greater alignment replaces
/// the current best, so exact ties resolve to the lowest face value.
///
/// # Example
/// ```
/// use rs_dice::faces::{top_face_alignment, FaceAtlas};
/// use rs_dice::models::Quaternion;
///
/// let top = top_face_alignment(&Quaternion::identity(), &FaceAtlas::standard_d6());
/// assert_eq!(top.face, 6);
/// assert!((top.alignment - 1.0).abs() < 1e-12);
/// ```
pub fn top_face_alignment(orientation: &Quaternion, atlas: &FaceAtlas) -> TopFace {
    let mut best: Option<TopFace> = None;

    for entry in atlas.entries() {
        let world_direction = orientation.rotate_point(entry.direction);
        let alignment = dot_product(world_direction, WORLD_UP);

        let better = match &best {
            Some(current) => alignment > current.alignment,
            None => true,
        };
        if better {
            best = Some(TopFace { face: entry.face, world_direction, alignment });
        }
    }

    // Atlases are never empty (checked on construction)
    best.unwrap_or(TopFace { face: 0, world_direction: WORLD_UP, alignment: -1.0 })
}

/// Face value currently pointing up.
pub fn top_face(orientation: &Quaternion, atlas: &FaceAtlas) -> u32 {
    top_face_alignment(orientation, atlas).face
}

/// True if some face is within `tolerance_radians` of pointing straight up, i.e. the
/// die is resting on a face rather than balancing on an edge or a corner.
pub fn is_flat(orientation: &Quaternion, atlas: &FaceAtlas, tolerance_radians: f64) -> bool {
    let min_alignment = tolerance_radians.cos();
    atlas.entries().iter().any(|entry| {
        dot_product(orientation.rotate_point(entry.direction), WORLD_UP) >= min_alignment
    })
}
