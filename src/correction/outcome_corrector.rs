// src/correction/outcome_corrector.rs

use crate::errors::DiceError;
use crate::faces::{top_face, FaceAtlas};
use crate::models::Quaternion;
use crate::utils::{angle_between, any_orthogonal, cross_product, dot_product, normalize_vector, WORLD_UP};
use std::f64::consts::PI;

/// Dot products this close to ±1 count as (anti)parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Shortest-arc rotation taking direction `from` onto direction `to`.
///
/// Neither input needs to be normalized. Zero-length input gives the identity.
/// For opposite directions there is no unique shortest arc; a half turn about an
/// arbitrary axis orthogonal to `from` is returned.
///
/// # Example
/// ```
/// use rs_dice::correction::rotation_between;
///
/// let q = rotation_between((0.0, 0.0, -1.0), (0.0, 1.0, 0.0));
/// let (x, y, z) = q.rotate_point((0.0, 0.0, -1.0));
/// assert!(x.abs() < 1e-10 && (y - 1.0).abs() < 1e-10 && z.abs() < 1e-10);
/// ```
pub fn rotation_between(from: (f64, f64, f64), to: (f64, f64, f64)) -> Quaternion {
    let (from, to) = match (normalize_vector(from), normalize_vector(to)) {
        (Some(from), Some(to)) => (from, to),
        _ => return Quaternion::identity(),
    };

    let dot = dot_product(from, to).clamp(-1.0, 1.0);
    if dot > 1.0 - PARALLEL_EPSILON {
        return Quaternion::identity();
    }
    if dot < -1.0 + PARALLEL_EPSILON {
        return Quaternion::from_axis_angle(any_orthogonal(from), PI);
    }

    match normalize_vector(cross_product(from, to)) {
        Some(axis) => Quaternion::from_axis_angle(axis, angle_between(from, to)),
        None => Quaternion::from_axis_angle(any_orthogonal(from), PI),
    }
}

/// Rotation that, pre-applied to `achieved_orientation`, puts `desired_face` on top.
///
/// Returns the identity when `desired_face` is already the top face. Otherwise the
/// world-space direction of `desired_face` under `achieved_orientation` is rotated onto
/// world up along the shortest arc.
///
/// The result is meant for a presentation transform only (see
/// [`PresentationPose`](crate::correction::PresentationPose)); the physical throw that
/// produced `achieved_orientation` is left as it was.
///
/// # Errors
/// `DiceError::UnknownFace` if `desired_face` is not in `atlas`.
///
/// # Example
/// ```
/// use rs_dice::correction::correction_for;
/// use rs_dice::faces::{top_face, FaceAtlas};
/// use rs_dice::models::Quaternion;
///
/// let atlas = FaceAtlas::standard_d6();
/// let achieved = Quaternion::from_axis_angle((1.0, 0.0, 0.0), -std::f64::consts::FRAC_PI_2);
/// assert_eq!(top_face(&achieved, &atlas), 3);
///
/// let correction = correction_for(&achieved, 6, &atlas).unwrap();
/// assert_eq!(top_face(&correction.multiply(&achieved), &atlas), 6);
/// ```
pub fn correction_for(
    achieved_orientation: &Quaternion,
    desired_face: u32,
    atlas: &FaceAtlas,
) -> Result<Quaternion, DiceError> {
    let desired_local = atlas.direction_of(desired_face)?;
    if top_face(achieved_orientation, atlas) == desired_face {
        return Ok(Quaternion::identity());
    }

    let desired_world = achieved_orientation.rotate_point(desired_local);
    Ok(rotation_between(desired_world, WORLD_UP))
}
