// src/correction/outcome_corrector_tests.rs

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::assert_float_eq;
use crate::correction::{correction_for, rotation_between, PresentationPose};
use crate::errors::DiceError;
use crate::faces::{top_face, FaceAtlas};
use crate::models::{Pose, Quaternion};
use crate::utils::{dot_product, WORLD_UP};
use std::f64::consts::FRAC_PI_2;

fn quarter_turn_orientations() -> Vec<Quaternion> {
    let mut orientations = Vec::new();
    for x in 0..4 {
        for y in 0..4 {
            for z in 0..4 {
                let qx = Quaternion::from_axis_angle((1.0, 0.0, 0.0), x as f64 * FRAC_PI_2);
                let qy = Quaternion::from_axis_angle((0.0, 1.0, 0.0), y as f64 * FRAC_PI_2);
                let qz = Quaternion::from_axis_angle((0.0, 0.0, 1.0), z as f64 * FRAC_PI_2);
                orientations.push(qz.multiply(&qy).multiply(&qx));
            }
        }
    }
    orientations
}

fn random_orientations(count: usize) -> Vec<Quaternion> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            let axis = (
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            Quaternion::from_axis_angle(axis, rng.random_range(0.0..std::f64::consts::TAU))
        })
        .collect()
}

#[test]
fn test_scenario_three_up_corrected_to_six() {
    let atlas = FaceAtlas::standard_d6();
    assert_eq!(top_face(&Quaternion::identity(), &atlas), 6);

    let achieved = Quaternion::from_axis_angle((1.0, 0.0, 0.0), -FRAC_PI_2);
    assert_eq!(top_face(&achieved, &atlas), 3);

    let correction = correction_for(&achieved, 6, &atlas).unwrap();
    // Undoing the quarter turn: +90 degrees about X
    assert!(correction.is_same_rotation(&Quaternion::from_axis_angle((1.0, 0.0, 0.0), FRAC_PI_2), 1e-10));
    assert_eq!(top_face(&correction.multiply(&achieved), &atlas), 6);
}

#[test]
fn test_correction_round_trip_for_every_face_pair() {
    for atlas in [FaceAtlas::standard_d6(), FaceAtlas::mirrored_d6(), FaceAtlas::octahedral_d8()] {
        let mut orientations = quarter_turn_orientations();
        orientations.extend(random_orientations(50));
        for achieved in &orientations {
            for desired in atlas.faces() {
                let correction = correction_for(achieved, desired, &atlas).unwrap();
                let corrected = correction.multiply(achieved);
                assert_eq!(
                    top_face(&corrected, &atlas),
                    desired,
                    "correction from {:?} to face {} failed",
                    achieved,
                    desired
                );
            }
        }
    }
}

#[test]
fn test_correction_is_identity_when_face_already_on_top() {
    let atlas = FaceAtlas::standard_d6();
    let mut orientations = quarter_turn_orientations();
    orientations.extend(random_orientations(50));
    for achieved in &orientations {
        let correction = correction_for(achieved, top_face(achieved, &atlas), &atlas).unwrap();
        assert_abs_diff_eq!(correction, Quaternion::identity(), epsilon = 1e-15);
    }
}

#[test]
fn test_correction_flips_bottom_face_up() {
    let atlas = FaceAtlas::standard_d6();
    let correction = correction_for(&Quaternion::identity(), 1, &atlas).unwrap();
    assert_float_eq(correction.angle(), std::f64::consts::PI, 1e-10, Some("bottom face needs a half turn"));
    assert_eq!(top_face(&correction, &atlas), 1);
}

#[test]
fn test_correction_unknown_face() {
    let atlas = FaceAtlas::standard_d6();
    assert_eq!(correction_for(&Quaternion::identity(), 7, &atlas), Err(DiceError::UnknownFace(7)));
    // Even when no correction would be needed for a known face
    assert_eq!(correction_for(&Quaternion::identity(), 0, &atlas), Err(DiceError::UnknownFace(0)));
}

#[test]
fn test_rotation_between_is_minimal() {
    let from = (1.0, 0.0, 0.0);
    let to = (1.0, 1.0, 0.0);
    let q = rotation_between(from, to);
    assert_float_eq(q.angle(), std::f64::consts::FRAC_PI_4, 1e-10, None);
    let rotated = q.rotate_point(from);
    assert_float_eq(rotated.0, rotated.1, 1e-10, None);
}

#[test]
fn test_rotation_between_degenerate_inputs() {
    assert_eq!(rotation_between((0.0, 0.0, 0.0), WORLD_UP), Quaternion::identity());
    assert_eq!(rotation_between(WORLD_UP, (0.0, 3.0, 0.0)), Quaternion::identity());

    let flipped = rotation_between((0.0, -1.0, 0.0), WORLD_UP);
    let rotated = flipped.rotate_point((0.0, -1.0, 0.0));
    assert_float_eq(dot_product(rotated, WORLD_UP), 1.0, 1e-10, None);
    assert!(!flipped.w.is_nan());
}

#[test]
fn test_presentation_keeps_physical_pose() {
    let atlas = FaceAtlas::standard_d6();
    let physical = Pose::new((0.3, 0.5, -0.2), Quaternion::from_axis_angle((1.0, 0.0, 0.0), -FRAC_PI_2));
    let correction = correction_for(&physical.orientation, 6, &atlas).unwrap();
    let presentation = PresentationPose::new(physical, correction);

    assert!(presentation.is_corrected());
    assert_eq!(presentation.physical, physical);
    assert_eq!(presentation.physical_face(&atlas), 3);
    assert_eq!(presentation.displayed_face(&atlas), 6);
    assert_eq!(presentation.displayed().position, physical.position);

    let plain = PresentationPose::uncorrected(physical);
    assert!(!plain.is_corrected());
    assert_eq!(plain.displayed_face(&atlas), 3);
}
