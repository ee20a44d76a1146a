// src/faces/face_atlas.rs

use std::collections::HashSet;
use crate::errors::DiceError;
use crate::utils::{dot_product, normalize_vector};

/// Dot product below which two unit directions count as antiparallel.
const OPPOSITE_TOLERANCE: f64 = 1e-6;

/// One face of a die: its value and the outward direction in the die's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceEntry {
    pub face: u32,
    pub direction: (f64, f64, f64),
}

/// Immutable mapping between face values and local outward unit directions.
///
/// Entries are kept in ascending face order, which is also the tie-break order used
/// when resolving the top face. An atlas never changes after construction, so one
/// instance can be shared (behind an `Arc`) by every die of the same model.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAtlas {
    entries: Vec<FaceEntry>,
}

impl FaceAtlas {
    /// Builds an atlas from `(face, direction)` pairs.
    ///
    /// # Errors
    /// Returns `DiceError::InvalidAtlas` if:
    /// * there are no entries,
    /// * a face value appears twice,
    /// * a direction has zero length,
    /// * a direction has no antiparallel partner among the other entries.
    ///
    /// # Example
    /// ```
    /// use rs_dice::faces::FaceAtlas;
    ///
    /// let coin = FaceAtlas::new(&[(1, (0.0, 1.0, 0.0)), (2, (0.0, -3.0, 0.0))]).unwrap();
    /// assert_eq!(coin.direction_of(2).unwrap(), (0.0, -1.0, 0.0));
    /// ```
    pub fn new(entries: &[(u32, (f64, f64, f64))]) -> Result<Self, DiceError> {
        if entries.is_empty() {
            return Err(DiceError::InvalidAtlas("an atlas needs at least one face".to_string()));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());
        for &(face, direction) in entries {
            if !seen.insert(face) {
                return Err(DiceError::InvalidAtlas(format!("face {} is listed twice", face)));
            }
            let direction = normalize_vector(direction).ok_or_else(|| {
                DiceError::InvalidAtlas(format!("face {} has a zero-length direction", face))
            })?;
            normalized.push(FaceEntry { face, direction });
        }

        for entry in &normalized {
            let has_opposite = normalized.iter().any(|other| {
                other.face != entry.face &&
                    dot_product(other.direction, entry.direction) < -1.0 + OPPOSITE_TOLERANCE
            });
            if !has_opposite {
                return Err(DiceError::InvalidAtlas(format!("face {} has no opposite face", entry.face)));
            }
        }

        normalized.sort_by_key(|entry| entry.face);
        Ok(FaceAtlas { entries: normalized })
    }

    /// The six-sided die used by default: 6 up, 1 down, 5 right, 2 left, 3 towards +Z
    /// and 4 towards -Z. Opposite faces sum to 7.
    pub fn standard_d6() -> Self {
        FaceAtlas::from_trusted(&[
            (1, (0.0, -1.0, 0.0)),
            (2, (-1.0, 0.0, 0.0)),
            (3, (0.0, 0.0, 1.0)),
            (4, (0.0, 0.0, -1.0)),
            (5, (1.0, 0.0, 0.0)),
            (6, (0.0, 1.0, 0.0)),
        ])
    }

    /// A six-sided model with 2 and 5 swapped relative to [`FaceAtlas::standard_d6`].
    pub fn mirrored_d6() -> Self {
        FaceAtlas::from_trusted(&[
            (1, (0.0, -1.0, 0.0)),
            (2, (1.0, 0.0, 0.0)),
            (3, (0.0, 0.0, 1.0)),
            (4, (0.0, 0.0, -1.0)),
            (5, (-1.0, 0.0, 0.0)),
            (6, (0.0, 1.0, 0.0)),
        ])
    }

    /// Regular octahedron: face normals point at the eight octants.
    /// Opposite faces sum to 9.
    pub fn octahedral_d8() -> Self {
        let s = 1.0 / 3.0_f64.sqrt();
        FaceAtlas::from_trusted(&[
            (1, (s, s, s)),
            (2, (-s, s, -s)),
            (3, (s, -s, -s)),
            (4, (-s, -s, s)),
            (5, (s, s, -s)),
            (6, (-s, s, s)),
            (7, (s, -s, s)),
            (8, (-s, -s, -s)),
        ])
    }

    // Presets are written by hand and already satisfy every construction invariant.
    fn from_trusted(entries: &[(u32, (f64, f64, f64))]) -> Self {
        let mut entries: Vec<FaceEntry> = entries
            .iter()
            .map(|&(face, direction)| FaceEntry { face, direction })
            .collect();
        entries.sort_by_key(|entry| entry.face);
        FaceAtlas { entries }
    }

    /// Returns the local outward unit direction of `face`.
    ///
    /// # Errors
    /// `DiceError::UnknownFace` if the atlas has no such face.
    pub fn direction_of(&self, face: u32) -> Result<(f64, f64, f64), DiceError> {
        self.entries
            .iter()
            .find(|entry| entry.face == face)
            .map(|entry| entry.direction)
            .ok_or(DiceError::UnknownFace(face))
    }

    pub fn contains(&self, face: u32) -> bool {
        self.entries.iter().any(|entry| entry.face == face)
    }

    /// Entries in ascending face order.
    pub fn entries(&self) -> &[FaceEntry] {
        &self.entries
    }

    pub fn faces(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|entry| entry.face)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FaceAtlas {
    fn default() -> Self {
        FaceAtlas::standard_d6()
    }
}
