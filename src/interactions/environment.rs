// src/interactions/environment.rs

use crate::utils::{add_vectors, dot_product, scale_vector};

/// Distance from the floor within which a body counts as supported.
pub const SUPPORT_TOLERANCE: f64 = 1e-3;

/// Result of a blocked displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit surface normal, pointing away from the surface towards the body.
    pub normal: (f64, f64, f64),
    /// The part of the attempted displacement that was travelled before the contact.
    pub achieved_displacement: (f64, f64, f64),
}

/// Answers whether a displacement of the die runs into something.
pub trait CollisionQuery {
    /// Returns `None` if the body can travel the whole `displacement` from `position`.
    fn cast(&self, position: (f64, f64, f64), displacement: (f64, f64, f64)) -> Option<Contact>;
}

/// Answers whether the die currently rests on a supporting surface.
pub trait GroundPredicate {
    fn is_supported(&self, position: (f64, f64, f64)) -> bool;
}

/// Anything that can both block movement and support the die.
pub trait Surroundings: CollisionQuery + GroundPredicate {}

impl<T: CollisionQuery + GroundPredicate> Surroundings for T {}

/// A static half-space boundary `dot(p, normal) >= offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Plane {
    normal: (f64, f64, f64),
    offset: f64,
}

impl Plane {
    /// Fraction of `displacement` travelled before a sphere of `radius` touches the
    /// plane, or `None` if it never does during this displacement.
    fn time_of_impact(&self, position: (f64, f64, f64), displacement: (f64, f64, f64), radius: f64) -> Option<f64> {
        let approach = dot_product(displacement, self.normal);
        if approach >= 0.0 {
            return None;
        }
        let distance = dot_product(position, self.normal) - self.offset - radius;
        if distance + approach >= 0.0 {
            return None;
        }
        Some((distance / -approach).clamp(0.0, 1.0))
    }
}

fn cast_against(
    planes: &[Plane],
    position: (f64, f64, f64),
    displacement: (f64, f64, f64),
    radius: f64,
) -> Option<Contact> {
    let mut earliest: Option<(f64, &Plane)> = None;
    for plane in planes {
        if let Some(t) = plane.time_of_impact(position, displacement, radius) {
            if earliest.map_or(true, |(best, _)| t < best) {
                earliest = Some((t, plane));
            }
        }
    }

    earliest.map(|(t, plane)| Contact {
        normal: plane.normal,
        achieved_displacement: scale_vector(displacement, t),
    })
}

/// An infinite horizontal floor at `height`. The die is approximated by a bounding
/// sphere of radius `half_extent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f64,
    pub half_extent: f64,
}

impl Default for GroundPlane {
    fn default() -> Self {
        GroundPlane { height: 0.0, half_extent: 0.5 }
    }
}

impl GroundPlane {
    pub fn new(height: f64, half_extent: f64) -> Self {
        GroundPlane { height, half_extent }
    }

    fn floor(&self) -> Plane {
        Plane { normal: (0.0, 1.0, 0.0), offset: self.height }
    }
}

impl CollisionQuery for GroundPlane {
    fn cast(&self, position: (f64, f64, f64), displacement: (f64, f64, f64)) -> Option<Contact> {
        cast_against(&[self.floor()], position, displacement, self.half_extent)
    }
}

impl GroundPredicate for GroundPlane {
    fn is_supported(&self, position: (f64, f64, f64)) -> bool {
        position.1 - self.half_extent - self.height <= SUPPORT_TOLERANCE
    }
}

/// An open-topped box centred on the origin: a floor plus four walls facing inwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceBox {
    pub half_width: f64,
    pub half_depth: f64,
    pub floor: f64,
    pub half_extent: f64,
}

impl Default for DiceBox {
    fn default() -> Self {
        DiceBox { half_width: 3.0, half_depth: 3.0, floor: 0.0, half_extent: 0.5 }
    }
}

impl DiceBox {
    pub fn new(half_width: f64, half_depth: f64, floor: f64, half_extent: f64) -> Self {
        DiceBox { half_width, half_depth, floor, half_extent }
    }

    fn planes(&self) -> [Plane; 5] {
        [
            Plane { normal: (0.0, 1.0, 0.0), offset: self.floor },
            Plane { normal: (1.0, 0.0, 0.0), offset: -self.half_width },
            Plane { normal: (-1.0, 0.0, 0.0), offset: -self.half_width },
            Plane { normal: (0.0, 0.0, 1.0), offset: -self.half_depth },
            Plane { normal: (0.0, 0.0, -1.0), offset: -self.half_depth },
        ]
    }

    /// True if `position` lies inside the walls (ignoring the die's own extent).
    pub fn contains(&self, position: (f64, f64, f64)) -> bool {
        position.0.abs() <= self.half_width && position.2.abs() <= self.half_depth && position.1 >= self.floor
    }
}

impl CollisionQuery for DiceBox {
    fn cast(&self, position: (f64, f64, f64), displacement: (f64, f64, f64)) -> Option<Contact> {
        cast_against(&self.planes(), position, displacement, self.half_extent)
    }
}

impl GroundPredicate for DiceBox {
    fn is_supported(&self, position: (f64, f64, f64)) -> bool {
        position.1 - self.half_extent - self.floor <= SUPPORT_TOLERANCE
    }
}

/// Empty space: nothing is ever hit and nothing supports the die.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpenSpace;

impl CollisionQuery for OpenSpace {
    fn cast(&self, _position: (f64, f64, f64), _displacement: (f64, f64, f64)) -> Option<Contact> {
        None
    }
}

impl GroundPredicate for OpenSpace {
    fn is_supported(&self, _position: (f64, f64, f64)) -> bool {
        false
    }
}

/// Moves `position` by the displacement a contact allowed, or by the full displacement
/// when there was no contact.
pub fn advance_position(
    position: (f64, f64, f64),
    displacement: (f64, f64, f64),
    contact: Option<&Contact>,
) -> (f64, f64, f64) {
    match contact {
        Some(contact) => add_vectors(position, contact.achieved_displacement),
        None => add_vectors(position, displacement),
    }
}

