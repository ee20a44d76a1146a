use approx::{AbsDiffEq, RelativeEq};
use crate::utils::{normalize_vector, vector_magnitude};

/// Unit quaternion used for die orientations and corrective rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub fn identity() -> Self {
        Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn is_near_identity(&self, epsilon: f64) -> bool {
        // q and -q describe the same rotation
        let sign = if self.w < 0.0 { -1.0 } else { 1.0 };
        (sign * self.w - 1.0).abs() < epsilon &&
            self.x.abs() < epsilon &&
            self.y.abs() < epsilon &&
            self.z.abs() < epsilon
    }

    /// Creates a quaternion from axis-angle representation.
    ///
    /// The axis does not need to be normalized. A (near) zero axis yields the identity.
    ///
    /// # Example
    /// ```
    /// use rs_dice::models::Quaternion;
    /// use std::f64::consts::PI;
    ///
    /// let q = Quaternion::from_axis_angle((0.0, 0.0, 2.0), PI / 2.0);
    /// let (x, y, _) = q.rotate_point((1.0, 0.0, 0.0));
    /// assert!(x.abs() < 1e-10);
    /// assert!((y - 1.0).abs() < 1e-10);
    /// ```
    pub fn from_axis_angle(axis: (f64, f64, f64), angle: f64) -> Self {
        let (nx, ny, nz) = match normalize_vector(axis) {
            Some(unit) => unit,
            None => return Quaternion::identity(),
        };
        let (sin_half, cos_half) = (angle / 2.0).sin_cos();
        Quaternion { w: cos_half, x: nx * sin_half, y: ny * sin_half, z: nz * sin_half }
    }

    /// Creates the rotation described by a rotation vector (axis scaled by angle),
    /// e.g. an angular velocity multiplied by a time step.
    pub fn from_scaled_axis(v: (f64, f64, f64)) -> Self {
        Quaternion::from_axis_angle(v, vector_magnitude(v))
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns a normalized version of the quaternion.
    /// Degenerate (near zero) quaternions normalize to the identity.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 || !mag.is_finite() {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Multiplies two quaternions (composition of rotations).
    ///
    /// `a.multiply(&b)` rotates by `b` first, then by `a`.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Returns the conjugate of the quaternion
    pub fn conjugate(&self) -> Quaternion {
        Quaternion { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Rotates a point using the quaternion
    pub fn rotate_point(&self, point: (f64, f64, f64)) -> (f64, f64, f64) {
        let p = Quaternion { w: 0.0, x: point.0, y: point.1, z: point.2 };

        // q p q*, the conjugate being the inverse of a unit quaternion
        let q = self.normalized();
        let rotated = q.multiply(&p).multiply(&q.conjugate());

        (rotated.x, rotated.y, rotated.z)
    }

    /// Rotation angle in radians, in `[0, π]`.
    pub fn angle(&self) -> f64 {
        let q = self.normalized();
        2.0 * q.w.abs().clamp(0.0, 1.0).acos()
    }

    /// True if both quaternions describe the same rotation (`q` and `-q` included).
    pub fn is_same_rotation(&self, other: &Quaternion, epsilon: f64) -> bool {
        (self.normalized().dot(&other.normalized()).abs() - 1.0).abs() < epsilon
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.w, &other.w, epsilon) &&
            f64::abs_diff_eq(&self.x, &other.x, epsilon) &&
            f64::abs_diff_eq(&self.y, &other.y, epsilon) &&
            f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self.w, &other.w, epsilon, max_relative) &&
            f64::relative_eq(&self.x, &other.x, epsilon, max_relative) &&
            f64::relative_eq(&self.y, &other.y, epsilon, max_relative) &&
            f64::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}
