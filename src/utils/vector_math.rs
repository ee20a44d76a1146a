// src/utils/vector_math.rs

/// World "up". Faces are resolved against this direction and gravity acts against it.
pub const WORLD_UP: (f64, f64, f64) = (0.0, 1.0, 0.0);

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-10;

/// Calculates the cross product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_dice::utils::cross_product;
///
/// let result = cross_product((1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
/// assert_eq!(result, (0.0, 0.0, 1.0));
/// ```
pub fn cross_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0
    )
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_dice::utils::dot_product;
///
/// assert_eq!(dot_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), 32.0);
/// ```
pub fn dot_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> f64 {
    v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2
}

/// Calculates the magnitude (length) of a 3D vector.
pub fn vector_magnitude(v: (f64, f64, f64)) -> f64 {
    dot_product(v, v).sqrt()
}

/// Normalizes a 3D vector.
///
/// Returns `None` for vectors shorter than [`NORMALIZE_EPSILON`] so that callers never
/// divide by (almost) zero and propagate NaN.
///
/// # Example
/// ```
/// use rs_dice::utils::normalize_vector;
///
/// let normalized = normalize_vector((3.0, 0.0, 4.0)).unwrap();
/// assert!((normalized.0 - 0.6).abs() < 1e-10);
/// assert!((normalized.2 - 0.8).abs() < 1e-10);
/// assert!(normalize_vector((0.0, 0.0, 0.0)).is_none());
/// ```
pub fn normalize_vector(v: (f64, f64, f64)) -> Option<(f64, f64, f64)> {
    let magnitude = vector_magnitude(v);

    if magnitude < NORMALIZE_EPSILON {
        return None;
    }

    Some((v.0 / magnitude, v.1 / magnitude, v.2 / magnitude))
}

pub fn add_vectors(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (v1.0 + v2.0, v1.1 + v2.1, v1.2 + v2.2)
}

pub fn subtract_vectors(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (v1.0 - v2.0, v1.1 - v2.1, v1.2 - v2.2)
}

pub fn scale_vector(v: (f64, f64, f64), factor: f64) -> (f64, f64, f64) {
    (v.0 * factor, v.1 * factor, v.2 * factor)
}

/// Returns some unit vector orthogonal to `v`.
///
/// Crosses with the X axis first and falls back to the Y axis when `v` is (nearly)
/// parallel to X. A zero input yields the X axis.
pub fn any_orthogonal(v: (f64, f64, f64)) -> (f64, f64, f64) {
    normalize_vector(cross_product(v, (1.0, 0.0, 0.0)))
        .or_else(|| normalize_vector(cross_product(v, (0.0, 1.0, 0.0))))
        .unwrap_or((1.0, 0.0, 0.0))
}

/// Angle in radians between two vectors, clamped so rounding never produces NaN.
/// Zero-length input gives an angle of zero.
pub fn angle_between(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> f64 {
    match (normalize_vector(v1), normalize_vector(v2)) {
        (Some(a), Some(b)) => dot_product(a, b).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}
