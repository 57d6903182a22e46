//! Vector and point algebra on top of glam.
//!
//! Angles cross this module's API in degrees and are converted to radians
//! internally. Anything that produces a [`Point`] rounds to the nearest
//! integer (ties away from zero) at the moment of computation.

use crate::core::error::GeometryError;
use crate::core::types::{Point, Vector};

/// World up (Z-up, as the map editors expect).
pub const UP: Vector = Vector::Z;

/// The six signed cartesian unit vectors, in tie-breaking order.
pub const CARDINALS: [Vector; 6] = [
    Vector::Z,
    Vector::NEG_Z,
    Vector::Y,
    Vector::NEG_Y,
    Vector::X,
    Vector::NEG_X,
];

/// Unit vector in the direction of `v`.
///
/// Fails instead of producing NaN components when `v` has zero length.
pub fn normalize(v: Vector) -> Result<Vector, GeometryError> {
    v.try_normalize().ok_or(GeometryError::ZeroLength)
}

/// Rotate `v` about an arbitrary `axis` by `degrees` (Rodrigues' formula).
pub fn rotate_about_axis(v: Vector, axis: Vector, degrees: f64) -> Result<Vector, GeometryError> {
    let k = normalize(axis)?;
    let (sin, cos) = degrees.to_radians().sin_cos();
    Ok(v * cos + k.cross(v) * sin + k * k.dot(v) * (1.0 - cos))
}

/// Angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between(a: Vector, b: Vector) -> Result<f64, GeometryError> {
    let denom = a.length() * b.length();
    if denom == 0.0 {
        return Err(GeometryError::ZeroLength);
    }
    // Rounding can push the ratio a hair outside acos's domain
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// Round a floating-point position onto the integer grid.
pub fn snap(v: Vector) -> Point {
    v.round().as_ivec3()
}

/// `p + v`, rounded back onto the grid.
pub fn displace(p: Point, v: Vector) -> Point {
    snap(p.as_dvec3() + v)
}

/// Vector from `a` to `b`.
pub fn between(a: Point, b: Point) -> Vector {
    (b - a).as_dvec3()
}

/// Component-wise comparison within `margin`.
pub fn approx_eq(a: Vector, b: Vector, margin: f64) -> bool {
    (a - b).abs().max_element() < margin
}
