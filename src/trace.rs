//! Fixed-step ray marching against brushes.
//!
//! This is the only spatial query the generator has. A trace samples the
//! grid point nearest to `origin + dir * len` for every integer `len` and
//! tests it against each brush's planes, so a query costs
//! O(steps x brushes x planes). Brush bounds are checked first to skip most
//! plane tests, but there is no spatial index.

use crate::brush::Brush;
use crate::core::error::GeometryError;
use crate::core::types::{Point, Vector};
use crate::math::vector;

/// Longest trace the generator issues, in grid units.
pub const MAX_TRACE_LENGTH: u32 = 8192;

/// Outcome of a single trace
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceResult {
    /// Did the trace stop on something, or did it expire?
    pub hit: bool,
    /// Distance travelled, in steps
    pub length: u32,
    pub start: Point,
    pub finish: Point,
    /// Index of the brush entered (entry traces only)
    pub brush: Option<usize>,
    /// Index of the plane crossed (interior traces only)
    pub plane: Option<usize>,
}

impl TraceResult {
    fn new(origin: Point) -> Self {
        Self {
            hit: false,
            length: 0,
            start: origin,
            finish: origin,
            brush: None,
            plane: None,
        }
    }
}

fn sample(origin: Point, dir: Vector, len: u32) -> Point {
    vector::snap(origin.as_dvec3() + dir * len as f64)
}

/// March from `origin` along `direction` until a sample lands strictly inside
/// one of `brushes`, or `max_length` steps have been taken.
///
/// On a hit the finish point is backed off one step so it rests on the
/// brush's boundary rather than inside it. The first brush in slice order
/// that contains a sample wins.
pub fn trace(
    origin: Point,
    direction: Vector,
    brushes: &[Brush],
    max_length: u32,
) -> Result<TraceResult, GeometryError> {
    let dir = vector::normalize(direction)?;
    let mut result = TraceResult::new(origin);

    for len in 0..=max_length {
        let location = sample(origin, dir, len);
        if let Some(index) = brushes.iter().position(|brush| brush.contains(location)) {
            result.hit = true;
            result.brush = Some(index);
            result.finish = vector::snap(location.as_dvec3() - dir);
            result.length = len.saturating_sub(1);
            return Ok(result);
        }
        result.finish = location;
        result.length = len;
    }
    Ok(result)
}

/// March from `origin` (expected inside `brush`) until a sample is outside or
/// on at least one of its planes, recording which plane was crossed.
pub fn interior_trace(
    origin: Point,
    direction: Vector,
    brush: &Brush,
    max_length: u32,
) -> Result<TraceResult, GeometryError> {
    let dir = vector::normalize(direction)?;
    let mut result = TraceResult::new(origin);

    for len in 0..max_length {
        let location = sample(origin, dir, len);
        result.finish = location;
        result.length = len;
        if let Some(plane) = brush.exit_plane(location) {
            result.hit = true;
            result.plane = Some(plane);
            return Ok(result);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::plane::TextureStyle;

    fn slab() -> Brush {
        Brush::block(Point::new(-50, -50, 0), Point::new(50, 50, -32), &TextureStyle::default()).unwrap()
    }

    #[test]
    fn test_hit_backs_off_to_boundary() {
        let brushes = [slab()];
        let result = trace(Point::new(0, 0, 100), Vector::NEG_Z, &brushes, MAX_TRACE_LENGTH).unwrap();
        assert!(result.hit);
        assert_eq!(result.brush, Some(0));
        assert_eq!(result.finish, Point::new(0, 0, 0));
        assert_eq!(result.length, 100);
        assert_eq!(result.start, Point::new(0, 0, 100));
    }

    #[test]
    fn test_expiry_finishes_at_last_sample() {
        let brushes = [slab()];
        let result = trace(Point::new(0, 0, 100), Vector::Z * 3.0, &brushes, 20).unwrap();
        assert!(!result.hit);
        assert_eq!(result.brush, None);
        assert_eq!(result.finish, Point::new(0, 0, 120));
        assert_eq!(result.length, 20);
    }

    #[test]
    fn test_first_brush_in_order_wins() {
        let style = TextureStyle::default();
        let brushes = [
            Brush::block(Point::new(200, -50, 0), Point::new(300, 50, -32), &style).unwrap(),
            slab(),
        ];
        let result = trace(Point::new(-100, 0, -16), Vector::X, &brushes, 1000).unwrap();
        assert_eq!(result.brush, Some(1));
        assert_eq!(result.finish, Point::new(-50, 0, -16));
    }

    #[test]
    fn test_start_inside_clamps_length() {
        let brushes = [slab()];
        let result = trace(Point::new(0, 0, -16), Vector::X, &brushes, 10).unwrap();
        assert!(result.hit);
        assert_eq!(result.length, 0);
        assert_eq!(result.finish, Point::new(-1, 0, -16));
    }

    #[test]
    fn test_zero_direction_fails() {
        assert_eq!(
            trace(Point::ZERO, Vector::ZERO, &[], 10),
            Err(GeometryError::ZeroLength)
        );
    }

    #[test]
    fn test_interior_trace_records_exit_plane() {
        let brush = slab();
        let result = interior_trace(Point::new(0, 0, -16), Vector::X, &brush, 1000).unwrap();
        assert!(result.hit);
        assert_eq!(result.finish, Point::new(50, 0, -16));
        assert_eq!(result.length, 50);
        let plane = result.plane.unwrap();
        assert_eq!(brush.planes()[plane].normal(), Vector::X);
    }

    #[test]
    fn test_interior_trace_expires() {
        let brush = slab();
        let result = interior_trace(Point::new(0, 0, -16), Vector::Y, &brush, 10).unwrap();
        assert!(!result.hit);
        assert_eq!(result.finish, Point::new(0, 9, -16));
        assert_eq!(result.length, 9);
    }
}
