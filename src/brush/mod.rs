//! Convex brushes: solids represented as the intersection of their planes.
//!
//! A brush is only ever built from a known-valid primitive formula (see
//! [`Shape`]) or from explicit box corners, and is never mutated afterwards.

pub mod shape;

pub use shape::{Shape, DEFAULT_SIDES};

use crate::core::error::GeometryError;
use crate::core::types::{Point, Vector};
use crate::math::{Aabb, Plane};
use crate::math::plane::TextureStyle;

/// Tolerance used when comparing unit normals for exact opposition.
const NORMAL_EPSILON: f64 = 1e-9;

/// Indices of the two faces along which a pair of brushes touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacePair {
    /// Face index on the brush the test was called on
    pub ours: usize,
    /// Face index on the other brush
    pub theirs: usize,
}

/// A convex solid
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    planes: Vec<Plane>,
    bounds: Aabb,
}

impl Brush {
    /// Assemble a brush from planes already known to bound a convex volume.
    pub(crate) fn from_planes(planes: Vec<Plane>) -> Result<Self, GeometryError> {
        let bounds = Aabb::from_points(planes.iter().flat_map(|p| p.points()))
            .ok_or_else(|| GeometryError::InvalidShape("brush has no planes".to_string()))?;
        Ok(Self { planes, bounds })
    }

    /// Axis-aligned box spanning two opposite corners, in any order.
    pub fn block(a: Point, b: Point, style: &TextureStyle) -> Result<Self, GeometryError> {
        Self::from_shape(Shape::Block, a, b, style)
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Integer bounds of the defining points
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Bounds center at floor level
    pub fn centre(&self) -> Point {
        let c = self.bounds.center();
        Point::new(c.x, c.y, self.bounds.max.z)
    }

    /// True if `point` lies strictly inside every plane.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains_point(point)
            && self.planes.iter().all(|plane| !plane.is_outside_or_on(point))
    }

    /// Index of the first plane that `point` lies outside of (or on).
    pub fn exit_plane(&self, point: Point) -> Option<usize> {
        self.planes.iter().position(|plane| plane.is_outside_or_on(point))
    }

    /// Z of the first upward-facing plane: the walkable surface of a patch.
    pub fn floor_height(&self) -> Option<i32> {
        self.planes
            .iter()
            .find(|plane| plane.normal().z > 0.0)
            .map(|plane| plane.p1().z)
    }

    /// Index of the face whose outward normal is closest in angle to `bearing`.
    pub fn face_towards(&self, bearing: Vector) -> Result<usize, GeometryError> {
        let mut best = None;
        let mut smallest = f64::INFINITY;
        for (i, plane) in self.planes.iter().enumerate() {
            let angle = crate::math::vector::angle_between(plane.normal(), bearing)?;
            if angle < smallest {
                smallest = angle;
                best = Some(i);
            }
        }
        best.ok_or_else(|| GeometryError::InvalidShape("brush has no planes".to_string()))
    }

    /// Test whether two box brushes share a face.
    ///
    /// Faces with exactly opposite normals are compared through the offset
    /// between a point on each: a zero projection onto the second normal
    /// means the faces are flush, a positive one means the second brush lies
    /// wholly outside the first along that axis. Any such gap vetoes
    /// adjacency. Only meaningful for axis-aligned boxes.
    pub fn adjacency(&self, other: &Brush) -> Option<FacePair> {
        let mut touching = None;
        for (i, ours) in self.planes.iter().enumerate() {
            let n1 = ours.normal();
            for (j, theirs) in other.planes.iter().enumerate() {
                let n2 = theirs.normal();
                if !crate::math::vector::approx_eq(n1, -n2, NORMAL_EPSILON) {
                    continue;
                }
                let diff = (ours.p1() - theirs.p1()).as_dvec3();
                let dot = diff.dot(n2);
                if dot > 0.0 {
                    return None;
                }
                if dot == 0.0 {
                    touching = Some(FacePair { ours: i, theirs: j });
                }
            }
        }
        touching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(a: (i32, i32, i32), b: (i32, i32, i32)) -> Brush {
        Brush::block(Point::from(a), Point::from(b), &TextureStyle::default()).unwrap()
    }

    #[test]
    fn test_block_has_six_opposed_faces() {
        let brush = boxed((0, 0, 0), (100, 100, -32));
        assert_eq!(brush.planes().len(), 6);
        for plane in brush.planes() {
            let opposite = brush
                .planes()
                .iter()
                .filter(|other| other.normal() == plane.inverse_normal())
                .count();
            assert_eq!(opposite, 1);
        }
    }

    #[test]
    fn test_contains() {
        let brush = boxed((0, 0, 0), (100, 100, -32));
        assert!(brush.contains(Point::new(50, 50, -16)));
        assert!(!brush.contains(Point::new(0, 50, -16)));
        assert!(!brush.contains(Point::new(50, 50, 0)));
        assert!(!brush.contains(Point::new(150, 50, -16)));
        assert_eq!(brush.bounds(), Aabb::new(Point::new(0, 0, -32), Point::new(100, 100, 0)));
    }

    #[test]
    fn test_exit_plane() {
        let brush = boxed((0, 0, 0), (100, 100, -32));
        assert_eq!(brush.exit_plane(Point::new(50, 50, -16)), None);
        let i = brush.exit_plane(Point::new(50, 50, 10)).unwrap();
        assert_eq!(brush.planes()[i].normal(), Vector::Z);
    }

    #[test]
    fn test_floor_height_and_centre() {
        let brush = boxed((-64, 64, 48), (64, -64, 16));
        assert_eq!(brush.floor_height(), Some(48));
        assert_eq!(brush.centre(), Point::new(0, 0, 48));
    }

    #[test]
    fn test_face_towards() {
        let brush = boxed((0, 0, 0), (100, 100, -32));
        let i = brush.face_towards(Vector::new(1.0, 0.3, 0.0)).unwrap();
        assert_eq!(brush.planes()[i].normal(), Vector::X);
        let i = brush.face_towards(Vector::new(-0.2, -1.0, 0.0)).unwrap();
        assert_eq!(brush.planes()[i].normal(), Vector::NEG_Y);
    }

    #[test]
    fn test_abutting_boxes_are_adjacent() {
        let a = boxed((0, 0, 0), (100, 100, -32));
        let b = boxed((100, 0, 0), (200, 100, -32));
        let pair = a.adjacency(&b).unwrap();
        assert_eq!(a.planes()[pair.ours].normal(), Vector::X);
        assert_eq!(b.planes()[pair.theirs].normal(), Vector::NEG_X);

        let back = b.adjacency(&a).unwrap();
        assert_eq!(b.planes()[back.ours].normal(), Vector::NEG_X);
    }

    #[test]
    fn test_gap_vetoes_adjacency() {
        let a = boxed((0, 0, 0), (100, 100, -32));
        let b = boxed((101, 0, 0), (201, 100, -32));
        assert_eq!(a.adjacency(&b), None);
        assert_eq!(b.adjacency(&a), None);
    }

    #[test]
    fn test_offset_along_face_is_not_adjacent() {
        // Flush on X but far apart on Y
        let a = boxed((0, 0, 0), (100, 100, -32));
        let b = boxed((100, 500, 0), (200, 600, -32));
        assert_eq!(a.adjacency(&b), None);
    }
}
