//! Axis-aligned integer bounding box

use crate::core::types::Point;

/// Axis-aligned bounding box defined by min and max grid corners (inclusive)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box containing both corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut result = Aabb::new(first, first);
        for p in iter {
            result.expand(p);
        }
        Some(result)
    }

    /// Get center point (rounded toward min)
    pub fn center(&self) -> Point {
        self.min + (self.max - self.min) / 2
    }

    /// Get size (max - min)
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    /// Check if point is inside AABB (boundary included)
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Check if two AABBs share interior volume (touching does not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x &&
        self.min.y < other.max.y && self.max.y > other.min.y &&
        self.min.z < other.max.z && self.max.z > other.min.z
    }

    /// Expand AABB to include point
    pub fn expand(&mut self, point: Point) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}
