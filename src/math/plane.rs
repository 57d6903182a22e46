//! Oriented planes defined by three grid points.
//!
//! A plane is wound so that `cross(p1 - p2, p3 - p2)` points out of the solid
//! it bounds. Normals are recomputed from the defining points on every call
//! rather than cached. The texture projection carried alongside is cosmetic:
//! nothing in the solid geometry reads it.

use serde::{Deserialize, Serialize};

use super::vector::{self, CARDINALS};
use crate::core::error::GeometryError;
use crate::core::types::{Point, Vector};

/// Cross products shorter than this are treated as "parallel".
const PARALLEL_EPSILON: f64 = 1e-9;

/// How a face's texture axes are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureAlignment {
    /// Project from the nearest cartesian plane.
    #[default]
    World,
    /// Project from the face itself.
    Face,
}

/// Strategy for finding the "down" texture axis of a face-aligned plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DownSearch {
    /// Rotate one edge through `samples` evenly spaced angles and keep the
    /// candidate with the most negative Z. Approximate.
    Sampled { samples: u32 },
    /// Closed-form minimizer of the rotated edge's Z component.
    Analytic,
}

impl Default for DownSearch {
    fn default() -> Self {
        DownSearch::Sampled { samples: 360 }
    }
}

/// Texture name plus the rules for deriving its projection on a new face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureStyle {
    pub name: String,
    pub alignment: TextureAlignment,
    pub down_search: DownSearch,
}

impl Default for TextureStyle {
    fn default() -> Self {
        Self {
            name: "NULL".to_string(),
            alignment: TextureAlignment::World,
            down_search: DownSearch::default(),
        }
    }
}

/// Valve-220 texture projection of one face
#[derive(Clone, Debug, PartialEq)]
pub struct TextureProjection {
    pub name: String,
    pub right: Vector,
    pub down: Vector,
    pub x_offset: i32,
    pub y_offset: i32,
    pub rotation: i32,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TextureProjection {
    /// Projection with default offsets, rotation and scale.
    pub fn new(name: impl Into<String>, right: Vector, down: Vector) -> Self {
        Self {
            name: name.into(),
            right,
            down,
            x_offset: 0,
            y_offset: 0,
            rotation: 0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Derive the right/down basis for a face with (unnormalized) `normal`,
    /// using `edge` as the seed direction for face alignment.
    pub fn derive(normal: Vector, edge: Vector, style: &TextureStyle) -> Result<Self, GeometryError> {
        // Faces already on a coordinate plane align the same either way
        let on_axis = [normal.x, normal.y, normal.z].iter().filter(|c| **c == 0.0).count() >= 2;

        let (right, down) = if style.alignment == TextureAlignment::World || on_axis {
            world_basis(normal)?
        } else {
            let down = match style.down_search {
                DownSearch::Sampled { samples } => sampled_down(edge, normal, samples)?,
                DownSearch::Analytic => analytic_down(edge, normal)?,
            };
            (normal.cross(down), down)
        };

        Ok(Self::new(
            style.name.clone(),
            vector::normalize(right)?,
            vector::normalize(down)?,
        ))
    }
}

fn world_basis(normal: Vector) -> Result<(Vector, Vector), GeometryError> {
    let mut reference = CARDINALS[0];
    let mut smallest = f64::INFINITY;
    for cardinal in CARDINALS {
        let angle = vector::angle_between(normal, cardinal)?;
        if angle < smallest {
            smallest = angle;
            reference = cardinal;
        }
    }

    // Floors and ceilings use -Y as down, walls use -Z
    let down = if reference.x == 0.0 && reference.y == 0.0 {
        Vector::NEG_Y
    } else {
        Vector::NEG_Z
    };
    Ok((reference.cross(down), down))
}

fn sampled_down(edge: Vector, normal: Vector, samples: u32) -> Result<Vector, GeometryError> {
    let step = 360.0 / samples.max(1) as f64;
    let mut best = edge;
    for i in 0..samples {
        let candidate = vector::rotate_about_axis(edge, normal, i as f64 * step)?;
        if candidate.z < best.z {
            best = candidate;
        }
    }
    Ok(best)
}

fn analytic_down(edge: Vector, normal: Vector) -> Result<Vector, GeometryError> {
    // z(theta) = a cos(theta) + b sin(theta) + c for a rotation about k
    let k = vector::normalize(normal)?;
    let a = edge.z - k.z * k.dot(edge);
    let b = k.cross(edge).z;
    if a == 0.0 && b == 0.0 {
        return Ok(edge);
    }
    let theta = (-b).atan2(-a).to_degrees();
    vector::rotate_about_axis(edge, k, theta)
}

/// Line shared by two planes: a direction and one grid point on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneLine {
    pub direction: Vector,
    pub point: Point,
}

/// An oriented face of a brush
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    p1: Point,
    p2: Point,
    p3: Point,
    pub texture: TextureProjection,
}

impl Plane {
    /// Build a plane, deriving its texture projection from `style`.
    pub fn new(p1: Point, p2: Point, p3: Point, style: &TextureStyle) -> Result<Self, GeometryError> {
        let normal = raw_normal(p1, p2, p3);
        if normal == Vector::ZERO {
            return Err(GeometryError::Collinear(p1, p2, p3));
        }
        let texture = TextureProjection::derive(normal, vector::between(p2, p1), style)?;
        Ok(Self { p1, p2, p3, texture })
    }

    /// Build a plane with an explicit texture projection.
    pub fn with_projection(
        p1: Point,
        p2: Point,
        p3: Point,
        texture: TextureProjection,
    ) -> Result<Self, GeometryError> {
        if raw_normal(p1, p2, p3) == Vector::ZERO {
            return Err(GeometryError::Collinear(p1, p2, p3));
        }
        Ok(Self { p1, p2, p3, texture })
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    /// The three defining points, in winding order
    pub fn points(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Outward-facing unit normal
    pub fn normal(&self) -> Vector {
        // Non-zero by construction
        raw_normal(self.p1, self.p2, self.p3).normalize_or_zero()
    }

    /// Inward-facing unit normal
    pub fn inverse_normal(&self) -> Vector {
        -self.normal()
    }

    /// `d` in `ax + by + cz + d = 0`, where `(a, b, c)` is the unit normal.
    pub fn distance(&self) -> f64 {
        -self.normal().dot(self.p1.as_dvec3())
    }

    /// Signed offset of `point` along the normal. Negative is inside.
    pub fn side(&self, point: Point) -> f64 {
        self.normal().dot(vector::between(self.p1, point))
    }

    /// True if `point` is outside this plane or exactly on it.
    pub fn is_outside_or_on(&self, point: Point) -> bool {
        self.side(point) >= 0.0
    }

    /// Line of intersection with another plane.
    ///
    /// The point is found by fixing z = 0 and solving the remaining 2x2
    /// system with Cramer's rule; lines parallel to the z = 0 plane fix x or
    /// y instead. The point is rounded onto the grid.
    pub fn intersection(&self, other: &Plane) -> Result<PlaneLine, GeometryError> {
        let n1 = self.normal();
        let n2 = other.normal();
        let cross = n1.cross(n2);
        if cross.length() < PARALLEL_EPSILON {
            return Err(GeometryError::Parallel);
        }

        let d1 = self.distance();
        let d2 = other.distance();
        let fixed = if cross.z.abs() > PARALLEL_EPSILON {
            2
        } else if cross.x.abs() >= cross.y.abs() {
            0
        } else {
            1
        };
        let (u, w) = match fixed {
            0 => (1, 2),
            1 => (2, 0),
            _ => (0, 1),
        };

        let a = n1.to_array();
        let b = n2.to_array();
        let det = a[u] * b[w] - a[w] * b[u];
        let mut point = [0.0; 3];
        point[u] = (-d1 * b[w] + a[w] * d2) / det;
        point[w] = (-d2 * a[u] + b[u] * d1) / det;

        Ok(PlaneLine {
            direction: cross,
            point: vector::snap(Vector::from_array(point)),
        })
    }
}

fn raw_normal(p1: Point, p2: Point, p3: Point) -> Vector {
    vector::between(p2, p1).cross(vector::between(p2, p3))
}
