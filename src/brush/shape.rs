//! Primitive shape formulas for building brushes from two corners.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::Brush;
use crate::core::error::GeometryError;
use crate::core::types::Point;
use crate::math::Plane;
use crate::math::plane::TextureStyle;

/// Side count for round shapes when none is given
pub const DEFAULT_SIDES: u32 = 16;

/// Initial shape of a brush. The shape is only a construction shortcut; the
/// resulting brush is just its planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Block,
    Tetrahedron,
    Pyramid,
    Wedge,
    Cylinder { sides: u32 },
    Cone { sides: u32 },
}

impl Brush {
    /// Build `shape` inside the box spanned by corners `a` and `b`.
    ///
    /// The corners may be given in any order. Internally they are rearranged
    /// to (min x, max y, max z) and (max x, min y, min z), the orientation all
    /// winding formulas below assume. Oriented shapes point their apex or top
    /// cap towards +Z.
    pub fn from_shape(shape: Shape, a: Point, b: Point, style: &TextureStyle) -> Result<Self, GeometryError> {
        let p1 = Point::new(a.x.min(b.x), a.y.max(b.y), a.z.max(b.z));
        let p2 = Point::new(a.x.max(b.x), a.y.min(b.y), a.z.min(b.z));
        let face = |a: Point, b: Point, c: Point| Plane::new(a, b, c, style);

        let planes = match shape {
            Shape::Block => {
                let c = [
                    p1,
                    Point::new(p2.x, p1.y, p1.z),
                    Point::new(p2.x, p2.y, p1.z),
                    Point::new(p1.x, p2.y, p1.z),
                    Point::new(p1.x, p1.y, p2.z),
                    Point::new(p2.x, p1.y, p2.z),
                    p2,
                    Point::new(p1.x, p2.y, p2.z),
                ];
                vec![
                    face(c[1], c[0], c[4])?,
                    face(c[2], c[1], c[5])?,
                    face(c[3], c[2], c[6])?,
                    face(c[0], c[3], c[7])?,
                    face(c[0], c[1], c[2])?,
                    face(c[6], c[5], c[4])?,
                ]
            }
            Shape::Tetrahedron => {
                let c = [
                    p1,
                    Point::new(p1.x, p1.y, p2.z),
                    Point::new(p2.x, p1.y, p2.z),
                    Point::new(p1.x, p2.y, p2.z),
                ];
                vec![
                    face(c[2], c[1], c[3])?,
                    face(c[0], c[2], c[3])?,
                    face(c[0], c[3], c[1])?,
                    face(c[0], c[1], c[2])?,
                ]
            }
            Shape::Pyramid => {
                let apex = Point::new(p1.x + (p2.x - p1.x) / 2, p1.y - (p1.y - p2.y) / 2, p1.z);
                let c = [
                    apex,
                    Point::new(p1.x, p1.y, p2.z),
                    Point::new(p2.x, p1.y, p2.z),
                    p2,
                    Point::new(p1.x, p2.y, p2.z),
                ];
                vec![
                    face(c[3], c[2], c[1])?,
                    face(c[0], c[1], c[2])?,
                    face(c[0], c[2], c[3])?,
                    face(c[0], c[3], c[4])?,
                    face(c[0], c[4], c[1])?,
                ]
            }
            Shape::Wedge => {
                let mid_x = p1.x + (p2.x - p1.x) / 2;
                let c = [
                    Point::new(mid_x, p1.y, p1.z),
                    Point::new(mid_x, p2.y, p1.z),
                    Point::new(p1.x, p1.y, p2.z),
                    Point::new(p2.x, p1.y, p2.z),
                    p2,
                    Point::new(p1.x, p2.y, p2.z),
                ];
                vec![
                    face(c[4], c[3], c[2])?,
                    face(c[0], c[1], c[5])?,
                    face(c[1], c[0], c[3])?,
                    face(c[5], c[1], c[4])?,
                    face(c[3], c[0], c[2])?,
                ]
            }
            Shape::Cylinder { sides } => {
                let top = ellipse(p1, p2, sides, p1.z)?;
                let n = top.len();
                let low = |p: Point| Point::new(p.x, p.y, p2.z);

                let mut planes = Vec::with_capacity(n + 2);
                for i in 0..n {
                    let prev = top[(i + n - 1) % n];
                    planes.push(face(low(top[i]), top[i], prev)?);
                }
                // Rounded samples can be collinear with their neighbours, so
                // the caps use the first, middle and last samples
                let mid = (n - 1) / 2;
                planes.push(face(top[0], top[mid], top[n - 1])?);
                planes.push(face(low(top[n - 1]), low(top[mid]), low(top[0]))?);
                planes
            }
            Shape::Cone { sides } => {
                let base = ellipse(p1, p2, sides, p2.z)?;
                let n = base.len();
                let apex = Point::new(
                    p1.x + (p2.x - p1.x) / 2,
                    p1.y + (p2.y - p1.y) / 2,
                    p1.z,
                );

                let mut planes = Vec::with_capacity(n + 1);
                for i in 0..n {
                    planes.push(face(base[i], base[(i + 1) % n], apex)?);
                }
                let mid = (n - 1) / 2;
                planes.push(face(base[n - 1], base[mid], base[0])?);
                planes
            }
        };

        Brush::from_planes(planes)
    }
}

/// Parametric ellipse samples inscribed in the corners' footprint, at height `z`.
fn ellipse(p1: Point, p2: Point, sides: u32, z: i32) -> Result<Vec<Point>, GeometryError> {
    if sides < 3 {
        return Err(GeometryError::InvalidShape(format!(
            "round shapes need at least 3 sides, got {sides}"
        )));
    }
    let a = (p2.x - p1.x) / 2;
    let b = (p2.y - p1.y) / 2;
    Ok((0..sides)
        .map(|i| {
            let t = TAU / sides as f64 * i as f64;
            let x = (a as f64 * t.cos()).round() as i32;
            let y = (b as f64 * t.sin()).round() as i32;
            Point::new(p1.x + a + x, p1.y + b + y, z)
        })
        .collect())
}
