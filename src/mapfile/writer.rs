//! Valve-220 text serialization.
//!
//! Entities are brace-delimited blocks of `"key" "value"` lines followed by
//! any brushes; each brush lists one line per plane:
//!
//! ```text
//! ( x y z ) ( x y z ) ( x y z ) TEXTURE [ rx ry rz xoff ] [ dx dy dz yoff ] rot sx sy
//! ```
//!
//! Lines end in CRLF, as the GoldSrc tools expect.

use super::entity::Properties;
use crate::brush::Brush;
use crate::core::types::{Point, Vector};
use crate::math::Plane;

const EOL: &str = "\r\n";

fn point(p: Point) -> String {
    format!("( {} {} {} )", p.x, p.y, p.z)
}

fn axis(v: Vector) -> String {
    // Adding zero turns -0 into 0
    let v = v + Vector::ZERO;
    format!("{} {} {}", v.x, v.y, v.z)
}

fn push_plane(out: &mut String, plane: &Plane) {
    let [p1, p2, p3] = plane.points();
    let tex = &plane.texture;
    out.push_str(&format!(
        "\t\t{} {} {} {} [ {} {} ] [ {} {} ] {} {} {}{EOL}",
        point(p1),
        point(p2),
        point(p3),
        tex.name,
        axis(tex.right),
        tex.x_offset,
        axis(tex.down),
        tex.y_offset,
        tex.rotation,
        tex.scale_x,
        tex.scale_y,
    ));
}

fn push_brush(out: &mut String, brush: &Brush) {
    out.push_str(&format!("\t{{{EOL}"));
    for plane in brush.planes() {
        push_plane(out, plane);
    }
    out.push_str(&format!("\t}}{EOL}"));
}

/// One entity block, brushes included.
pub(crate) fn entity(properties: &Properties, brushes: &[Brush]) -> String {
    let mut out = format!("{{{EOL}");
    for (key, value) in properties.iter() {
        out.push_str(&format!("\t\"{key}\" \"{value}\"{EOL}"));
    }
    for brush in brushes {
        push_brush(&mut out, brush);
    }
    out.push_str(&format!("}}{EOL}"));
    out
}
