//! Mathematical utilities: vector algebra, bounds and planes

pub mod vector;
pub mod aabb;
pub mod plane;

pub use aabb::Aabb;
pub use plane::{DownSearch, Plane, PlaneLine, TextureAlignment, TextureProjection};
