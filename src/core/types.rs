//! Core type aliases and re-exports

pub use glam::{DVec3, IVec3};

/// Grid-snapped integer coordinate. Every brush vertex is a `Point`.
pub type Point = IVec3;

/// Floating-point direction, normal or intermediate offset.
pub type Vector = DVec3;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
