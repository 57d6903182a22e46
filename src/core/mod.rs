//! Core types and utilities shared by every generation stage

pub mod types;
pub mod error;
pub mod logging;

pub use types::*;
pub use error::{Error, GenerationError, GeometryError, LayoutError};
