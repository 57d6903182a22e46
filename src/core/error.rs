//! Error types for brush generation

use thiserror::Error;

use super::types::Point;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Degenerate input to the vector/plane algebra.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("plane points {0} {1} {2} are collinear")]
    Collinear(Point, Point, Point),

    #[error("planes are parallel and do not intersect")]
    Parallel,

    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

/// A single growth step or path that could not be completed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("no open face could be found to bud from")]
    NoOpenFace,

    #[error("no room to grow a patch from the chosen face")]
    NoRoom,

    #[error("brush has no upward-facing floor plane")]
    MissingFloor,

    #[error("destination not reached within {steps} growth steps")]
    BudgetExhausted { steps: u32 },

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Structural problem in an abstract layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("accessible location {0} has no incident paths")]
    Isolated(usize),

    #[error("path {0} touches an inaccessible location")]
    InaccessibleEndpoint(usize),

    #[error("path {0} refers to a location that does not exist")]
    UnknownLocation(usize),
}
