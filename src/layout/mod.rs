//! Abstract layout: the location/path graph a level is generated from.
//!
//! Locations live in an arena and are addressed by [`LocationId`]; paths
//! store a pair of ids. The standard layout is a 3x3 grid:
//!
//! ```text
//!    B---CT---A
//!    |   |    |
//!    +---+----+
//!    |   |    |
//!    +---T----+
//! ```

pub mod config;
pub mod variation;
pub mod placement;

pub use config::{LayoutConfig, PlacementConfig, VariationConfig};

use rand::Rng;

use crate::core::error::LayoutError;
use crate::core::types::Point;

/// Cells per side of the standard grid
pub const GRID_SIZE: usize = 3;

/// What a location is for, in game-rule terms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Purpose {
    #[default]
    None,
    CtSpawn,
    TSpawn,
    SiteA,
    SiteB,
    /// Removed from the layout; no paths may touch it
    Inaccessible,
}

/// Stable index of a location within its layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub usize);

/// A place in the abstract layout
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub anchor: Point,
    pub purpose: Purpose,
    /// Grid cell `(column, row)` for grid layouts, row 0 at the top
    pub cell: Option<(usize, usize)>,
}

impl Location {
    pub fn new(anchor: Point, purpose: Purpose) -> Self {
        Self { anchor, purpose, cell: None }
    }

    pub fn is_accessible(&self) -> bool {
        self.purpose != Purpose::Inaccessible
    }
}

/// An undirected route between two locations.
///
/// Both ends always exist and can only be replaced together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Path {
    ends: [LocationId; 2],
}

impl Path {
    pub fn new(a: LocationId, b: LocationId) -> Self {
        Self { ends: [a, b] }
    }

    pub fn ends(&self) -> [LocationId; 2] {
        self.ends
    }

    pub fn set_ends(&mut self, a: LocationId, b: LocationId) {
        self.ends = [a, b];
    }

    /// True if this path joins `a` and `b`, in either direction.
    pub fn connects(&self, a: LocationId, b: LocationId) -> bool {
        self.ends == [a, b] || self.ends == [b, a]
    }

    pub fn touches(&self, id: LocationId) -> bool {
        self.ends.contains(&id)
    }
}

/// Locations plus the paths between them
#[derive(Clone, Debug, PartialEq)]
pub struct AbstractLayout {
    locations: Vec<Location>,
    paths: Vec<Path>,
}

impl Default for AbstractLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl AbstractLayout {
    /// The standard 3x3 grid with twelve orthogonal paths and no spatial
    /// placement (every anchor at the origin).
    pub fn standard() -> Self {
        let mut locations = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for j in 0..GRID_SIZE {
            for i in 0..GRID_SIZE {
                let purpose = match (i, j) {
                    (0, 0) => Purpose::SiteB,
                    (1, 0) => Purpose::CtSpawn,
                    (2, 0) => Purpose::SiteA,
                    (1, 2) => Purpose::TSpawn,
                    _ => Purpose::None,
                };
                locations.push(Location { anchor: Point::ZERO, purpose, cell: Some((i, j)) });
            }
        }

        let id = |i: usize, j: usize| LocationId(j * GRID_SIZE + i);
        let mut paths = Vec::with_capacity(12);
        // Left-to-right along each row, then top-to-bottom down each column
        for j in 0..GRID_SIZE {
            for i in 0..GRID_SIZE - 1 {
                paths.push(Path::new(id(i, j), id(i + 1, j)));
            }
        }
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE - 1 {
                paths.push(Path::new(id(i, j), id(i, j + 1)));
            }
        }

        Self { locations, paths }
    }

    /// Standard grid with randomized topology variation applied.
    pub fn with_variation(rng: &mut impl Rng, config: &VariationConfig) -> Self {
        let mut layout = Self::standard();
        if config.enabled {
            layout.apply_variation(rng, config);
        }
        layout
    }

    /// Build an arbitrary layout. Every path must refer to an existing location.
    pub fn from_parts(locations: Vec<Location>, paths: Vec<Path>) -> Result<Self, LayoutError> {
        for (index, path) in paths.iter().enumerate() {
            if path.ends().iter().any(|id| id.0 >= locations.len()) {
                return Err(LayoutError::UnknownLocation(index));
            }
        }
        Ok(Self { locations, paths })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.0]
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Id of the location occupying grid cell `(i, j)`, if any.
    pub fn cell(&self, i: usize, j: usize) -> Option<LocationId> {
        self.locations
            .iter()
            .position(|l| l.cell == Some((i, j)))
            .map(LocationId)
    }

    /// Ids of every location that is not inaccessible
    pub fn accessible(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_accessible())
            .map(|(i, _)| LocationId(i))
    }

    /// Number of paths touching `id`
    pub fn degree(&self, id: LocationId) -> usize {
        self.paths.iter().filter(|p| p.touches(id)).count()
    }

    /// Check that every accessible location has a path and no path touches
    /// an inaccessible location.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (index, path) in self.paths.iter().enumerate() {
            if path.ends().iter().any(|id| !self.location(*id).is_accessible()) {
                return Err(LayoutError::InaccessibleEndpoint(index));
            }
        }
        if let Some(id) = self.accessible().find(|id| self.degree(*id) == 0) {
            return Err(LayoutError::Isolated(id.0));
        }
        Ok(())
    }

    pub(crate) fn locations_mut(&mut self) -> &mut [Location] {
        &mut self.locations
    }

    pub(crate) fn paths_mut(&mut self) -> &mut Vec<Path> {
        &mut self.paths
    }
}
