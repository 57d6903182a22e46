//! Brushwork generation: turns a placed abstract layout into floor brushes.
//!
//! The generator owns the growing list of brushes and borrows the layout it
//! works from. Every stage takes the RNG explicitly so a run is reproducible
//! from its seed:
//! 1. One floor patch is seeded under every accessible location
//! 2. Each layout path is walked by budding new patches off the current one
//!    until the destination is reached or the step budget runs out

pub mod config;
mod patch;
mod path;

pub use config::{GeneratorConfig, PatchConfig, WiggleDistribution};
pub use path::PathStats;

use rand::Rng;

use crate::brush::Brush;
use crate::core::error::GenerationError;
use crate::layout::{AbstractLayout, LocationId};
use crate::math::plane::TextureStyle;

/// How seeding the patch under one location fared
#[derive(Debug)]
pub struct SeedOutcome {
    pub location: LocationId,
    /// Index of the seeded brush
    pub result: Result<usize, GenerationError>,
}

/// How one layout path fared
#[derive(Debug)]
pub struct PathOutcome {
    /// Index into the layout's path list
    pub path: usize,
    pub from: LocationId,
    pub to: LocationId,
    pub result: Result<PathStats, GenerationError>,
}

/// Summary of a [`BrushworkGenerator::make_floor`] run
#[derive(Debug, Default)]
pub struct FloorReport {
    pub seeds: Vec<SeedOutcome>,
    pub paths: Vec<PathOutcome>,
}

impl FloorReport {
    /// Number of locations that got a patch.
    pub fn seeded(&self) -> usize {
        self.seeds.iter().filter(|s| s.result.is_ok()).count()
    }

    /// Number of paths that reached their destination.
    pub fn connected(&self) -> usize {
        self.paths.iter().filter(|p| p.result.is_ok()).count()
    }

    /// Paths that gave up, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = &PathOutcome> {
        self.paths.iter().filter(|p| p.result.is_err())
    }
}

/// Grows floor brushwork for a layout.
pub struct BrushworkGenerator<'a> {
    layout: &'a AbstractLayout,
    config: GeneratorConfig,
    style: TextureStyle,
    brushes: Vec<Brush>,
}

impl<'a> BrushworkGenerator<'a> {
    /// Fails with [`GenerationError::InvalidConfig`] if `config` cannot be honoured.
    pub fn new(
        layout: &'a AbstractLayout,
        config: GeneratorConfig,
        style: TextureStyle,
    ) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::InvalidConfig)?;
        Ok(Self {
            layout,
            config,
            style,
            brushes: Vec::new(),
        })
    }

    pub fn layout(&self) -> &AbstractLayout {
        self.layout
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Everything generated so far, in creation order.
    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    pub fn into_brushes(self) -> Vec<Brush> {
        self.brushes
    }

    /// Place pre-existing geometry that growth should respect, returning its index.
    pub fn add_brush(&mut self, brush: Brush) -> usize {
        self.brushes.push(brush);
        self.brushes.len() - 1
    }

    /// Seed a non-overlapping patch under every accessible location.
    pub fn seed_locations(&mut self, rng: &mut impl Rng) -> Vec<SeedOutcome> {
        let layout = self.layout;
        let mut seeds = Vec::new();
        for location in layout.accessible() {
            let result = self
                .seed_patch(layout.location(location).anchor, rng)
                .map(|patch| self.add_brush(patch));
            if let Err(e) = &result {
                log::warn!("No patch seeded under location {}: {}", location.0, e);
            }
            seeds.push(SeedOutcome { location, result });
        }
        log::debug!("Seeded {}/{} locations", seeds.iter().filter(|s| s.result.is_ok()).count(), seeds.len());
        seeds
    }

    /// Seed a patch under every accessible location, then walk every path.
    ///
    /// Paths run from the higher endpoint to the lower one. A location or
    /// path that fails is recorded in the report and does not stop the rest.
    pub fn make_floor(&mut self, rng: &mut impl Rng) -> FloorReport {
        let layout = self.layout;
        let mut report = FloorReport {
            seeds: self.seed_locations(rng),
            paths: Vec::new(),
        };

        for (index, path) in layout.paths().iter().enumerate() {
            let [a, b] = path.ends();
            let (from, to) = if layout.location(b).anchor.z > layout.location(a).anchor.z {
                (b, a)
            } else {
                (a, b)
            };

            let result = self.make_path(from, to, rng);
            match &result {
                Ok(stats) => log::debug!(
                    "Path {} ({} -> {}): {} steps, {} failed buds",
                    index, from.0, to.0, stats.steps, stats.failed_buds
                ),
                Err(e) => log::warn!("Path {} ({} -> {}) failed: {}", index, from.0, to.0, e),
            }
            report.paths.push(PathOutcome { path: index, from, to, result });
        }

        log::info!(
            "Floor complete: {} brushes, {}/{} paths connected",
            self.brushes.len(),
            report.connected(),
            report.paths.len()
        );
        report
    }
}
