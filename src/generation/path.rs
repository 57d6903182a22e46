//! Walking a layout path by repeatedly budding patches towards the
//! destination.

use std::f64::consts::TAU;

use rand::Rng;

use super::BrushworkGenerator;
use super::config::WiggleDistribution;
use crate::core::error::GenerationError;
use crate::core::types::Point;
use crate::layout::LocationId;
use crate::math::vector::{self, UP};
use crate::trace::trace;

/// Heading change, in degrees, for one unit of wiggliness.
const FULL_SWING: f64 = 120.0;

/// Bookkeeping for a path that reached its destination
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Growth attempts made, successful or not
    pub steps: u32,
    /// Attempts that found no open face or no room
    pub failed_buds: u32,
    pub brushes_added: usize,
}

impl BrushworkGenerator<'_> {
    /// Grow floor from the patch under `from` until the patch under `to` is
    /// touched.
    ///
    /// If nothing lies under `from` a patch is seeded there first. Every
    /// attempt to bud, including one that fails, counts against
    /// `max_path_steps`; running out is reported as
    /// [`GenerationError::BudgetExhausted`] with all growth so far kept.
    pub fn make_path(
        &mut self,
        from: LocationId,
        to: LocationId,
        rng: &mut impl Rng,
    ) -> Result<PathStats, GenerationError> {
        let source = self.layout.location(from).anchor;
        let destination = self.layout.location(to).anchor;
        let mut stats = PathStats::default();

        let mut current = match self.brush_under(source)? {
            Some(index) => index,
            None => {
                let patch = self.seed_patch(source, rng)?;
                stats.brushes_added += 1;
                self.add_brush(patch)
            }
        };
        let mut position = source;

        loop {
            if self.reaches(current, destination)? {
                return Ok(stats);
            }
            if stats.steps >= self.config.max_path_steps {
                return Err(GenerationError::BudgetExhausted { steps: stats.steps });
            }
            stats.steps += 1;

            let Ok(ideal) = vector::normalize(vector::between(position, destination)) else {
                stats.failed_buds += 1;
                continue;
            };
            let bearing = vector::rotate_about_axis(ideal, UP, self.deviation(rng))?;

            match self.bud_patch(current, bearing, rng) {
                Ok((bud, centre)) => {
                    current = self.add_brush(bud);
                    position = centre;
                    log::debug!("Budded brush {} centred on {}", current, centre);
                    stats.brushes_added += 1;
                }
                Err(e @ (GenerationError::NoOpenFace | GenerationError::NoRoom)) => {
                    log::debug!("Bud from brush {} failed at step {}: {}", current, stats.steps, e);
                    stats.failed_buds += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Random heading change in degrees, capped at `max_deviation`.
    fn deviation(&self, rng: &mut impl Rng) -> f64 {
        let scale = self.config.wiggliness * FULL_SWING;
        let angle = match self.config.distribution {
            WiggleDistribution::Normal => {
                // Box-Muller; u1 in (0, 1] keeps the log finite
                let u1 = 1.0 - rng.random::<f64>();
                let u2 = rng.random::<f64>();
                (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos() * scale
            }
            WiggleDistribution::Uniform => rng.random_range(-1.0..1.0) * scale,
        };
        angle.clamp(-self.config.max_deviation, self.config.max_deviation)
    }

    /// Index of the first brush found tracing up from just below `anchor`.
    fn brush_under(&self, anchor: Point) -> Result<Option<usize>, GenerationError> {
        let sunk = anchor - Point::Z * self.config.patch.sink_depth;
        let hit = trace(sunk, UP, &self.brushes, self.config.max_trace_length)?;
        Ok(hit.brush)
    }

    /// True if the brush under `destination` is `current` or touches it.
    fn reaches(&self, current: usize, destination: Point) -> Result<bool, GenerationError> {
        Ok(match self.brush_under(destination)? {
            Some(index) if index == current => true,
            Some(index) => self.brushes[current].adjacency(&self.brushes[index]).is_some(),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use crate::generation::{GeneratorConfig, PatchConfig};
    use crate::layout::{AbstractLayout, Location, Path, Purpose};
    use crate::math::plane::TextureStyle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn boxed(a: (i32, i32, i32), b: (i32, i32, i32)) -> Brush {
        Brush::block(Point::from(a), Point::from(b), &TextureStyle::default()).unwrap()
    }

    fn two_stop_layout(a: (i32, i32, i32), b: (i32, i32, i32)) -> AbstractLayout {
        AbstractLayout::from_parts(
            vec![
                Location::new(Point::from(a), Purpose::None),
                Location::new(Point::from(b), Purpose::None),
            ],
            vec![Path::new(LocationId(0), LocationId(1))],
        )
        .unwrap()
    }

    fn straight_config(steps: u32) -> GeneratorConfig {
        GeneratorConfig {
            patch: PatchConfig {
                avg_side: 128,
                side_variation: 0,
                ..PatchConfig::default()
            },
            wiggliness: 0.0,
            max_path_steps: steps,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_shared_patch_needs_no_steps() {
        let layout = two_stop_layout((0, 0, 0), (100, 0, 0));
        let mut generator = BrushworkGenerator::new(&layout, straight_config(8), TextureStyle::default()).unwrap();
        generator.add_brush(boxed((-500, -500, 0), (500, 500, -32)));
        let mut rng = StdRng::seed_from_u64(0);

        let stats = generator.make_path(LocationId(0), LocationId(1), &mut rng).unwrap();

        assert_eq!(stats, PathStats::default());
        assert_eq!(generator.brushes().len(), 1);
    }

    #[test]
    fn test_path_buds_until_flush_with_destination() {
        let layout = two_stop_layout((50, 50, 0), (350, 0, 0));
        let mut generator = BrushworkGenerator::new(&layout, straight_config(8), TextureStyle::default()).unwrap();
        generator.add_brush(boxed((0, 0, 0), (100, 100, -32)));
        let target = generator.add_brush(boxed((300, -1000, 0), (400, 1000, -32)));
        let mut rng = StdRng::seed_from_u64(21);

        let stats = generator.make_path(LocationId(0), LocationId(1), &mut rng).unwrap();

        assert_eq!(stats.steps, 2);
        assert_eq!(stats.brushes_added, 2);
        let last = generator.brushes().last().unwrap();
        assert_eq!(last.bounds().max.x, 300);
        assert!(last.adjacency(&generator.brushes()[target]).is_some());
    }

    #[test]
    fn test_missing_source_patch_is_seeded() {
        // Both locations share an anchor, so the seeded patch already reaches
        let layout = two_stop_layout((0, 0, 0), (0, 0, 0));
        let mut generator = BrushworkGenerator::new(&layout, straight_config(8), TextureStyle::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let stats = generator.make_path(LocationId(0), LocationId(1), &mut rng).unwrap();

        assert_eq!(stats, PathStats { steps: 0, failed_buds: 0, brushes_added: 1 });
        assert_eq!(generator.brushes().len(), 1);
        assert!(generator.brushes()[0].contains(Point::new(0, 0, -16)));
    }

    #[test]
    fn test_unreachable_destination_exhausts_budget() {
        let layout = two_stop_layout((0, 0, 0), (100_000, 0, 0));
        let mut generator = BrushworkGenerator::new(&layout, straight_config(3), TextureStyle::default()).unwrap();
        generator.add_brush(boxed((-50, -50, 0), (50, 50, -32)));
        let mut rng = StdRng::seed_from_u64(8);

        let result = generator.make_path(LocationId(0), LocationId(1), &mut rng);

        assert_eq!(result, Err(GenerationError::BudgetExhausted { steps: 3 }));
        assert!(generator.brushes().len() <= 4);
    }

    #[test]
    fn test_deviation_respects_cap() {
        let layout = AbstractLayout::standard();
        let mut rng = StdRng::seed_from_u64(13);
        for distribution in [WiggleDistribution::Normal, WiggleDistribution::Uniform] {
            let config = GeneratorConfig {
                wiggliness: 3.0,
                max_deviation: 45.0,
                distribution,
                ..GeneratorConfig::default()
            };
            let generator = BrushworkGenerator::new(&layout, config, TextureStyle::default()).unwrap();
            for _ in 0..500 {
                let angle = generator.deviation(&mut rng);
                assert!((-45.0..=45.0).contains(&angle));
            }
        }
    }

    #[test]
    fn test_zero_wiggliness_walks_straight() {
        let layout = AbstractLayout::standard();
        let generator = BrushworkGenerator::new(&layout, straight_config(1), TextureStyle::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(generator.deviation(&mut rng).abs(), 0.0);
        }
    }
}
