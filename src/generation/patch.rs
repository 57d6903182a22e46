//! Floor patches: seeding them under anchors and budding new ones off
//! existing brushes.

use rand::Rng;

use super::BrushworkGenerator;
use crate::brush::Brush;
use crate::core::error::GenerationError;
use crate::core::types::{Point, Vector};
use crate::math::Aabb;
use crate::math::vector::{self, UP};
use crate::trace::trace;

/// Component tolerance when matching a side normal to a rotated face normal.
const SIDE_MATCH_MARGIN: f64 = 0.2;

/// Fresh draws tried before a colliding seed patch is cut back.
const SEED_ATTEMPTS: usize = 8;

/// `avg` perturbed by a value drawn from `[-variation, variation)`.
fn vary(rng: &mut impl Rng, avg: i32, variation: i32) -> i32 {
    if variation <= 0 {
        return avg;
    }
    avg + rng.random_range(-variation..variation)
}

impl BrushworkGenerator<'_> {
    /// Random-sized box whose top face sits at `origin.z` with `origin`
    /// strictly inside its footprint.
    pub fn make_patch(&self, origin: Point, rng: &mut impl Rng) -> Result<Brush, GenerationError> {
        let patch = &self.config.patch;
        let x_len = vary(rng, patch.avg_side, patch.side_variation);
        let y_len = vary(rng, patch.avg_side, patch.side_variation);
        let x_off = rng.random_range(1..x_len);
        let y_off = rng.random_range(1..y_len);

        let top_left = Point::new(origin.x - x_off, origin.y + y_off, origin.z);
        let bottom_right = Point::new(top_left.x + x_len, top_left.y - y_len, origin.z - patch.thickness);
        Ok(Brush::block(top_left, bottom_right, &self.style)?)
    }

    /// Patch under `anchor` that shares no volume with existing brushes.
    ///
    /// Fresh patches are drawn up to `SEED_ATTEMPTS` times. If every draw
    /// collides, the last one is cut back until it is clear, keeping `anchor`
    /// strictly inside. Fails with [`GenerationError::NoRoom`] when no cut can
    /// do that.
    pub fn seed_patch(&self, anchor: Point, rng: &mut impl Rng) -> Result<Brush, GenerationError> {
        let mut patch = self.make_patch(anchor, rng)?;
        for _ in 1..SEED_ATTEMPTS {
            if !self.overlaps_existing(&patch.bounds()) {
                return Ok(patch);
            }
            patch = self.make_patch(anchor, rng)?;
        }
        if !self.overlaps_existing(&patch.bounds()) {
            return Ok(patch);
        }

        let cleared = self.shrink_around(anchor, patch.bounds())?;
        log::debug!("Shrank patch under {} to {:?}", anchor, cleared);
        Ok(Brush::block(cleared.min, cleared.max, &self.style)?)
    }

    fn overlaps_existing(&self, bounds: &Aabb) -> bool {
        self.brushes.iter().any(|b| b.bounds().overlaps(bounds))
    }

    /// Cut `bounds` back along x or y until it overlaps nothing, keeping
    /// whichever cut leaves the largest footprint each time.
    fn shrink_around(&self, anchor: Point, mut bounds: Aabb) -> Result<Aabb, GenerationError> {
        // Every cut clears one obstacle for good, since the box only shrinks
        while let Some(obstacle) = self.brushes.iter().map(Brush::bounds).find(|b| b.overlaps(&bounds)) {
            let mut cuts = Vec::with_capacity(4);
            if obstacle.max.x < anchor.x {
                cuts.push(Aabb::new(Point::new(obstacle.max.x, bounds.min.y, bounds.min.z), bounds.max));
            }
            if obstacle.min.x > anchor.x {
                cuts.push(Aabb::new(bounds.min, Point::new(obstacle.min.x, bounds.max.y, bounds.max.z)));
            }
            if obstacle.max.y < anchor.y {
                cuts.push(Aabb::new(Point::new(bounds.min.x, obstacle.max.y, bounds.min.z), bounds.max));
            }
            if obstacle.min.y > anchor.y {
                cuts.push(Aabb::new(bounds.min, Point::new(bounds.max.x, obstacle.min.y, bounds.max.z)));
            }
            bounds = cuts
                .into_iter()
                .max_by_key(|b| {
                    let size = b.size();
                    i64::from(size.x) * i64::from(size.y)
                })
                .ok_or(GenerationError::NoRoom)?;
        }
        Ok(bounds)
    }

    /// Brush directly across `face` of `brush`, if one is flush against it.
    fn neighbour_on(&self, brush: usize, face: usize) -> Option<usize> {
        let ours = &self.brushes[brush];
        self.brushes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != brush)
            .find(|(_, other)| ours.adjacency(other).is_some_and(|pair| pair.ours == face))
            .map(|(i, _)| i)
    }

    /// Grow a new patch off the face of `parent` that best matches `bearing`.
    ///
    /// If that face already has a neighbour the walk continues across it
    /// until an open face is found. The new patch is sized by tracing
    /// through the existing brushwork just below floor level, so it stops
    /// flush against anything in its way. Returns the patch and the centre
    /// of its top face; nothing is added to the generator.
    pub fn bud_patch(
        &self,
        parent: usize,
        bearing: Vector,
        rng: &mut impl Rng,
    ) -> Result<(Brush, Point), GenerationError> {
        let patch = &self.config.patch;
        let target_depth = vary(rng, patch.avg_side, patch.side_variation);
        let target_width = vary(rng, patch.avg_side, patch.side_variation);

        let mut parent = parent;
        let mut face = self.brushes[parent].face_towards(bearing)?;
        let mut hops = 0;
        while let Some(next) = self.neighbour_on(parent, face) {
            hops += 1;
            if hops > self.brushes.len() {
                return Err(GenerationError::NoOpenFace);
            }
            parent = next;
            face = self.brushes[parent].face_towards(bearing)?;
        }
        if hops > 0 {
            log::debug!("Walked across {} brushes to open face {} of brush {}", hops, face, parent);
        }

        let brush = &self.brushes[parent];
        let floor = brush.floor_height().ok_or(GenerationError::MissingFloor)?;
        let plane = &brush.planes()[face];
        let normal = plane.normal();

        // The face's bottom edge runs between the side planes either side of it
        let left = vector::rotate_about_axis(normal, UP, 90.0)?;
        let right = vector::rotate_about_axis(normal, UP, -90.0)?;
        let mut start = None;
        let mut end = None;
        for side in brush.planes() {
            let n = side.normal();
            if n.z != 0.0 {
                continue;
            }
            if vector::approx_eq(n, left, SIDE_MATCH_MARGIN) {
                start = Some(side.intersection(plane)?.point);
            } else if vector::approx_eq(n, right, SIDE_MATCH_MARGIN) {
                end = Some(side.intersection(plane)?.point);
            }
        }
        let (Some(start), Some(end)) = (start, end) else {
            return Err(GenerationError::NoOpenFace);
        };
        let start = Point::new(start.x, start.y, floor);
        let end = Point::new(end.x, end.y, floor);

        let t: f64 = rng.random();
        let along = vector::between(start, end) * t;
        let seed = vector::displace(start, along) - Point::Z * patch.sink_depth;

        let depth = trace(seed, normal, &self.brushes, target_depth as u32)?;
        if depth.length == 0 {
            return Err(GenerationError::NoRoom);
        }

        let direction = if rng.random_bool(0.5) { left } else { -left };
        let mut width = target_width as u32;
        for i in 0..depth.length {
            if width == 0 {
                break;
            }
            let row = vector::displace(seed, normal * i as f64);
            let across = trace(row, direction, &self.brushes, width)?;
            width = width.min(across.length);
        }

        let reach = direction * width as f64;
        let corners = [seed, depth.finish, vector::displace(seed, reach), vector::displace(depth.finish, reach)];
        let Some(footprint) = Aabb::from_points(corners) else {
            return Err(GenerationError::NoRoom);
        };
        if footprint.min.x == footprint.max.x || footprint.min.y == footprint.max.y {
            return Err(GenerationError::NoRoom);
        }

        let top_left = Point::new(footprint.min.x, footprint.max.y, floor);
        let bottom_right = Point::new(footprint.max.x, footprint.min.y, floor - patch.thickness);
        let bud = Brush::block(top_left, bottom_right, &self.style)?;

        // Sampling is on the grid only, so confirm nothing is actually shared
        if self.overlaps_existing(&bud.bounds()) {
            return Err(GenerationError::NoRoom);
        }

        let centre = bud.centre();
        Ok((bud, centre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GeneratorConfig, PatchConfig};
    use crate::layout::AbstractLayout;
    use crate::math::plane::TextureStyle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn boxed(a: (i32, i32, i32), b: (i32, i32, i32)) -> Brush {
        Brush::block(Point::from(a), Point::from(b), &TextureStyle::default()).unwrap()
    }

    fn fixed_size_config(side: i32) -> GeneratorConfig {
        GeneratorConfig {
            patch: PatchConfig {
                avg_side: side,
                side_variation: 0,
                ..PatchConfig::default()
            },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_patch_contains_origin() {
        let layout = AbstractLayout::standard();
        let generator = BrushworkGenerator::new(&layout, GeneratorConfig::default(), TextureStyle::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let origin = Point::new(100, -200, 64);

        for _ in 0..50 {
            let patch = generator.make_patch(origin, &mut rng).unwrap();
            let bounds = patch.bounds();
            assert_eq!(patch.floor_height(), Some(64));
            assert_eq!(bounds.min.z, 32);
            assert!(patch.contains(origin - Point::Z * 16));
            let size = bounds.size();
            assert!((256..768).contains(&size.x) && (256..768).contains(&size.y));
        }
    }

    #[test]
    fn test_bud_grows_flush_from_chosen_face() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, fixed_size_config(128), TextureStyle::default()).unwrap();
        let parent = generator.add_brush(boxed((0, 0, 0), (100, 100, -32)));
        let mut rng = StdRng::seed_from_u64(5);

        let (bud, centre) = generator.bud_patch(parent, Vector::X, &mut rng).unwrap();
        let bounds = bud.bounds();

        assert_eq!(bounds.min.x, 100);
        assert_eq!(bounds.max.x, 228);
        assert_eq!(bounds.size().y, 128);
        assert_eq!((bounds.min.z, bounds.max.z), (-32, 0));
        assert_eq!(centre, Point::new(164, bounds.min.y + 64, 0));
        assert!(bud.adjacency(&generator.brushes()[parent]).is_some());
    }

    #[test]
    fn test_bud_stops_at_obstacle() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, fixed_size_config(128), TextureStyle::default()).unwrap();
        let parent = generator.add_brush(boxed((0, 0, 0), (100, 100, -32)));
        let wall = generator.add_brush(boxed((150, -1000, 0), (200, 1000, -32)));
        let mut rng = StdRng::seed_from_u64(9);

        let (bud, _) = generator.bud_patch(parent, Vector::X, &mut rng).unwrap();

        assert_eq!(bud.bounds().max.x, 150);
        assert!(bud.adjacency(&generator.brushes()[wall]).is_some());
        assert!(!bud.bounds().overlaps(&generator.brushes()[wall].bounds()));
    }

    #[test]
    fn test_bud_walks_across_covered_face() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, fixed_size_config(64), TextureStyle::default()).unwrap();
        let parent = generator.add_brush(boxed((0, 0, 0), (100, 100, -32)));
        generator.add_brush(boxed((100, 0, 0), (200, 100, -32)));
        let mut rng = StdRng::seed_from_u64(1);

        let (bud, _) = generator.bud_patch(parent, Vector::X, &mut rng).unwrap();

        assert_eq!(bud.bounds().min.x, 200);
        for existing in generator.brushes() {
            assert!(!bud.bounds().overlaps(&existing.bounds()));
        }
    }

    #[test]
    fn test_bud_from_boxed_in_face_has_no_room() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, fixed_size_config(128), TextureStyle::default()).unwrap();
        let parent = generator.add_brush(boxed((0, 0, 0), (100, 100, -32)));
        // Overlaps the parent's east face, so nothing can grow there
        generator.add_brush(boxed((99, -500, 0), (400, 500, -32)));
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(
            generator.bud_patch(parent, Vector::X, &mut rng),
            Err(GenerationError::NoRoom)
        );
    }

    #[test]
    fn test_seed_patch_is_cut_back_clear_of_neighbour() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, GeneratorConfig::default(), TextureStyle::default()).unwrap();
        let wall = generator.add_brush(boxed((10, -2000, 0), (2000, 2000, -32)));
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..20 {
            let patch = generator.seed_patch(Point::ZERO, &mut rng).unwrap();
            assert!(!patch.bounds().overlaps(&generator.brushes()[wall].bounds()));
            assert!(patch.bounds().max.x <= 10);
            assert!(patch.contains(Point::new(0, 0, -16)));
        }
    }

    #[test]
    fn test_seed_patch_under_covered_anchor_has_no_room() {
        let layout = AbstractLayout::standard();
        let mut generator = BrushworkGenerator::new(&layout, GeneratorConfig::default(), TextureStyle::default()).unwrap();
        generator.add_brush(boxed((-2000, -2000, 0), (2000, 2000, -32)));
        let mut rng = StdRng::seed_from_u64(6);

        assert_eq!(generator.seed_patch(Point::ZERO, &mut rng), Err(GenerationError::NoRoom));
    }
}
