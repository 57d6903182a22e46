//! Spatial placement of grid locations.

use rand::Rng;

use super::{AbstractLayout, PlacementConfig, GRID_SIZE};
use crate::core::types::Point;

/// Random magnitude in `[min, max)` (or `min` when the range is empty) with a
/// coin-flip sign.
fn jitter(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    let magnitude = if max > min { rng.random_range(min..max) } else { min };
    if rng.random::<f64>() > 0.5 { -magnitude } else { magnitude }
}

impl AbstractLayout {
    /// Give every grid location an anchor on a jittered grid centred on the
    /// middle cell. Row 0 is the top of the map (+Y). Locations without a
    /// grid cell keep their anchor.
    pub fn place(&mut self, rng: &mut impl Rng, config: &PlacementConfig) {
        let centre = (GRID_SIZE / 2) as i32;
        for location in self.locations_mut() {
            let Some((i, j)) = location.cell else {
                continue;
            };
            let x = (i as i32 - centre) * config.separation
                + jitter(rng, config.min_horizontal_variance, config.max_horizontal_variance);
            let y = (j as i32 - centre) * -config.separation
                + jitter(rng, config.min_horizontal_variance, config.max_horizontal_variance);
            let z = jitter(rng, config.min_vertical_variance, config.max_vertical_variance);
            location.anchor = Point::new(x, y, z);
        }
        log::debug!("Placed {} locations", self.locations().len());
    }
}
