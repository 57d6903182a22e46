//! Randomized topology variation of the standard grid.
//!
//! Every step is gated by its own coin flip. Steps that refer to a grid cell
//! the layout does not have are skipped, so the steps are safe to apply to
//! partial grids.

use rand::Rng;

use super::{AbstractLayout, LocationId, Path, Purpose, VariationConfig};

impl AbstractLayout {
    /// Randomly perturb the topology of a grid layout.
    ///
    /// 1. Possibly drop each bottom corner, rerouting its bottom-row path to
    ///    the mid-row cell above it.
    /// 2. Possibly remove each lateral path between mid and the side cells.
    /// 3. Possibly add direct paths from mid to each site.
    pub fn apply_variation(&mut self, rng: &mut impl Rng, config: &VariationConfig) {
        // Bottom-right, then bottom-left
        if rng.random::<f64>() > config.drop_corner {
            self.drop_corner((2, 2), (2, 1), (1, 2));
        }
        if rng.random::<f64>() > config.drop_corner {
            self.drop_corner((0, 2), (0, 1), (1, 2));
        }

        if rng.random::<f64>() > config.drop_lateral {
            self.remove_between((1, 1), (2, 1));
        }
        if rng.random::<f64>() > config.drop_lateral {
            self.remove_between((0, 1), (1, 1));
        }

        if rng.random::<f64>() > config.add_shortcut {
            self.add_between((1, 1), (2, 0));
        }
        if rng.random::<f64>() > config.add_shortcut {
            self.add_between((1, 1), (0, 0));
        }
    }

    /// Mark `corner` inaccessible: drop its path to `above` and reroute its
    /// path to `beside` so it lands on `above` instead.
    fn drop_corner(&mut self, corner: (usize, usize), above: (usize, usize), beside: (usize, usize)) {
        let (Some(c), Some(a), Some(b)) = (
            self.cell(corner.0, corner.1),
            self.cell(above.0, above.1),
            self.cell(beside.0, beside.1),
        ) else {
            return;
        };

        self.paths_mut().retain(|p| !p.connects(a, c));
        let mut rerouted = false;
        for path in self.paths_mut().iter_mut().filter(|p| p.connects(b, c)) {
            path.set_ends(b, a);
            rerouted = true;
        }
        // Whatever else still reaches the corner cannot survive its removal
        self.paths_mut().retain(|p| !p.touches(c));
        self.locations_mut()[c.0].purpose = Purpose::Inaccessible;

        log::debug!(
            "Dropped corner {:?}{}",
            corner,
            if rerouted { ", rerouted its path" } else { "" }
        );
    }

    fn remove_between(&mut self, from: (usize, usize), to: (usize, usize)) {
        if let Some((a, b)) = self.cell_pair(from, to) {
            let before = self.paths().len();
            self.paths_mut().retain(|p| !p.connects(a, b));
            if self.paths().len() < before {
                log::debug!("Removed path {:?} - {:?}", from, to);
            }
        }
    }

    fn add_between(&mut self, from: (usize, usize), to: (usize, usize)) {
        if let Some((a, b)) = self.cell_pair(from, to) {
            let reachable = |id: LocationId| self.location(id).is_accessible();
            if reachable(a) && reachable(b) && !self.paths().iter().any(|p| p.connects(a, b)) {
                self.paths_mut().push(Path::new(a, b));
                log::debug!("Added shortcut {:?} - {:?}", from, to);
            }
        }
    }

    fn cell_pair(&self, a: (usize, usize), b: (usize, usize)) -> Option<(LocationId, LocationId)> {
        Some((self.cell(a.0, a.1)?, self.cell(b.0, b.1)?))
    }
}
