//! Layout configuration: topology variation and spatial placement.

use serde::{Deserialize, Serialize};

/// Odds of each topology variation step. A step fires when a uniform draw in
/// `[0, 1)` exceeds its threshold, so 0.75 means a 25% chance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationConfig {
    /// Master switch. When off the standard grid is used unchanged.
    pub enabled: bool,
    /// Threshold for dropping each bottom corner.
    pub drop_corner: f64,
    /// Threshold for removing each lateral path out of mid.
    pub drop_lateral: f64,
    /// Threshold for adding each mid-to-site shortcut.
    pub add_shortcut: f64,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            drop_corner: 0.75,
            drop_lateral: 0.75,
            add_shortcut: 0.75,
        }
    }
}

/// Spacing and jitter of location anchors, in map units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Average distance between neighbouring grid cells.
    pub separation: i32,
    /// Horizontal jitter magnitude range `[min, max)`.
    pub min_horizontal_variance: i32,
    pub max_horizontal_variance: i32,
    /// Vertical jitter magnitude range `[min, max)`.
    pub min_vertical_variance: i32,
    pub max_vertical_variance: i32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            separation: 2048,         // de_dust2 is roughly 4096 x 4096
            min_horizontal_variance: 0,
            max_horizontal_variance: 512,
            min_vertical_variance: 0,
            max_vertical_variance: 0, // Flat maps for now
        }
    }
}

/// Complete layout configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub variation: VariationConfig,
    pub placement: PlacementConfig,
}

impl LayoutConfig {
    /// Check the configuration can be honoured, describing the first problem.
    pub fn validate(&self) -> Result<(), String> {
        let v = &self.variation;
        for (name, threshold) in [
            ("drop_corner", v.drop_corner),
            ("drop_lateral", v.drop_lateral),
            ("add_shortcut", v.add_shortcut),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("variation.{name} must lie in [0, 1], got {threshold}"));
            }
        }

        let p = &self.placement;
        if p.separation <= 0 {
            return Err(format!("placement.separation must be positive, got {}", p.separation));
        }
        for (axis, min, max) in [
            ("horizontal", p.min_horizontal_variance, p.max_horizontal_variance),
            ("vertical", p.min_vertical_variance, p.max_vertical_variance),
        ] {
            if min < 0 || max < min {
                return Err(format!("placement {axis} variance range [{min}, {max}) is invalid"));
            }
        }
        Ok(())
    }
}
