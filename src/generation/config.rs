//! Brushwork generator configuration.

use serde::{Deserialize, Serialize};

use crate::trace::MAX_TRACE_LENGTH;

/// Size of floor patches, in map units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Average length of a patch side.
    pub avg_side: i32,
    /// Maximum deviation from `avg_side`, drawn from `[-variation, variation)`.
    pub side_variation: i32,
    /// Vertical thickness of every floor brush.
    pub thickness: i32,
    /// How far below the floor surface traces are issued.
    pub sink_depth: i32,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            avg_side: 512,
            side_variation: 256,
            thickness: 32,
            sink_depth: 16,
        }
    }
}

/// Distribution of the random heading change applied at every growth step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiggleDistribution {
    /// Standard normal (Box-Muller), scaled by wiggliness x 120 degrees.
    #[default]
    Normal,
    /// Uniform in [-120, 120) degrees, scaled by wiggliness.
    Uniform,
}

/// Configuration for the brushwork generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub patch: PatchConfig,
    /// How far paths stray from as-the-crow-flies. 0 walks straight.
    pub wiggliness: f64,
    /// Hard cap on a single heading change, in degrees.
    pub max_deviation: f64,
    pub distribution: WiggleDistribution,
    /// Growth attempts allowed per path before it is reported as failed.
    pub max_path_steps: u32,
    /// Length of the vertical traces used to find patches under anchors.
    pub max_trace_length: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            patch: PatchConfig::default(),
            wiggliness: 0.5,
            max_deviation: 120.0,
            distribution: WiggleDistribution::Normal,
            max_path_steps: 256,
            max_trace_length: MAX_TRACE_LENGTH,
        }
    }
}

impl GeneratorConfig {
    /// Check the configuration can be honoured, describing the first problem.
    pub fn validate(&self) -> Result<(), String> {
        let patch = &self.patch;
        if patch.side_variation < 0 {
            return Err(format!("side_variation must not be negative, got {}", patch.side_variation));
        }
        // Anchors must fit strictly inside the smallest possible patch
        if patch.avg_side - patch.side_variation < 2 {
            return Err(format!(
                "avg_side ({}) must exceed side_variation ({}) by at least 2",
                patch.avg_side, patch.side_variation
            ));
        }
        if patch.thickness <= 0 {
            return Err(format!("thickness must be positive, got {}", patch.thickness));
        }
        if patch.sink_depth <= 0 || patch.sink_depth >= patch.thickness {
            return Err(format!(
                "sink_depth must lie strictly inside the floor thickness, got {}",
                patch.sink_depth
            ));
        }
        if !(self.wiggliness >= 0.0) {
            return Err(format!("wiggliness must be non-negative, got {}", self.wiggliness));
        }
        if !(self.max_deviation >= 0.0) {
            return Err(format!("max_deviation must be non-negative, got {}", self.max_deviation));
        }
        if self.max_path_steps == 0 {
            return Err("max_path_steps must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_patches_that_cannot_hold_an_anchor() {
        let mut config = GeneratorConfig::default();
        config.patch.side_variation = 511;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_sink_outside_floor() {
        let mut config = GeneratorConfig::default();
        config.patch.sink_depth = 32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_wiggliness() {
        let config = GeneratorConfig { wiggliness: f64::NAN, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());
    }
}
