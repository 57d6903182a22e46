//! Top-level configuration for a map generation run.
//!
//! Every group has sensible defaults, so a JSON file only needs to name the
//! values it changes:
//!
//! ```json
//! { "seed": 42, "layout": { "variation": { "enabled": true } } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::generation::GeneratorConfig;
use crate::layout::LayoutConfig;
use crate::mapfile::DEFAULT_WADS;
use crate::math::plane::TextureStyle;

/// Everything needed to go from a seed to a `.map` file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub layout: LayoutConfig,
    pub generator: GeneratorConfig,
    /// Texture applied to every generated face
    pub texture: TextureStyle,
    /// Texture archives listed in worldspawn
    pub wads: Vec<String>,
    /// Add `info_null` markers at layout locations
    pub draw_layout: bool,
    pub output: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: None,
            layout: LayoutConfig::default(),
            generator: GeneratorConfig::default(),
            texture: TextureStyle::default(),
            wads: DEFAULT_WADS.iter().map(|s| s.to_string()).collect(),
            draw_layout: false,
            output: PathBuf::from("generated.map"),
        }
    }
}

impl MapConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the generator cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate().map_err(Error::Config)?;
        self.generator.validate().map_err(Error::Config)?;
        if self.texture.name.is_empty() || self.texture.name.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "texture name {:?} must be non-empty and contain no whitespace",
                self.texture.name
            )));
        }
        if let crate::math::plane::DownSearch::Sampled { samples: 0 } = self.texture.down_search {
            return Err(Error::Config("texture down search needs at least one sample".to_string()));
        }
        if let Some(wad) = self.wads.iter().find(|w| w.contains(['"', ';'])) {
            return Err(Error::Config(format!("wad path {wad:?} contains a reserved character")));
        }
        Ok(())
    }
}
