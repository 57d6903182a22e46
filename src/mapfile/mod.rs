//! `.map` output: a worldspawn entity holding the level's brushes plus any
//! number of other entities, written in the Valve-220 format.

pub mod entity;
mod writer;

pub use entity::{BrushEntity, Entity, PointEntity, Properties};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::brush::Brush;
use crate::core::types::Result;
use crate::layout::{AbstractLayout, GRID_SIZE};

/// Format revision written to worldspawn
pub const MAP_VERSION: u32 = 220;

/// Far clip distance written to worldspawn
pub const MAX_RANGE: u32 = 4096;

/// Texture archives referenced when none are configured
pub const DEFAULT_WADS: [&str; 4] = ["liquids.wad", "xeno.wad", "zhlt.wad", "halflife.wad"];

/// An in-memory map, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct MapFile {
    worldspawn: BrushEntity,
    entities: Vec<Entity>,
}

impl Default for MapFile {
    fn default() -> Self {
        Self::new(&DEFAULT_WADS)
    }
}

impl MapFile {
    /// Empty map whose worldspawn references `wads`.
    pub fn new<S: AsRef<str>>(wads: &[S]) -> Self {
        let mut worldspawn = BrushEntity::new("worldspawn");
        let properties = &mut worldspawn.properties;
        properties.set("spawnflags", "0");
        properties.set("mapversion", MAP_VERSION.to_string());
        properties.set("light", "0");
        properties.set("MaxRange", MAX_RANGE.to_string());
        let wad = wads.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(";");
        properties.set("wad", wad);

        Self {
            worldspawn,
            entities: Vec::new(),
        }
    }

    pub fn worldspawn(&self) -> &BrushEntity {
        &self.worldspawn
    }

    pub fn worldspawn_mut(&mut self) -> &mut BrushEntity {
        &mut self.worldspawn
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Append world brushes, keeping their order.
    pub fn add_brushes(&mut self, brushes: impl IntoIterator<Item = Brush>) {
        self.worldspawn.brushes.extend(brushes);
    }

    /// Mark every accessible location with an `info_null` named after its
    /// grid cell, for inspecting a layout in an editor.
    pub fn draw_layout(&mut self, layout: &AbstractLayout) {
        let mut marked = 0;
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                let Some(id) = layout.cell(i, j) else {
                    continue;
                };
                let location = layout.location(id);
                if !location.is_accessible() {
                    continue;
                }
                let mut marker = PointEntity::new("info_null", location.anchor);
                marker.properties.set("targetname", format!("DEBUG: [{i}, {j}]"));
                self.add_entity(marker);
                marked += 1;
            }
        }

        // Locations built by hand have no grid cell
        for (index, location) in layout.locations().iter().enumerate() {
            if location.cell.is_some() || !location.is_accessible() {
                continue;
            }
            let mut marker = PointEntity::new("info_null", location.anchor);
            marker.properties.set("targetname", format!("DEBUG: [{index}]"));
            self.add_entity(marker);
            marked += 1;
        }
        log::debug!("Drew {} layout markers", marked);
    }

    fn blocks(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(writer::entity(&self.worldspawn.properties, &self.worldspawn.brushes)).chain(
            self.entities
                .iter()
                .map(|entity| writer::entity(entity.properties(), entity.brushes())),
        )
    }

    /// Write worldspawn followed by every other entity, one block at a time.
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        for block in self.blocks() {
            w.write_all(block.as_bytes())?;
        }
        w.flush()
    }

    pub fn to_map_string(&self) -> String {
        self.blocks().collect()
    }

    /// Write to `path`, creating parent directories and overwriting any
    /// existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        log::info!(
            "Wrote {} ({} world brushes, {} entities)",
            path.display(),
            self.worldspawn.brushes.len(),
            self.entities.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point;
    use crate::layout::{Location, LocationId, Path as LayoutPath, Purpose};
    use crate::math::plane::TextureStyle;

    #[test]
    fn test_worldspawn_defaults() {
        let map = MapFile::default();
        let properties = &map.worldspawn().properties;
        let keys: Vec<_> = properties.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, ["classname", "spawnflags", "mapversion", "light", "MaxRange", "wad"]);
        assert_eq!(properties.get("mapversion"), Some("220"));
        assert_eq!(properties.get("wad"), Some("liquids.wad;xeno.wad;zhlt.wad;halflife.wad"));
    }

    #[test]
    fn test_worldspawn_is_written_first() {
        let mut map = MapFile::new(&["custom.wad"]);
        map.add_entity(PointEntity::new("info_player_start", Point::new(0, 0, 36)));
        map.add_brushes([Brush::block(Point::ZERO, Point::new(64, 64, -32), &TextureStyle::default()).unwrap()]);

        let text = map.to_map_string();
        let world = text.find("\"worldspawn\"").unwrap();
        let player = text.find("\"info_player_start\"").unwrap();
        assert!(world < player);
        assert_eq!(text.matches("\t{\r\n").count(), 1);
        assert!(text.contains("\t\"wad\" \"custom.wad\"\r\n"));
        assert!(text.ends_with("}\r\n"));
    }

    #[test]
    fn test_streamed_output_matches_string() {
        let mut map = MapFile::default();
        map.add_brushes([Brush::block(Point::ZERO, Point::new(32, 32, -32), &TextureStyle::default()).unwrap()]);
        map.draw_layout(&AbstractLayout::standard());

        let mut streamed = Vec::new();
        map.write_to(&mut streamed).unwrap();

        assert_eq!(String::from_utf8(streamed).unwrap(), map.to_map_string());
        assert_eq!(map.to_map_string().matches("\"classname\"").count(), 10);
    }

    #[test]
    fn test_draw_standard_layout_marks_nine_cells() {
        let mut map = MapFile::default();
        map.draw_layout(&AbstractLayout::standard());

        assert_eq!(map.entities().len(), 9);
        let names: Vec<_> = map
            .entities()
            .iter()
            .filter_map(|e| e.properties().get("targetname"))
            .collect();
        assert_eq!(names[0], "DEBUG: [0, 0]");
        assert_eq!(names[1], "DEBUG: [0, 1]");
        assert!(map.entities().iter().all(|e| e.properties().classname() == Some("info_null")));
    }

    #[test]
    fn test_draw_layout_skips_inaccessible() {
        let layout = AbstractLayout::from_parts(
            vec![
                Location::new(Point::ZERO, Purpose::None),
                Location::new(Point::new(512, 0, 0), Purpose::None),
                Location::new(Point::new(0, 512, 0), Purpose::Inaccessible),
            ],
            vec![LayoutPath::new(LocationId(0), LocationId(1))],
        )
        .unwrap();
        let mut map = MapFile::default();
        map.draw_layout(&layout);

        assert_eq!(map.entities().len(), 2);
        assert_eq!(map.entities()[1].properties().get("targetname"), Some("DEBUG: [1]"));
        assert_eq!(map.entities()[1].properties().get("origin"), Some("512 0 0"));
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps").join("test.map");
        let map = MapFile::default();

        map.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, map.to_map_string());
    }
}
