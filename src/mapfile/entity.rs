//! Map entities and their key/value property bags.

use crate::brush::Brush;
use crate::core::types::Point;

/// Ordered key/value pairs. Insertion order is preserved on output and
/// `classname` is always the first key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn with_classname(classname: impl Into<String>) -> Self {
        let mut properties = Self::default();
        properties.set("classname", classname);
        properties
    }

    /// Set `key`, replacing any existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entity with a position and no geometry
#[derive(Clone, Debug, PartialEq)]
pub struct PointEntity {
    pub properties: Properties,
}

impl PointEntity {
    pub fn new(classname: impl Into<String>, origin: Point) -> Self {
        let mut properties = Properties::with_classname(classname);
        properties.set("origin", format!("{} {} {}", origin.x, origin.y, origin.z));
        Self { properties }
    }
}

/// Entity made of brushes, such as `worldspawn`
#[derive(Clone, Debug, PartialEq)]
pub struct BrushEntity {
    pub properties: Properties,
    pub brushes: Vec<Brush>,
}

impl BrushEntity {
    pub fn new(classname: impl Into<String>) -> Self {
        Self {
            properties: Properties::with_classname(classname),
            brushes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Point(PointEntity),
    Brush(BrushEntity),
}

impl Entity {
    pub fn properties(&self) -> &Properties {
        match self {
            Entity::Point(e) => &e.properties,
            Entity::Brush(e) => &e.properties,
        }
    }

    pub fn brushes(&self) -> &[Brush] {
        match self {
            Entity::Point(_) => &[],
            Entity::Brush(e) => &e.brushes,
        }
    }
}

impl From<PointEntity> for Entity {
    fn from(entity: PointEntity) -> Self {
        Entity::Point(entity)
    }
}

impl From<BrushEntity> for Entity {
    fn from(entity: BrushEntity) -> Self {
        Entity::Brush(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classname_comes_first() {
        let entity = PointEntity::new("info_null", Point::new(1, -2, 3));
        let keys: Vec<_> = entity.properties.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["classname", "origin"]);
        assert_eq!(entity.properties.get("origin"), Some("1 -2 3"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut properties = Properties::with_classname("worldspawn");
        properties.set("light", "0");
        properties.set("wad", "a.wad");
        properties.set("light", "200");

        let pairs: Vec<_> = properties.iter().collect();
        assert_eq!(pairs, [("classname", "worldspawn"), ("light", "200"), ("wad", "a.wad")]);
    }
}
