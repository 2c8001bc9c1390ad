//! Model document parsing.
//!
//! Models define 3D geometry as cuboid elements with per-face texturing.
//! Documents may reference a parent model and declare texture variables
//! that faces point at with `#key` aliases.

use crate::types::ElementRotation;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Maximum number of alias hops before a reference resolves to `None`.
pub const MAX_ALIAS_DEPTH: usize = 10;

/// Texture variable map that preserves document order.
///
/// Atlas tile placement follows the order texture references first appear
/// in this map, so insertion order must survive parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureMap(Vec<(String, String)>);

impl TextureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a texture variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a variable, overriding an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a texture value or `#alias` reference to an external path.
    ///
    /// Alias chains are chased up to [`MAX_ALIAS_DEPTH`] hops; an unknown
    /// key or an exhausted chain (cycle) resolves to `None`.
    pub fn resolve<'a>(&'a self, reference: &'a str) -> Option<&'a str> {
        let mut current = reference;
        let mut depth = 0;

        while let Some(key) = current.strip_prefix('#') {
            if depth >= MAX_ALIAS_DEPTH {
                return None;
            }
            depth += 1;
            current = self.get(key)?;
        }

        Some(current)
    }
}

impl<'de> Deserialize<'de> for TextureMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextureMapVisitor;

        impl<'de> Visitor<'de> for TextureMapVisitor {
            type Value = TextureMap;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of texture variables")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(TextureMap(entries))
            }
        }

        deserializer.deserialize_map(TextureMapVisitor)
    }
}

impl Serialize for TextureMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A parsed model document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    /// Display name of the model.
    #[serde(default)]
    pub name: Option<String>,

    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Whether to use ambient occlusion. Parsed but unused by meshing.
    #[serde(default = "default_ao", rename = "ambientocclusion")]
    pub ambient_occlusion: bool,

    /// Texture variable definitions, in document order.
    #[serde(default)]
    pub textures: TextureMap,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

fn default_ao() -> bool {
    true
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this model has its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelElement {
    /// First corner (0-16 range; values outside are permitted).
    pub from: [f32; 3],
    /// Second corner.
    pub to: [f32; 3],
    /// Optional rotation about an axis-aligned origin.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade. Parsed but unused.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions keyed by face name. Unknown names are skipped with
    /// a warning at mesh build time.
    #[serde(default)]
    pub faces: BTreeMap<String, ModelFace>,
}

fn default_shade() -> bool {
    true
}

/// A face of a model element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelFace {
    /// Texture reference (`#key` alias or a path like `block/stone`).
    /// A face without one contributes no geometry.
    #[serde(default)]
    pub texture: Option<String>,
    /// UV coordinates [u1, v1, u2, v2] in the 0-16 texture space.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
    /// Face direction hint for culling. Preserved but unused.
    #[serde(default)]
    pub cullface: Option<String>,
}

impl ModelFace {
    /// UV coordinates for a face, auto-derived from the element extent
    /// when not given explicitly.
    pub fn uv_or_auto(&self, face: crate::types::Direction, from: &[f32; 3], to: &[f32; 3]) -> [f32; 4] {
        use crate::types::Direction;

        if let Some(uv) = self.uv {
            return uv;
        }
        match face {
            Direction::North | Direction::South => {
                [from[0], 16.0 - to[1], to[0], 16.0 - from[1]]
            }
            Direction::East | Direction::West => {
                [from[2], 16.0 - to[1], to[2], 16.0 - from[1]]
            }
            Direction::Up | Direction::Down => [from[0], from[2], to[0], to[2]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_parse_simple_model() {
        let json = r#"{
            "parent": "block/cube_all",
            "textures": {
                "all": "block/stone"
            }
        }"#;

        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.parent, Some("block/cube_all".to_string()));
        assert_eq!(model.textures.get("all"), Some("block/stone"));
        assert!(model.elements.is_empty());
        assert!(model.ambient_occlusion);
    }

    #[test]
    fn test_parse_model_with_elements() {
        let json = r##"{
            "textures": {
                "texture": "block/stone"
            },
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "down":  { "texture": "#texture", "cullface": "down" },
                        "up":    { "texture": "#texture", "cullface": "up" },
                        "north": { "texture": "#texture", "cullface": "north" },
                        "south": { "texture": "#texture", "cullface": "south" },
                        "west":  { "texture": "#texture", "cullface": "west" },
                        "east":  { "texture": "#texture", "cullface": "east" }
                    }
                }
            ]
        }"##;

        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.elements.len(), 1);

        let element = &model.elements[0];
        assert_eq!(element.from, [0.0, 0.0, 0.0]);
        assert_eq!(element.to, [16.0, 16.0, 16.0]);
        assert_eq!(element.faces.len(), 6);
        assert_eq!(
            element.faces.get("down").unwrap().cullface.as_deref(),
            Some("down")
        );
    }

    #[test]
    fn test_underscore_keys_ignored() {
        let json = r#"{
            "__comment": "decorative",
            "textures": { "all": "block/stone" },
            "elements": []
        }"#;

        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.textures.len(), 1);
    }

    #[test]
    fn test_face_without_texture_parses() {
        let json = r#"{ "uv": [0, 0, 16, 16] }"#;
        let face: ModelFace = serde_json::from_str(json).unwrap();
        assert!(face.texture.is_none());
    }

    #[test]
    fn test_texture_map_order_preserved() {
        let json = r#"{
            "textures": {
                "zeta": "block/a",
                "alpha": "block/b",
                "mid": "block/c"
            }
        }"#;

        let model: Model = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = model.textures.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_texture_map_insert_overrides_in_place() {
        let mut map = TextureMap::new();
        map.insert("a", "block/one");
        map.insert("b", "block/two");
        map.insert("a", "block/three");

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("a", "block/three"), ("b", "block/two")]);
    }

    #[test]
    fn test_resolve_alias_chain() {
        let mut map = TextureMap::new();
        map.insert("all", "block/stone");
        map.insert("side", "#all");
        map.insert("top", "#side");

        assert_eq!(map.resolve("#top"), Some("block/stone"));
        assert_eq!(map.resolve("#all"), Some("block/stone"));
        assert_eq!(map.resolve("block/dirt"), Some("block/dirt"));
    }

    #[test]
    fn test_resolve_unknown_key() {
        let map = TextureMap::new();
        assert_eq!(map.resolve("#missing"), None);
    }

    #[test]
    fn test_resolve_cycle_returns_none() {
        let mut map = TextureMap::new();
        map.insert("a", "#b");
        map.insert("b", "#a");

        assert_eq!(map.resolve("#a"), None);
    }

    #[test]
    fn test_auto_uv_full_block() {
        let face = ModelFace::default();
        let from = [0.0, 0.0, 0.0];
        let to = [16.0, 16.0, 16.0];

        assert_eq!(face.uv_or_auto(Direction::Up, &from, &to), [0.0, 0.0, 16.0, 16.0]);
        assert_eq!(face.uv_or_auto(Direction::North, &from, &to), [0.0, 0.0, 16.0, 16.0]);
    }

    #[test]
    fn test_auto_uv_slab() {
        // Bottom slab [0,0,0]-[16,8,16]: side faces show the lower half
        let face = ModelFace::default();
        let from = [0.0, 0.0, 0.0];
        let to = [16.0, 8.0, 16.0];

        assert_eq!(
            face.uv_or_auto(Direction::South, &from, &to),
            [0.0, 8.0, 16.0, 16.0]
        );
        assert_eq!(
            face.uv_or_auto(Direction::West, &from, &to),
            [0.0, 8.0, 16.0, 16.0]
        );
        assert_eq!(
            face.uv_or_auto(Direction::Up, &from, &to),
            [0.0, 0.0, 16.0, 16.0]
        );
    }

    #[test]
    fn test_explicit_uv_overrides_auto() {
        let face = ModelFace {
            uv: Some([2.0, 4.0, 14.0, 12.0]),
            ..Default::default()
        };
        let uv = face.uv_or_auto(Direction::North, &[0.0; 3], &[16.0, 8.0, 16.0]);
        assert_eq!(uv, [2.0, 4.0, 14.0, 12.0]);
    }
}
