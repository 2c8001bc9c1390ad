//! Model and texture asset handling.
//!
//! This module parses model JSON documents, resolves parent inheritance and
//! texture references, and exposes pixel data to the mesh builders.

pub mod loader;
pub mod model;
pub mod reference;
pub mod texture;

pub use model::{Model, ModelElement, ModelFace, TextureMap, MAX_ALIAS_DEPTH};
pub use reference::{TextureCategory, TextureRef};
pub use texture::{MemoryTextureSource, PixelBounds, Texture, TextureSource};

use crate::error::{MesherError, Result};
use std::collections::HashMap;
use tracing::warn;

/// Maximum depth for parent inheritance to prevent infinite loops.
const MAX_PARENT_DEPTH: usize = 10;

/// A directory of model documents, keyed by model path (e.g. `block/chest`).
#[derive(Debug, Default, Clone)]
pub struct ModelStore {
    models: HashMap<String, Model>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model under a path.
    pub fn add_model(&mut self, path: impl Into<String>, model: Model) {
        self.models.insert(path.into(), model);
    }

    /// Number of models in the store.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Look up a model by bare name, falling back to the name with a
    /// leading `block/` stripped. A `minecraft:` prefix is ignored.
    pub fn get(&self, name: &str) -> Option<&Model> {
        let name = name.strip_prefix("minecraft:").unwrap_or(name);
        self.models.get(name).or_else(|| {
            name.strip_prefix("block/")
                .and_then(|bare| self.models.get(bare))
        })
    }

    /// Resolve a model with its parent chain merged in.
    ///
    /// A missing parent is a warning (the model is used as-is); a missing
    /// root model is fatal. Inheritance deeper than [`MAX_PARENT_DEPTH`]
    /// stops with a warning to break reference cycles.
    pub fn resolve(&self, name: &str, warnings: &mut Vec<String>) -> Result<Model> {
        let model = self
            .get(name)
            .cloned()
            .ok_or_else(|| MesherError::ModelNotFound(name.to_string()))?;

        let mut resolved = self.resolve_parents(model, name, 0, warnings);
        if resolved.name.is_none() {
            resolved.name = Some(name.to_string());
        }
        Ok(resolved)
    }

    fn resolve_parents(
        &self,
        child: Model,
        child_name: &str,
        depth: usize,
        warnings: &mut Vec<String>,
    ) -> Model {
        let parent_name = match &child.parent {
            Some(p) => p.clone(),
            None => return child,
        };

        if depth >= MAX_PARENT_DEPTH {
            let msg = format!(
                "parent chain of '{}' exceeds depth {}, stopping at '{}'",
                child_name, MAX_PARENT_DEPTH, parent_name
            );
            warn!("{}", msg);
            warnings.push(msg);
            let mut stopped = child;
            stopped.parent = None;
            return stopped;
        }

        let parent = match self.get(&parent_name) {
            Some(p) => p.clone(),
            None => {
                let msg = format!(
                    "parent model '{}' of '{}' not found, treating as empty",
                    parent_name, child_name
                );
                warn!("{}", msg);
                warnings.push(msg);
                let mut orphan = child;
                orphan.parent = None;
                return orphan;
            }
        };

        let parent = self.resolve_parents(parent, &parent_name, depth + 1, warnings);
        merge_models(parent, child)
    }
}

/// Merge a resolved parent into a child model.
///
/// The child inherits elements only when it defines none of its own;
/// texture variables merge with child values overriding parent values.
fn merge_models(parent: Model, child: Model) -> Model {
    let mut merged = parent;

    for (key, value) in child.textures.iter() {
        merged.textures.insert(key, value);
    }

    if child.has_elements() {
        merged.elements = child.elements;
    }

    merged.ambient_occlusion = child.ambient_occlusion;
    if child.name.is_some() {
        merged.name = child.name;
    }
    merged.parent = None;

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use std::collections::BTreeMap;

    fn cube_element(texture: &str) -> ModelElement {
        let mut faces = BTreeMap::new();
        for dir in Direction::ALL {
            faces.insert(
                dir.to_string(),
                ModelFace {
                    texture: Some(texture.to_string()),
                    ..Default::default()
                },
            );
        }
        ModelElement {
            from: [0.0, 0.0, 0.0],
            to: [16.0, 16.0, 16.0],
            faces,
            ..Default::default()
        }
    }

    fn store_with_inheritance() -> ModelStore {
        let mut store = ModelStore::new();

        let mut cube_all = Model::new();
        cube_all.textures.insert("particle", "#all");
        cube_all.elements = vec![cube_element("#all")];
        store.add_model("block/cube_all", cube_all);

        let mut stone = Model::new();
        stone.parent = Some("block/cube_all".to_string());
        stone.textures.insert("all", "block/stone");
        store.add_model("block/stone", stone);

        store
    }

    #[test]
    fn test_resolve_inherits_elements() {
        let store = store_with_inheritance();
        let mut warnings = Vec::new();

        let model = store.resolve("block/stone", &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(model.elements.len(), 1);
        assert_eq!(model.textures.get("all"), Some("block/stone"));
        assert_eq!(model.textures.get("particle"), Some("#all"));
        assert!(model.parent.is_none());
    }

    #[test]
    fn test_child_elements_override_parent() {
        let mut store = store_with_inheritance();

        let mut thin = Model::new();
        thin.parent = Some("block/cube_all".to_string());
        let mut element = cube_element("#all");
        element.to = [16.0, 8.0, 16.0];
        thin.elements = vec![element];
        store.add_model("block/slab", thin);

        let mut warnings = Vec::new();
        let model = store.resolve("block/slab", &mut warnings).unwrap();
        assert_eq!(model.elements[0].to, [16.0, 8.0, 16.0]);
    }

    #[test]
    fn test_parent_lookup_strips_block_prefix() {
        let mut store = ModelStore::new();

        let mut base = Model::new();
        base.elements = vec![cube_element("#all")];
        store.add_model("cube_all", base);

        let mut child = Model::new();
        child.parent = Some("block/cube_all".to_string());
        store.add_model("block/stone", child);

        let mut warnings = Vec::new();
        let model = store.resolve("block/stone", &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(model.elements.len(), 1);
    }

    #[test]
    fn test_missing_parent_is_warning() {
        let mut store = ModelStore::new();
        let mut orphan = Model::new();
        orphan.parent = Some("block/nonexistent".to_string());
        orphan.textures.insert("all", "block/stone");
        store.add_model("block/orphan", orphan);

        let mut warnings = Vec::new();
        let model = store.resolve("block/orphan", &mut warnings).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(model.parent.is_none());
        assert_eq!(model.textures.get("all"), Some("block/stone"));
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let store = ModelStore::new();
        let mut warnings = Vec::new();
        assert!(store.resolve("block/missing", &mut warnings).is_err());
    }

    #[test]
    fn test_parent_cycle_stops_with_warning() {
        let mut store = ModelStore::new();

        let mut a = Model::new();
        a.parent = Some("block/b".to_string());
        store.add_model("block/a", a);

        let mut b = Model::new();
        b.parent = Some("block/a".to_string());
        store.add_model("block/b", b);

        let mut warnings = Vec::new();
        let model = store.resolve("block/a", &mut warnings).unwrap();
        assert!(!warnings.is_empty());
        assert!(model.parent.is_none());
    }

    #[test]
    fn test_texture_merge_order_is_parent_first() {
        let store = store_with_inheritance();
        let mut warnings = Vec::new();

        let model = store.resolve("block/stone", &mut warnings).unwrap();
        let keys: Vec<_> = model.textures.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["particle", "all"]);
    }
}
