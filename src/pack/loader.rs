//! Loading models and textures from a directory tree.

use super::{Model, ModelStore, Texture, TextureRef, TextureSource};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load a single model document from a JSON file.
///
/// A missing file or malformed JSON is fatal for this model.
pub fn load_model_file<P: AsRef<Path>>(path: P) -> Result<Model> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let model: Model = serde_json::from_str(&contents)?;
    Ok(model)
}

/// Load every `.json` model under a directory into a [`ModelStore`].
///
/// Models are keyed by their path relative to the directory, without the
/// extension (`<dir>/block/chest.json` becomes `block/chest`). A model
/// that fails to parse is skipped with a warning; it does not abort its
/// siblings.
pub fn load_model_dir<P: AsRef<Path>>(dir: P) -> Result<ModelStore> {
    let mut store = ModelStore::new();
    let root = dir.as_ref();
    collect_models(root, root, &mut store)?;
    Ok(store)
}

fn collect_models(root: &Path, dir: &Path, store: &mut ModelStore) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_models(root, &path, store)?;
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let key = match path.strip_prefix(root) {
            Ok(rel) => rel
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/"),
            Err(_) => continue,
        };

        match load_model_file(&path) {
            Ok(model) => store.add_model(key, model),
            Err(e) => warn!("skipping model '{}': {}", key, e),
        }
    }

    Ok(())
}

/// Texture source backed by a directory of PNG files.
///
/// References resolve to `<root>/<category>/<name>.png`.
#[derive(Debug, Clone)]
pub struct DirTextureSource {
    root: PathBuf,
}

impl DirTextureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, reference: &TextureRef) -> PathBuf {
        self.root
            .join(reference.category.as_str())
            .join(format!("{}.png", reference.name))
    }
}

impl TextureSource for DirTextureSource {
    fn load(&self, reference: &TextureRef) -> Option<Texture> {
        let path = self.path_for(reference);
        let data = std::fs::read(&path).ok()?;
        match Texture::from_png_bytes(&data) {
            Ok(tex) => Some(tex),
            Err(e) => {
                warn!("failed to decode texture '{}': {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pack-mesher-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_model_dir_keys_by_relative_path() {
        let dir = temp_dir("models");
        std::fs::create_dir_all(dir.join("block")).unwrap();
        std::fs::write(
            dir.join("block/stone.json"),
            r#"{"textures": {"all": "block/stone"}}"#,
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let store = load_model_dir(&dir).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("block/stone").is_some());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_model_skipped() {
        let dir = temp_dir("bad-models");
        std::fs::write(dir.join("good.json"), r#"{"elements": []}"#).unwrap();
        std::fs::write(dir.join("bad.json"), "{ not json").unwrap();

        let store = load_model_dir(&dir).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("good").is_some());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dir_texture_source() {
        let dir = temp_dir("textures");
        std::fs::create_dir_all(dir.join("block")).unwrap();
        let tex = Texture::placeholder();
        std::fs::write(dir.join("block/pink.png"), tex.to_png().unwrap()).unwrap();

        let source = DirTextureSource::new(&dir);
        let loaded = source.load(&TextureRef::block("pink")).unwrap();
        assert_eq!(loaded.width, 16);
        assert!(source.load(&TextureRef::block("missing")).is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
