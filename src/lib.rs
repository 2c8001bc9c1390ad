//! # Pack Mesher
//!
//! A Rust library for generating 3D assets from Minecraft texture pack
//! content.
//!
//! ## Overview
//!
//! Two pipelines share one geometry backbone and GLB emitter:
//!
//! - **Item extrusion**: every opaque pixel of a flat item texture becomes
//!   a small box, producing a rigid 3D item.
//! - **Model assembly**: the cuboid `elements` of a JSON block/entity model
//!   are meshed with per-face UVs, their textures packed into an atlas.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pack_mesher::{item_to_glb, model_to_glb, ItemMeshConfig, ModelMeshConfig};
//! use pack_mesher::pack::{loader, Texture};
//!
//! // Extrude an item texture
//! let texture = Texture::from_png_bytes(&std::fs::read("apple.png")?)?;
//! if let Some(glb) = item_to_glb(&texture, "apple", &ItemMeshConfig::default())? {
//!     std::fs::write("apple.glb", glb)?;
//! }
//!
//! // Mesh a block model against its model directory and textures
//! let store = loader::load_model_dir("assets/models")?;
//! let textures = loader::DirTextureSource::new("assets/textures");
//! let mut warnings = Vec::new();
//! let model = store.resolve("block/chest", &mut warnings)?;
//! if let Some(glb) = model_to_glb(&model, &textures, "chest", &ModelMeshConfig::default())? {
//!     std::fs::write("chest.glb", glb)?;
//! }
//! ```

pub mod atlas;
pub mod error;
pub mod export;
pub mod mesher;
pub mod pack;
pub mod types;

// Re-export main types for convenience
pub use atlas::{AtlasBuilder, TextureAtlas};
pub use error::{MesherError, Result};
pub use export::gltf::export_glb;
pub use mesher::{
    extrude_item, mesh_model, ItemMeshConfig, Mesh, ModelMeshConfig, ModelMeshOutput,
};
pub use pack::{Model, ModelStore, Texture, TextureRef, TextureSource};
pub use types::CoordinateSystem;

/// Extrude an item texture and emit it as a GLB with the source PNG
/// embedded as the material texture.
///
/// Returns `Ok(None)` when the texture has no opaque pixel (nothing to
/// emit) — the documented behavior for fully transparent inputs.
pub fn item_to_glb(
    texture: &Texture,
    name: &str,
    config: &ItemMeshConfig,
) -> Result<Option<Vec<u8>>> {
    let mesh = extrude_item(texture, config);
    if mesh.is_empty() {
        return Ok(None);
    }

    let atlas = TextureAtlas::single(TextureRef::item(name), texture.clone());
    export_glb(&mesh, Some(&atlas), name, config.coords).map(Some)
}

/// Mesh a resolved model and emit it as a GLB with its atlas embedded.
///
/// Returns `Ok(None)` when the model produces no geometry (no elements or
/// every face dropped). Warnings are logged through `tracing`; use
/// [`mesh_model`] directly to collect them.
pub fn model_to_glb(
    model: &Model,
    source: &dyn TextureSource,
    name: &str,
    config: &ModelMeshConfig,
) -> Result<Option<Vec<u8>>> {
    let output = mesh_model(model, source, config)?;
    if output.mesh.is_empty() {
        return Ok(None);
    }

    export_glb(&output.mesh, Some(&output.atlas), name, config.coords).map(Some)
}
