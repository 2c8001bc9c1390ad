//! Mesh generation pipelines.
//!
//! Two pipelines share the geometry backbone: voxel extrusion of flat item
//! textures and cuboid assembly of JSON model elements. Both produce a
//! [`Mesh`] ready for GLB export.

pub mod cuboid;
pub mod geometry;
pub mod voxel;

pub use cuboid::CuboidMeshBuilder;
pub use geometry::Mesh;

use crate::atlas::{AtlasBuilder, TextureAtlas};
use crate::error::Result;
use crate::pack::{Model, TextureRef, TextureSource};
use crate::types::CoordinateSystem;
use tracing::warn;

/// Configuration for item voxel extrusion.
#[derive(Debug, Clone)]
pub struct ItemMeshConfig {
    /// Edge length of the longer texture axis in output units.
    pub scale: f32,
    /// Coordinate convention for the emitted GLB.
    pub coords: CoordinateSystem,
}

impl Default for ItemMeshConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            coords: CoordinateSystem::ZUp,
        }
    }
}

/// Configuration for JSON model meshing.
#[derive(Debug, Clone)]
pub struct ModelMeshConfig {
    /// Multiplier applied to centered 0-16 coordinates. The default turns
    /// a full-size element into a unit cube.
    pub scale: f32,
    /// Coordinate convention for the emitted GLB.
    pub coords: CoordinateSystem,
}

impl Default for ModelMeshConfig {
    fn default() -> Self {
        Self {
            scale: 1.0 / 16.0,
            coords: CoordinateSystem::ZUp,
        }
    }
}

/// Output of the model meshing pipeline.
#[derive(Debug)]
pub struct ModelMeshOutput {
    /// The generated mesh (may be empty).
    pub mesh: Mesh,
    /// Atlas covering every referenced texture.
    pub atlas: TextureAtlas,
    /// Recoverable problems encountered, in a deterministic order.
    pub warnings: Vec<String>,
}

/// Generate a voxel mesh from an item texture.
///
/// Returns an empty mesh when the texture has no opaque pixel; the GLB
/// wrappers in the crate root turn that into "no output".
pub fn extrude_item(texture: &crate::pack::Texture, config: &ItemMeshConfig) -> Mesh {
    voxel::extrude_texture(texture, config.scale)
}

/// Generate a mesh and atlas from a resolved model.
///
/// Textures are collected in a deterministic order (the `textures` map in
/// document order, then direct face references in element order), loaded
/// through `source`, and packed into an atlas; faces are then meshed with
/// their UVs remapped into it. A texture that fails to load is a warning,
/// never fatal.
pub fn mesh_model(
    model: &Model,
    source: &dyn TextureSource,
    config: &ModelMeshConfig,
) -> Result<ModelMeshOutput> {
    let mut warnings = Vec::new();

    let mut atlas_builder = AtlasBuilder::new();
    for reference in collect_texture_refs(model) {
        match source.load(&reference) {
            Some(texture) => atlas_builder.add_texture(reference, texture),
            None => {
                let msg = format!("texture '{}' could not be loaded", reference);
                warn!("{}", msg);
                warnings.push(msg);
            }
        }
    }
    let atlas = atlas_builder.build();

    let mut builder = CuboidMeshBuilder::new(&atlas, config.scale);
    builder.add_model(model);
    let (mesh, mut mesh_warnings) = builder.finish();
    warnings.append(&mut mesh_warnings);

    Ok(ModelMeshOutput {
        mesh,
        atlas,
        warnings,
    })
}

/// External texture references of a model in first-appearance order:
/// the `textures` map first, then direct face paths in element order.
pub fn collect_texture_refs(model: &Model) -> Vec<TextureRef> {
    let mut refs: Vec<TextureRef> = Vec::new();
    let mut push = |reference: TextureRef| {
        if !refs.contains(&reference) {
            refs.push(reference);
        }
    };

    for (_, value) in model.textures.iter() {
        if let Some(path) = model.textures.resolve(value) {
            push(TextureRef::parse(path));
        }
    }

    for element in &model.elements {
        for face_dir in crate::types::Direction::ALL {
            let Some(face) = element.faces.get(face_dir.name()) else {
                continue;
            };
            let Some(value) = &face.texture else { continue };
            if let Some(path) = model.textures.resolve(value) {
                push(TextureRef::parse(path));
            }
        }
    }

    refs
}

/// Whether a mesh's indices fit the u16 component type at emission.
pub(crate) fn indices_fit_u16(mesh: &Mesh) -> bool {
    mesh.index_count() <= u16::MAX as usize
}
