//! Convert model elements to mesh geometry.
//!
//! Each element is an oriented box in the 0-16 Minecraft unit space.
//! Corners are rotated in that space, then centered on the origin and
//! scaled; face UVs are normalized, remapped into the atlas, and assigned
//! per the fixed face tables.

use crate::atlas::TextureAtlas;
use crate::mesher::geometry::{box_corners, face_uv_corners, Mesh};
use crate::pack::{Model, ModelElement, TextureMap, TextureRef};
use crate::types::Direction;
use glam::Vec3;
use tracing::warn;

/// Builds a mesh from model elements against a packed atlas.
pub struct CuboidMeshBuilder<'a> {
    atlas: &'a TextureAtlas,
    scale: f32,
    mesh: Mesh,
    warnings: Vec<String>,
}

impl<'a> CuboidMeshBuilder<'a> {
    /// Create a builder. `scale` multiplies centered 0-16 coordinates;
    /// 1/16 yields a unit cube for a full-size element.
    pub fn new(atlas: &'a TextureAtlas, scale: f32) -> Self {
        Self {
            atlas,
            scale,
            mesh: Mesh::new(),
            warnings: Vec::new(),
        }
    }

    /// Add every element of a model.
    pub fn add_model(&mut self, model: &Model) {
        for element in &model.elements {
            self.add_element(element, &model.textures);
        }
    }

    /// Add a single element. An element without faces contributes nothing.
    pub fn add_element(&mut self, element: &ModelElement, textures: &TextureMap) {
        for name in element.faces.keys() {
            if Direction::from_str(name).is_none() {
                self.warn(format!("unknown face name '{}', skipping", name));
            }
        }

        // Rotate in model space, then center on the origin and scale.
        let corners: [[f32; 3]; 8] = {
            let raw = box_corners(element.from, element.to);
            std::array::from_fn(|i| {
                let mut p = Vec3::from(raw[i]);
                if let Some(rotation) = &element.rotation {
                    p = rotation.apply(p);
                }
                ((p - Vec3::splat(8.0)) * self.scale).to_array()
            })
        };

        for face_dir in Direction::ALL {
            let Some(face) = element.faces.get(face_dir.name()) else {
                continue;
            };

            let Some(texture_value) = &face.texture else {
                self.warn(format!("{} face has no texture, dropping it", face_dir));
                continue;
            };

            let Some(path) = textures.resolve(texture_value) else {
                self.warn(format!(
                    "texture reference '{}' on {} face does not resolve, dropping it",
                    texture_value, face_dir
                ));
                continue;
            };
            let reference = TextureRef::parse(path);

            // Normalize the 0-16 UV rectangle and canonicalize min/max,
            // remembering flips so they survive the atlas remap.
            let raw_uv = face.uv_or_auto(face_dir, &element.from, &element.to);
            let mut u1 = raw_uv[0] / 16.0;
            let mut v1 = raw_uv[1] / 16.0;
            let mut u2 = raw_uv[2] / 16.0;
            let mut v2 = raw_uv[3] / 16.0;

            let flip_u = u1 > u2;
            if flip_u {
                std::mem::swap(&mut u1, &mut u2);
            }
            let flip_v = v1 > v2;
            if flip_v {
                std::mem::swap(&mut v1, &mut v2);
            }

            if self.atlas.tile_count() > 0 {
                let tile = match self.atlas.tile_index(&reference) {
                    Some(tile) => tile,
                    None => {
                        self.warn(format!(
                            "texture '{}' not in atlas, falling back to first tile",
                            reference
                        ));
                        0
                    }
                };
                if self.atlas.remaps_uvs() {
                    [u1, v1] = self.atlas.remap(tile, u1, v1);
                    [u2, v2] = self.atlas.remap(tile, u2, v2);
                }
            }

            if flip_u {
                std::mem::swap(&mut u1, &mut u2);
            }
            if flip_v {
                std::mem::swap(&mut v1, &mut v2);
            }

            let mut uvs = face_uv_corners(face_dir, [u1, v1, u2, v2]);
            let steps = ((face.rotation / 90) % 4 + 4) % 4;
            for _ in 0..steps {
                uvs = [uvs[3], uvs[0], uvs[1], uvs[2]];
            }

            let mut normal = Vec3::from(face_dir.normal());
            if let Some(rotation) = &element.rotation {
                normal = rotation.apply_normal(normal);
            }

            let ci = face_dir.corner_indices();
            self.mesh.push_quad(
                [corners[ci[0]], corners[ci[1]], corners[ci[2]], corners[ci[3]]],
                normal.to_array(),
                uvs,
            );
        }
    }

    /// Finish building, returning the mesh and accumulated warnings.
    pub fn finish(self) -> (Mesh, Vec<String>) {
        (self.mesh, self.warnings)
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}
