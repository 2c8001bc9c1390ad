//! Voxel extrusion of flat item textures.
//!
//! Every opaque pixel of the source texture becomes an axis-aligned box in
//! a thin slab centered on the origin, so a 16x16 item reads as a rigid
//! 3D object. Each box carries the pixel's own UV rectangle on all six
//! faces, which extrudes the pixel color through the slab edges.

use crate::mesher::geometry::{box_corners, face_uv_corners, Mesh};
use crate::pack::Texture;
use crate::types::Direction;

/// Extrude a texture into a voxel mesh.
///
/// `scale` is the edge length of the longer texture axis in output units;
/// each pixel becomes a box of edge `scale / max(width, height)` and the
/// slab is half a pixel thick. Texture top maps to +Y. Returns an empty
/// mesh when no pixel is opaque.
pub fn extrude_texture(texture: &Texture, scale: f32) -> Mesh {
    let w = texture.width;
    let h = texture.height;
    let pixel = scale / w.max(h) as f32;

    // Slab is centered: X and Y extents are offset by half the texture
    // size, the extrusion axis spans a quarter pixel each way.
    let half_w = w as f32 * pixel / 2.0;
    let half_h = h as f32 * pixel / 2.0;
    let half_depth = pixel / 4.0;

    let mut mesh = Mesh::new();

    for y in 0..h {
        for x in 0..w {
            if !texture.is_opaque(x, y) {
                continue;
            }

            // Row 0 is the top of the texture, so flip Y.
            let from = [
                x as f32 * pixel - half_w,
                (h - y - 1) as f32 * pixel - half_h,
                -half_depth,
            ];
            let to = [
                (x + 1) as f32 * pixel - half_w,
                (h - y) as f32 * pixel - half_h,
                half_depth,
            ];

            let corners = box_corners(from, to);
            let uv = [
                x as f32 / w as f32,
                y as f32 / h as f32,
                (x + 1) as f32 / w as f32,
                (y + 1) as f32 / h as f32,
            ];

            for face in Direction::ALL {
                let ci = face.corner_indices();
                mesh.push_quad(
                    [corners[ci[0]], corners[ci[1]], corners[ci[2]], corners[ci[3]]],
                    face.normal(),
                    face_uv_corners(face, uv),
                );
            }
        }
    }

    mesh
}
