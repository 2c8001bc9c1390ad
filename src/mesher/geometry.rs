//! Mesh geometry storage and box face tables.

use crate::types::{BoundingBox, Direction};

/// A triangle mesh in structure-of-arrays layout.
///
/// Vertices are never shared across faces: each quad pushes four fresh
/// vertices with their own UVs so flat shading and per-face texturing
/// survive export. Indices are `u32` here and narrowed to `u16` at GLB
/// emission when they fit.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (unit length).
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (V = 0 at the top of the texture).
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (three per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a quad face: four corner positions in winding order, one
    /// shared normal, and one UV per corner. Emits the two triangles
    /// `(v0, v1, v2)` and `(v0, v2, v3)`.
    pub fn push_quad(&mut self, positions: [[f32; 3]; 4], normal: [f32; 3], uvs: [[f32; 2]; 4]) {
        let base = self.positions.len() as u32;

        self.positions.extend_from_slice(&positions);
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&uvs);

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Axis-aligned bounds over all positions, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions.iter().copied())
    }
}

/// The eight corners of an axis-aligned box.
///
/// Corner `i` combines `from`/`to` by bit pattern: bit 0 = x, bit 1 = y,
/// bit 2 = z. Face-to-corner tables ([`Direction::corner_indices`]) rely
/// on this ordering.
pub fn box_corners(from: [f32; 3], to: [f32; 3]) -> [[f32; 3]; 8] {
    std::array::from_fn(|i| {
        [
            if i & 0b001 != 0 { to[0] } else { from[0] },
            if i & 0b010 != 0 { to[1] } else { from[1] },
            if i & 0b100 != 0 { to[2] } else { from[2] },
        ]
    })
}

/// Assign a UV rectangle `[u1, v1, u2, v2]` to the four corners of a face,
/// in the same corner order as [`Direction::corner_indices`].
///
/// Side faces run bottom-left, bottom-right, top-right, top-left; up and
/// down map u to X and v to Z.
pub fn face_uv_corners(face: Direction, uv: [f32; 4]) -> [[f32; 2]; 4] {
    let [u1, v1, u2, v2] = uv;
    match face {
        Direction::Up => [[u1, v1], [u1, v2], [u2, v2], [u2, v1]],
        Direction::Down => [[u1, v1], [u2, v1], [u2, v2], [u1, v2]],
        Direction::North | Direction::South | Direction::East | Direction::West => {
            [[u1, v2], [u2, v2], [u2, v1], [u1, v1]]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_corners_bit_pattern() {
        let corners = box_corners([0.0, 1.0, 2.0], [10.0, 11.0, 12.0]);
        assert_eq!(corners[0], [0.0, 1.0, 2.0]);
        assert_eq!(corners[5], [10.0, 1.0, 12.0]);
        assert_eq!(corners[7], [10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_side_face_uvs_bottom_left_first() {
        let uvs = face_uv_corners(Direction::North, [0.0, 0.25, 0.5, 0.75]);
        assert_eq!(uvs, [[0.0, 0.75], [0.5, 0.75], [0.5, 0.25], [0.0, 0.25]]);
    }

    #[test]
    fn test_face_corner_order_winds_toward_normal() {
        // Both triangles of every face's quad must wind counter-clockwise
        // seen from outside the box.
        let corners = box_corners([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        for dir in Direction::ALL {
            let ci = dir.corner_indices();
            let expected = glam::Vec3::from(dir.normal());
            for tri in [[ci[0], ci[1], ci[2]], [ci[0], ci[2], ci[3]]] {
                let p0 = glam::Vec3::from(corners[tri[0]]);
                let a = glam::Vec3::from(corners[tri[1]]) - p0;
                let b = glam::Vec3::from(corners[tri[2]]) - p0;
                let n = a.cross(b).normalize();
                assert!((n - expected).length() < 1e-6, "{} face", dir);
            }
        }
    }

    #[test]
    fn test_push_quad_counts_and_indices() {
        let mut mesh = Mesh::new();
        assert!(mesh.is_empty());

        mesh.push_quad(
            [
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            [0.0, 0.0, 1.0],
            [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        );

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.normals[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_second_quad_offsets_indices() {
        let mut mesh = Mesh::new();
        let quad = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let uvs = [[0.0, 0.0]; 4];

        mesh.push_quad(quad, [0.0, 0.0, 1.0], uvs);
        mesh.push_quad(quad, [0.0, 0.0, 1.0], uvs);

        assert_eq!(mesh.indices[6..], [4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_merge() {
        let quad = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let uvs = [[0.0, 0.0]; 4];

        let mut a = Mesh::new();
        a.push_quad(quad, [0.0, 0.0, 1.0], uvs);

        let mut b = Mesh::new();
        b.push_quad(quad, [0.0, 0.0, 1.0], uvs);

        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.indices[6..], [4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = Mesh::new();
        mesh.push_quad(
            [
                [-1.0, 0.0, 2.0],
                [1.0, 0.0, 2.0],
                [1.0, 3.0, -2.0],
                [-1.0, 3.0, -2.0],
            ],
            [0.0, 0.0, 1.0],
            [[0.0, 0.0]; 4],
        );

        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, [-1.0, 0.0, -2.0]);
        assert_eq!(bounds.max, [1.0, 3.0, 2.0]);

        assert!(Mesh::new().bounds().is_none());
    }
}
