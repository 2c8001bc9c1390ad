//! glTF/GLB export.
//!
//! Emits a single-primitive glTF 2.0 document with the binary payload and
//! the atlas PNG embedded in one GLB byte stream. Output is deterministic:
//! identical meshes and atlases produce identical bytes.

use crate::atlas::TextureAtlas;
use crate::error::{MesherError, Result};
use crate::mesher::geometry::Mesh;
use crate::mesher::indices_fit_u16;
use crate::types::CoordinateSystem;
use gltf_json as json;
use json::validation::Checked::Valid;
use json::validation::USize64;

/// Generator string written into `asset.generator`.
const GENERATOR: &str = concat!("pack-mesher ", env!("CARGO_PKG_VERSION"));

/// Pad a buffer with zeros to the next 4-byte boundary.
fn pad_to_4(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

/// Export a mesh to GLB format (binary glTF), embedding the atlas PNG when
/// one is supplied.
///
/// For [`CoordinateSystem::ZUp`] the scene node carries a +90 degree X
/// rotation so Y-up consumers see the model upright; positions themselves
/// are never transposed. Exporting an empty mesh is an error; pipeline
/// entry points check for emptiness first.
pub fn export_glb(
    mesh: &Mesh,
    atlas: Option<&TextureAtlas>,
    model_name: &str,
    coords: CoordinateSystem,
) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(MesherError::Export("cannot export an empty mesh".to_string()));
    }

    let (bounds_min, bounds_max) = position_bounds(mesh);
    let use_u16_indices = indices_fit_u16(mesh);

    // Binary payload: positions, normals, UVs, indices, then the PNG,
    // each section padded to a 4-byte boundary. Offsets are recorded
    // before padding; lengths are the true element sizes.
    let mut buffer = Vec::new();

    let pos_offset = buffer.len();
    for p in &mesh.positions {
        for c in p {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let pos_bytes = buffer.len() - pos_offset;
    pad_to_4(&mut buffer);

    let norm_offset = buffer.len();
    for n in &mesh.normals {
        for c in n {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let norm_bytes = buffer.len() - norm_offset;
    pad_to_4(&mut buffer);

    let uv_offset = buffer.len();
    for uv in &mesh.uvs {
        for c in uv {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let uv_bytes = buffer.len() - uv_offset;
    pad_to_4(&mut buffer);

    let idx_offset = buffer.len();
    if use_u16_indices {
        for &i in &mesh.indices {
            buffer.extend_from_slice(&(i as u16).to_le_bytes());
        }
    } else {
        for &i in &mesh.indices {
            buffer.extend_from_slice(&i.to_le_bytes());
        }
    }
    let idx_bytes = buffer.len() - idx_offset;
    pad_to_4(&mut buffer);

    let image_section = match atlas {
        Some(atlas) => {
            let png = atlas
                .to_png()
                .map_err(|e| MesherError::Export(format!("failed to encode atlas PNG: {}", e)))?;
            let offset = buffer.len();
            let len = png.len();
            buffer.extend_from_slice(&png);
            pad_to_4(&mut buffer);
            Some((offset, len))
        }
        None => None,
    };

    let buffer_length = buffer.len();

    // glTF document: one scene, one node, one mesh, one primitive.
    let mut buffer_views = vec![
        create_buffer_view(pos_offset, pos_bytes, Some(json::buffer::Target::ArrayBuffer)),
        create_buffer_view(norm_offset, norm_bytes, Some(json::buffer::Target::ArrayBuffer)),
        create_buffer_view(uv_offset, uv_bytes, Some(json::buffer::Target::ArrayBuffer)),
        create_buffer_view(
            idx_offset,
            idx_bytes,
            Some(json::buffer::Target::ElementArrayBuffer),
        ),
    ];

    let accessors = vec![
        create_accessor(
            0,
            mesh.vertex_count(),
            json::accessor::Type::Vec3,
            json::accessor::ComponentType::F32,
            Some(json::Value::from(bounds_min.to_vec())),
            Some(json::Value::from(bounds_max.to_vec())),
        ),
        create_accessor(
            1,
            mesh.vertex_count(),
            json::accessor::Type::Vec3,
            json::accessor::ComponentType::F32,
            None,
            None,
        ),
        create_accessor(
            2,
            mesh.vertex_count(),
            json::accessor::Type::Vec2,
            json::accessor::ComponentType::F32,
            None,
            None,
        ),
        create_accessor(
            3,
            mesh.index_count(),
            json::accessor::Type::Scalar,
            if use_u16_indices {
                json::accessor::ComponentType::U16
            } else {
                json::accessor::ComponentType::U32
            },
            None,
            None,
        ),
    ];

    let mut images = Vec::new();
    let mut textures = Vec::new();
    let mut samplers = Vec::new();

    if let Some((offset, len)) = image_section {
        buffer_views.push(create_buffer_view(offset, len, None));
        images.push(json::Image {
            buffer_view: Some(json::Index::new(4)),
            mime_type: Some(json::image::MimeType("image/png".to_string())),
            uri: None,
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
        samplers.push(json::texture::Sampler {
            mag_filter: Some(Valid(json::texture::MagFilter::Nearest)),
            min_filter: Some(Valid(json::texture::MinFilter::Nearest)),
            wrap_s: Valid(json::texture::WrappingMode::ClampToEdge),
            wrap_t: Valid(json::texture::WrappingMode::ClampToEdge),
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
        textures.push(json::Texture {
            sampler: Some(json::Index::new(0)),
            source: json::Index::new(0),
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
    }

    let material = create_material(image_section.is_some());

    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(Valid(json::mesh::Semantic::Positions), json::Index::new(0));
    attributes.insert(Valid(json::mesh::Semantic::Normals), json::Index::new(1));
    attributes.insert(
        Valid(json::mesh::Semantic::TexCoords(0)),
        json::Index::new(2),
    );

    let primitive = json::mesh::Primitive {
        attributes,
        indices: Some(json::Index::new(3)),
        material: Some(json::Index::new(0)),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
        extensions: Default::default(),
        extras: Default::default(),
    };

    let root = json::Root {
        asset: json::Asset {
            copyright: None,
            generator: Some(GENERATOR.to_string()),
            min_version: None,
            version: "2.0".to_string(),
            extensions: Default::default(),
            extras: Default::default(),
        },
        accessors,
        buffers: vec![json::Buffer {
            byte_length: USize64(buffer_length as u64),
            uri: None,
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        }],
        buffer_views,
        images,
        samplers,
        textures,
        materials: vec![material],
        meshes: vec![json::Mesh {
            primitives: vec![primitive],
            weights: None,
            name: Some(model_name.to_string()),
            extensions: Default::default(),
            extras: Default::default(),
        }],
        nodes: vec![json::Node {
            camera: None,
            children: None,
            matrix: None,
            mesh: Some(json::Index::new(0)),
            rotation: coords.root_rotation().map(json::scene::UnitQuaternion),
            scale: None,
            translation: None,
            skin: None,
            weights: None,
            name: Some(model_name.to_string()),
            extensions: Default::default(),
            extras: Default::default(),
        }],
        scenes: vec![json::Scene {
            nodes: vec![json::Index::new(0)],
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        }],
        scene: Some(json::Index::new(0)),
        ..Default::default()
    };

    let json_string = json::serialize::to_string(&root)
        .map_err(|e| MesherError::Export(format!("failed to serialize glTF JSON: {}", e)))?;
    let json_bytes = json_string.as_bytes();

    // JSON chunk is padded with spaces, BIN chunk with zeros; the payload
    // buffer already ends on a 4-byte boundary.
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let padded_json_len = json_bytes.len() + json_padding;

    let total_size = 12 + 8 + padded_json_len + 8 + buffer_length;

    let mut glb = Vec::with_capacity(total_size);

    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_size as u32).to_le_bytes());

    glb.extend_from_slice(&(padded_json_len as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
    glb.extend_from_slice(json_bytes);
    glb.extend_from_slice(&vec![0x20u8; json_padding]);

    glb.extend_from_slice(&(buffer_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
    glb.extend_from_slice(&buffer);

    Ok(glb)
}

/// Per-axis min/max over mesh positions.
fn position_bounds(mesh: &Mesh) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];

    for p in &mesh.positions {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }

    if min[0] == f32::MAX {
        min = [0.0; 3];
        max = [0.0; 3];
    }

    (min, max)
}

/// Create a buffer view into buffer 0.
fn create_buffer_view(
    offset: usize,
    size: usize,
    target: Option<json::buffer::Target>,
) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64(size as u64),
        byte_offset: Some(USize64(offset as u64)),
        byte_stride: None,
        target: target.map(Valid),
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Create an accessor over a buffer view.
fn create_accessor(
    buffer_view: u32,
    count: usize,
    type_: json::accessor::Type,
    component_type: json::accessor::ComponentType,
    min: Option<json::Value>,
    max: Option<json::Value>,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(buffer_view)),
        byte_offset: Some(USize64(0)),
        count: USize64(count as u64),
        component_type: Valid(json::accessor::GenericComponentType(component_type)),
        type_: Valid(type_),
        min,
        max,
        normalized: false,
        sparse: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// The single alpha-masked, double-sided material.
fn create_material(textured: bool) -> json::Material {
    json::Material {
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_texture: textured.then(|| json::texture::Info {
                index: json::Index::new(0),
                tex_coord: 0,
                extensions: Default::default(),
                extras: Default::default(),
            }),
            base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
            metallic_factor: json::material::StrengthFactor(0.0),
            roughness_factor: json::material::StrengthFactor(1.0),
            metallic_roughness_texture: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        alpha_mode: Valid(json::material::AlphaMode::Mask),
        alpha_cutoff: Some(json::material::AlphaCutoff(0.5)),
        double_sided: true,
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    }
}
