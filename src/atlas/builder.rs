//! Texture atlas builder using uniform grid packing.

use crate::pack::{Texture, TextureRef};

/// A built texture atlas.
///
/// Tiles share one edge length and sit on a row-major grid; the atlas
/// records placement order so UV remapping is deterministic for a given
/// input sequence.
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    /// Width of the atlas in pixels (a power of two when packed).
    pub width: u32,
    /// Height of the atlas in pixels.
    pub height: u32,
    /// Edge length of one tile in pixels.
    pub tile_size: u32,
    /// RGBA pixel data.
    pub pixels: Vec<u8>,
    /// Tiles per row.
    grid: u32,
    /// Texture references in placement order.
    tiles: Vec<TextureRef>,
}

impl TextureAtlas {
    /// Atlas used when no texture could be loaded: a single opaque magenta
    /// tile with the unit square as UV space.
    pub fn placeholder() -> Self {
        let tile = Texture::placeholder();
        Self {
            width: tile.width,
            height: tile.height,
            tile_size: tile.width,
            pixels: tile.pixels,
            grid: 1,
            tiles: Vec::new(),
        }
    }

    /// Single-texture atlas: the source passes through untouched and UVs
    /// are not remapped.
    pub fn single(reference: TextureRef, texture: Texture) -> Self {
        Self {
            width: texture.width,
            height: texture.height,
            tile_size: texture.width,
            pixels: texture.pixels,
            grid: 1,
            tiles: vec![reference],
        }
    }

    /// Number of packed tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Whether face UVs must be remapped into tile regions.
    pub fn remaps_uvs(&self) -> bool {
        self.tiles.len() > 1
    }

    /// Placement index of a texture reference.
    pub fn tile_index(&self, reference: &TextureRef) -> Option<usize> {
        self.tiles.iter().position(|t| t == reference)
    }

    /// Pixel origin of a tile.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let i = index as u32;
        ((i % self.grid) * self.tile_size, (i / self.grid) * self.tile_size)
    }

    /// Remap a UV coordinate in [0, 1] into the region of a tile.
    pub fn remap(&self, index: usize, u: f32, v: f32) -> [f32; 2] {
        let (tx, ty) = self.tile_origin(index);
        let t = self.tile_size as f32;
        [
            (tx as f32 + u * t) / self.width as f32,
            (ty as f32 + v * t) / self.height as f32,
        ]
    }

    /// Encode the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        Texture::new(self.width, self.height, self.pixels.clone()).to_png()
    }
}

/// Builder collecting textures in first-appearance order.
#[derive(Debug, Default)]
pub struct AtlasBuilder {
    textures: Vec<(TextureRef, Texture)>,
}

impl AtlasBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture. A reference already present is ignored, preserving
    /// the position of its first appearance.
    pub fn add_texture(&mut self, reference: TextureRef, texture: Texture) {
        if !self.textures.iter().any(|(r, _)| *r == reference) {
            self.textures.push((reference, texture));
        }
    }

    /// Number of textures added so far.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Build the atlas.
    ///
    /// Zero textures yield the magenta placeholder, one texture passes
    /// through untouched, and more are resized to a common tile edge and
    /// packed row-major on a power-of-two grid over a transparent
    /// background.
    pub fn build(mut self) -> TextureAtlas {
        match self.textures.len() {
            0 => TextureAtlas::placeholder(),
            1 => {
                let (reference, texture) = self.textures.remove(0);
                TextureAtlas::single(reference, texture)
            }
            count => {
                let tile = self
                    .textures
                    .iter()
                    .map(|(_, t)| t.width)
                    .max()
                    .unwrap_or(16)
                    .max(16);

                let grid = (count as f64).sqrt().ceil() as u32;
                let width = (grid * tile).next_power_of_two();
                let height = width;

                let mut pixels = vec![0u8; (width * height * 4) as usize];
                let mut tiles = Vec::with_capacity(count);

                for (i, (reference, texture)) in self.textures.into_iter().enumerate() {
                    let resized = texture.resized_nearest(tile);
                    let x0 = (i as u32 % grid) * tile;
                    let y0 = (i as u32 / grid) * tile;
                    blit(&mut pixels, width, &resized, x0, y0);
                    tiles.push(reference);
                }

                TextureAtlas {
                    width,
                    height,
                    tile_size: tile,
                    pixels,
                    grid,
                    tiles,
                }
            }
        }
    }
}

/// Copy a tile's pixels into the atlas buffer at (x0, y0).
fn blit(pixels: &mut [u8], atlas_width: u32, tile: &Texture, x0: u32, y0: u32) {
    for row in 0..tile.height {
        let src_start = (row * tile.width * 4) as usize;
        let src_end = src_start + (tile.width * 4) as usize;
        let dst_start = (((y0 + row) * atlas_width + x0) * 4) as usize;
        let dst_end = dst_start + (tile.width * 4) as usize;
        pixels[dst_start..dst_end].copy_from_slice(&tile.pixels[src_start..src_end]);
    }
}
