//! Texture pixel grids, opacity bounds, and PNG handling.

use crate::pack::reference::TextureRef;
use std::collections::HashMap;

/// Alpha threshold above which a pixel counts as opaque.
pub const OPAQUE_ALPHA: u8 = 128;

/// Smallest rectangle enclosing all opaque pixels of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Raw RGBA texture data.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data, row-major (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Create a new texture from RGBA data.
    ///
    /// Panics if the buffer length does not match `width * height * 4`;
    /// a mismatched buffer is a programming error, not an input error.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            (width * height * 4) as usize,
            "pixel buffer length must be width * height * 4"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a placeholder texture (16x16 opaque magenta).
    pub fn placeholder() -> Self {
        let size = 16u32;
        let pixels = (0..size * size)
            .flat_map(|_| [255u8, 0, 255, 255])
            .collect();
        Self::new(size, size, pixels)
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Check whether the pixel at (x, y) is opaque (alpha >= 128).
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx + 3] >= OPAQUE_ALPHA
    }

    /// Smallest axis-aligned rectangle enclosing all opaque pixels, or
    /// `None` when the texture is fully transparent.
    pub fn opaque_bounds(&self) -> Option<PixelBounds> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut found = false;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_opaque(x, y) {
                    found = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if found {
            Some(PixelBounds {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            })
        } else {
            None
        }
    }

    /// Resize to `edge x edge` with nearest-neighbor sampling (preserves
    /// pixel art). Returns a clone when already the right size.
    pub fn resized_nearest(&self, edge: u32) -> Texture {
        if self.width == edge && self.height == edge {
            return self.clone();
        }

        use image::{imageops, ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width, self.height, self.pixels.clone())
                .expect("pixel buffer length verified at construction");
        let resized = imageops::resize(&img, edge, edge, imageops::FilterType::Nearest);

        Texture::new(edge, edge, resized.into_raw())
    }

    /// Encode this texture as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width, self.height, self.pixels.clone())
                .expect("pixel buffer length verified at construction");

        let mut bytes = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut bytes);
        img.write_to(&mut cursor, image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Decode a texture from PNG bytes.
    pub fn from_png_bytes(data: &[u8]) -> Result<Texture, image::ImageError> {
        let img = image::load_from_memory(data)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Texture::new(width, height, rgba.into_raw()))
    }
}

/// Source of texture pixel grids, keyed by external texture reference.
///
/// Abstracts where pixels come from (directory, archive, memory) so the
/// mesh builders never touch I/O themselves.
pub trait TextureSource {
    /// Load the texture for a reference, or `None` if it does not exist.
    fn load(&self, reference: &TextureRef) -> Option<Texture>;
}

/// In-memory texture source, useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryTextureSource {
    textures: HashMap<TextureRef, Texture>,
}

impl MemoryTextureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture under a reference.
    pub fn insert(&mut self, reference: TextureRef, texture: Texture) {
        self.textures.insert(reference, texture);
    }
}

impl TextureSource for MemoryTextureSource {
    fn load(&self, reference: &TextureRef) -> Option<Texture> {
        self.textures.get(reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_texture() {
        let tex = Texture::placeholder();
        assert_eq!(tex.width, 16);
        assert_eq!(tex.height, 16);
        assert_eq!(tex.get_pixel(0, 0), [255, 0, 255, 255]);
        assert_eq!(tex.get_pixel(15, 15), [255, 0, 255, 255]);
    }

    #[test]
    fn test_get_pixel() {
        let tex = Texture::new(
            2,
            2,
            vec![
                255, 0, 0, 255, // red
                0, 255, 0, 255, // green
                0, 0, 255, 255, // blue
                255, 255, 255, 255, // white
            ],
        );

        assert_eq!(tex.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(tex.get_pixel(1, 0), [0, 255, 0, 255]);
        assert_eq!(tex.get_pixel(0, 1), [0, 0, 255, 255]);
        assert_eq!(tex.get_pixel(1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_opacity_threshold() {
        let tex = Texture::new(2, 1, vec![0, 0, 0, 127, 0, 0, 0, 128]);
        assert!(!tex.is_opaque(0, 0));
        assert!(tex.is_opaque(1, 0));
    }

    #[test]
    fn test_opaque_bounds() {
        // 4x4 with opaque pixels at (1,1) and (2,3)
        let mut pixels = vec![0u8; 4 * 4 * 4];
        pixels[(1 * 4 + 1) * 4 + 3] = 255;
        pixels[(3 * 4 + 2) * 4 + 3] = 255;
        let tex = Texture::new(4, 4, pixels);

        let bounds = tex.opaque_bounds().unwrap();
        assert_eq!(
            bounds,
            PixelBounds {
                x: 1,
                y: 1,
                width: 2,
                height: 3
            }
        );
    }

    #[test]
    fn test_opaque_bounds_transparent() {
        let tex = Texture::new(2, 2, vec![0u8; 2 * 2 * 4]);
        assert!(tex.opaque_bounds().is_none());
    }

    #[test]
    fn test_resized_nearest_doubles_pixels() {
        // 1x1 red texture resized to 2x2 stays solid red
        let tex = Texture::new(1, 1, vec![255, 0, 0, 255]);
        let resized = tex.resized_nearest(2);
        assert_eq!(resized.width, 2);
        assert_eq!(resized.height, 2);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(resized.get_pixel(x, y), [255, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_png_round_trip() {
        let tex = Texture::placeholder();
        let png = tex.to_png().unwrap();
        let decoded = Texture::from_png_bytes(&png).unwrap();
        assert_eq!(decoded.width, tex.width);
        assert_eq!(decoded.height, tex.height);
        assert_eq!(decoded.pixels, tex.pixels);
    }
}
