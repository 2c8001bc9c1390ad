//! Texture atlas construction and UV remapping.

pub mod builder;

pub use builder::{AtlasBuilder, TextureAtlas};
