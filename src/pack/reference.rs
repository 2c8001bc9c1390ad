//! External texture reference parsing.
//!
//! Model documents point at textures with path strings like `block/stone`,
//! `entity/chest/normal`, or `item/apple`. This module turns those strings
//! into opaque identifiers the atlas can load textures by.

/// Category a texture path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureCategory {
    Block,
    Entity,
    Item,
}

impl TextureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureCategory::Block => "block",
            TextureCategory::Entity => "entity",
            TextureCategory::Item => "item",
        }
    }
}

/// An external texture identifier: category plus path within the category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    pub category: TextureCategory,
    pub name: String,
}

impl TextureRef {
    pub fn new(category: TextureCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    pub fn block(name: impl Into<String>) -> Self {
        Self::new(TextureCategory::Block, name)
    }

    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(TextureCategory::Entity, name)
    }

    pub fn item(name: impl Into<String>) -> Self {
        Self::new(TextureCategory::Item, name)
    }

    /// Parse a texture path into a reference.
    ///
    /// A `minecraft:` namespace prefix is stripped. Recognized prefixes are
    /// `block/`, `entity/` (the remainder may contain further slashes), and
    /// `item/`; anything else is treated as a block texture.
    pub fn parse(path: &str) -> TextureRef {
        let path = path.strip_prefix("minecraft:").unwrap_or(path);

        if let Some(name) = path.strip_prefix("block/") {
            TextureRef::block(name)
        } else if let Some(name) = path.strip_prefix("entity/") {
            TextureRef::entity(name)
        } else if let Some(name) = path.strip_prefix("item/") {
            TextureRef::item(name)
        } else {
            TextureRef::block(path)
        }
    }
}

impl std::fmt::Display for TextureRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category.as_str(), self.name)
    }
}
