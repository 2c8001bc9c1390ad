//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::ElementRotation;

/// An axis-aligned bounding box over mesh positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }
}

/// Coordinate convention for emitted assets.
///
/// Meshes are always built with texture-top along +Y; the choice here only
/// controls whether the GLB emitter attaches a root rotation so Y-up
/// consumers see a Z-up-authored model upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSystem {
    /// Authoring convention; the emitter attaches a +90 degree X rotation
    /// quaternion to the scene root.
    #[default]
    ZUp,
    /// No root rotation is attached.
    YUp,
}

impl CoordinateSystem {
    /// Root-node rotation quaternion (x, y, z, w), if any.
    pub fn root_rotation(&self) -> Option<[f32; 4]> {
        match self {
            CoordinateSystem::ZUp => Some([
                std::f32::consts::FRAC_1_SQRT_2,
                0.0,
                0.0,
                std::f32::consts::FRAC_1_SQRT_2,
            ]),
            CoordinateSystem::YUp => None,
        }
    }
}
