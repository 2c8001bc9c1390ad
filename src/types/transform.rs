//! Element rotation from model JSON.

use super::Axis;
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Element-level rotation from a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 Minecraft coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees. Vanilla models stay within -45..45 in
    /// 22.5 increments, but other values are passed through unchanged.
    pub angle: f32,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Rotation matrix for this rotation.
    pub fn matrix(&self) -> Mat3 {
        let angle = self.angle.to_radians();
        match self.axis {
            Axis::X => Mat3::from_rotation_x(angle),
            Axis::Y => Mat3::from_rotation_y(angle),
            Axis::Z => Mat3::from_rotation_z(angle),
        }
    }

    /// Rotate a point about the origin of this rotation.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        let origin = Vec3::from(self.origin);
        self.matrix() * (point - origin) + origin
    }

    /// Rotate a direction vector (no origin translation).
    pub fn apply_normal(&self, normal: Vec3) -> Vec3 {
        self.matrix() * normal
    }
}
