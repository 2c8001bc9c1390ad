//! Direction and axis types for face and rotation handling.

use serde::{Deserialize, Serialize};

/// The six named faces of a cuboid element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    /// All six directions in the order faces are emitted.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Get the outward normal for this face (before any element rotation).
    pub fn normal(&self) -> [f32; 3] {
        match self {
            Direction::North => [0.0, 0.0, -1.0],
            Direction::South => [0.0, 0.0, 1.0],
            Direction::East => [1.0, 0.0, 0.0],
            Direction::West => [-1.0, 0.0, 0.0],
            Direction::Up => [0.0, 1.0, 0.0],
            Direction::Down => [0.0, -1.0, 0.0],
        }
    }

    /// Box corner indices for this face, in emission order.
    ///
    /// Corner `i` is the from/to combination given by the bit pattern
    /// bit 0 = x, bit 1 = y, bit 2 = z (so corner 5 is `(to.x, from.y, to.z)`).
    /// Every face uses only the four corners on its own plane and walks
    /// the perimeter counter-clockwise seen from outside, so the quad
    /// triangulation `(v0, v1, v2) (v0, v2, v3)` winds toward the face
    /// normal. Side faces start at the bottom-left corner as seen from
    /// outside, matching the first UV of `face_uv_corners`; up and down
    /// start at the min-X, min-Z corner.
    pub const fn corner_indices(&self) -> [usize; 4] {
        match self {
            Direction::North => [1, 0, 2, 3],
            Direction::South => [4, 5, 7, 6],
            Direction::East => [5, 1, 3, 7],
            Direction::West => [0, 4, 6, 2],
            Direction::Up => [2, 6, 7, 3],
            Direction::Down => [0, 1, 5, 4],
        }
    }

    /// Lowercase face name as used in model JSON.
    pub const fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Check whether this face lies on the Y axis (up/down).
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Get the unit vector for this axis.
    pub fn unit_vector(&self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_indices_lie_on_face_plane() {
        // Each face may only use the four corners whose fixed-axis bit
        // matches the face: e.g. every east corner has bit 0 set (x = to.x).
        let fixed = |d: Direction| match d {
            Direction::North => (0b100, 0b000),
            Direction::South => (0b100, 0b100),
            Direction::East => (0b001, 0b001),
            Direction::West => (0b001, 0b000),
            Direction::Up => (0b010, 0b010),
            Direction::Down => (0b010, 0b000),
        };

        for dir in Direction::ALL {
            let (mask, expected) = fixed(dir);
            for i in dir.corner_indices() {
                assert_eq!(i & mask, expected, "{} corner {}", dir, i);
            }
        }
    }

    #[test]
    fn test_corner_indices_are_distinct() {
        for dir in Direction::ALL {
            let mut ci = dir.corner_indices();
            ci.sort_unstable();
            assert!(ci.windows(2).all(|w| w[0] < w[1]), "{}", dir);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Direction::from_str("north"), Some(Direction::North));
        assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
        assert_eq!(Direction::from_str("bottom"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let d: Direction = serde_json::from_str("\"south\"").unwrap();
        assert_eq!(d, Direction::South);
        let a: Axis = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(a, Axis::Y);
    }
}
