//! Math utilities and types
//!
//! Provides the vector types shared by components, collision and the camera.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Round X and Z to the nearest integer, leaving Y untouched.
///
/// Halfway values round to the even neighbour so that pursuit targets do not
/// drift in one direction when the player sits exactly between two cells.
pub fn round_xz(v: Vec3) -> Vec3 {
    Vec3::new(v.x.round_ties_even(), v.y, v.z.round_ties_even())
}

/// Position and orientation of an object in world space, used for draw calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation around the Y axis in radians
    pub yaw: f32,

    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the yaw rotation (builder pattern)
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_xz_keeps_height() {
        let rounded = round_xz(Vec3::new(3.6, 1.0, -2.2));
        assert_relative_eq!(rounded.x, 4.0);
        assert_relative_eq!(rounded.y, 1.0);
        assert_relative_eq!(rounded.z, -2.0);
    }

    #[test]
    fn test_round_xz_halfway_goes_to_even() {
        let rounded = round_xz(Vec3::new(2.5, 0.3, -3.5));
        assert_relative_eq!(rounded.x, 2.0);
        assert_relative_eq!(rounded.z, -4.0);
    }
}
