//! First-person camera
//!
//! In the maze game the camera is the player: its position is the player
//! position used by collision and AI targeting.

use crate::foundation::math::Vec3;

/// First-person camera with yaw/pitch orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,

    /// Rotation around Y in radians; zero looks down -Z
    pub yaw: f32,

    /// Rotation around the camera's X axis in radians
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl Camera {
    /// Create a camera at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Horizontal unit vector the camera faces
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Move along the horizontal facing direction; negative distances move backwards
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Turn around Y; positive angles turn right
    pub fn turn(&mut self, angle: f32) {
        self.yaw = (self.yaw + angle) % std::f32::consts::TAU;
    }

    /// Tilt up or down, clamped short of straight up/down
    pub fn tilt(&mut self, angle: f32) {
        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = (self.pitch + angle).clamp(-limit, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_moves_down_negative_z() {
        let mut camera = Camera::new(Vec3::new(12.0, 1.3, 20.0));
        camera.move_forward(2.0);
        assert_relative_eq!(camera.position.z, 18.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position.y, 1.3);
    }

    #[test]
    fn test_quarter_turn_faces_positive_x() {
        let mut camera = Camera::default();
        camera.turn(std::f32::consts::FRAC_PI_2);
        camera.move_forward(1.0);
        assert_relative_eq!(camera.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut camera = Camera::default();
        camera.tilt(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }
}
