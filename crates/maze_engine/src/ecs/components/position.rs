//! World position component

use crate::foundation::math::Vec3;

/// World-space position of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionComponent {
    /// Position in world space
    pub position: Vec3,
}

impl PositionComponent {
    /// Create a position component
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}
