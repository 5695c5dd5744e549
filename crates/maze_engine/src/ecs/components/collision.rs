//! Collision component for ECS
//!
//! A collider is either rigid (blocks the player) or a trigger (records an
//! event and lets the player through).

use crate::physics::collision::CollisionShape;

/// Component that marks an entity as having collision detection enabled
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// The collision shape, relative to the entity position
    pub shape: CollisionShape,

    /// Rigid colliders push the player back; non-rigid ones are triggers
    pub rigid: bool,

    /// Disabled colliders are ignored by the collision system
    pub enabled: bool,
}

impl ColliderComponent {
    /// Create a new rigid, enabled collider
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            rigid: true,
            enabled: true,
        }
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.rigid = false;
        self
    }

    /// Set the enabled flag (builder pattern)
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Is this a trigger volume (generates events but no physical response)?
    pub fn is_trigger(&self) -> bool {
        !self.rigid
    }
}
