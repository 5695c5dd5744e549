//! AI pursuit component
//!
//! The target is written by the targeting pass each frame; the AI system
//! reads it to plan movement.

use crate::foundation::math::Vec3;

/// What an AI entity is currently doing with its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiBehavior {
    /// Moving toward the player
    #[default]
    Chase,
    /// Moving toward the retreat point
    Flee,
}

/// AI state attached to a pursuing entity
#[derive(Debug, Clone, PartialEq)]
pub struct AiComponent {
    /// Point the entity is moving toward
    pub target: Vec3,

    /// Current behaviour
    pub behavior: AiBehavior,

    /// Movement speed in units per second
    pub speed: f32,
}

impl AiComponent {
    /// Default movement speed for pursuing entities
    pub const DEFAULT_SPEED: f32 = 2.0;

    /// Create an AI component chasing `target`
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            behavior: AiBehavior::Chase,
            speed: Self::DEFAULT_SPEED,
        }
    }

    /// Set movement speed (builder pattern)
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }
}

impl Default for AiComponent {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}
