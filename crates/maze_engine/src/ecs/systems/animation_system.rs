//! Animation system: advances animation clocks

use std::any::Any;

use crate::ecs::components::AnimationComponent;
use crate::ecs::{ComponentMask, EntityRegistry, System};
use crate::scene::SceneContext;

/// Advances every animation by the frame's delta time
#[derive(Debug, Default)]
pub struct AnimationSystem {
    delta_time: f32,
}

impl AnimationSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "animation";

    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for AnimationSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, registry: &mut EntityRegistry, _ctx: &mut SceneContext) {
        for entity in registry.iter_mask_mut(ComponentMask::ANIMATION) {
            if let Some(animation) = entity.get_mut::<AnimationComponent>() {
                animation.advance(self.delta_time);
            }
        }
    }

    fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
