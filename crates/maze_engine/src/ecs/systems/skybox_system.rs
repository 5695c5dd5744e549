//! Sky box drawn around the camera

use std::any::Any;

use crate::ecs::{EntityRegistry, System};
use crate::scene::SceneContext;

/// Draws the sky box centred on the camera every frame
#[derive(Debug, Default)]
pub struct SkyBoxSystem;

impl SkyBoxSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "skybox";

    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for SkyBoxSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, _registry: &mut EntityRegistry, ctx: &mut SceneContext) {
        ctx.renderer.draw_skybox(ctx.camera.position);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
