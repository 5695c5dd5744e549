//! Rendering system
//!
//! Bridges the registry to the render backend: every entity with a position
//! and a renderable is drawn once per frame, with its animation (if any)
//! applied to the draw transform.

use std::any::Any;

use crate::ecs::components::{AnimationComponent, PositionComponent, RenderableComponent};
use crate::ecs::{ComponentMask, EntityRegistry, System};
use crate::foundation::math::{Transform, Vec3};
use crate::scene::SceneContext;

/// Draws renderable entities from the camera's point of view
#[derive(Debug, Default)]
pub struct RenderingSystem {
    lights: Vec<Vec3>,
}

impl RenderingSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "rendering";

    /// Create the system with the scene's point lights
    pub fn new(lights: Vec<Vec3>) -> Self {
        Self { lights }
    }

    /// Point lights passed to the backend each frame
    pub fn lights(&self) -> &[Vec3] {
        &self.lights
    }
}

/// Draw transform for an entity at `position`, animated if it has an animation
fn draw_transform(position: Vec3, animation: Option<&AnimationComponent>) -> Transform {
    match animation {
        Some(animation) => Transform::from_position(position + Vec3::new(0.0, animation.bob_offset(), 0.0))
            .with_yaw(animation.yaw()),
        None => Transform::from_position(position),
    }
}

impl System for RenderingSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, registry: &mut EntityRegistry, ctx: &mut SceneContext) {
        ctx.renderer.set_view(&ctx.camera);
        ctx.renderer.set_lights(&self.lights);

        for entity in registry.find_by_mask(ComponentMask::POSITION | ComponentMask::RENDERABLE) {
            let (Some(position), Some(renderable)) =
                (entity.get::<PositionComponent>(), entity.get::<RenderableComponent>())
            else {
                continue;
            };
            let transform = draw_transform(position.position, entity.get::<AnimationComponent>());
            ctx.renderer
                .draw_mesh(&renderable.mesh, renderable.texture.as_deref(), &transform);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioDevice;
    use crate::ecs::Entity;
    use crate::render::{DrawCommand, RecordingRenderer};
    use crate::scene::WindowState;
    use approx::assert_relative_eq;

    #[test]
    fn test_draws_only_positioned_renderables() {
        let renderer = RecordingRenderer::new();
        let draws = renderer.log();
        let mut ctx = SceneContext::new(WindowState::new(800, 600, "t"), AudioDevice::silent(), Box::new(renderer));

        let mut registry = EntityRegistry::new();
        registry
            .spawn(
                Entity::new("wall_1")
                    .with(PositionComponent::new(Vec3::new(1.0, 0.0, 2.0)))
                    .with(RenderableComponent::new("wall.obj").with_texture("brick.png")),
            )
            .unwrap();
        registry
            .spawn(Entity::new("floating").with(RenderableComponent::new("ghost.obj")))
            .unwrap();

        let mut system = RenderingSystem::new(vec![Vec3::new(0.0, 5.0, 0.0)]);
        system.act(&mut registry, &mut ctx);

        let meshes: Vec<_> = draws
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Mesh { mesh, texture, .. } => Some((mesh, texture)),
                _ => None,
            })
            .collect();
        assert_eq!(meshes, vec![("wall.obj".to_string(), Some("brick.png".to_string()))]);
    }

    #[test]
    fn test_animation_bobs_and_spins() {
        let mut animation = AnimationComponent::spinning(1.0).with_bob(0.5, 0.25);
        animation.advance(1.0);
        let transform = draw_transform(Vec3::new(0.0, 1.0, 0.0), Some(&animation));
        assert_relative_eq!(transform.position.y, 1.5, epsilon = 1e-5);
        assert_relative_eq!(transform.yaw, 1.0);
    }
}
