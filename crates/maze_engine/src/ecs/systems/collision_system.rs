//! Player collision and trigger resolution
//!
//! The player is a bounding sphere at the camera position. Each frame it is
//! tested against every enabled collider:
//!
//! - any rigid overlap pushes the camera back to the last position at
//!   which the player overlapped nothing rigid;
//! - the first trigger overlapping the resolved position is recorded by
//!   name, and also as the last pickable when the name carries a pickable
//!   marker.
//!
//! A recorded trigger stays until the owner clears it, so a trigger is
//! reported at most once per clear.

use std::any::Any;

use log::debug;

use crate::ecs::components::{ColliderComponent, PositionComponent};
use crate::ecs::{ComponentMask, Entity, EntityRegistry, System};
use crate::foundation::math::Vec3;
use crate::physics::BoundingSphere;
use crate::scene::SceneContext;

/// Resolves player overlaps against rigid and trigger colliders
#[derive(Debug)]
pub struct CollisionSystem {
    player_radius: f32,
    pickable_markers: Vec<String>,
    last_position: Vec3,
    last_trigger: Option<String>,
    last_pickable: Option<String>,
}

impl CollisionSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "collision";

    /// Create the system with the player's radius and starting position
    pub fn new(player_radius: f32, start_position: Vec3) -> Self {
        Self {
            player_radius,
            pickable_markers: Vec::new(),
            last_position: start_position,
            last_trigger: None,
            last_pickable: None,
        }
    }

    /// Names containing any of these markers are pickable (builder pattern)
    pub fn with_pickable_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pickable_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the recorded trigger, if any
    pub fn last_trigger(&self) -> Option<&str> {
        self.last_trigger.as_deref()
    }

    /// Name of the recorded pickable, if any
    pub fn last_pickable(&self) -> Option<&str> {
        self.last_pickable.as_deref()
    }

    /// Acknowledge the recorded trigger so a new one can be reported
    pub fn clear_last_trigger(&mut self) {
        self.last_trigger = None;
    }

    /// Acknowledge the recorded pickable
    pub fn clear_last_pickable(&mut self) {
        self.last_pickable = None;
    }

    /// Position rigid overlaps push the player back to
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Replace the push-back position; needed after moving the player directly
    pub fn update_last_position(&mut self, position: Vec3) {
        self.last_position = position;
    }

    fn is_pickable(&self, name: &str) -> bool {
        self.pickable_markers.iter().any(|marker| name.contains(marker.as_str()))
    }

    fn record_trigger(&mut self, name: &str) {
        debug!("Trigger hit: {}", name);
        self.last_trigger = Some(name.to_string());
        if self.is_pickable(name) {
            self.last_pickable = Some(name.to_string());
        }
    }
}

/// Whether an enabled collider of the given kind on `entity` overlaps `player`
fn overlaps(entity: &Entity, player: &BoundingSphere, rigid: bool) -> bool {
    match (entity.get::<PositionComponent>(), entity.get::<ColliderComponent>()) {
        (Some(position), Some(collider)) => {
            collider.enabled && collider.rigid == rigid && collider.shape.overlaps_sphere(position.position, player)
        }
        _ => false,
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, registry: &mut EntityRegistry, ctx: &mut SceneContext) {
        let colliders = registry.find_by_mask(ComponentMask::POSITION | ComponentMask::COLLIDER);

        let player = BoundingSphere::new(ctx.camera.position, self.player_radius);
        let rigid_hit = colliders.iter().any(|entity| overlaps(entity, &player, true));
        if rigid_hit {
            ctx.camera.position = self.last_position;
        } else {
            self.last_position = ctx.camera.position;
        }

        if self.last_trigger.is_some() {
            return;
        }
        // triggers see the player where it ends the frame
        let player = BoundingSphere::new(ctx.camera.position, self.player_radius);
        let hit = colliders.iter().find(|entity| overlaps(entity, &player, false));
        if let Some(entity) = hit {
            let name = entity.name().to_string();
            self.record_trigger(&name);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
