//! AI targeting and movement
//!
//! Targeting and movement are split. The owning scene calls
//! [`assign_targets`] once per frame to decide where every AI entity should
//! go; [`AiSystem`] then walks each entity toward its target along a
//! grid path that avoids rigid colliders.

use std::any::Any;

use log::{debug, trace};

use crate::ecs::components::{AiBehavior, AiComponent, ColliderComponent, PositionComponent};
use crate::ecs::{ComponentMask, EntityRegistry, System};
use crate::foundation::math::{round_xz, Vec3};
use crate::scene::SceneContext;
use crate::spatial::{Cell, NavGrid};

/// Point every AI entity at the player, or at `retreat_point` while the
/// player is empowered. Player targets are rounded on X/Z so pursuit aims at
/// grid cells. Returns the number of entities updated.
pub fn assign_targets(
    registry: &mut EntityRegistry,
    player_position: Vec3,
    empowered: bool,
    retreat_point: Vec3,
) -> usize {
    let (target, behavior) = if empowered {
        (retreat_point, AiBehavior::Flee)
    } else {
        (round_xz(player_position), AiBehavior::Chase)
    };

    let mut updated = 0;
    for entity in registry.iter_mask_mut(ComponentMask::AI) {
        if let Some(ai) = entity.get_mut::<AiComponent>() {
            ai.target = target;
            ai.behavior = behavior;
            updated += 1;
        }
    }
    updated
}

/// Moves AI entities along grid paths toward their targets
#[derive(Debug)]
pub struct AiSystem {
    grid: NavGrid,
    delta_time: f32,
}

impl AiSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "ai";

    /// Build the navigation grid from the rigid colliders in `registry`
    pub fn new(width: usize, depth: usize, registry: &EntityRegistry) -> Self {
        let mut grid = NavGrid::new(width, depth);
        for entity in registry.find_by_mask(ComponentMask::POSITION | ComponentMask::COLLIDER) {
            let (Some(position), Some(collider)) =
                (entity.get::<PositionComponent>(), entity.get::<ColliderComponent>())
            else {
                continue;
            };
            if collider.rigid {
                grid.block_footprint(&collider.shape.bounds(position.position));
            }
        }
        debug!(
            "AI grid {}x{} built with {} blocked cells",
            width,
            depth,
            grid.blocked_count()
        );
        Self {
            grid,
            delta_time: 0.0,
        }
    }

    /// Navigation grid the system paths over
    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Elapsed time the next frame will integrate over
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Next point to walk toward from `from` on the way to `target`
    fn next_waypoint(&self, from: Vec3, target: Vec3) -> Option<Vec3> {
        let start = Cell::containing(from);
        let goal = Cell::containing(target);
        if start == goal {
            return Some(Vec3::new(target.x, from.y, target.z));
        }
        let path = self.grid.path(start, goal)?;
        path.get(1).map(|cell| cell.center(from.y))
    }
}

/// Move `from` toward `to` by at most `step`
fn step_toward(from: Vec3, to: Vec3, step: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.magnitude();
    if distance <= step || distance <= f32::EPSILON {
        to
    } else {
        from + offset * (step / distance)
    }
}

impl System for AiSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, registry: &mut EntityRegistry, _ctx: &mut SceneContext) {
        if self.delta_time <= 0.0 {
            return;
        }

        for entity in registry.iter_mask_mut(ComponentMask::AI | ComponentMask::POSITION) {
            let Some((target, speed)) = entity.get::<AiComponent>().map(|ai| (ai.target, ai.speed)) else {
                continue;
            };
            let Some(position) = entity.get_mut::<PositionComponent>() else {
                continue;
            };
            match self.next_waypoint(position.position, target) {
                Some(waypoint) => {
                    position.position = step_toward(position.position, waypoint, speed * self.delta_time);
                }
                None => trace!("No path to {:?}; holding position", target),
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
