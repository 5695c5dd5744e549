//! Scene state machine
//!
//! A scene is one mode of the application (menu, gameplay, end screens). The
//! [`SceneManager`] owns exactly one active scene, builds the next one from
//! its catalog on a transition, and closes the old one first.
//!
//! ## Frame
//!
//! ```text
//! update(dt) ──> transition requested? ──yes──> close old, build new, end frame
//!                        │ no
//!                        v
//!                render(dt) ──> systems.run_frame()
//! ```

mod context;
mod scene_manager;

pub use context::{ResourceCounts, SceneContext, WindowState};
pub use scene_manager::{SceneBuilder, SceneEntry, SceneError, SceneManager, TickOutcome};

use crate::ecs::{EntityRegistry, SystemScheduler};
use crate::render::Color;

/// What the active scene wants after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running this scene
    Stay,
    /// Switch to the catalog entry at this index
    Change(usize),
    /// Switch to the next catalog entry, wrapping to the first
    Next,
    /// Leave the frame loop
    Quit,
}

/// Registry and systems owned by a scene
#[derive(Default)]
pub struct SceneWorld {
    /// The scene's entities
    pub registry: EntityRegistry,

    /// The scene's system pipeline
    pub systems: SystemScheduler,
}

impl SceneWorld {
    /// Empty world
    pub fn new() -> Self {
        Self::default()
    }
}

/// One application mode
///
/// Scenes acquire their scoped resources (audio contexts, pointer
/// subscriptions) as guards stored in the scene itself, so dropping the
/// scene releases them.
pub trait Scene {
    /// Scene name for logging
    fn name(&self) -> &str;

    /// Advance game logic. Returning anything but [`Transition::Stay`] ends
    /// the frame: the scene is closed before render or systems run.
    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> Transition;

    /// Draw the scene's own overlay (HUD, menu text)
    fn render(&mut self, _ctx: &mut SceneContext, _dt: f32) {}

    /// Background colour for the frame
    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    /// The scene's world, if it has one
    fn world_mut(&mut self) -> Option<&mut SceneWorld> {
        None
    }

    /// Release scene resources before the scene is dropped
    fn close(&mut self, _ctx: &mut SceneContext) {}
}
