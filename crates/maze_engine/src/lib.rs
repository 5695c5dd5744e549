//! # Maze Engine
//!
//! Runtime core for a first-person maze game: a component store, an entity
//! registry loaded from RON descriptors, an ordered system pipeline, player
//! collision and trigger resolution, grid-based AI pursuit, and a scene
//! state machine with scoped audio and input resources.
//!
//! Rendering, audio output and windowing sit behind traits; the crate ships
//! headless implementations ([`render::RecordingRenderer`],
//! [`audio::NullAudioBackend`]) used by tests and scripted runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maze_engine::prelude::*;
//!
//! struct Title;
//!
//! impl Scene for Title {
//!     fn name(&self) -> &str {
//!         "title"
//!     }
//!
//!     fn update(&mut self, ctx: &mut SceneContext, _dt: f32) -> Transition {
//!         if ctx.input.was_key_pressed(KeyCode::Escape) {
//!             return Transition::Quit;
//!         }
//!         Transition::Stay
//!     }
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     let scenes = SceneManager::new(SceneContext::headless(800, 600))
//!         .with_scene(SceneEntry::new("title", |_ctx| Ok(Box::new(Title) as Box<dyn Scene>)));
//!     Engine::new(scenes, EngineConfig::default()).run()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod spatial;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioContext, AudioDevice, Emitter},
        config::Config,
        ecs::{
            components::{
                AiBehavior, AiComponent, AnimationComponent, AudioEmitterComponent, ColliderComponent,
                PositionComponent, RenderableComponent,
            },
            systems::{AiSystem, AnimationSystem, AudioSystem, CollisionSystem, RenderingSystem, SkyBoxSystem},
            ComponentMask, Entity, EntityRegistry, System, SystemScheduler,
        },
        foundation::math::{Transform, Vec2, Vec3},
        input::{KeyCode, MouseButton, PointerSubscription},
        render::{Camera, Color, Rect, TextAlign},
        scene::{Scene, SceneContext, SceneEntry, SceneError, SceneManager, SceneWorld, Transition},
        Engine, EngineConfig, EngineError,
    };
}
