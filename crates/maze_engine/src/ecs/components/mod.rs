//! ECS Components module
//!
//! Plain data records attached to entities. Behaviour lives in the systems.

pub mod position;
pub mod ai;
pub mod collision;
pub mod renderable;
pub mod animation;
pub mod audio_emitter;

pub use position::PositionComponent;
pub use ai::{AiComponent, AiBehavior};
pub use collision::ColliderComponent;
pub use renderable::RenderableComponent;
pub use animation::{AnimationComponent, AnimationState};
pub use audio_emitter::AudioEmitterComponent;
