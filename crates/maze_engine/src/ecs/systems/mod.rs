//! ECS Systems module
//!
//! Systems a gameplay scene registers, listed in the order it registers them.

pub mod skybox_system;
pub mod rendering_system;
pub mod collision_system;
pub mod ai_system;
pub mod audio_system;
pub mod animation_system;

pub use skybox_system::SkyBoxSystem;
pub use rendering_system::RenderingSystem;
pub use collision_system::CollisionSystem;
pub use ai_system::{assign_targets, AiSystem};
pub use audio_system::AudioSystem;
pub use animation_system::AnimationSystem;
