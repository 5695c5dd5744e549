//! System trait
//!
//! A system is a named unit of per-frame work run against the registry.

use std::any::Any;

use super::registry::EntityRegistry;
use crate::scene::SceneContext;

/// Unit of per-frame logic operating across the registry
pub trait System: Any {
    /// Name used for out-of-band lookup through the scheduler
    fn name(&self) -> &str;

    /// Run once per frame against the registry
    fn act(&mut self, registry: &mut EntityRegistry, ctx: &mut SceneContext);

    /// Provide the elapsed frame time; systems that do not integrate over time ignore it
    fn set_delta_time(&mut self, _delta_time: f32) {}

    /// Upcast for typed lookup
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
