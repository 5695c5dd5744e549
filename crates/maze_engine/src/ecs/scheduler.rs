//! System scheduling
//!
//! An ordered pipeline of systems fixed at scene construction. Every frame
//! each system acts exactly once, in registration order. Systems never call
//! each other; the owning scene reaches individual systems through
//! [`SystemScheduler::find_as`] between frames.

use log::{debug, warn};

use super::registry::EntityRegistry;
use super::system::System;
use crate::scene::SceneContext;

/// Ordered pipeline of systems
#[derive(Default)]
pub struct SystemScheduler {
    systems: Vec<Box<dyn System>>,
}

impl SystemScheduler {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system to the end of the pipeline
    pub fn register(&mut self, system: Box<dyn System>) {
        if self.find_by_name(system.name()).is_some() {
            warn!("System '{}' registered twice; lookups will return the first", system.name());
        }
        debug!("Registered system '{}' at position {}", system.name(), self.systems.len());
        self.systems.push(system);
    }

    /// Run every system once, in registration order
    pub fn run_frame(&mut self, registry: &mut EntityRegistry, ctx: &mut SceneContext) {
        for system in &mut self.systems {
            system.act(registry, ctx);
        }
    }

    /// The first system registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<&dyn System> {
        let system = self.systems.iter().find(|s| s.name() == name)?;
        Some(system.as_ref())
    }

    /// Mutable access to the first system registered under `name`
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut dyn System> {
        let system = self.systems.iter_mut().find(|s| s.name() == name)?;
        Some(system.as_mut())
    }

    /// Typed mutable access to a system by name
    ///
    /// Returns `None` when no system has that name or it is not a `T`.
    pub fn find_as<T: System>(&mut self, name: &str) -> Option<&mut T> {
        self.find_by_name_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// Typed shared access to a system by name
    pub fn find_as_ref<T: System>(&self, name: &str) -> Option<&T> {
        self.find_by_name(name)?.as_any().downcast_ref::<T>()
    }

    /// Names of the registered systems, in order
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
