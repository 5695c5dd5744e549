//! Entity-Component-System implementation
//!
//! Entities are named bags of components. The registry stores them in
//! insertion order; systems run over it once per frame in the order the
//! scheduler holds them.

pub mod component;
pub mod components;
pub mod entity;
pub mod loader;
pub mod registry;
pub mod scheduler;
pub mod system;
pub mod systems;

pub use component::{Component, ComponentData, ComponentKind, ComponentMask};
pub use entity::Entity;
pub use loader::{LoadError, LoadReport};
pub use registry::EntityRegistry;
pub use scheduler::SystemScheduler;
pub use system::System;
