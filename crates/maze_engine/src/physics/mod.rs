//! Physics module for collision detection
//!
//! Provides the bounding volumes and overlap tests used by the collision
//! system. There is no rigid-body simulation: rigid overlaps are resolved by
//! the collision system moving the player back to its last safe position.

pub mod collision;

pub use collision::{Aabb, BoundingSphere, CollisionShape};
