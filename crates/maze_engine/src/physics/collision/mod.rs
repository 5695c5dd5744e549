//! Collision shapes and intersection tests

pub mod primitives;
pub mod shape;

pub use primitives::{Aabb, BoundingSphere};
pub use shape::CollisionShape;
