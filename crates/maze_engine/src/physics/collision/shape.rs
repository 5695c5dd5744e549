//! Collision shape attached to a collider component

use crate::foundation::math::Vec3;
use super::primitives::{Aabb, BoundingSphere};

/// Shape of a collider, expressed relative to the owning entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Sphere centred on the entity
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box centred on the entity
    Box {
        /// Half size along each axis
        half_extents: Vec3,
    },
}

impl CollisionShape {
    /// Test whether a sphere overlaps this shape placed at `position`
    pub fn overlaps_sphere(&self, position: Vec3, sphere: &BoundingSphere) -> bool {
        match *self {
            Self::Sphere { radius } => BoundingSphere::new(position, radius).intersects(sphere),
            Self::Box { half_extents } => sphere.intersects_aabb(&Aabb::from_center(position, half_extents)),
        }
    }

    /// World-space bounding box of this shape placed at `position`
    pub fn bounds(&self, position: Vec3) -> Aabb {
        match *self {
            Self::Sphere { radius } => Aabb::from_center(position, Vec3::repeat(radius)),
            Self::Box { half_extents } => Aabb::from_center(position, half_extents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_shape_overlap() {
        let shape = CollisionShape::Sphere { radius: 0.3 };
        let player = BoundingSphere::new(Vec3::new(0.5, 0.0, 0.0), 0.25);
        assert!(shape.overlaps_sphere(Vec3::zeros(), &player));
        assert!(!shape.overlaps_sphere(Vec3::new(-1.0, 0.0, 0.0), &player));
    }

    #[test]
    fn test_box_bounds_follow_position() {
        let shape = CollisionShape::Box { half_extents: Vec3::new(1.0, 2.0, 0.5) };
        let bounds = shape.bounds(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.min, Vec3::new(9.0, -2.0, -0.5));
        assert_eq!(bounds.max, Vec3::new(11.0, 2.0, 0.5));
    }
}
