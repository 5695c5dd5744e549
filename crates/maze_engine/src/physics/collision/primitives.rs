//! Primitive collision volumes and intersection algorithms

use crate::foundation::math::Vec3;

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this sphere intersects an axis-aligned box
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(self.center);
        (closest - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its center and half extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spheres_touching_count_as_intersecting() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_spheres() {
        let a = BoundingSphere::new(Vec3::zeros(), 0.5);
        let b = BoundingSphere::new(Vec3::new(0.0, 0.0, 3.0), 0.5);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_sphere_against_box_face() {
        let wall = Aabb::from_center(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.5));
        let near = BoundingSphere::new(Vec3::new(0.0, 1.0, 0.9), 0.5);
        let far = BoundingSphere::new(Vec3::new(0.0, 1.0, 1.2), 0.5);
        assert!(near.intersects_aabb(&wall));
        assert!(!far.intersects_aabb(&wall));
    }

    #[test]
    fn test_box_with_negative_extents_is_normalized() {
        let aabb = Aabb::from_center(Vec3::zeros(), Vec3::new(-1.0, 1.0, -2.0));
        assert_relative_eq!(aabb.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_relative_eq!(aabb.max, Vec3::new(1.0, 1.0, 2.0));
    }
}
