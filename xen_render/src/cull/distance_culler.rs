/// Rejects anything farther than a cutoff from an origin.
///
/// Cheap enough to run before the frustum test as a pre-culler.

use glam::{Mat4, Vec3};
use crate::camera::ContainmentType;
use crate::error::Result;
use crate::engine_bail;
use super::bounds::AABB;
use super::cull_primitive::CullPrimitive;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceCuller {
    origin: Vec3,
    max_distance: f32,
}

impl DistanceCuller {
    /// Fails if `max_distance` is negative or not finite.
    pub fn new(origin: Vec3, max_distance: f32) -> Result<Self> {
        if !max_distance.is_finite() || max_distance < 0.0 {
            engine_bail!("xen::DistanceCuller", InvalidArgument,
                "max_distance must be finite and >= 0, got {}", max_distance);
        }
        Ok(Self { origin, max_distance })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    fn classify_aabb(&self, aabb: &AABB) -> ContainmentType {
        if aabb.distance_to_point(self.origin) > self.max_distance {
            ContainmentType::Disjoint
        } else if aabb.max_distance_to_point(self.origin) > self.max_distance {
            ContainmentType::Intersects
        } else {
            ContainmentType::Contains
        }
    }
}

impl CullPrimitive for DistanceCuller {
    fn test_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> bool {
        self.intersect_world_box(min, max, world).is_visible()
    }

    fn test_world_box_aabb(&self, min: Vec3, max: Vec3) -> bool {
        AABB::new(min, max).distance_to_point(self.origin) <= self.max_distance
    }

    fn test_world_sphere(&self, radius: f32, center: Vec3) -> bool {
        center.distance(self.origin) - radius <= self.max_distance
    }

    fn intersect_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType {
        // Enclosing world box: conservative, never rejects a visible box
        self.classify_aabb(&AABB::new(min, max).transformed(world))
    }

    fn intersect_world_box_aabb(&self, min: Vec3, max: Vec3) -> ContainmentType {
        self.classify_aabb(&AABB::new(min, max))
    }

    fn intersect_world_sphere(&self, radius: f32, center: Vec3) -> ContainmentType {
        let distance = center.distance(self.origin);
        if distance - radius > self.max_distance {
            ContainmentType::Disjoint
        } else if distance + radius > self.max_distance {
            ContainmentType::Intersects
        } else {
            ContainmentType::Contains
        }
    }
}

#[cfg(test)]
#[path = "distance_culler_tests.rs"]
mod tests;
