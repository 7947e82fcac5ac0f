/// The visibility test surface the renderer draws against.
///
/// Implemented by `Frustum`, by extra cullers such as `DistanceCuller`,
/// and by `DrawState`, which composes the active camera with the
/// pre/post culler stacks.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::camera::{ContainmentType, Frustum};
use super::bounds::Bounds;

/// Boolean and three-way visibility tests.
///
/// The `test_*` methods return false only when the volume is entirely
/// outside. The `intersect_*` methods classify it.
pub trait CullPrimitive {
    /// Local-space box placed by `world`
    fn test_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> bool;

    /// World-space axis-aligned box
    fn test_world_box_aabb(&self, min: Vec3, max: Vec3) -> bool;

    fn test_world_sphere(&self, radius: f32, center: Vec3) -> bool;

    fn intersect_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType;

    fn intersect_world_box_aabb(&self, min: Vec3, max: Vec3) -> ContainmentType;

    fn intersect_world_sphere(&self, radius: f32, center: Vec3) -> ContainmentType;

    /// Dispatch on a `Bounds` value
    fn test_bounds(&self, bounds: &Bounds) -> bool {
        match bounds {
            Bounds::Sphere { center, radius } => self.test_world_sphere(*radius, *center),
            Bounds::Box { local, world } => self.test_world_box(local.min, local.max, world),
            Bounds::WorldBox(aabb) => self.test_world_box_aabb(aabb.min, aabb.max),
        }
    }

    /// Dispatch on a `Bounds` value
    fn intersect_bounds(&self, bounds: &Bounds) -> ContainmentType {
        match bounds {
            Bounds::Sphere { center, radius } => self.intersect_world_sphere(*radius, *center),
            Bounds::Box { local, world } => self.intersect_world_box(local.min, local.max, world),
            Bounds::WorldBox(aabb) => self.intersect_world_box_aabb(aabb.min, aabb.max),
        }
    }
}

/// A culler pushed onto a `CullersStack`.
pub type SharedCuller = Arc<dyn CullPrimitive + Send + Sync>;

impl CullPrimitive for Frustum {
    fn test_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> bool {
        self.test_box(min, max, world)
    }

    fn test_world_box_aabb(&self, min: Vec3, max: Vec3) -> bool {
        self.test_aabb(min, max)
    }

    fn test_world_sphere(&self, radius: f32, center: Vec3) -> bool {
        self.test_sphere(radius, center)
    }

    fn intersect_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType {
        self.intersect_box(min, max, world)
    }

    fn intersect_world_box_aabb(&self, min: Vec3, max: Vec3) -> ContainmentType {
        self.intersect_aabb(min, max)
    }

    fn intersect_world_sphere(&self, radius: f32, center: Vec3) -> ContainmentType {
        self.intersect_sphere(radius, center)
    }
}

#[cfg(test)]
#[path = "cull_primitive_tests.rs"]
mod tests;
