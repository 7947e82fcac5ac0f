/// Bounding volumes handed to the culling tests.

use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-aligned bounding box.
///
/// Either local space (paired with a world matrix in `Bounds::Box`) or
/// world space (`Bounds::WorldBox`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Transform this AABB by a matrix, returning the enclosing AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.w_axis.truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// True if the boxes overlap or touch.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Distance from `point` to the nearest point of the box (0 inside).
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (point.clamp(self.min, self.max) - point).length()
    }

    /// Distance from `point` to the farthest corner of the box.
    pub fn max_distance_to_point(&self, point: Vec3) -> f32 {
        let center = self.center();
        let half = self.half_extents();
        ((point - center).abs() + half).length()
    }
}

// ===== BOUNDS =====

/// A volume to classify against a culler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// World-space sphere
    Sphere { center: Vec3, radius: f32 },
    /// Local-space box placed by a world matrix
    Box { local: AABB, world: Mat4 },
    /// World-space axis-aligned box
    WorldBox(AABB),
}

impl Bounds {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Bounds::Sphere { center, radius }
    }

    pub fn local_box(min: Vec3, max: Vec3, world: Mat4) -> Self {
        Bounds::Box { local: AABB::new(min, max), world }
    }

    pub fn world_box(min: Vec3, max: Vec3) -> Self {
        Bounds::WorldBox(AABB::new(min, max))
    }

    /// World-space axis-aligned box enclosing these bounds.
    pub fn world_aabb(&self) -> AABB {
        match self {
            Bounds::Sphere { center, radius } => {
                AABB::from_center_half_extents(*center, Vec3::splat(*radius))
            }
            Bounds::Box { local, world } => local.transformed(world),
            Bounds::WorldBox(aabb) => *aabb,
        }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
