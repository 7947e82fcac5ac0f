/// Frustum — six clipping planes and the stateless culling tests.
///
/// Each plane is a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the unit normal, pointing OUT of the visible volume
/// - D is the signed distance
/// - A point P is outside a plane if dot(normal, P) + D > 0
///
/// A point exactly on a plane (distance == 0) is inside. Every test below
/// rejects with a strict `>`, so boundary geometry is never culled.

use glam::{Mat4, Vec3, Vec4};

/// Three-way containment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentType {
    /// Entirely outside
    Disjoint,
    /// Partially overlapping
    Intersects,
    /// Entirely inside
    Contains,
}

impl ContainmentType {
    /// Combine two classifications of the same primitive against different volumes.
    ///
    /// Disjoint wins over Intersects, which wins over Contains.
    pub fn combine(self, other: ContainmentType) -> ContainmentType {
        match (self, other) {
            (ContainmentType::Disjoint, _) | (_, ContainmentType::Disjoint) => ContainmentType::Disjoint,
            (ContainmentType::Intersects, _) | (_, ContainmentType::Intersects) => ContainmentType::Intersects,
            _ => ContainmentType::Contains,
        }
    }

    /// True unless Disjoint
    pub fn is_visible(self) -> bool {
        self != ContainmentType::Disjoint
    }
}

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_BOTTOM: usize = 4;
pub const PLANE_TOP: usize = 5;

/// Signed distance of a point to a plane (positive = outside)
#[inline]
pub fn plane_distance(plane: &Vec4, point: Vec3) -> f32 {
    plane.truncate().dot(point) + plane.w
}

/// Six frustum planes: near, far, left, right, bottom, top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix (`projection * view`).
    ///
    /// Gribb & Hartmann on glam's clip volume: -w <= x,y <= w and 0 <= z <= w.
    /// Works for both perspective and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);

        // Inward planes, flipped below so normals point out
        let inward = [
            r2,      // near:   z >= 0
            r3 - r2, // far:    z <= w
            r3 + r0, // left:   x >= -w
            r3 - r0, // right:  x <= w
            r3 + r1, // bottom: y >= -w
            r3 - r1, // top:    y <= w
        ];

        let mut planes = [Vec4::ZERO; 6];
        for (plane, src) in planes.iter_mut().zip(inward.iter()) {
            let normal_len = src.truncate().length();
            *plane = if normal_len > 0.0 { -*src / normal_len } else { -*src };
        }

        Self { planes }
    }

    /// Test a sphere. False if entirely outside.
    pub fn test_sphere(&self, radius: f32, center: Vec3) -> bool {
        sphere_in_frustum(&self.planes, radius, center)
    }

    /// Classify a sphere.
    pub fn intersect_sphere(&self, radius: f32, center: Vec3) -> ContainmentType {
        sphere_intersects_frustum(&self.planes, radius, center)
    }

    /// Test a box given in local space and placed by `world`.
    pub fn test_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> bool {
        box_in_frustum(&self.planes, min, max, world)
    }

    /// Classify a box given in local space and placed by `world`.
    pub fn intersect_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType {
        box_intersects_frustum(&self.planes, min, max, world)
    }

    /// Test a world-space axis-aligned box.
    pub fn test_aabb(&self, min: Vec3, max: Vec3) -> bool {
        aabb_in_frustum(&self.planes, min, max)
    }

    /// Classify a world-space axis-aligned box.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> ContainmentType {
        aabb_intersects_frustum(&self.planes, min, max)
    }
}

// ===== STATELESS CULL TESTS =====

/// False as soon as one plane has the whole sphere on its outside.
pub fn sphere_in_frustum(planes: &[Vec4; 6], radius: f32, center: Vec3) -> bool {
    for plane in planes {
        if plane_distance(plane, center) > radius {
            return false;
        }
    }
    true
}

/// Like `sphere_in_frustum`, but separates full containment from straddling.
pub fn sphere_intersects_frustum(planes: &[Vec4; 6], radius: f32, center: Vec3) -> ContainmentType {
    let mut intersect = false;
    for plane in planes {
        let distance = plane_distance(plane, center);
        if distance > radius {
            return ContainmentType::Disjoint;
        }
        if distance > -radius {
            intersect = true;
        }
    }
    if intersect { ContainmentType::Intersects } else { ContainmentType::Contains }
}

/// Plane expressed in the box's local space: (normal, offset) such that
/// distance(world * p) == dot(normal, p) + offset.
#[inline]
fn plane_to_local(plane: &Vec4, world: &Mat4) -> (Vec3, f32) {
    let n = plane.truncate();
    let local = Vec3::new(
        world.x_axis.truncate().dot(n),
        world.y_axis.truncate().dot(n),
        world.z_axis.truncate().dot(n),
    );
    (local, world.w_axis.truncate().dot(n) + plane.w)
}

/// Corner of [min, max] with the lowest distance along `normal`
#[inline]
fn near_corner(normal: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x > 0.0 { min.x } else { max.x },
        if normal.y > 0.0 { min.y } else { max.y },
        if normal.z > 0.0 { min.z } else { max.z },
    )
}

/// Corner of [min, max] with the highest distance along `normal`
#[inline]
fn far_corner(normal: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x > 0.0 { max.x } else { min.x },
        if normal.y > 0.0 { max.y } else { min.y },
        if normal.z > 0.0 { max.z } else { min.z },
    )
}

/// Transformed-box test using the n-vertex: if the corner nearest to the
/// inside of a plane is still outside, the whole box is.
///
/// The plane is moved into box space instead of transforming 8 corners.
pub fn box_in_frustum(planes: &[Vec4; 6], min: Vec3, max: Vec3, world: &Mat4) -> bool {
    for plane in planes {
        let (normal, offset) = plane_to_local(plane, world);
        if normal.dot(near_corner(normal, min, max)) + offset > 0.0 {
            return false;
        }
    }
    true
}

/// Transformed-box classification. A plane whose near corner is inside but
/// whose far corner is outside makes the result at most `Intersects`.
pub fn box_intersects_frustum(planes: &[Vec4; 6], min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType {
    let mut intersect = false;
    for plane in planes {
        let (normal, offset) = plane_to_local(plane, world);
        if normal.dot(near_corner(normal, min, max)) + offset > 0.0 {
            return ContainmentType::Disjoint;
        }
        if normal.dot(far_corner(normal, min, max)) + offset > 0.0 {
            intersect = true;
        }
    }
    if intersect { ContainmentType::Intersects } else { ContainmentType::Contains }
}

/// Axis-aligned specialisation of `box_in_frustum` (no world matrix).
pub fn aabb_in_frustum(planes: &[Vec4; 6], min: Vec3, max: Vec3) -> bool {
    for plane in planes {
        let normal = plane.truncate();
        if normal.dot(near_corner(normal, min, max)) + plane.w > 0.0 {
            return false;
        }
    }
    true
}

/// Axis-aligned specialisation of `box_intersects_frustum`.
pub fn aabb_intersects_frustum(planes: &[Vec4; 6], min: Vec3, max: Vec3) -> ContainmentType {
    let mut intersect = false;
    for plane in planes {
        let normal = plane.truncate();
        if normal.dot(near_corner(normal, min, max)) + plane.w > 0.0 {
            return ContainmentType::Disjoint;
        }
        if normal.dot(far_corner(normal, min, max)) + plane.w > 0.0 {
            intersect = true;
        }
    }
    if intersect { ContainmentType::Intersects } else { ContainmentType::Contains }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
