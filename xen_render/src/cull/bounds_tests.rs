use glam::{Mat4, Quat, Vec3};
use super::*;

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

// ============================================================================
// AABB
// ============================================================================

#[test]
fn test_transformed_translation() {
    let moved = unit_box().transformed(&Mat4::from_translation(Vec3::new(5.0, 0.0, -2.0)));
    assert_eq!(moved.min, Vec3::new(4.0, -1.0, -3.0));
    assert_eq!(moved.max, Vec3::new(6.0, 1.0, -1.0));
}

#[test]
fn test_transformed_rotation_grows_box() {
    let rotated = unit_box().transformed(&Mat4::from_quat(
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
    ));
    let expected = std::f32::consts::SQRT_2;
    assert!((rotated.max.x - expected).abs() < 1e-5);
    assert!((rotated.min.z + expected).abs() < 1e-5);
    assert!((rotated.max.y - 1.0).abs() < 1e-6);
}

#[test]
fn test_transformed_negative_scale_keeps_order() {
    let flipped = AABB::new(Vec3::ZERO, Vec3::ONE)
        .transformed(&Mat4::from_scale(Vec3::new(-2.0, 1.0, 1.0)));
    assert_eq!(flipped.min.x, -2.0);
    assert_eq!(flipped.max.x, 0.0);
}

#[test]
fn test_contains_and_intersects() {
    let outer = unit_box();
    let inner = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
    let touching = AABB::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
    let apart = AABB::new(Vec3::splat(3.0), Vec3::splat(4.0));

    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
    assert!(outer.intersects(&touching));
    assert!(!outer.contains(&touching));
    assert!(!outer.intersects(&apart));
}

#[test]
fn test_point_distances() {
    let aabb = unit_box();
    assert_eq!(aabb.distance_to_point(Vec3::ZERO), 0.0);
    assert_eq!(aabb.distance_to_point(Vec3::new(4.0, 0.0, 0.0)), 3.0);
    assert!((aabb.max_distance_to_point(Vec3::ZERO) - 3.0_f32.sqrt()).abs() < 1e-6);
    assert!((aabb.max_distance_to_point(Vec3::new(4.0, 0.0, 0.0))
        - Vec3::new(5.0, 1.0, 1.0).length()).abs() < 1e-5);
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_world_aabb_for_each_variant() {
    let sphere = Bounds::sphere(Vec3::new(1.0, 2.0, 3.0), 0.5);
    assert_eq!(sphere.world_aabb().min, Vec3::new(0.5, 1.5, 2.5));

    let local = Bounds::local_box(Vec3::splat(-1.0), Vec3::splat(1.0),
        Mat4::from_translation(Vec3::X * 10.0));
    assert_eq!(local.world_aabb().center(), Vec3::X * 10.0);

    let world = Bounds::world_box(Vec3::ZERO, Vec3::ONE);
    assert_eq!(world.world_aabb(), AABB::new(Vec3::ZERO, Vec3::ONE));
}
