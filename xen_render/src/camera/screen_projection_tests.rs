use glam::{Vec2, Vec3};
use crate::camera::{
    Camera2D, Camera3D, ChangeIndexSource, Projection, ProjectionConfig, Region, StackLifecycle,
};
use super::*;

fn camera_at(source: &ChangeIndexSource, config: ProjectionConfig) -> Camera3D {
    let mut camera = Camera3D::with_projection(source, Projection::from_config(source, config));
    camera.look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), Vec3::Y).unwrap();
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();
    camera
}

// ============================================================================
// Forward projection
// ============================================================================

#[test]
fn test_target_center_projects_to_origin() {
    let source = ChangeIndexSource::new();
    let mut camera = camera_at(&source, ProjectionConfig::default());

    let coordinate = camera.project_to_coordinate(Vec3::ZERO).unwrap();
    assert!(coordinate.length() < 1e-6);

    let pixel = camera.project_to_target(Vec3::ZERO).unwrap();
    assert!((pixel - Vec2::new(400.0, 300.0)).length() < 1e-3);
}

#[test]
fn test_region_shifts_projected_coordinate() {
    let source = ChangeIndexSource::new();
    let mut camera = camera_at(&source, ProjectionConfig {
        region: Region::new(0.0, 0.0, 0.5, 0.5),
        ..ProjectionConfig::default()
    });

    let coordinate = camera.project_to_coordinate(Vec3::ZERO).unwrap();
    assert!((coordinate - Vec2::new(-0.5, -0.5)).length() < 1e-5);
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_perspective_round_trip() {
    let source = ChangeIndexSource::new();
    let mut camera = camera_at(&source, ProjectionConfig::default());
    let points = [
        Vec3::ZERO,
        Vec3::new(1.5, -2.0, 0.0),
        Vec3::new(-3.0, 1.0, -40.0),
    ];

    for world in points {
        let depth = (world - camera.position()).length();
        let coordinate = camera.project_to_coordinate(world).unwrap();
        let back = camera.project_from_coordinate(coordinate, depth).unwrap();
        assert!((back - world).length() < 1e-2, "{:?} -> {:?}", world, back);

        let pixel = camera.project_to_target(world).unwrap();
        let back = camera.project_from_target(pixel, depth).unwrap();
        assert!((back - world).length() < 1e-2, "{:?} -> {:?}", world, back);
    }
}

#[test]
fn test_orthographic_round_trip() {
    let source = ChangeIndexSource::new();
    let mut camera = camera_at(&source, ProjectionConfig {
        orthographic: true,
        near_clip: 1.0,
        far_clip: 50.0,
        ..ProjectionConfig::default()
    });

    // Ortho rays are parallel: depth is measured from the camera plane
    let world = Vec3::new(0.25, -0.1, 2.0);
    let coordinate = camera.project_to_coordinate(world).unwrap();
    let back = camera.project_from_coordinate(coordinate, 8.0).unwrap();
    assert!((back - world).length() < 1e-3, "{:?}", back);
}

#[test]
fn test_unprojected_point_lies_in_front_of_camera() {
    let source = ChangeIndexSource::new();
    let mut camera = camera_at(&source, ProjectionConfig::default());

    let point = camera.project_from_coordinate(Vec2::ZERO, 5.0).unwrap();
    assert!((point - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-3);
}

#[test]
fn test_camera_2d_pixel_round_trip() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.begin(Vec2::new(640.0, 480.0)).unwrap();

    // Normalised view: (0.25, 0.75) sits a quarter across, three quarters up
    let pixel = camera.project_to_target(Vec3::new(0.25, 0.75, 0.0)).unwrap();
    assert!((pixel - Vec2::new(160.0, 360.0)).length() < 1e-3);
}

#[test]
fn test_zero_sized_target_rejected() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera3D::new(&source);
    camera.begin(Vec2::ZERO).unwrap();

    assert!(camera.project_from_target(Vec2::ZERO, 1.0).is_err());
}
