use glam::{Mat4, Vec2, Vec3};
use crate::error::Error;
use super::*;

fn clip_of(camera: &mut Camera2D, point: Vec2) -> Vec2 {
    camera.view_matrix().transform_point3(point.extend(0.0)).truncate()
}

struct FixedRect(Vec2, Vec2);

impl ViewRectProvider for FixedRect {
    fn view_rect(&self, _target_size: Vec2, _normalised: bool) -> (Vec2, Vec2) {
        (self.0, self.1)
    }
}

// ============================================================================
// View rectangle
// ============================================================================

#[test]
fn test_normalised_rect_maps_to_clip_space() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();

    assert!((clip_of(&mut camera, Vec2::ZERO) - Vec2::new(-1.0, -1.0)).length() < 1e-6);
    assert!((clip_of(&mut camera, Vec2::ONE) - Vec2::ONE).length() < 1e-6);
    assert!(clip_of(&mut camera, Vec2::splat(0.5)).length() < 1e-6);
    assert_eq!(camera.view_rect(), Some((Vec2::ZERO, Vec2::ONE)));
}

#[test]
fn test_pixel_rect_follows_target_size() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.set_use_normalised_coordinates(false).unwrap();
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();

    assert!((clip_of(&mut camera, Vec2::new(800.0, 600.0)) - Vec2::ONE).length() < 1e-6);
    assert!((clip_of(&mut camera, Vec2::new(400.0, 0.0)) - Vec2::new(0.0, -1.0)).length() < 1e-6);
}

#[test]
fn test_custom_view_provider() {
    let source = ChangeIndexSource::new();
    let provider = FixedRect(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 5.0));
    let mut camera = Camera2D::with_view_provider(&source, Box::new(provider));
    camera.begin(Vec2::new(1024.0, 768.0)).unwrap();

    assert!(clip_of(&mut camera, Vec2::new(0.0, 2.5)).length() < 1e-6);
    assert!((clip_of(&mut camera, Vec2::new(-10.0, 5.0)) - Vec2::new(-1.0, 1.0)).length() < 1e-6);
}

#[test]
fn test_empty_rect_rejected() {
    let source = ChangeIndexSource::new();
    let provider = FixedRect(Vec2::ONE, Vec2::new(1.0, 4.0));
    let mut camera = Camera2D::with_view_provider(&source, Box::new(provider));

    assert!(matches!(camera.begin(Vec2::ONE), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_camera_matrix_is_inverse_of_view() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.set_use_normalised_coordinates(false).unwrap();
    camera.begin(Vec2::new(1280.0, 720.0)).unwrap();

    let product = camera.view_matrix() * camera.camera_matrix();
    assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-6));
}

// ============================================================================
// Change tracking
// ============================================================================

#[test]
fn test_rebegin_with_same_rect_keeps_index() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();
    let index = camera.change_index();

    // Normalised coordinates ignore the target size
    camera.begin(Vec2::new(1920.0, 1080.0)).unwrap();
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();
    assert_eq!(camera.change_index(), index);

    camera.set_use_normalised_coordinates(false).unwrap();
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();
    let pixel_index = camera.change_index();
    assert!(pixel_index > index);

    camera.begin(Vec2::new(800.0, 600.0)).unwrap();
    assert_eq!(camera.change_index(), pixel_index);
    camera.begin(Vec2::new(640.0, 480.0)).unwrap();
    assert!(camera.change_index() > pixel_index);
}

#[test]
fn test_first_gated_read_reports_change() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.begin(Vec2::ONE).unwrap();

    let mut projection = Mat4::ZERO;
    let mut seen = None;
    assert!(camera.projection_matrix_gated(&mut projection, Vec2::ONE, &mut seen).unwrap());
    assert_eq!(projection, Mat4::IDENTITY);
    assert!(!camera.projection_matrix_gated(&mut projection, Vec2::ONE, &mut seen).unwrap());
    assert_eq!(camera.projection_matrix(Vec2::new(50.0, 50.0)).unwrap(), Mat4::IDENTITY);

    let mut view = Mat4::ZERO;
    let mut view_seen = None;
    assert!(camera.view_matrix_gated(&mut view, &mut view_seen));
    assert!(!camera.view_matrix_gated(&mut view, &mut view_seen));
}

// ============================================================================
// In-use guard
// ============================================================================

#[test]
fn test_mutation_rejected_while_in_use() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.set_in_use(true);

    assert!(matches!(camera.set_use_normalised_coordinates(false), Err(Error::InUse(_))));
    assert!(matches!(camera.set_view_provider(Box::new(DefaultViewRect)), Err(Error::InUse(_))));
    assert!(matches!(camera.set_reverse_backface_culling(true), Err(Error::InUse(_))));
    assert!(camera.use_normalised_coordinates());

    camera.set_in_use(false);
    assert!(camera.set_reverse_backface_culling(true).is_ok());
    assert!(camera.reverse_backface_culling());
}

// ============================================================================
// Culling planes
// ============================================================================

#[test]
fn test_culling_planes_cover_view_rect() {
    let source = ChangeIndexSource::new();
    let mut camera = Camera2D::new(&source);
    camera.begin(Vec2::new(800.0, 600.0)).unwrap();

    let planes = camera.culling_planes().unwrap();
    assert!(planes.test_sphere(0.1, Vec3::new(0.5, 0.5, 0.0)));
    assert!(planes.test_aabb(Vec3::new(0.9, 0.9, 0.0), Vec3::new(1.5, 1.5, 0.0)));
    assert!(!planes.test_sphere(0.1, Vec3::new(2.0, 0.5, 0.0)));
    assert!(camera.is_orthographic());
}
