/// Screen-space projection helpers available on every camera.
///
/// Three spaces are involved:
/// - world space
/// - coordinates: normalised [-1, +1] x/y, +y up (clip space after divide)
/// - target: draw-target pixels, origin bottom-left
///
/// Going from 2D back to 3D is ambiguous; the caller supplies a depth and
/// the result is the point at that distance from the camera along the
/// unprojected ray.

use glam::{Mat4, Vec2, Vec3};
use crate::error::Result;
use crate::engine_bail;
use super::camera::Camera;

/// Projection to and from screen space, using the camera's current
/// view and projection for the draw target recorded by its last `begin`.
pub trait CameraProjectExt: Camera {
    /// World position to a normalised [-1, +1] coordinate
    fn project_to_coordinate(&mut self, world: Vec3) -> Result<Vec2> {
        let view_projection = self.view_projection()?;
        let clip = view_projection * world.extend(1.0);
        Ok(Vec2::new(clip.x, clip.y) / clip.w)
    }

    /// Normalised coordinate to the world point `project_depth` from the camera
    fn project_from_coordinate(&mut self, coordinate: Vec2, project_depth: f32) -> Result<Vec3> {
        let inverse = self.view_projection()?.inverse();
        let near = inverse.project_point3(coordinate.extend(0.0));
        let far = inverse.project_point3(coordinate.extend(1.0));

        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO || !direction.is_finite() {
            engine_bail!("xen::CameraProjectExt", InvalidArgument,
                "coordinate {:?} does not unproject to a ray", coordinate);
        }

        // Foot of the camera position on the ray; the camera itself for perspective
        let origin = near + direction * (self.camera_position() - near).dot(direction);
        Ok(origin + direction * project_depth)
    }

    /// World position to draw-target pixels
    fn project_to_target(&mut self, world: Vec3) -> Result<Vec2> {
        let coordinate = self.project_to_coordinate(world)?;
        Ok((coordinate + Vec2::ONE) * 0.5 * self.target_size())
    }

    /// Draw-target pixels to the world point `project_depth` from the camera
    fn project_from_target(&mut self, pixel: Vec2, project_depth: f32) -> Result<Vec3> {
        let size = self.target_size();
        if size.x == 0.0 || size.y == 0.0 {
            engine_bail!("xen::CameraProjectExt", InvalidArgument,
                "draw target size {:?} has no area", size);
        }
        self.project_from_coordinate(pixel / size * 2.0 - Vec2::ONE, project_depth)
    }

    /// `projection * view` for the recorded draw target
    fn view_projection(&mut self) -> Result<Mat4> {
        let projection = self.projection_matrix(self.target_size())?;
        Ok(projection * self.view_matrix())
    }
}

impl<C: Camera + ?Sized> CameraProjectExt for C {}

#[cfg(test)]
#[path = "screen_projection_tests.rs"]
mod tests;
