/// Camera — the capability every camera exposes to a render pass.
///
/// Matrices are derived lazily: the view matrix is the inverse of the
/// camera matrix, rebuilt on first read after a change. Each accessor has
/// a gated variant taking the caller's last observed `ChangeIndex`; it
/// writes the matrix and returns `true` only when something changed since
/// that observation.
///
/// Cameras are long-lived application objects shared with the render pass
/// through `SharedCamera`. While a camera is the active top of a
/// `CameraStack` it is "in use" and every mutator returns `Error::InUse`.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::{Mat4, Vec2, Vec3};
use crate::error::Result;
use crate::engine_err;
use super::change_index::ChangeIndex;
use super::frustum::Frustum;

/// Hooks the camera stack calls when a camera becomes (or stops being) active.
pub trait StackLifecycle {
    /// True while the camera is the active camera of a pass
    fn in_use(&self) -> bool;

    /// Mark the camera active or inactive
    fn set_in_use(&mut self, in_use: bool);

    /// Prepare for use with a draw target of `target_size` pixels:
    /// refresh the projection and view for the new size.
    fn begin(&mut self, target_size: Vec2) -> Result<()>;
}

/// A camera usable by the render pass.
pub trait Camera: StackLifecycle + Send {
    /// Short type name for logs
    fn kind(&self) -> &'static str;

    /// Index issued by the last change to the camera (and view) matrix
    fn change_index(&self) -> ChangeIndex;

    /// Camera-to-world transform
    fn camera_matrix(&self) -> Mat4;

    /// World-to-camera transform, `inverse(camera_matrix)`
    fn view_matrix(&mut self) -> Mat4;

    /// Index issued by the last change to the projection matrix
    fn projection_change_index(&self) -> ChangeIndex;

    /// Projection matrix for a draw target of `target_size` pixels
    fn projection_matrix(&mut self, target_size: Vec2) -> Result<Mat4>;

    /// Change-gated projection matrix read
    fn projection_matrix_gated(
        &mut self,
        matrix: &mut Mat4,
        target_size: Vec2,
        last_seen: &mut Option<ChangeIndex>,
    ) -> Result<bool>;

    /// The six world-space culling planes, rebuilt only when stale
    fn culling_planes(&mut self) -> Result<Frustum>;

    /// Renderer should invert triangle winding culling
    fn reverse_backface_culling(&self) -> bool;

    fn is_orthographic(&self) -> bool;

    /// Draw target size recorded by the last `begin`
    fn target_size(&self) -> Vec2;

    /// World-space camera position
    fn camera_position(&self) -> Vec3 {
        self.camera_matrix().w_axis.truncate()
    }

    /// Change-gated camera matrix read
    fn camera_matrix_gated(&self, matrix: &mut Mat4, last_seen: &mut Option<ChangeIndex>) -> bool {
        if !self.change_index().observe(last_seen) {
            return false;
        }
        *matrix = self.camera_matrix();
        true
    }

    /// Change-gated view matrix read
    fn view_matrix_gated(&mut self, matrix: &mut Mat4, last_seen: &mut Option<ChangeIndex>) -> bool {
        if !self.change_index().observe(last_seen) {
            return false;
        }
        *matrix = self.view_matrix();
        true
    }
}

/// A camera shared between application code and the render pass.
pub type SharedCamera = Arc<Mutex<dyn Camera>>;

/// Wrap a camera for use with a `CameraStack`.
///
/// Keep a typed clone (`Arc<Mutex<Camera3D>>`) to drive the camera; the
/// returned handle coerces to `SharedCamera`.
pub fn share_camera<C: Camera + 'static>(camera: C) -> Arc<Mutex<C>> {
    Arc::new(Mutex::new(camera))
}

/// Lock a shared camera, mapping poisoning to `Error::LockPoisoned`.
pub fn lock_camera<'a>(camera: &'a SharedCamera, source: &str) -> Result<MutexGuard<'a, dyn Camera + 'static>> {
    camera.lock().map_err(|_| engine_err!(source, LockPoisoned, "camera lock poisoned"))
}
