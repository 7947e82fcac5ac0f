/// Camera3D — perspective/orthographic camera driven by a camera matrix.
///
/// The camera matrix places the camera in the world (columns: right, up,
/// back, position). The camera looks down its local -Z axis.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;
use crate::engine_bail;
use super::camera::{Camera, StackLifecycle};
use super::change_index::{ChangeIndex, ChangeIndexSource};
use super::frustum::Frustum;
use super::projection::Projection;

/// 3D camera owning its projection.
#[derive(Debug, Clone)]
pub struct Camera3D {
    projection: Projection,

    camera_matrix: Mat4,
    view_matrix: Mat4,
    view_dirty: bool,

    source: ChangeIndexSource,
    change_index: ChangeIndex,
    /// Camera change index the cached culling planes were built against
    planes_index: Option<ChangeIndex>,

    reverse_backface_culling: bool,
    in_use: bool,
    target_size: Vec2,
}

impl Camera3D {
    /// Camera at the origin with a default perspective projection
    pub fn new(source: &ChangeIndexSource) -> Self {
        Self::with_projection(source, Projection::new(source))
    }

    pub fn with_projection(source: &ChangeIndexSource, projection: Projection) -> Self {
        Self {
            projection,
            camera_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            view_dirty: false,
            source: source.clone(),
            change_index: source.next(),
            planes_index: None,
            reverse_backface_culling: false,
            in_use: false,
            target_size: Vec2::ONE,
        }
    }

    // ===== PROJECTION =====

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Mutable projection access. Projection setters fail while the camera is in use.
    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    // ===== CAMERA MATRIX =====

    /// Orient the camera at `position` looking toward `target`.
    ///
    /// Fails if `target == position` or `up` is parallel to the view direction.
    pub fn look_at(&mut self, target: Vec3, position: Vec3, up: Vec3) -> Result<()> {
        self.ensure_not_in_use("look_at")?;
        if target == position {
            engine_bail!("xen::Camera3D", DegenerateLookAt,
                "target and position are both {:?}", position);
        }

        let direction = (position - target).normalize();
        let right = up.cross(direction);
        if right.length_squared() == 0.0 || !right.is_finite() {
            engine_bail!("xen::Camera3D", DegenerateLookAt,
                "up {:?} is parallel to the view direction {:?}", up, -direction);
        }
        let right = right.normalize();
        let up = direction.cross(right);

        let matrix = Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            direction.extend(0.0),
            position.extend(1.0),
        );
        self.apply_camera_matrix(matrix);
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.camera_matrix.w_axis.truncate()
    }

    pub fn set_position(&mut self, position: Vec3) -> Result<()> {
        self.ensure_not_in_use("set_position")?;
        let mut matrix = self.camera_matrix;
        matrix.w_axis = Vec4::new(position.x, position.y, position.z, self.camera_matrix.w_axis.w);
        self.apply_camera_matrix(matrix);
        Ok(())
    }

    /// Replace the camera matrix. A bit-for-bit identical matrix is a no-op.
    pub fn set_camera_matrix(&mut self, matrix: Mat4) -> Result<()> {
        self.ensure_not_in_use("set_camera_matrix")?;
        self.apply_camera_matrix(matrix);
        Ok(())
    }

    pub fn set_reverse_backface_culling(&mut self, reverse: bool) -> Result<()> {
        self.ensure_not_in_use("set_reverse_backface_culling")?;
        self.reverse_backface_culling = reverse;
        Ok(())
    }

    fn apply_camera_matrix(&mut self, matrix: Mat4) {
        // Exact IEEE comparison: any differing component is a change
        if matrix == self.camera_matrix {
            return;
        }
        self.camera_matrix = matrix;
        self.view_dirty = true;
        self.change_index = self.source.next();
    }

    fn ensure_not_in_use(&self, operation: &str) -> Result<()> {
        if self.in_use {
            engine_bail!("xen::Camera3D", InUse,
                "{} called while the camera is in use by an active pass", operation);
        }
        Ok(())
    }
}

impl StackLifecycle for Camera3D {
    fn in_use(&self) -> bool {
        self.in_use
    }

    fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
        self.projection.set_in_use(in_use);
    }

    fn begin(&mut self, target_size: Vec2) -> Result<()> {
        self.target_size = target_size;
        self.view_matrix();
        self.projection.projection_matrix(target_size)?;
        Ok(())
    }
}

impl Camera for Camera3D {
    fn kind(&self) -> &'static str {
        "Camera3D"
    }

    fn change_index(&self) -> ChangeIndex {
        self.change_index
    }

    fn camera_matrix(&self) -> Mat4 {
        self.camera_matrix
    }

    fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            self.view_matrix = self.camera_matrix.inverse();
            self.view_dirty = false;
        }
        self.view_matrix
    }

    fn projection_change_index(&self) -> ChangeIndex {
        self.projection.change_index()
    }

    fn projection_matrix(&mut self, target_size: Vec2) -> Result<Mat4> {
        self.projection.projection_matrix(target_size)
    }

    fn projection_matrix_gated(
        &mut self,
        matrix: &mut Mat4,
        target_size: Vec2,
        last_seen: &mut Option<ChangeIndex>,
    ) -> Result<bool> {
        self.projection.projection_matrix_gated(matrix, target_size, last_seen)
    }

    fn culling_planes(&mut self) -> Result<Frustum> {
        let view_changed = self.change_index.observe(&mut self.planes_index);
        let view = self.view_matrix();
        self.projection.frustum_planes(&view, view_changed)
    }

    fn reverse_backface_culling(&self) -> bool {
        self.reverse_backface_culling
    }

    fn is_orthographic(&self) -> bool {
        self.projection.orthographic()
    }

    fn target_size(&self) -> Vec2 {
        self.target_size
    }
}

#[cfg(test)]
#[path = "camera_3d_tests.rs"]
mod tests;
