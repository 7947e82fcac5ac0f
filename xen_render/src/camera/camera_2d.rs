/// Screen-space camera for UI and 2D rendering.
///
/// There is no real projection: the projection matrix is always identity.
/// The view matrix maps a view rectangle (bottom-left, top-right) straight
/// into clip space, and the camera matrix is its inverse.
///
/// 2D cameras are typically re-pushed for every UI draw call, so `begin`
/// only rebuilds the matrices when the view rectangle actually changed.

use glam::{Mat4, Vec2, Vec4};
use crate::error::Result;
use crate::engine_bail;
use super::camera::{Camera, StackLifecycle};
use super::change_index::{ChangeIndex, ChangeIndexSource};
use super::frustum::Frustum;

/// Supplies the view rectangle of a `Camera2D` each time it begins.
pub trait ViewRectProvider: Send {
    /// Returns `(bottom_left, top_right)` in the camera's 2D coordinates.
    fn view_rect(&self, target_size: Vec2, use_normalised_coordinates: bool) -> (Vec2, Vec2);
}

/// [0,1]² when normalised, otherwise the draw target's pixel rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultViewRect;

impl ViewRectProvider for DefaultViewRect {
    fn view_rect(&self, target_size: Vec2, use_normalised_coordinates: bool) -> (Vec2, Vec2) {
        if use_normalised_coordinates {
            (Vec2::ZERO, Vec2::ONE)
        } else {
            (Vec2::ZERO, target_size)
        }
    }
}

/// Screen-space camera.
pub struct Camera2D {
    view_provider: Box<dyn ViewRectProvider>,
    use_normalised_coordinates: bool,
    /// Rectangle the matrices were built from; `None` forces a rebuild
    view_rect: Option<(Vec2, Vec2)>,

    camera_matrix: Mat4,
    view_matrix: Mat4,

    source: ChangeIndexSource,
    change_index: ChangeIndex,
    /// Identity never changes: one index for the camera's lifetime
    projection_index: ChangeIndex,

    frustum: Frustum,
    planes_index: Option<ChangeIndex>,

    reverse_backface_culling: bool,
    in_use: bool,
    target_size: Vec2,
}

impl Camera2D {
    /// Normalised-coordinate camera using `DefaultViewRect`
    pub fn new(source: &ChangeIndexSource) -> Self {
        Self::with_view_provider(source, Box::new(DefaultViewRect))
    }

    /// Camera with a custom view rectangle
    pub fn with_view_provider(source: &ChangeIndexSource, view_provider: Box<dyn ViewRectProvider>) -> Self {
        Self {
            view_provider,
            use_normalised_coordinates: true,
            view_rect: None,
            camera_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            source: source.clone(),
            change_index: source.next(),
            projection_index: source.next(),
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
            planes_index: None,
            reverse_backface_culling: false,
            in_use: false,
            target_size: Vec2::ONE,
        }
    }

    pub fn use_normalised_coordinates(&self) -> bool {
        self.use_normalised_coordinates
    }

    pub fn set_use_normalised_coordinates(&mut self, normalised: bool) -> Result<()> {
        self.ensure_not_in_use("set_use_normalised_coordinates")?;
        if self.use_normalised_coordinates != normalised {
            self.use_normalised_coordinates = normalised;
            self.view_rect = None;
        }
        Ok(())
    }

    pub fn set_view_provider(&mut self, view_provider: Box<dyn ViewRectProvider>) -> Result<()> {
        self.ensure_not_in_use("set_view_provider")?;
        self.view_provider = view_provider;
        self.view_rect = None;
        Ok(())
    }

    pub fn set_reverse_backface_culling(&mut self, reverse: bool) -> Result<()> {
        self.ensure_not_in_use("set_reverse_backface_culling")?;
        self.reverse_backface_culling = reverse;
        Ok(())
    }

    /// Rectangle used by the last `begin`, if any
    pub fn view_rect(&self) -> Option<(Vec2, Vec2)> {
        self.view_rect
    }

    /// Re-evaluate the view rectangle; rebuilds matrices only if it moved.
    fn refresh_view(&mut self, target_size: Vec2) -> Result<bool> {
        let (bottom_left, top_right) =
            self.view_provider.view_rect(target_size, self.use_normalised_coordinates);
        if self.view_rect == Some((bottom_left, top_right)) {
            return Ok(false);
        }

        let size = top_right - bottom_left;
        if size.x == 0.0 || size.y == 0.0 || !size.is_finite() {
            engine_bail!("xen::Camera2D", InvalidArgument,
                "empty view rectangle {:?} .. {:?}", bottom_left, top_right);
        }
        let center = (bottom_left + top_right) * 0.5;

        self.view_matrix = Mat4::from_cols(
            Vec4::new(2.0 / size.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / size.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-2.0 * center.x / size.x, -2.0 * center.y / size.y, 0.0, 1.0),
        );
        self.camera_matrix = Mat4::from_cols(
            Vec4::new(size.x * 0.5, 0.0, 0.0, 0.0),
            Vec4::new(0.0, size.y * 0.5, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(center.x, center.y, 0.0, 1.0),
        );
        self.view_rect = Some((bottom_left, top_right));
        self.change_index = self.source.next();
        Ok(true)
    }

    fn ensure_not_in_use(&self, operation: &str) -> Result<()> {
        if self.in_use {
            engine_bail!("xen::Camera2D", InUse,
                "{} called while the camera is in use by an active pass", operation);
        }
        Ok(())
    }
}

impl StackLifecycle for Camera2D {
    fn in_use(&self) -> bool {
        self.in_use
    }

    fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    fn begin(&mut self, target_size: Vec2) -> Result<()> {
        self.target_size = target_size;
        self.refresh_view(target_size)?;
        Ok(())
    }
}

impl Camera for Camera2D {
    fn kind(&self) -> &'static str {
        "Camera2D"
    }

    fn change_index(&self) -> ChangeIndex {
        self.change_index
    }

    fn camera_matrix(&self) -> Mat4 {
        self.camera_matrix
    }

    fn view_matrix(&mut self) -> Mat4 {
        self.view_matrix
    }

    fn projection_change_index(&self) -> ChangeIndex {
        self.projection_index
    }

    fn projection_matrix(&mut self, _target_size: Vec2) -> Result<Mat4> {
        Ok(Mat4::IDENTITY)
    }

    fn projection_matrix_gated(
        &mut self,
        matrix: &mut Mat4,
        _target_size: Vec2,
        last_seen: &mut Option<ChangeIndex>,
    ) -> Result<bool> {
        if !self.projection_index.observe(last_seen) {
            return Ok(false);
        }
        *matrix = Mat4::IDENTITY;
        Ok(true)
    }

    fn culling_planes(&mut self) -> Result<Frustum> {
        if self.change_index.observe(&mut self.planes_index) {
            self.frustum = Frustum::from_view_projection(&self.view_matrix);
        }
        Ok(self.frustum)
    }

    fn reverse_backface_culling(&self) -> bool {
        self.reverse_backface_culling
    }

    fn is_orthographic(&self) -> bool {
        true
    }

    fn target_size(&self) -> Vec2 {
        self.target_size
    }
}

#[cfg(test)]
#[path = "camera_2d_tests.rs"]
mod tests;
