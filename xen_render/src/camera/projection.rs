/// Projection — clip distances, field of view, aspect, region.
///
/// Owns a cached projection matrix and the six frustum planes derived from
/// it and a view matrix. Both caches are rebuilt lazily, at most once per
/// distinct (change index, view) pair. Every effective mutation issues a new
/// change index from the shared source, so consumers holding the previous
/// index know to re-fetch.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec4};
use crate::error::Result;
use crate::{engine_bail, engine_trace};
use super::change_index::{ChangeIndex, ChangeIndexSource};
use super::frustum::Frustum;

bitflags! {
    /// Caches invalidated by a projection change
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ProjectionDirty: u8 {
        /// Projection matrix must be rebuilt
        const MATRIX = 1 << 0;
        /// Frustum planes must be rebuilt
        const FRUSTUM = 1 << 1;
    }
}

/// Sub-rectangle of the full projection, in normalised [0,1]² space.
///
/// Used for split-screen or tiled rendering with a single projection
/// matrix: the full projected range is squeezed into this rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Region {
    /// The whole [0,1]² rectangle (no remap)
    pub const FULL: Region = Region { top_left: Vec2::ZERO, bottom_right: Vec2::ONE };

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            top_left: Vec2::new(left, top),
            bottom_right: Vec2::new(right, bottom),
        }
    }

    pub fn is_full(&self) -> bool {
        *self == Region::FULL
    }

    /// Translate + scale applied after projection to remap clip x/y into the region
    pub fn remap_matrix(&self) -> Mat4 {
        let scale = self.bottom_right - self.top_left;
        let offset = self.top_left + self.bottom_right - Vec2::ONE;
        Mat4::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(offset.x, offset.y, 0.0, 1.0),
        )
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::FULL
    }
}

/// Projection configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in radians
    pub field_of_view: f32,
    /// Near clip distance
    pub near_clip: f32,
    /// Far clip distance
    pub far_clip: f32,
    /// Explicit aspect ratio; `None` derives it from the draw target each frame
    pub aspect: Option<f32>,
    /// Orthographic instead of perspective
    pub orthographic: bool,
    /// Sub-window of the full projection
    pub region: Region,
    /// Left-handed instead of right-handed clip depth
    pub left_handed: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            field_of_view: std::f32::consts::FRAC_PI_4,
            near_clip: 1.0,
            far_clip: 1000.0,
            aspect: None,
            orthographic: false,
            region: Region::FULL,
            left_handed: false,
        }
    }
}

/// Cache rebuild counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    /// Times the projection matrix was recalculated
    pub matrix_rebuilds: u64,
    /// Times the frustum planes were recalculated
    pub frustum_rebuilds: u64,
}

/// Projection owned by a `Camera3D`.
#[derive(Debug, Clone)]
pub struct Projection {
    config: ProjectionConfig,
    /// Replaces the calculated matrix verbatim when set
    fixed_matrix: Option<Mat4>,
    pause_frustum_updates: bool,

    source: ChangeIndexSource,
    change_index: ChangeIndex,

    resolved_aspect: f32,

    matrix: Mat4,
    frustum: Frustum,
    has_frustum: bool,
    dirty: ProjectionDirty,

    in_use: bool,
    stats: ProjectionStats,
}

impl Projection {
    /// Default perspective projection
    pub fn new(source: &ChangeIndexSource) -> Self {
        Self::from_config(source, ProjectionConfig::default())
    }

    pub fn from_config(source: &ChangeIndexSource, config: ProjectionConfig) -> Self {
        Self {
            config,
            fixed_matrix: None,
            pause_frustum_updates: false,
            source: source.clone(),
            change_index: source.next(),
            resolved_aspect: config.aspect.unwrap_or(1.0),
            matrix: Mat4::IDENTITY,
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
            has_frustum: false,
            dirty: ProjectionDirty::all(),
            in_use: false,
            stats: ProjectionStats::default(),
        }
    }

    /// Projection that always yields `matrix`, e.g. to match another
    /// renderer exactly. Clip and aspect settings are ignored.
    pub fn new_fixed(source: &ChangeIndexSource, matrix: Mat4) -> Self {
        let mut projection = Self::new(source);
        projection.fixed_matrix = Some(matrix);
        projection
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn field_of_view(&self) -> f32 {
        self.config.field_of_view
    }

    pub fn near_clip(&self) -> f32 {
        self.config.near_clip
    }

    pub fn far_clip(&self) -> f32 {
        self.config.far_clip
    }

    /// Explicit aspect, or `None` when derived from the draw target
    pub fn aspect(&self) -> Option<f32> {
        self.config.aspect
    }

    /// Aspect used by the last matrix calculation
    pub fn resolved_aspect(&self) -> f32 {
        self.config.aspect.unwrap_or(self.resolved_aspect)
    }

    pub fn orthographic(&self) -> bool {
        self.config.orthographic
    }

    pub fn region(&self) -> Region {
        self.config.region
    }

    pub fn use_left_handed_projection(&self) -> bool {
        self.config.left_handed
    }

    pub fn fixed_matrix(&self) -> Option<&Mat4> {
        self.fixed_matrix.as_ref()
    }

    pub fn pause_frustum_cull_plane_updates(&self) -> bool {
        self.pause_frustum_updates
    }

    pub fn change_index(&self) -> ChangeIndex {
        self.change_index
    }

    pub fn stats(&self) -> ProjectionStats {
        self.stats
    }

    pub fn in_use(&self) -> bool {
        self.in_use
    }

    // ===== SETTERS =====

    pub fn set_field_of_view(&mut self, field_of_view: f32) -> Result<()> {
        self.ensure_not_in_use("set_field_of_view")?;
        if self.config.field_of_view != field_of_view {
            self.config.field_of_view = field_of_view;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_aspect(&mut self, aspect: Option<f32>) -> Result<()> {
        self.ensure_not_in_use("set_aspect")?;
        if self.config.aspect != aspect {
            self.config.aspect = aspect;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_near_clip(&mut self, near_clip: f32) -> Result<()> {
        self.ensure_not_in_use("set_near_clip")?;
        if self.config.near_clip != near_clip {
            self.config.near_clip = near_clip;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_far_clip(&mut self, far_clip: f32) -> Result<()> {
        self.ensure_not_in_use("set_far_clip")?;
        if self.config.far_clip != far_clip {
            self.config.far_clip = far_clip;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_region(&mut self, region: Region) -> Result<()> {
        self.ensure_not_in_use("set_region")?;
        if self.config.region != region {
            self.config.region = region;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_orthographic(&mut self, orthographic: bool) -> Result<()> {
        self.ensure_not_in_use("set_orthographic")?;
        if self.config.orthographic != orthographic {
            self.config.orthographic = orthographic;
            self.mark_changed();
        }
        Ok(())
    }

    pub fn set_use_left_handed_projection(&mut self, left_handed: bool) -> Result<()> {
        self.ensure_not_in_use("set_use_left_handed_projection")?;
        if self.config.left_handed != left_handed {
            self.config.left_handed = left_handed;
            self.mark_changed();
        }
        Ok(())
    }

    /// Switch to (or away from) a fixed, caller-supplied matrix
    pub fn set_fixed_matrix(&mut self, matrix: Option<Mat4>) -> Result<()> {
        self.ensure_not_in_use("set_fixed_matrix")?;
        if self.fixed_matrix != matrix {
            self.fixed_matrix = matrix;
            self.mark_changed();
        }
        Ok(())
    }

    /// Freeze the frustum planes while everything else keeps updating.
    ///
    /// Debug aid for looking at what gets culled from outside the frustum.
    /// Allowed while in use; it never affects the projection matrix.
    pub fn set_pause_frustum_cull_plane_updates(&mut self, pause: bool) {
        if self.pause_frustum_updates != pause {
            self.pause_frustum_updates = pause;
            if !pause {
                self.dirty.insert(ProjectionDirty::FRUSTUM);
            }
        }
    }

    pub(crate) fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    // ===== MATRICES =====

    /// Projection matrix for a draw target of `target_size` pixels.
    pub fn projection_matrix(&mut self, target_size: Vec2) -> Result<Mat4> {
        self.update_target_size(target_size);
        self.ensure_matrix()?;
        Ok(self.matrix)
    }

    /// Write the projection matrix into `matrix` only if `last_seen` is stale.
    ///
    /// Returns `false` and leaves `matrix` untouched when nothing changed
    /// since the caller's last observation.
    pub fn projection_matrix_gated(
        &mut self,
        matrix: &mut Mat4,
        target_size: Vec2,
        last_seen: &mut Option<ChangeIndex>,
    ) -> Result<bool> {
        self.update_target_size(target_size);
        if *last_seen == Some(self.change_index) {
            return Ok(false);
        }
        self.ensure_matrix()?;
        *matrix = self.matrix;
        *last_seen = Some(self.change_index);
        Ok(true)
    }

    /// Frustum planes for `projection * view`.
    ///
    /// Rebuilt only if the projection changed or the caller reports a view
    /// change. While paused, the last planes are returned unchanged.
    pub fn frustum_planes(&mut self, view: &Mat4, view_changed: bool) -> Result<Frustum> {
        if self.pause_frustum_updates && self.has_frustum {
            return Ok(self.frustum);
        }
        self.ensure_matrix()?;
        if view_changed || !self.has_frustum || self.dirty.contains(ProjectionDirty::FRUSTUM) {
            self.frustum = Frustum::from_view_projection(&(self.matrix * *view));
            self.dirty.remove(ProjectionDirty::FRUSTUM);
            self.has_frustum = true;
            self.stats.frustum_rebuilds += 1;
        }
        Ok(self.frustum)
    }

    /// Re-derive the automatic aspect from the draw target size.
    ///
    /// Only a different resulting aspect invalidates the matrix.
    pub(crate) fn update_target_size(&mut self, target_size: Vec2) {
        if self.fixed_matrix.is_some()
            || self.config.aspect.is_some()
            || self.config.orthographic
            || target_size.y == 0.0
        {
            return;
        }
        let aspect = target_size.x / target_size.y;
        if aspect != self.resolved_aspect {
            self.resolved_aspect = aspect;
            self.mark_changed();
        }
    }

    fn mark_changed(&mut self) {
        self.dirty = ProjectionDirty::all();
        self.change_index = self.source.next();
    }

    fn ensure_not_in_use(&self, operation: &str) -> Result<()> {
        if self.in_use {
            engine_bail!("xen::Projection", InUse,
                "{} called while the projection is in use by an active pass", operation);
        }
        Ok(())
    }

    fn ensure_matrix(&mut self) -> Result<()> {
        if self.dirty.contains(ProjectionDirty::MATRIX) {
            self.matrix = self.calculate_matrix()?;
            self.dirty.remove(ProjectionDirty::MATRIX);
            self.stats.matrix_rebuilds += 1;
            engine_trace!("xen::Projection", "matrix rebuilt (change index {})",
                self.change_index.value());
        }
        Ok(())
    }

    fn calculate_matrix(&self) -> Result<Mat4> {
        if let Some(fixed) = self.fixed_matrix {
            return Ok(fixed);
        }

        let config = &self.config;
        let mut matrix = if config.orthographic {
            Mat4::orthographic_rh(-0.5, 0.5, -0.5, 0.5, config.near_clip, config.far_clip)
        } else {
            Mat4::perspective_rh(
                config.field_of_view,
                self.resolved_aspect(),
                config.near_clip,
                config.far_clip,
            )
        };

        // Negating M33/M34 turns the right-handed matrix into its left-handed twin
        if config.left_handed {
            matrix.z_axis.z = -matrix.z_axis.z;
            matrix.z_axis.w = -matrix.z_axis.w;
        }

        if !matrix.is_finite() {
            engine_bail!("xen::Projection", NonFiniteProjection,
                "non-finite projection matrix (fov {}, aspect {}, near {}, far {})",
                config.field_of_view, self.resolved_aspect(),
                config.near_clip, config.far_clip);
        }

        if !config.region.is_full() {
            matrix = config.region.remap_matrix() * matrix;
        }

        Ok(matrix)
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
