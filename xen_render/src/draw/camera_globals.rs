/// Camera shader globals.
///
/// `CameraGlobals` is the per-pass camera block uploaded to shaders.
/// `CameraGlobalsCache` keeps one up to date from whichever camera is
/// current, rewriting only the parts whose change index moved.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};
use crate::camera::{Camera, ChangeIndex};
use crate::error::Result;

/// GPU layout: std140/std430 compatible, 224 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraGlobals {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    /// xyz = world position, w = 1
    pub camera_position: Vec4,
    /// xy = size in pixels, zw = 1 / size
    pub target_size: Vec4,
}

impl Default for CameraGlobals {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            camera_position: Vec4::W,
            target_size: Vec4::ONE,
        }
    }
}

/// Change-gated `CameraGlobals`.
#[derive(Debug, Clone, Default)]
pub struct CameraGlobalsCache {
    globals: CameraGlobals,
    view_seen: Option<ChangeIndex>,
    projection_seen: Option<ChangeIndex>,
    target_size: Option<Vec2>,
    updates: u64,
}

impl CameraGlobalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the block up to date with `camera`.
    ///
    /// Returns true if anything was rewritten and the block needs uploading.
    pub fn refresh(&mut self, camera: &mut dyn Camera) -> Result<bool> {
        let target_size = camera.target_size();

        let view_changed = camera.view_matrix_gated(&mut self.globals.view, &mut self.view_seen);
        let projection_changed = camera.projection_matrix_gated(
            &mut self.globals.projection,
            target_size,
            &mut self.projection_seen,
        )?;
        let size_changed = self.target_size != Some(target_size);

        if !(view_changed || projection_changed || size_changed) {
            return Ok(false);
        }

        if view_changed {
            self.globals.camera_position = camera.camera_position().extend(1.0);
        }
        if view_changed || projection_changed {
            self.globals.view_projection = self.globals.projection * self.globals.view;
        }
        if size_changed {
            self.globals.target_size = Vec4::new(
                target_size.x,
                target_size.y,
                recip_or_zero(target_size.x),
                recip_or_zero(target_size.y),
            );
            self.target_size = Some(target_size);
        }

        self.updates += 1;
        Ok(true)
    }

    /// Forget every observation; the next refresh rewrites the whole block.
    pub fn invalidate(&mut self) {
        self.view_seen = None;
        self.projection_seen = None;
        self.target_size = None;
    }

    pub fn globals(&self) -> &CameraGlobals {
        &self.globals
    }

    /// Bytes ready for a uniform buffer upload
    pub fn bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.globals)
    }

    /// Number of refreshes that rewrote the block
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

fn recip_or_zero(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { 1.0 / value }
}

#[cfg(test)]
#[path = "camera_globals_tests.rs"]
mod tests;
