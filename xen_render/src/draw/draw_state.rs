/// DrawState — per-pass host for the camera and culler stacks.
///
/// Owns the frame index, the active draw-target size, and the culling
/// composition the renderer tests geometry against:
///
///   pre-cullers (newest first) -> camera frustum -> post-cullers (oldest first)
///
/// The first rejection short-circuits the rest.

use std::ops::{Deref, DerefMut};
use glam::{Mat4, Vec2, Vec3};
use crate::camera::{lock_camera, ContainmentType, Frustum, SharedCamera};
use crate::cull::{Bounds, CullPrimitive, SharedCuller};
use crate::error::Result;
use crate::{engine_bail, engine_trace};
use super::camera_stack::CameraStack;
use super::cullers_stack::CullersStack;
use super::draw_target::DrawTarget;

/// Draw state configuration
#[derive(Debug, Clone)]
pub struct DrawStateConfig {
    /// Capacity of the pre-culler stack
    pub max_pre_cullers: usize,
    /// Capacity of the post-culler stack
    pub max_post_cullers: usize,
    /// Check stack heights at pass boundaries
    pub validate_stack_balance: bool,
}

impl Default for DrawStateConfig {
    fn default() -> Self {
        Self {
            max_pre_cullers: 16,
            max_post_cullers: 16,
            validate_stack_balance: true,
        }
    }
}

/// Stack heights recorded by `begin_pass`
#[derive(Debug, Clone, Copy)]
struct PassMark {
    cameras: usize,
    pre_cullers: usize,
    post_cullers: usize,
    target_size: Vec2,
}

pub struct DrawState {
    config: DrawStateConfig,
    cameras: CameraStack,
    cullers: CullersStack,
    /// Planes of the current camera, refreshed whenever the top changes
    frustum: Option<Frustum>,
    passes: Vec<PassMark>,
    target_size: Vec2,
    frame_index: u64,
    asynchronous: bool,
}

impl DrawState {
    pub fn new(config: DrawStateConfig) -> Self {
        Self {
            cullers: CullersStack::new(config.max_pre_cullers, config.max_post_cullers),
            config,
            cameras: CameraStack::new(),
            frustum: None,
            passes: Vec::new(),
            target_size: Vec2::ONE,
            frame_index: 0,
            asynchronous: false,
        }
    }

    pub fn config(&self) -> &DrawStateConfig {
        &self.config
    }

    // ===== FRAME =====

    /// Start a new frame; returns the new frame index.
    pub fn begin_frame(&mut self) -> u64 {
        self.frame_index += 1;
        self.frame_index
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Set by the host when this state is driven off the render thread.
    pub fn set_asynchronous_state(&mut self, asynchronous: bool) {
        self.asynchronous = asynchronous;
    }

    pub fn is_asynchronous_state(&self) -> bool {
        self.asynchronous
    }

    // ===== PASSES =====

    /// Begin a pass rendering into `target`. Passes may nest.
    pub fn begin_pass(&mut self, target: &dyn DrawTarget) -> Result<()> {
        self.begin_pass_with_size(target.size())
    }

    /// Begin a pass for a draw target of `target_size` pixels.
    ///
    /// A camera already on the stack is begun again for the new size.
    pub fn begin_pass_with_size(&mut self, target_size: Vec2) -> Result<()> {
        self.passes.push(PassMark {
            cameras: self.cameras.height(),
            pre_cullers: self.cullers.pre_culler_count(),
            post_cullers: self.cullers.post_culler_count(),
            target_size: self.target_size,
        });
        self.target_size = target_size;
        engine_trace!("xen::DrawState", "begin pass {} (frame {}, {}x{})",
            self.passes.len(), self.frame_index, target_size.x, target_size.y);
        self.sync_camera_target_size()
    }

    /// End the innermost pass.
    ///
    /// Fails with `UnbalancedStack` if no pass is open or, when validation
    /// is enabled, if a camera or culler push was not matched by a pop.
    pub fn end_pass(&mut self) -> Result<()> {
        let Some(mark) = self.passes.pop() else {
            engine_bail!("xen::DrawState", UnbalancedStack, "end_pass without begin_pass");
        };
        self.target_size = mark.target_size;
        self.sync_camera_target_size()?;

        if self.config.validate_stack_balance {
            let cameras = self.cameras.height();
            let pre = self.cullers.pre_culler_count();
            let post = self.cullers.post_culler_count();
            if (cameras, pre, post) != (mark.cameras, mark.pre_cullers, mark.post_cullers) {
                engine_bail!("xen::DrawState", UnbalancedStack,
                    "pass ended with cameras {} (expected {}), pre-cullers {} (expected {}), post-cullers {} (expected {})",
                    cameras, mark.cameras, pre, mark.pre_cullers, post, mark.post_cullers);
            }
        }

        engine_trace!("xen::DrawState", "end pass {}", self.passes.len() + 1);
        Ok(())
    }

    /// Number of open passes
    pub fn pass_depth(&self) -> usize {
        self.passes.len()
    }

    /// Draw-target size of the innermost pass
    pub fn target_size(&self) -> Vec2 {
        self.target_size
    }

    fn sync_camera_target_size(&mut self) -> Result<()> {
        match self.cameras.target_size() {
            Some(size) if size != self.target_size => {
                self.cameras.rebegin_top(self.target_size)?;
                self.refresh_culling_planes()
            }
            _ => Ok(()),
        }
    }

    // ===== CAMERAS =====

    /// Current camera, if any
    pub fn camera(&self) -> Option<SharedCamera> {
        self.cameras.camera()
    }

    pub fn camera_stack_height(&self) -> usize {
        self.cameras.height()
    }

    /// Push a camera for the current pass's draw target.
    pub fn push_camera(&mut self, camera: SharedCamera) -> Result<()> {
        self.cameras.push(camera, self.target_size)?;
        self.refresh_culling_planes()
    }

    /// Push a camera and pop it again when the returned guard drops.
    pub fn push_camera_scope(&mut self, camera: SharedCamera) -> Result<CameraScope<'_>> {
        self.push_camera(camera)?;
        let height = self.cameras.height();
        Ok(CameraScope { state: self, height, released: false })
    }

    pub fn pop_camera(&mut self) -> Result<SharedCamera> {
        let popped = self.cameras.pop()?;
        self.refresh_culling_planes()?;
        Ok(popped)
    }

    /// Replace the current camera without nesting.
    pub fn set_camera(&mut self, camera: SharedCamera) -> Result<()> {
        self.cameras.set_camera(camera)?;
        self.refresh_culling_planes()
    }

    /// Re-read the culling planes of the current camera.
    ///
    /// Called on every camera change; call it directly after toggling
    /// `pause_frustum_cull_plane_updates` on an active camera.
    pub fn refresh_culling_planes(&mut self) -> Result<()> {
        self.frustum = match self.cameras.camera() {
            Some(camera) => {
                let mut guard = lock_camera(&camera, "xen::DrawState")?;
                Some(guard.culling_planes()?)
            }
            None => None,
        };
        Ok(())
    }

    /// Planes used by the frustum step; `None` with no camera pushed
    pub fn culling_planes(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    // ===== CULLERS =====

    pub fn push_pre_culler(&mut self, culler: SharedCuller) -> Result<()> {
        self.cullers.push_pre_culler(culler)
    }

    pub fn pop_pre_culler(&mut self) -> Result<SharedCuller> {
        self.cullers.pop_pre_culler()
    }

    pub fn push_post_culler(&mut self, culler: SharedCuller) -> Result<()> {
        self.cullers.push_post_culler(culler)
    }

    pub fn pop_post_culler(&mut self) -> Result<SharedCuller> {
        self.cullers.pop_post_culler()
    }

    pub fn cullers(&self) -> &CullersStack {
        &self.cullers
    }

    // ===== CULLING =====

    /// Indices of the `bounds` that pass every active culler.
    pub fn visible_indices(&self, bounds: &[Bounds]) -> Vec<usize> {
        bounds
            .iter()
            .enumerate()
            .filter_map(|(index, b)| if self.test_bounds(b) { Some(index) } else { None })
            .collect()
    }

    /// Cullers in evaluation order; the frustum step is skipped with no camera.
    fn active_cullers(&self) -> impl Iterator<Item = &dyn CullPrimitive> + '_ {
        let pre = self.cullers.pre_cullers().map(|c| c.as_ref() as &dyn CullPrimitive);
        let frustum = self.frustum.iter().map(|f| f as &dyn CullPrimitive);
        let post = self.cullers.post_cullers().map(|c| c.as_ref() as &dyn CullPrimitive);
        pre.chain(frustum).chain(post)
    }

    fn compose_test(&self, test: impl Fn(&dyn CullPrimitive) -> bool) -> bool {
        self.active_cullers().all(test)
    }

    fn compose_intersect(&self, intersect: impl Fn(&dyn CullPrimitive) -> ContainmentType) -> ContainmentType {
        let mut result = ContainmentType::Contains;
        for culler in self.active_cullers() {
            result = result.combine(intersect(culler));
            if result == ContainmentType::Disjoint {
                break;
            }
        }
        result
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self::new(DrawStateConfig::default())
    }
}

impl CullPrimitive for DrawState {
    fn test_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> bool {
        self.compose_test(|c| c.test_world_box(min, max, world))
    }

    fn test_world_box_aabb(&self, min: Vec3, max: Vec3) -> bool {
        self.compose_test(|c| c.test_world_box_aabb(min, max))
    }

    fn test_world_sphere(&self, radius: f32, center: Vec3) -> bool {
        self.compose_test(|c| c.test_world_sphere(radius, center))
    }

    fn intersect_world_box(&self, min: Vec3, max: Vec3, world: &Mat4) -> ContainmentType {
        self.compose_intersect(|c| c.intersect_world_box(min, max, world))
    }

    fn intersect_world_box_aabb(&self, min: Vec3, max: Vec3) -> ContainmentType {
        self.compose_intersect(|c| c.intersect_world_box_aabb(min, max))
    }

    fn intersect_world_sphere(&self, radius: f32, center: Vec3) -> ContainmentType {
        self.compose_intersect(|c| c.intersect_world_sphere(radius, center))
    }
}

// ===== SCOPED PUSH =====

/// Guard returned by `DrawState::push_camera_scope`; pops the camera on drop.
///
/// Derefs to the `DrawState` so the pass keeps drawing through it. The
/// guard only pops its own push: if the stack height changed underneath
/// it, the stack is left alone and `end_pass` reports the imbalance.
pub struct CameraScope<'a> {
    state: &'a mut DrawState,
    /// Stack height right after the guarded push
    height: usize,
    released: bool,
}

impl CameraScope<'_> {
    /// Pop the guarded camera now, reporting any failure.
    pub fn release(mut self) -> Result<SharedCamera> {
        self.released = true;
        self.pop_guarded()
    }

    fn pop_guarded(&mut self) -> Result<SharedCamera> {
        let height = self.state.cameras.height();
        if height != self.height {
            engine_bail!("xen::DrawState", UnbalancedStack,
                "camera scope pushed at height {} released at height {}; stack left alone",
                self.height, height);
        }
        self.state.pop_camera()
    }
}

impl Deref for CameraScope<'_> {
    type Target = DrawState;

    fn deref(&self) -> &DrawState {
        self.state
    }
}

impl DerefMut for CameraScope<'_> {
    fn deref_mut(&mut self) -> &mut DrawState {
        self.state
    }
}

impl Drop for CameraScope<'_> {
    fn drop(&mut self) {
        if !self.released {
            // Logged at ERROR where raised; end_pass surfaces the imbalance
            let _ = self.pop_guarded();
        }
    }
}

#[cfg(test)]
#[path = "draw_state_tests.rs"]
mod tests;
