/// CameraStack — the nested set of cameras active during a pass.
///
/// The top entry is the current camera and the only one marked in use.
/// Pushing deactivates the previous top; popping reactivates it and
/// calls `begin` again for its recorded draw-target size.
///
/// The stack borrows cameras through `SharedCamera` handles; it never
/// owns their state.

use std::sync::Arc;
use glam::Vec2;
use crate::camera::{lock_camera, SharedCamera};
use crate::error::Result;
use crate::{engine_bail, engine_trace};

struct Entry {
    camera: SharedCamera,
    target_size: Vec2,
}

#[derive(Default)]
pub struct CameraStack {
    entries: Vec<Entry>,
}

impl CameraStack {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of pushed cameras
    pub fn height(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current camera, if any
    pub fn camera(&self) -> Option<SharedCamera> {
        self.entries.last().map(|entry| entry.camera.clone())
    }

    /// Make `camera` current for a draw target of `target_size` pixels.
    ///
    /// On failure the previous top is restored and the stack is unchanged.
    pub fn push(&mut self, camera: SharedCamera, target_size: Vec2) -> Result<()> {
        if let Some(previous) = self.entries.last() {
            lock_camera(&previous.camera, "xen::CameraStack")?.set_in_use(false);
        }

        if let Err(err) = Self::activate(&camera, target_size) {
            if let Some(previous) = self.entries.last() {
                Self::activate(&previous.camera, previous.target_size)?;
            }
            return Err(err);
        }

        engine_trace!("xen::CameraStack", "push (height {})", self.entries.len() + 1);
        self.entries.push(Entry { camera, target_size });
        Ok(())
    }

    /// Remove the current camera and restore the one below it.
    ///
    /// Returns the removed camera. Fails with `StackUnderflow` when empty.
    pub fn pop(&mut self) -> Result<SharedCamera> {
        let Some(top) = self.entries.last() else {
            engine_bail!("xen::CameraStack", StackUnderflow, "pop on an empty camera stack");
        };

        // Deactivate first: the same camera may sit below itself
        lock_camera(&top.camera, "xen::CameraStack")?.set_in_use(false);
        let popped = top.camera.clone();
        self.entries.truncate(self.entries.len() - 1);
        if let Some(restored) = self.entries.last() {
            Self::activate(&restored.camera, restored.target_size)?;
        }

        engine_trace!("xen::CameraStack", "pop (height {})", self.entries.len());
        Ok(popped)
    }

    /// Begin the current camera again for a new draw-target size.
    ///
    /// No-op when the stack is empty or the size is unchanged.
    pub fn rebegin_top(&mut self, target_size: Vec2) -> Result<()> {
        let Some(top) = self.entries.last_mut() else {
            return Ok(());
        };
        if top.target_size == target_size {
            return Ok(());
        }
        lock_camera(&top.camera, "xen::CameraStack")?.begin(target_size)?;
        top.target_size = target_size;
        Ok(())
    }

    /// Replace the current camera without changing the stack height.
    ///
    /// Fails with `StackUnderflow` when there is no current camera.
    pub fn set_camera(&mut self, camera: SharedCamera) -> Result<()> {
        let Some(top) = self.entries.last_mut() else {
            engine_bail!("xen::CameraStack", StackUnderflow, "set_camera with no camera pushed");
        };
        if Arc::ptr_eq(&top.camera, &camera) {
            return Ok(());
        }

        lock_camera(&top.camera, "xen::CameraStack")?.set_in_use(false);
        if let Err(err) = Self::activate(&camera, top.target_size) {
            Self::activate(&top.camera, top.target_size)?;
            return Err(err);
        }
        top.camera = camera;
        Ok(())
    }

    /// Draw-target size recorded for the current camera
    pub fn target_size(&self) -> Option<Vec2> {
        self.entries.last().map(|entry| entry.target_size)
    }

    fn activate(camera: &SharedCamera, target_size: Vec2) -> Result<()> {
        let mut guard = lock_camera(camera, "xen::CameraStack")?;
        guard.begin(target_size)?;
        guard.set_in_use(true);
        Ok(())
    }
}

impl Drop for CameraStack {
    fn drop(&mut self) {
        // Release in-use flags so cameras stay mutable after an aborted pass
        for entry in &self.entries {
            if let Ok(mut camera) = entry.camera.lock() {
                camera.set_in_use(false);
            }
        }
    }
}

#[cfg(test)]
#[path = "camera_stack_tests.rs"]
mod tests;
