/// Pixel size of the surface a pass renders into.
///
/// The camera core only needs its pixel size; allocation, swapchains and
/// presentation belong to the host.

use glam::Vec2;

pub trait DrawTarget: Send + Sync {
    /// Width and height in pixels
    fn size(&self) -> Vec2;

    fn width(&self) -> f32 {
        self.size().x
    }

    fn height(&self) -> f32 {
        self.size().y
    }
}

/// Fixed-size target (off-screen buffers, tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedDrawTarget {
    size: Vec2,
}

impl SizedDrawTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Vec2::new(width as f32, height as f32) }
    }

    /// Window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Vec2::new(width as f32, height as f32);
    }
}

impl DrawTarget for SizedDrawTarget {
    fn size(&self) -> Vec2 {
        self.size
    }
}
