/*!
# Xen Render

Camera and frustum-culling core of the Xen rendering framework.

## Architecture

- **Camera3D / Camera2D**: cameras with lazily derived view and projection
  matrices, change-index tracked so consumers only recompute when needed
- **Projection**: perspective or orthographic, viewport regions, auto aspect
- **Frustum**: six-plane extraction and the sphere/box culling tests
- **DrawState**: camera and culler stacks for a render pass, composed into
  one `CullPrimitive` the renderer tests geometry against

Everything public is reached through the `xen` namespace module.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod cull;
pub mod draw;

// Main xen namespace module
pub mod xen {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide logger and change-index source
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Cameras, projection, frustum planes
    pub mod camera {
        pub use crate::camera::*;
    }

    // Culling surface and extra cullers
    pub mod cull {
        pub use crate::cull::*;
    }

    // Render-pass state
    pub mod draw {
        pub use crate::draw::*;
    }
}

// Re-export math library at crate root
pub use glam;
