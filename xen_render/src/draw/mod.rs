//! Draw module: render-pass state.
//!
//! `DrawState` hosts the camera and culler stacks for the passes of a
//! frame and exposes the composed culling test to the renderer.

mod draw_target;
mod camera_stack;
mod cullers_stack;
mod draw_state;
mod camera_globals;

pub use draw_target::{DrawTarget, SizedDrawTarget};
pub use camera_stack::CameraStack;
pub use cullers_stack::CullersStack;
pub use draw_state::{DrawState, DrawStateConfig, CameraScope};
pub use camera_globals::{CameraGlobals, CameraGlobalsCache};
