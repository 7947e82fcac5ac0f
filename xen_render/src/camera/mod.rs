//! Camera module: cameras, projection and frustum planes.
//!
//! Cameras are long-lived application objects. The draw state borrows
//! them through `SharedCamera` handles for the duration of a push.
//! Every matrix carries a `ChangeIndex` so consumers can skip work
//! when nothing moved.

mod change_index;
mod camera;
mod projection;
mod frustum;
mod camera_3d;
mod camera_2d;
mod screen_projection;

pub use change_index::{ChangeIndex, ChangeIndexSource};
pub use camera::{Camera, StackLifecycle, SharedCamera, share_camera, lock_camera};
pub use projection::{Projection, ProjectionConfig, ProjectionDirty, ProjectionStats, Region};
pub use frustum::{
    Frustum, ContainmentType, plane_distance,
    PLANE_NEAR, PLANE_FAR, PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP,
    sphere_in_frustum, sphere_intersects_frustum,
    box_in_frustum, box_intersects_frustum,
    aabb_in_frustum, aabb_intersects_frustum,
};
pub use camera_3d::Camera3D;
pub use camera_2d::{Camera2D, ViewRectProvider, DefaultViewRect};
pub use screen_projection::CameraProjectExt;
