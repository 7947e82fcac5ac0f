//! Cull module: the visibility test surface and extra cullers.
//!
//! The plane tests themselves live with `camera::Frustum`; this module
//! adds the `CullPrimitive` trait the renderer draws against, bounding
//! volumes, and cullers that compose around the camera frustum.

mod bounds;
mod cull_primitive;
mod distance_culler;

pub use bounds::{AABB, Bounds};
pub use cull_primitive::{CullPrimitive, SharedCuller};
pub use distance_culler::DistanceCuller;
pub use crate::camera::{
    ContainmentType,
    sphere_in_frustum, sphere_intersects_frustum,
    box_in_frustum, box_intersects_frustum,
    aabb_in_frustum, aabb_intersects_frustum,
};
