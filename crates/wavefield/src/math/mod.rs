//! Geometry primitives for the wave field
//!
//! 2D types for screen-space quantities (pointer offsets, viewport sizes)
//! and the 3D camera that looks at the field.

mod vec2;
mod size;
mod camera;

pub use vec2::Vec2;
pub use size::Size;
pub use camera::{CameraState, FAR_PLANE, FIELD_OF_VIEW_DEG, NEAR_PLANE};
