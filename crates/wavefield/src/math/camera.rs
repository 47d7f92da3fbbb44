//! Perspective camera looking at the field origin

use glam::{Mat4, Vec3};

use super::Vec2;

/// Vertical field of view in degrees
pub const FIELD_OF_VIEW_DEG: f32 = 75.0;

/// Near clipping plane distance
pub const NEAR_PLANE: f32 = 1.0;

/// Far clipping plane distance
pub const FAR_PLANE: f32 = 10_000.0;

/// Camera state for one tier activation
///
/// The target is fixed at the origin. `position` is rewritten every frame from
/// the resting position plus the smoothed parallax offset; `aspect` only
/// changes on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Current eye position
    pub position: Vec3,
    /// Resting position with no parallax applied
    pub rest: Vec3,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
}

impl CameraState {
    /// Create a camera at `(0, height, distance)` looking at the origin
    pub fn new(distance: f32, height: f32, aspect: f32) -> Self {
        let rest = Vec3::new(0.0, height, distance);
        Self {
            position: rest,
            rest,
            aspect,
            fov_y_deg: FIELD_OF_VIEW_DEG,
        }
    }

    /// Fixed look-at target
    #[inline]
    pub fn target(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Displace the eye by a screen-space parallax offset
    ///
    /// Screen y grows downward, world y grows upward.
    pub fn apply_parallax(&mut self, offset: Vec2) {
        self.position = self.rest + Vec3::new(offset.x, -offset.y, 0.0);
    }

    /// Update the aspect ratio after a resize
    #[inline]
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// World-to-camera view matrix
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), Vec3::Y)
    }

    /// Perspective projection with a [0, 1] depth range
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_rest_position() {
        let camera = CameraState::new(1000.0, 200.0, 16.0 / 9.0);
        assert!((camera.position.y - 200.0).abs() < 0.001);
        assert!((camera.position.z - 1000.0).abs() < 0.001);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_camera_parallax_is_relative_to_rest() {
        let mut camera = CameraState::new(1000.0, 200.0, 1.0);
        camera.apply_parallax(Vec2::new(50.0, 20.0));
        assert!((camera.position.x - 50.0).abs() < 0.001);
        assert!((camera.position.y - 180.0).abs() < 0.001);

        // Applying again does not accumulate
        camera.apply_parallax(Vec2::new(50.0, 20.0));
        assert!((camera.position.x - 50.0).abs() < 0.001);
        assert!((camera.position.z - 1000.0).abs() < 0.001);
    }

    #[test]
    fn test_camera_set_aspect_rejects_degenerate() {
        let mut camera = CameraState::new(1000.0, 0.0, 2.0);
        camera.set_aspect(0.0);
        assert!((camera.aspect - 2.0).abs() < 0.001);
        camera.set_aspect(f32::NAN);
        assert!((camera.aspect - 2.0).abs() < 0.001);
        camera.set_aspect(1.5);
        assert!((camera.aspect - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_camera_origin_projects_to_center() {
        let camera = CameraState::new(1000.0, 0.0, 1.0);
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 0.001);
        assert!(ndc.y.abs() < 0.001);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
