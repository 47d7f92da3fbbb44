//! Tier renderer trait

use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::math::{CameraState, Size};

use super::points::effective_pixel_ratio;
use super::{TierError, TierKind};

/// Drawable viewport: CSS size plus the pixel ratio actually rendered at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Size in CSS pixels
    pub size: Size,
    /// Device pixels per CSS pixel, already capped
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport from a raw `devicePixelRatio`
    pub fn new(size: Size, device_pixel_ratio: f32) -> Self {
        Self {
            size,
            pixel_ratio: effective_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Backing-store size in device pixels, never zero
    pub fn physical_size(&self) -> (u32, u32) {
        let scaled = self.size.scale(self.pixel_ratio);
        (
            (scaled.width.round() as u32).max(1),
            (scaled.height.round() as u32).max(1),
        )
    }

    /// Width / height, 1.0 for degenerate sizes
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.size.aspect_ratio()
    }
}

/// Everything a tier needs to draw one frame
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub config: &'a RenderConfig,
    pub geometry: &'a FieldGeometry,
    pub camera: &'a CameraState,
    /// Time cursor the geometry was advanced to
    pub time: f32,
}

/// One rendering strategy
///
/// A renderer owns its drawable surface from construction until
/// [`dispose`](TierRenderer::dispose). The controller guarantees `paint` is
/// never called on a renderer whose [`animates`](TierRenderer::animates)
/// returns `false`, and nothing at all is called after `dispose`.
pub trait TierRenderer {
    /// Which tier this is
    fn kind(&self) -> TierKind;

    /// Whether the tier wants per-frame callbacks
    fn animates(&self) -> bool {
        true
    }

    /// Draw the current frame.
    ///
    /// [`TierError::FrameSkipped`] drops just this frame; any other error
    /// means the tier is unusable and must be replaced.
    fn paint(&mut self, frame: &FrameInput<'_>) -> Result<(), TierError>;

    /// Match the drawable surface to a new viewport
    fn resize(&mut self, viewport: Viewport);

    /// Release the surface and every resource created for it
    fn dispose(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_caps_pixel_ratio() {
        let viewport = Viewport::new(Size::new(800.0, 600.0), 4.0);
        assert!((viewport.pixel_ratio - 3.0).abs() < 0.001);
        assert_eq!(viewport.physical_size(), (2400, 1800));
    }

    #[test]
    fn test_viewport_physical_size_never_zero() {
        let viewport = Viewport::new(Size::ZERO, 2.0);
        assert_eq!(viewport.physical_size(), (1, 1));
        assert!((viewport.aspect_ratio() - 1.0).abs() < 0.001);
    }
}
