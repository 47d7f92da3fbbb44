//! 2D size type for viewport dimensions

use serde::{Deserialize, Serialize};
use super::Vec2;

/// Width and height in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to Vec2
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Half of each dimension (distance from the center to an edge)
    #[inline]
    pub fn half(self) -> Vec2 {
        self.as_vec2() * 0.5
    }

    /// Get aspect ratio (width / height)
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Scale both dimensions
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_half() {
        let half = Size::new(1920.0, 1080.0).half();
        assert!((half.x - 960.0).abs() < 0.001);
        assert!((half.y - 540.0).abs() < 0.001);
    }

    #[test]
    fn test_size_aspect_ratio() {
        let ratio = Size::new(1920.0, 1080.0).aspect_ratio();
        assert!((ratio - 16.0 / 9.0).abs() < 0.001);

        // Degenerate height falls back to square
        assert!((Size::new(100.0, 0.0).aspect_ratio() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_size_scale() {
        let scaled = Size::new(100.0, 50.0).scale(2.0);
        assert!((scaled.width - 200.0).abs() < 0.001);
        assert!((scaled.height - 100.0).abs() < 0.001);
    }
}
