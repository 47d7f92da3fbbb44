//! Grid extents per tier

use crate::config::RenderConfig;

/// Column cap for the DOM-transform tier
pub const DOM_MAX_COUNT_X: u32 = 20;

/// Row cap for the DOM-transform tier
pub const DOM_MAX_COUNT_Y: u32 = 15;

/// Spacing multiplier for the DOM-transform tier
pub const DOM_SPACING_FACTOR: f32 = 1.5;

/// Grid extents and spacing actually rendered by a tier
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub count_x: u32,
    pub count_y: u32,
    pub separation: f32,
}

impl GridLayout {
    /// The configured grid, unchanged
    pub fn full(config: &RenderConfig) -> Self {
        Self {
            count_x: config.count_x.max(1),
            count_y: config.count_y.max(1),
            separation: config.separation,
        }
    }

    /// Reduced grid for one-element-per-point rendering
    ///
    /// Capped at 20x15 points with spacing widened by 1.5 so the field
    /// footprint stays close to the GPU tier's.
    pub fn for_dom(config: &RenderConfig) -> Self {
        Self {
            count_x: config.count_x.clamp(1, DOM_MAX_COUNT_X),
            count_y: config.count_y.clamp(1, DOM_MAX_COUNT_Y),
            separation: config.separation * DOM_SPACING_FACTOR,
        }
    }

    /// Number of points
    #[inline]
    pub fn point_count(&self) -> usize {
        (self.count_x as usize).saturating_mul(self.count_y as usize)
    }
}
