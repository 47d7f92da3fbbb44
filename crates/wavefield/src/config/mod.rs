//! Render configuration
//!
//! A [`RenderConfig`] is produced once per `init` by [`resolve`] from a named
//! [`Preset`], an optional override bundle and an optional color override.
//! It is never mutated afterwards; every component reads it by reference.

mod color;
mod overrides;
mod preset;
mod resolver;

pub use color::Color;
pub use overrides::ConfigOverrides;
pub use preset::{Preset, PATH_PRESETS};
pub use resolver::resolve;

use serde::{Deserialize, Serialize};

/// Upper bound on `count_x * count_y`
///
/// Keeps the 12-byte-per-point position buffer far below the WebGL2 minimum
/// `max_buffer_size` (256 MiB) and the point count representable on 32-bit
/// targets.
pub const MAX_POINTS: usize = 1 << 20;

/// Longest grid side kept when an oversized grid is repaired
const MAX_GRID_SIDE: u32 = 1 << 10;

/// Errors reported by [`RenderConfig::validate`]
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The grid has no points.
    #[error("grid must contain at least one point, got {count_x}x{count_y}")]
    EmptyGrid { count_x: u32, count_y: u32 },

    /// The grid has more than [`MAX_POINTS`] points.
    #[error("grid of {count_x}x{count_y} exceeds {max} points")]
    GridTooLarge { count_x: u32, count_y: u32, max: usize },

    /// A distance or speed is negative or not a number.
    #[error("{field} must be a non-negative number, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Opacity outside [0, 1].
    #[error("opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f32),

    /// Smoothing factor outside (0, 1].
    #[error("smoothing must be within (0, 1], got {0}")]
    SmoothingOutOfRange(f32),
}

/// Immutable parameters for one pipeline instance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Distance between neighbouring grid points (world units)
    pub separation: f32,
    /// Number of columns
    pub count_x: u32,
    /// Number of rows
    pub count_y: u32,
    /// Primary point color
    pub color: Color,
    /// Color that high points blend toward
    pub secondary_color: Option<Color>,
    /// Vertical amplitude of the wave
    pub wave_height: f32,
    /// Time cursor advance per second
    pub wave_speed: f32,
    /// Camera distance from the origin along z
    pub camera_distance: f32,
    /// Camera height above the field plane
    pub camera_height: f32,
    /// Base on-screen point size
    pub particle_size: f32,
    /// Point opacity in [0, 1]
    pub opacity: f32,
    /// Pointer offset to camera displacement weight
    pub parallax_weight: f32,
    /// Exponential smoothing factor for the parallax offset
    pub smoothing: f32,
}

impl RenderConfig {
    /// Total number of points in the configured grid, saturating
    #[inline]
    pub fn point_count(&self) -> usize {
        (self.count_x as usize).saturating_mul(self.count_y as usize)
    }

    /// Check every invariant, reporting the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_x == 0 || self.count_y == 0 {
            return Err(ConfigError::EmptyGrid {
                count_x: self.count_x,
                count_y: self.count_y,
            });
        }
        if u64::from(self.count_x) * u64::from(self.count_y) > MAX_POINTS as u64 {
            return Err(ConfigError::GridTooLarge {
                count_x: self.count_x,
                count_y: self.count_y,
                max: MAX_POINTS,
            });
        }
        for (field, value) in self.non_negative_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.opacity));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing));
        }
        Ok(())
    }

    /// Repair invariant violations in place of failing
    ///
    /// Used by the resolver so that a bad override never blocks rendering.
    pub fn sanitized(mut self) -> Self {
        while let Err(err) = self.validate() {
            tracing::warn!("[config] {}; using a safe value instead", err);
            match err {
                ConfigError::EmptyGrid { .. } => {
                    self.count_x = self.count_x.max(1);
                    self.count_y = self.count_y.max(1);
                }
                ConfigError::GridTooLarge { .. } => {
                    // count_x >= 1 here: EmptyGrid is reported first
                    self.count_x = self.count_x.min(MAX_GRID_SIDE);
                    self.count_y = self.count_y.min((MAX_POINTS / self.count_x as usize) as u32);
                }
                ConfigError::Negative { field, .. } => self.zero_field(field),
                ConfigError::OpacityOutOfRange(value) => {
                    self.opacity = if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) };
                }
                ConfigError::SmoothingOutOfRange(_) => {
                    self.smoothing = Preset::Baseline.config().smoothing;
                }
            }
        }
        self
    }

    fn non_negative_fields(&self) -> [(&'static str, f32); 7] {
        [
            ("separation", self.separation),
            ("waveHeight", self.wave_height),
            ("waveSpeed", self.wave_speed),
            ("cameraDistance", self.camera_distance),
            ("cameraHeight", self.camera_height),
            ("particleSize", self.particle_size),
            ("parallaxWeight", self.parallax_weight),
        ]
    }

    fn zero_field(&mut self, field: &str) {
        let slot = match field {
            "separation" => &mut self.separation,
            "waveHeight" => &mut self.wave_height,
            "waveSpeed" => &mut self.wave_speed,
            "cameraDistance" => &mut self.camera_distance,
            "cameraHeight" => &mut self.camera_height,
            "particleSize" => &mut self.particle_size,
            _ => &mut self.parallax_weight,
        };
        *slot = 0.0;
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Preset::Baseline.config()
    }
}
