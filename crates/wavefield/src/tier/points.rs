//! Point sprite math shared by the GPU shaders and their tests
//!
//! The WGSL in the web renderer evaluates exactly these formulas; keeping a
//! CPU copy here lets them be checked without a device.

use crate::config::RenderConfig;

/// Upper bound applied to `devicePixelRatio`
pub const MAX_PIXEL_RATIO: f32 = 3.0;

/// Distance at which a point of scale 1 is drawn at `particle_size` pixels
pub const POINT_ATTENUATION: f32 = 300.0;

/// Radius (in sprite units, edge at 0.5) inside which the disc is opaque
pub const DISC_INNER_RADIUS: f32 = 0.4;

/// Outer radius of the disc; fragments beyond it are discarded
const DISC_OUTER_RADIUS: f32 = 0.5;

/// Clamp a reported device pixel ratio to what the GPU tier renders at
pub fn effective_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0;
    }
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

/// On-screen point diameter in device pixels
///
/// `particle_size * scale * POINT_ATTENUATION / distance`, times the pixel
/// ratio. Distances below one world unit are treated as one.
pub fn point_size_px(particle_size: f32, scale: f32, distance: f32, pixel_ratio: f32) -> f32 {
    let distance = distance.max(1.0);
    particle_size * scale * POINT_ATTENUATION / distance * pixel_ratio
}

/// Alpha of the soft disc at distance `r` from the sprite center
///
/// `None` where the fragment is discarded.
pub fn disc_alpha(r: f32) -> Option<f32> {
    if r > DISC_OUTER_RADIUS {
        return None;
    }
    if r <= DISC_INNER_RADIUS {
        return Some(1.0);
    }
    let t = (r - DISC_INNER_RADIUS) / (DISC_OUTER_RADIUS - DISC_INNER_RADIUS);
    Some(1.0 - t * t * (3.0 - 2.0 * t))
}

/// Linear RGB tint for a point of the given scale
///
/// Mixes toward the secondary color by `scale / 2` when one is set.
pub fn point_tint(config: &RenderConfig, scale: f32) -> [f32; 3] {
    let base = config.color.to_rgb_f32();
    let Some(secondary) = config.secondary_color else {
        return base;
    };
    let other = secondary.to_rgb_f32();
    let t = (scale / 2.0).clamp(0.0, 1.0);
    [
        base[0] + (other[0] - base[0]) * t,
        base[1] + (other[1] - base[1]) * t,
        base[2] + (other[2] - base[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, Preset};

    #[test]
    fn test_effective_pixel_ratio() {
        assert!((effective_pixel_ratio(1.0) - 1.0).abs() < 0.001);
        assert!((effective_pixel_ratio(2.5) - 2.5).abs() < 0.001);
        assert!((effective_pixel_ratio(3.5) - 3.0).abs() < 0.001);
        assert!((effective_pixel_ratio(0.0) - 1.0).abs() < 0.001);
        assert!((effective_pixel_ratio(f32::NAN) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_point_size_attenuates_with_distance() {
        let near = point_size_px(12.0, 1.0, 300.0, 1.0);
        let far = point_size_px(12.0, 1.0, 600.0, 1.0);
        assert!((near - 12.0).abs() < 0.001);
        assert!((far - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_point_size_scales_with_pixel_ratio_and_scale() {
        let size = point_size_px(10.0, 2.0, 300.0, 2.0);
        assert!((size - 40.0).abs() < 0.001);
        assert!(point_size_px(10.0, 0.0, 300.0, 2.0).abs() < 0.001);
    }

    #[test]
    fn test_disc_alpha_profile() {
        assert_eq!(disc_alpha(0.0), Some(1.0));
        assert_eq!(disc_alpha(DISC_INNER_RADIUS), Some(1.0));
        let mid = disc_alpha(0.45).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
        assert!(disc_alpha(0.5).unwrap().abs() < 0.001);
        assert_eq!(disc_alpha(0.51), None);
    }

    #[test]
    fn test_tint_without_secondary_is_primary() {
        let config = Preset::Baseline.config();
        assert_eq!(point_tint(&config, 2.0), config.color.to_rgb_f32());
    }

    #[test]
    fn test_tint_mixes_toward_secondary() {
        let config = RenderConfig {
            color: Color::new(0x000000),
            secondary_color: Some(Color::new(0xffffff)),
            ..Preset::Baseline.config()
        };
        let rest = point_tint(&config, 1.0);
        assert!((rest[0] - 0.5).abs() < 0.01);
        let peak = point_tint(&config, 2.0);
        assert!((peak[2] - 1.0).abs() < 0.001);
    }
}
