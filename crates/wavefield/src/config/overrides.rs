//! Caller-supplied override bundle

use serde::{Deserialize, Serialize};

use super::{Color, RenderConfig};

/// Partial [`RenderConfig`]; every present field replaces the preset value
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub separation: Option<f32>,
    pub count_x: Option<u32>,
    pub count_y: Option<u32>,
    pub color: Option<Color>,
    pub secondary_color: Option<Color>,
    pub wave_height: Option<f32>,
    pub wave_speed: Option<f32>,
    pub camera_distance: Option<f32>,
    pub camera_height: Option<f32>,
    pub particle_size: Option<f32>,
    pub opacity: Option<f32>,
    pub parallax_weight: Option<f32>,
    pub smoothing: Option<f32>,
}

impl ConfigOverrides {
    /// Shallow-merge onto `base`
    pub fn apply(&self, base: RenderConfig) -> RenderConfig {
        RenderConfig {
            separation: self.separation.unwrap_or(base.separation),
            count_x: self.count_x.unwrap_or(base.count_x),
            count_y: self.count_y.unwrap_or(base.count_y),
            color: self.color.unwrap_or(base.color),
            secondary_color: self.secondary_color.or(base.secondary_color),
            wave_height: self.wave_height.unwrap_or(base.wave_height),
            wave_speed: self.wave_speed.unwrap_or(base.wave_speed),
            camera_distance: self.camera_distance.unwrap_or(base.camera_distance),
            camera_height: self.camera_height.unwrap_or(base.camera_height),
            particle_size: self.particle_size.unwrap_or(base.particle_size),
            opacity: self.opacity.unwrap_or(base.opacity),
            parallax_weight: self.parallax_weight.unwrap_or(base.parallax_weight),
            smoothing: self.smoothing.unwrap_or(base.smoothing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn test_empty_overrides_are_identity() {
        let base = Preset::Neural.config();
        assert_eq!(ConfigOverrides::default().apply(base), base);
    }

    #[test]
    fn test_overrides_replace_only_present_fields() {
        let base = Preset::Baseline.config();
        let overrides = ConfigOverrides {
            count_x: Some(8),
            wave_height: Some(5.0),
            ..Default::default()
        };
        let merged = overrides.apply(base);
        assert_eq!(merged.count_x, 8);
        assert!((merged.wave_height - 5.0).abs() < 0.001);
        assert_eq!(merged.count_y, base.count_y);
        assert_eq!(merged.color, base.color);
    }

    #[test]
    fn test_overrides_from_partial_json() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"countY": 12, "opacity": 0.5}"#).unwrap();
        assert_eq!(overrides.count_y, Some(12));
        assert_eq!(overrides.opacity, Some(0.5));
        assert_eq!(overrides.separation, None);
    }
}
