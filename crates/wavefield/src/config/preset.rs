//! Named parameter bundles

use serde::{Deserialize, Serialize};

use super::{Color, RenderConfig};

/// Path prefix to preset table used when no preset name is given
///
/// The longest matching prefix wins.
pub const PATH_PRESETS: &[(&str, Preset)] = &[
    ("/waves", Preset::Waves),
    ("/neurosim", Preset::Neural),
    ("/research", Preset::Research),
    ("/research/neural", Preset::Neural),
    ("/whitepaper", Preset::Whitepaper),
];

/// Known presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Fallback for unknown names and unmatched paths
    #[default]
    #[serde(rename = "default")]
    Baseline,
    /// Tall, fast two-tone swell
    Waves,
    /// Dense pink/indigo field
    Neural,
    /// Calm green field for long reads
    Research,
    /// Low-contrast, slow field behind documents
    Whitepaper,
}

impl Preset {
    /// Get all presets
    pub fn all() -> &'static [Preset] {
        &[
            Preset::Baseline,
            Preset::Waves,
            Preset::Neural,
            Preset::Research,
            Preset::Whitepaper,
        ]
    }

    /// Get the string ID for this preset
    pub fn id(&self) -> &'static str {
        match self {
            Preset::Baseline => "default",
            Preset::Waves => "waves",
            Preset::Neural => "neural",
            Preset::Research => "research",
            Preset::Whitepaper => "whitepaper",
        }
    }

    /// Parse from string ID (case-insensitive)
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "default" | "baseline" => Some(Preset::Baseline),
            "waves" => Some(Preset::Waves),
            "neural" => Some(Preset::Neural),
            "research" => Some(Preset::Research),
            "whitepaper" => Some(Preset::Whitepaper),
            _ => None,
        }
    }

    /// Pick the preset for a URL path by longest matching prefix
    pub fn for_path(path: &str) -> Preset {
        PATH_PRESETS
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, preset)| *preset)
            .unwrap_or_default()
    }

    /// Parameter values for this preset
    pub fn config(&self) -> RenderConfig {
        match self {
            Preset::Baseline => RenderConfig {
                separation: 100.0,
                count_x: 50,
                count_y: 50,
                color: Color(0x4fc3f7),
                secondary_color: None,
                wave_height: 50.0,
                wave_speed: 6.0,
                camera_distance: 1000.0,
                camera_height: 200.0,
                particle_size: 12.0,
                opacity: 0.8,
                parallax_weight: 0.5,
                smoothing: 0.05,
            },
            Preset::Waves => RenderConfig {
                separation: 80.0,
                count_x: 60,
                count_y: 60,
                color: Color(0x00bcd4),
                secondary_color: Some(Color(0x7c4dff)),
                wave_height: 70.0,
                wave_speed: 4.5,
                camera_distance: 1100.0,
                camera_height: 300.0,
                particle_size: 10.0,
                opacity: 0.9,
                parallax_weight: 0.6,
                smoothing: 0.05,
            },
            Preset::Neural => RenderConfig {
                separation: 120.0,
                count_x: 40,
                count_y: 40,
                color: Color(0xff4081),
                secondary_color: Some(Color(0x536dfe)),
                wave_height: 35.0,
                wave_speed: 3.0,
                camera_distance: 900.0,
                camera_height: 150.0,
                particle_size: 14.0,
                opacity: 0.75,
                parallax_weight: 0.4,
                smoothing: 0.04,
            },
            Preset::Research => RenderConfig {
                separation: 100.0,
                count_x: 45,
                count_y: 45,
                color: Color(0x8bc34a),
                secondary_color: None,
                wave_height: 40.0,
                wave_speed: 2.4,
                camera_distance: 1000.0,
                camera_height: 200.0,
                particle_size: 11.0,
                opacity: 0.6,
                parallax_weight: 0.3,
                smoothing: 0.04,
            },
            Preset::Whitepaper => RenderConfig {
                separation: 110.0,
                count_x: 36,
                count_y: 36,
                color: Color(0xb0bec5),
                secondary_color: None,
                wave_height: 25.0,
                wave_speed: 1.8,
                camera_distance: 1200.0,
                camera_height: 250.0,
                particle_size: 9.0,
                opacity: 0.45,
                parallax_weight: 0.2,
                smoothing: 0.03,
            },
        }
    }
}
