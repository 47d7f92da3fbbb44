//! Init options

use serde::{Deserialize, Serialize};

use crate::config::{Color, ConfigOverrides};

/// Default id of the GPU/DOM surface element
pub const DEFAULT_SURFACE_ID: &str = "wave-field-surface";

/// Default id of the static fallback element
pub const DEFAULT_FALLBACK_ID: &str = "wave-field-fallback";

/// Options passed to `init`
///
/// Every field is optional; `{}` selects the preset for the current page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitOptions {
    /// Preset name; unknown names fall back to the baseline
    pub preset: Option<String>,
    /// Color override, wins over the preset and `overrides.color`
    pub color: Option<Color>,
    /// Field-by-field config overrides
    pub overrides: ConfigOverrides,
    /// Id of the surface element
    pub surface_id: Option<String>,
    /// Id of the static fallback element
    pub fallback_id: Option<String>,
}

impl InitOptions {
    /// Options selecting a preset by name
    pub fn with_preset(preset: impl Into<String>) -> Self {
        Self {
            preset: Some(preset.into()),
            ..Self::default()
        }
    }

    /// Anchor element ids, defaulted where absent
    pub fn anchors(&self) -> AnchorIds {
        AnchorIds {
            surface: self
                .surface_id
                .clone()
                .unwrap_or_else(|| DEFAULT_SURFACE_ID.to_string()),
            fallback: self
                .fallback_id
                .clone()
                .unwrap_or_else(|| DEFAULT_FALLBACK_ID.to_string()),
        }
    }
}

/// Ids of the two host elements the pipeline renders into
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorIds {
    pub surface: String,
    pub fallback: String,
}

impl Default for AnchorIds {
    fn default() -> Self {
        InitOptions::default().anchors()
    }
}
