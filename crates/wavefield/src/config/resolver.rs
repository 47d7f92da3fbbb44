//! Preset resolution

use super::{Color, ConfigOverrides, Preset, RenderConfig};

/// Resolve the render configuration for one `init`
///
/// - `preset`: explicit preset name; unknown names resolve to the baseline.
/// - `path_hint`: page path used when `preset` is absent.
/// - `overrides`: merged field by field on top of the preset.
/// - `color`: wins over both the preset color and `overrides.color`.
///
/// Never fails; invariant violations introduced by overrides are repaired.
pub fn resolve(
    preset: Option<&str>,
    path_hint: Option<&str>,
    overrides: &ConfigOverrides,
    color: Option<Color>,
) -> RenderConfig {
    let chosen = select_preset(preset, path_hint);

    let mut config = overrides.apply(chosen.config());
    if let Some(color) = color {
        config.color = color;
    }
    config.sanitized()
}

fn select_preset(preset: Option<&str>, path_hint: Option<&str>) -> Preset {
    match (preset, path_hint) {
        (Some(name), _) => Preset::from_id(name).unwrap_or_else(|| {
            tracing::info!("[config] Unknown preset '{}', using '{}'", name, Preset::Baseline.id());
            Preset::Baseline
        }),
        (None, Some(path)) => {
            let preset = Preset::for_path(path);
            tracing::debug!("[config] Path '{}' selects preset '{}'", path, preset.id());
            preset
        }
        (None, None) => Preset::Baseline,
    }
}
