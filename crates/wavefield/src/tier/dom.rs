//! Style math for the DOM-transform tier

use crate::geometry::FieldGeometry;
use crate::math::CameraState;

/// Per-element values for one point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomPointStyle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub opacity: f32,
}

/// Style of point `index`, or `None` past the end of the buffers
///
/// `opacity = clamp(scale / 2, 0, 1) * base_opacity`
pub fn dom_point_style(geometry: &FieldGeometry, index: usize, base_opacity: f32) -> Option<DomPointStyle> {
    let [x, y, z] = geometry.point(index)?;
    let scale = *geometry.scales().get(index)?;
    Some(DomPointStyle {
        x,
        y,
        z,
        opacity: (scale / 2.0).clamp(0.0, 1.0) * base_opacity,
    })
}

/// CSS transform for one point element
///
/// CSS y grows downward, so the wave height is negated.
pub fn point_transform(style: &DomPointStyle) -> String {
    format!(
        "translate3d({:.2}px, {:.2}px, {:.2}px)",
        css_number(style.x),
        css_number(-style.y),
        css_number(style.z)
    )
}

/// CSS `perspective` that matches a vertical field of view
pub fn perspective_px(fov_y_deg: f32, viewport_height: f32) -> f32 {
    let half_fov = (fov_y_deg.to_radians() / 2.0).tan();
    if half_fov.is_nan() || half_fov <= 0.0 || viewport_height <= 0.0 {
        return 1.0;
    }
    ((viewport_height / 2.0) / half_fov).max(1.0)
}

/// CSS transform for the scene container
///
/// Moves the eye to the perspective origin, pitches it toward the field
/// origin and shifts the world by the camera position.
pub fn scene_transform(camera: &CameraState, perspective: f32) -> String {
    let eye = camera.position;
    let pitch = -eye.y.atan2(eye.z).to_degrees();
    format!(
        "translateZ({:.2}px) rotateX({:.3}deg) translate3d({:.2}px, {:.2}px, {:.2}px)",
        css_number(perspective),
        css_number(pitch),
        css_number(-eye.x),
        css_number(eye.y),
        css_number(-eye.z)
    )
}

/// CSS `rgb()` for a tint in [0, 1] per channel
pub fn tint_css(rgb: [f32; 3]) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({}, {}, {})", channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

// Avoids "-0.00" in generated CSS.
#[inline]
fn css_number(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, RenderConfig};
    use crate::geometry::GridLayout;

    fn dom_geometry() -> (RenderConfig, FieldGeometry) {
        let config = Preset::Baseline.config();
        let geometry = FieldGeometry::with_layout(GridLayout::for_dom(&config));
        (config, geometry)
    }

    #[test]
    fn test_rest_opacity_is_half_of_base() {
        let (config, geometry) = dom_geometry();
        let style = dom_point_style(&geometry, 0, config.opacity).unwrap();
        assert!((style.opacity - config.opacity * 0.5).abs() < 0.001);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let (config, mut geometry) = dom_geometry();
        geometry.advance(&config, 2.0);
        for i in 0..geometry.point_count() {
            let style = dom_point_style(&geometry, i, 0.8).unwrap();
            assert!(style.opacity >= 0.0 && style.opacity <= 0.8 + 0.001);
        }
        assert!(dom_point_style(&geometry, geometry.point_count(), 0.8).is_none());
    }

    #[test]
    fn test_point_transform_negates_height() {
        let style = DomPointStyle {
            x: 10.0,
            y: 25.0,
            z: -5.0,
            opacity: 1.0,
        };
        assert_eq!(point_transform(&style), "translate3d(10.00px, -25.00px, -5.00px)");
    }

    #[test]
    fn test_point_transform_has_no_negative_zero() {
        let style = DomPointStyle {
            x: -0.0,
            y: 0.0,
            z: 0.0,
            opacity: 1.0,
        };
        assert_eq!(point_transform(&style), "translate3d(0.00px, 0.00px, 0.00px)");
    }

    #[test]
    fn test_tint_css() {
        assert_eq!(tint_css([1.0, 0.0, 0.5]), "rgb(255, 0, 128)");
        assert_eq!(tint_css([2.0, -1.0, 0.0]), "rgb(255, 0, 0)");
    }

    #[test]
    fn test_perspective_matches_fov() {
        assert!((perspective_px(90.0, 600.0) - 300.0).abs() < 0.01);
        assert!((perspective_px(90.0, 0.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_level_camera_scene_transform() {
        let camera = CameraState::new(1000.0, 0.0, 1.0);
        assert_eq!(
            scene_transform(&camera, 400.0),
            "translateZ(400.00px) rotateX(0.000deg) translate3d(0.00px, 0.00px, -1000.00px)"
        );
    }

    #[test]
    fn test_raised_camera_pitches_down() {
        let camera = CameraState::new(1000.0, 1000.0, 1.0);
        let transform = scene_transform(&camera, 400.0);
        assert!(transform.contains("rotateX(-45.000deg)"), "{}", transform);
    }
}
