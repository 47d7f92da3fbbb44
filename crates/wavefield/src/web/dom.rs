//! DOM-transform tier
//!
//! A perspective container holding a `preserve-3d` scene with one absolutely
//! positioned element per point. Each frame rewrites the per-element
//! `transform` and `opacity` and the scene's camera transform.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom_error;
use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::math::FIELD_OF_VIEW_DEG;
use crate::tier::{
    dom_point_style, perspective_px, point_tint, point_transform, scene_transform, tint_css, FrameInput,
    TierError, TierKind, TierRenderer, Viewport,
};

const CONTAINER_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("inset", "0"),
    ("overflow", "hidden"),
    ("perspective-origin", "50% 50%"),
];

const SCENE_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("left", "50%"),
    ("top", "50%"),
    ("width", "0"),
    ("height", "0"),
    ("transform-style", "preserve-3d"),
];

/// One element per point inside a CSS 3D scene
pub struct DomRenderer {
    container: HtmlElement,
    scene: HtmlElement,
    points: Vec<HtmlElement>,
    viewport: Viewport,
    fov_y_deg: f32,
    /// Points are recolored per frame only when a secondary color is set
    tinted: bool,
    disposed: bool,
}

impl DomRenderer {
    pub fn new(
        document: &Document,
        surface: HtmlElement,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Self, TierError> {
        let container = create_div(document, CONTAINER_STYLE)?;
        let scene = create_div(document, SCENE_STYLE)?;
        container
            .append_child(&scene)
            .map_err(|e| dom_error("append scene", e))?;

        let size = format!("{:.1}px", config.particle_size);
        let margin = format!("{:.1}px", -config.particle_size / 2.0);
        let color = config.color.to_css();
        let point_style: [(&str, &str); 8] = [
            ("position", "absolute"),
            ("width", &size),
            ("height", &size),
            ("margin-left", &margin),
            ("margin-top", &margin),
            ("border-radius", "50%"),
            ("background-color", &color),
            ("will-change", "transform, opacity"),
        ];

        let mut points = Vec::with_capacity(geometry.point_count());
        for _ in 0..geometry.point_count() {
            let point = create_div(document, &point_style)?;
            scene
                .append_child(&point)
                .map_err(|e| dom_error("append point", e))?;
            points.push(point);
        }

        surface
            .append_child(&container)
            .map_err(|e| dom_error("append container", e))?;

        let mut renderer = Self {
            container,
            scene,
            points,
            viewport,
            fov_y_deg: FIELD_OF_VIEW_DEG,
            tinted: config.secondary_color.is_some(),
            disposed: false,
        };
        renderer.resize(viewport);

        tracing::info!("[dom] Created {} point elements", renderer.points.len());
        Ok(renderer)
    }
}

impl TierRenderer for DomRenderer {
    fn kind(&self) -> TierKind {
        TierKind::Dom
    }

    fn paint(&mut self, frame: &FrameInput<'_>) -> Result<(), TierError> {
        if self.disposed {
            return Ok(());
        }

        if frame.camera.fov_y_deg != self.fov_y_deg {
            self.fov_y_deg = frame.camera.fov_y_deg;
            self.resize(self.viewport);
        }
        let perspective = perspective_px(self.fov_y_deg, self.viewport.size.height);
        set_style(&self.scene, "transform", &scene_transform(frame.camera, perspective))?;

        for (index, point) in self.points.iter().enumerate() {
            let Some(style) = dom_point_style(frame.geometry, index, frame.config.opacity) else {
                break;
            };
            set_style(point, "transform", &point_transform(&style))?;
            set_style(point, "opacity", &format!("{:.3}", style.opacity))?;
            if self.tinted {
                let scale = frame.geometry.scales()[index];
                set_style(point, "background-color", &tint_css(point_tint(frame.config, scale)))?;
            }
        }
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let perspective = perspective_px(self.fov_y_deg, viewport.size.height);
        if let Err(err) = set_style(&self.container, "perspective", &format!("{:.1}px", perspective)) {
            tracing::debug!("[dom] {}", err);
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.container.remove();
        self.points.clear();
        self.disposed = true;
        tracing::debug!("[dom] Disposed");
    }
}

fn create_div(document: &Document, style: &[(&str, &str)]) -> Result<HtmlElement, TierError> {
    let element = document
        .create_element("div")
        .map_err(|e| dom_error("create element", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| TierError::Dom("created element is not an HtmlElement".to_string()))?;
    for (name, value) in style {
        set_style(&element, name, value)?;
    }
    Ok(element)
}

fn set_style(element: &HtmlElement, name: &str, value: &str) -> Result<(), TierError> {
    element
        .style()
        .set_property(name, value)
        .map_err(|e| dom_error(name, e))
}
