//! Browser implementation of [`Platform`]

use web_sys::{Document, HtmlElement, Window};

use super::anchors::{ensure_anchor, set_visible, Anchor, DEFAULT_FALLBACK_BACKGROUND};
use super::dom::DomRenderer;
use super::fallback::StaticRenderer;
use super::frames::FrameScheduler;
use super::gpu::GpuPointRenderer;
use super::probe::probe_capability;
use crate::capability::Capability;
use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::math::Size;
use crate::pipeline::AnchorIds;
use crate::platform::{FrameHandle, Platform};
use crate::tier::{TierError, TierRenderer, Viewport};

/// Platform backed by the page's `window` and `document`
pub struct WebPlatform {
    window: Window,
    document: Document,
    surface: Option<Anchor>,
    fallback: Option<Anchor>,
    frames: FrameScheduler,
}

impl WebPlatform {
    /// Bind to the global window
    pub fn new() -> Result<Self, TierError> {
        let window = web_sys::window()
            .ok_or_else(|| TierError::ContextUnavailable("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| TierError::ContextUnavailable("no document".to_string()))?;
        Ok(Self {
            window,
            document,
            surface: None,
            fallback: None,
            frames: FrameScheduler::new(),
        })
    }

    /// Scheduler the host installs its frame callback into
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn surface_element(&self) -> Result<HtmlElement, TierError> {
        self.surface
            .as_ref()
            .map(|anchor| anchor.element.clone())
            .ok_or_else(|| TierError::MissingAnchor("surface".to_string()))
    }
}

impl Platform for WebPlatform {
    fn probe(&self) -> Capability {
        probe_capability(&self.document)
    }

    fn location_path(&self) -> Option<String> {
        self.window.location().pathname().ok()
    }

    fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(
            Size::new(width as f32, height as f32),
            self.window.device_pixel_ratio() as f32,
        )
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn ensure_anchors(&mut self, anchors: &AnchorIds) -> Result<(), TierError> {
        let surface = ensure_anchor(&self.document, &anchors.surface)?;
        self.surface = Some(surface);

        let fallback = ensure_anchor(&self.document, &anchors.fallback)?;
        if fallback.created {
            if let Err(err) = fallback
                .element
                .style()
                .set_property("background", DEFAULT_FALLBACK_BACKGROUND)
            {
                tracing::debug!("[anchors] fallback background not set: {:?}", err);
            }
        }
        self.fallback = Some(fallback);
        Ok(())
    }

    fn set_fallback_visible(&mut self, visible: bool) {
        if let Some(fallback) = &self.fallback {
            set_visible(&fallback.element, visible);
        }
    }

    async fn create_gpu(
        &mut self,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError> {
        let surface = self.surface_element()?;
        let renderer = GpuPointRenderer::new(&self.document, surface, config, geometry, viewport).await?;
        Ok(Box::new(renderer))
    }

    fn create_dom(
        &mut self,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError> {
        let surface = self.surface_element()?;
        let renderer = DomRenderer::new(&self.document, surface, config, geometry, viewport)?;
        Ok(Box::new(renderer))
    }

    fn create_static(&mut self, config: &RenderConfig) -> Box<dyn TierRenderer> {
        let fallback = self.fallback.clone();
        Box::new(StaticRenderer::new(fallback, config))
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.frames.request(&self.window)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(&self.window, handle);
    }
}
