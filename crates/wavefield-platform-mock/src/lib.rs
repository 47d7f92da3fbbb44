//! Mock platform for testing the wave-field pipeline
//!
//! Provides a [`Platform`] implementation with a controllable clock,
//! capability and failure injection, and a journal of every renderer it
//! built, so the pipeline can be driven natively without a browser.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use wavefield::{
    AnchorIds, Capability, FieldGeometry, FrameHandle, FrameInput, Platform, RenderConfig, Size,
    TierError, TierKind, TierRenderer, Viewport,
};

/// What one mock renderer has been asked to do
#[derive(Clone, Debug, PartialEq)]
pub struct RendererRecord {
    pub kind: TierKind,
    /// Points in the geometry it was built with (0 for static)
    pub built_points: usize,
    pub paints: usize,
    pub resizes: Vec<Viewport>,
    pub disposed: bool,
    /// Set if any call arrived after `dispose`
    pub used_after_dispose: bool,
    pub last_time: Option<f32>,
    pub last_camera: Option<[f32; 3]>,
    pub last_scales: Vec<f32>,
}

impl RendererRecord {
    fn new(kind: TierKind, built_points: usize) -> Self {
        Self {
            kind,
            built_points,
            paints: 0,
            resizes: Vec::new(),
            disposed: false,
            used_after_dispose: false,
            last_time: None,
            last_camera: None,
            last_scales: Vec::new(),
        }
    }
}

/// State shared between the platform and the renderers it hands out
#[derive(Debug, Default)]
struct Journal {
    renderers: Vec<RendererRecord>,
    /// Error returned by the next `paint` of any renderer
    paint_fault: Option<TierError>,
}

type SharedJournal = Rc<RefCell<Journal>>;

/// Mock platform for unit and integration testing
pub struct MockPlatform {
    capability: Capability,
    fail_gpu: Option<TierError>,
    fail_dom: Option<TierError>,
    path: Option<String>,
    viewport: Viewport,
    /// Simulated clock in milliseconds
    now: f64,
    next_frame: FrameHandle,
    pending: BTreeSet<FrameHandle>,
    frame_requests: usize,
    cancelled: usize,
    anchors: Option<AnchorIds>,
    fallback_visible: bool,
    fallback_opacity: f32,
    journal: SharedJournal,
}

impl MockPlatform {
    /// GPU-capable platform with a 1280x720 viewport at pixel ratio 1
    pub fn new() -> Self {
        Self {
            capability: Capability::Gpu,
            fail_gpu: None,
            fail_dom: None,
            path: None,
            viewport: Viewport::new(Size::new(1280.0, 720.0), 1.0),
            now: 0.0,
            next_frame: 1,
            pending: BTreeSet::new(),
            frame_requests: 0,
            cancelled: 0,
            anchors: None,
            // The host page shows its fallback until a tier takes over
            fallback_visible: true,
            fallback_opacity: 1.0,
            journal: Rc::default(),
        }
    }

    /// Platform reporting the given capability
    pub fn with_capability(capability: Capability) -> Self {
        Self {
            capability,
            ..Self::new()
        }
    }

    // === Configuration ===

    /// Make GPU construction fail
    pub fn fail_gpu(mut self) -> Self {
        self.fail_gpu = Some(TierError::NoAdapter);
        self
    }

    /// Make DOM construction fail
    pub fn fail_dom(mut self) -> Self {
        self.fail_dom = Some(TierError::Dom("appendChild threw".to_string()));
        self
    }

    /// Set the page path reported to the resolver
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set the initial viewport
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Make the next `paint` call return `err`
    pub fn fail_next_paint(&self, err: TierError) {
        self.journal.borrow_mut().paint_fault = Some(err);
    }

    // === Clock ===

    pub fn set_time(&mut self, ms: f64) {
        self.now = ms;
    }

    pub fn advance_time(&mut self, ms: f64) {
        self.now += ms;
    }

    // === Frames ===

    /// Consume the pending frame as the host would when it fires
    ///
    /// Returns `false` if no frame was scheduled.
    pub fn fire_frame(&mut self) -> bool {
        self.pending.pop_first().is_some()
    }

    /// Frames scheduled and not yet fired or cancelled
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Total `request_frame` calls
    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    /// Total `cancel_frame` calls that hit a pending frame
    pub fn cancelled_frames(&self) -> usize {
        self.cancelled
    }

    // === Anchors ===

    pub fn anchors(&self) -> Option<&AnchorIds> {
        self.anchors.as_ref()
    }

    pub fn fallback_visible(&self) -> bool {
        self.fallback_visible
    }

    pub fn fallback_opacity(&self) -> f32 {
        self.fallback_opacity
    }

    // === Renderers ===

    /// Every renderer built so far, in construction order
    pub fn renderers(&self) -> Vec<RendererRecord> {
        self.journal.borrow().renderers.clone()
    }

    /// Most recently built renderer
    pub fn last_renderer(&self) -> Option<RendererRecord> {
        self.journal.borrow().renderers.last().cloned()
    }

    /// Renderers not yet disposed
    pub fn live_renderers(&self) -> usize {
        self.journal
            .borrow()
            .renderers
            .iter()
            .filter(|r| !r.disposed)
            .count()
    }

    fn build(&self, kind: TierKind, built_points: usize) -> Box<dyn TierRenderer> {
        let mut journal = self.journal.borrow_mut();
        journal.renderers.push(RendererRecord::new(kind, built_points));
        Box::new(MockRenderer {
            kind,
            index: journal.renderers.len() - 1,
            journal: Rc::clone(&self.journal),
        })
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    fn probe(&self) -> Capability {
        self.capability
    }

    fn location_path(&self) -> Option<String> {
        self.path.clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn now_ms(&self) -> f64 {
        self.now
    }

    fn ensure_anchors(&mut self, anchors: &AnchorIds) -> Result<(), TierError> {
        self.anchors = Some(anchors.clone());
        Ok(())
    }

    fn set_fallback_visible(&mut self, visible: bool) {
        self.fallback_visible = visible;
    }

    async fn create_gpu(
        &mut self,
        _config: &RenderConfig,
        geometry: &FieldGeometry,
        _viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError> {
        if let Some(err) = self.fail_gpu.clone() {
            return Err(err);
        }
        Ok(self.build(TierKind::Gpu, geometry.point_count()))
    }

    fn create_dom(
        &mut self,
        _config: &RenderConfig,
        geometry: &FieldGeometry,
        _viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError> {
        if let Some(err) = self.fail_dom.clone() {
            return Err(err);
        }
        Ok(self.build(TierKind::Dom, geometry.point_count()))
    }

    fn create_static(&mut self, _config: &RenderConfig) -> Box<dyn TierRenderer> {
        self.build(TierKind::Static, 0)
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = self.next_frame;
        self.next_frame += 1;
        self.frame_requests += 1;
        self.pending.insert(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.cancelled += 1;
        }
    }
}

/// Renderer that records calls into the platform journal
struct MockRenderer {
    kind: TierKind,
    index: usize,
    journal: SharedJournal,
}

impl MockRenderer {
    fn with_record<R>(&self, f: impl FnOnce(&mut RendererRecord) -> R) -> R {
        let mut journal = self.journal.borrow_mut();
        let record = &mut journal.renderers[self.index];
        if record.disposed {
            record.used_after_dispose = true;
        }
        f(record)
    }
}

impl TierRenderer for MockRenderer {
    fn kind(&self) -> TierKind {
        self.kind
    }

    fn animates(&self) -> bool {
        self.kind != TierKind::Static
    }

    fn paint(&mut self, frame: &FrameInput<'_>) -> Result<(), TierError> {
        let fault = self.journal.borrow_mut().paint_fault.take();
        self.with_record(|record| {
            record.paints += 1;
            record.last_time = Some(frame.time);
            record.last_camera = Some(frame.camera.position.to_array());
            record.last_scales = frame.geometry.scales().to_vec();
        });
        match fault {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.with_record(|record| record.resizes.push(viewport));
    }

    fn dispose(&mut self) {
        self.with_record(|record| record.disposed = true);
    }
}
