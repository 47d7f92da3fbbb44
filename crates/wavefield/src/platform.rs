//! Platform abstraction
//!
//! Everything the pipeline needs from its host goes through [`Platform`]:
//! capability probing, anchor elements, tier renderer construction, frame
//! scheduling and the clock. The browser implementation lives in
//! `web::WebPlatform` (feature `wasm`); tests use `wavefield-platform-mock`.

use crate::capability::Capability;
use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::pipeline::AnchorIds;
use crate::tier::{TierError, TierRenderer, Viewport};

/// Identifier of a scheduled animation frame
pub type FrameHandle = i32;

/// Host services for one pipeline
///
/// Renderers returned by the `create_*` methods own their surfaces; the
/// platform keeps no reference to them.
#[allow(async_fn_in_trait)]
pub trait Platform {
    // === Environment ===

    /// Report the best tier the environment supports. Never fails.
    fn probe(&self) -> Capability;

    /// Path of the current page, used for preset lookup
    fn location_path(&self) -> Option<String>;

    /// Current viewport size and device pixel ratio
    fn viewport(&self) -> Viewport;

    /// Monotonic clock in milliseconds
    fn now_ms(&self) -> f64;

    // === Anchors ===

    /// Make sure the surface and fallback elements exist
    ///
    /// Missing elements are created and appended to the document body.
    fn ensure_anchors(&mut self, anchors: &AnchorIds) -> Result<(), TierError>;

    /// Show or hide the static fallback element
    ///
    /// Only visibility changes; the element is never removed and its
    /// opacity is left alone.
    fn set_fallback_visible(&mut self, visible: bool);

    // === Tier construction ===

    /// Acquire a GPU device and build the point renderer
    ///
    /// `geometry` is the full-resolution field at rest, used to size the
    /// instance buffers.
    async fn create_gpu(
        &mut self,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError>;

    /// Build the DOM-transform renderer for a reduced `geometry`
    fn create_dom(
        &mut self,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Box<dyn TierRenderer>, TierError>;

    /// Build the static fallback renderer
    fn create_static(&mut self, config: &RenderConfig) -> Box<dyn TierRenderer>;

    // === Frames ===

    /// Schedule one call of the pipeline's frame callback
    ///
    /// Returns `None` if the host could not schedule it.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a frame scheduled by [`request_frame`](Platform::request_frame)
    fn cancel_frame(&mut self, handle: FrameHandle);
}
