//! Host events

use tracing::debug;

use super::PipelineController;
use crate::platform::Platform;
use crate::tier::Viewport;

/// Input delivered by host event handlers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEvent {
    /// Pointer position in client (CSS pixel) coordinates
    PointerMoved { x: f32, y: f32 },
    /// Position of the first touch point in client coordinates
    TouchMoved { x: f32, y: f32 },
    /// Window resized
    Resized(Viewport),
}

impl<P: Platform> PipelineController<P> {
    /// Apply one host event
    ///
    /// Pointer and touch events only record the raw offset; it is consumed by
    /// the next frame. A resize updates the tracker and camera aspect and
    /// resizes the active renderer before returning. Never paints.
    pub fn handle(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::PointerMoved { x, y } | InteractionEvent::TouchMoved { x, y } => {
                if let Some(tracker) = self.tracker.as_mut() {
                    tracker.record_pointer(x, y);
                }
            }
            InteractionEvent::Resized(viewport) => {
                self.viewport = viewport;
                if let Some(tracker) = self.tracker.as_mut() {
                    tracker.record_resize(viewport.size);
                }
                if let Some(camera) = self.camera.as_mut() {
                    camera.set_aspect(viewport.aspect_ratio());
                }
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(viewport);
                }
                debug!(
                    "[pipeline] Resized to {}x{} @{}x",
                    viewport.size.width, viewport.size.height, viewport.pixel_ratio
                );
            }
        }
    }
}
