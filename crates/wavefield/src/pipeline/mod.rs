//! Pipeline controller
//!
//! [`PipelineController`] owns one wave field from `init` to `destroy`:
//! the resolved config, the active tier renderer and its geometry, the
//! camera and the interaction tracker.
//!
//! ```text
//! init -> resolve -> anchors -> probe -> build tier (downgrading on failure)
//!      -> frame loop: advance geometry -> smooth parallax -> paint -> reschedule
//! destroy -> cancel frame -> dispose renderer
//! ```
//!
//! The controller is single-threaded. Hosts feed it events through
//! [`handle`](PipelineController::handle) and animation callbacks through
//! [`frame`](PipelineController::frame); nothing else mutates it.

mod events;
mod frame;
mod lifecycle;
mod options;

pub use events::InteractionEvent;
pub use options::{AnchorIds, InitOptions, DEFAULT_FALLBACK_ID, DEFAULT_SURFACE_ID};

use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::interaction::InteractionTracker;
use crate::math::{CameraState, Size};
use crate::platform::{FrameHandle, Platform};
use crate::tier::{TierKind, TierRenderer, TierState, Viewport};

/// Orchestrates one wave-field background
pub struct PipelineController<P: Platform> {
    platform: P,
    state: TierState,
    config: Option<RenderConfig>,
    renderer: Option<Box<dyn TierRenderer>>,
    geometry: Option<FieldGeometry>,
    camera: Option<CameraState>,
    tracker: Option<InteractionTracker>,
    viewport: Viewport,
    /// Clock reading when the active tier started animating
    start_ms: f64,
    /// Time cursor of the last painted frame
    time: f32,
    pending_frame: Option<FrameHandle>,
}

impl<P: Platform> PipelineController<P> {
    /// Create an uninitialized controller
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            state: TierState::Uninitialized,
            config: None,
            renderer: None,
            geometry: None,
            camera: None,
            tracker: None,
            viewport: Viewport::new(Size::ZERO, 1.0),
            start_ms: 0.0,
            time: 0.0,
            pending_frame: None,
        }
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> TierState {
        self.state
    }

    /// Active tier, if any
    #[inline]
    pub fn tier(&self) -> Option<TierKind> {
        self.state.tier()
    }

    /// Resolved config (after `init`)
    #[inline]
    pub fn config(&self) -> Option<&RenderConfig> {
        self.config.as_ref()
    }

    /// Time cursor of the last frame
    #[inline]
    pub fn time_cursor(&self) -> f32 {
        self.time
    }

    pub fn camera(&self) -> Option<&CameraState> {
        self.camera.as_ref()
    }

    pub fn geometry(&self) -> Option<&FieldGeometry> {
        self.geometry.as_ref()
    }

    pub fn tracker(&self) -> Option<&InteractionTracker> {
        self.tracker.as_ref()
    }

    /// Last viewport seen by `init` or a resize
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether an animation frame is currently scheduled
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
