//! Per-frame animation step

use tracing::{debug, warn};

use super::PipelineController;
use crate::platform::Platform;
use crate::tier::{FrameInput, TierError, TierKind};

impl<P: Platform> PipelineController<P> {
    /// Run one animation step at clock reading `now_ms`
    ///
    /// Advances the geometry to `elapsed_seconds * wave_speed`, steps the
    /// parallax smoothing once, paints, and schedules the next frame. Does
    /// nothing unless an animating tier is active.
    pub fn frame(&mut self, now_ms: f64) {
        self.pending_frame = None;

        let Some(config) = self.config else {
            return;
        };
        let (Some(renderer), Some(geometry), Some(camera), Some(tracker)) = (
            self.renderer.as_mut(),
            self.geometry.as_mut(),
            self.camera.as_mut(),
            self.tracker.as_mut(),
        ) else {
            return;
        };
        if !renderer.animates() {
            return;
        }

        let elapsed_secs = ((now_ms - self.start_ms).max(0.0) / 1000.0) as f32;
        let t = elapsed_secs * config.wave_speed;
        geometry.advance(&config, t);
        camera.apply_parallax(tracker.step());
        self.time = t;

        let result = renderer.paint(&FrameInput {
            config: &config,
            geometry,
            camera,
            time: t,
        });

        match result {
            Ok(()) => {}
            Err(err) if !err.requires_downgrade() => {
                debug!("[pipeline] {}", err);
            }
            Err(err) => {
                self.degrade(err);
                return;
            }
        }

        self.schedule_frame();
    }

    /// Request the next animation frame unless one is already pending
    pub(super) fn schedule_frame(&mut self) {
        if self.pending_frame.is_some() {
            return;
        }
        self.pending_frame = self.platform.request_frame();
        if self.pending_frame.is_none() {
            debug!("[pipeline] Frame request refused by host");
        }
    }

    /// Replace a renderer that can no longer draw with the next tier down
    fn degrade(&mut self, cause: TierError) {
        let (Some(mut failed), Some(config)) = (self.state.tier(), self.config) else {
            return;
        };
        let Some(mut next) = failed.downgrade() else {
            debug!("[pipeline] {} tier reported {}, nothing below it", failed.id(), cause);
            return;
        };
        if let Some(mut renderer) = self.renderer.take() {
            renderer.dispose();
        }
        self.geometry = None;

        let viewport = self.viewport;
        let mut cause = cause;
        loop {
            warn!("[pipeline] {} tier failed ({}), falling back to {}", failed.id(), cause, next.id());
            match self.build_immediate(next, &config, viewport) {
                Ok((renderer, geometry)) => {
                    self.activate(next, renderer, geometry);
                    return;
                }
                Err(err) => {
                    cause = err;
                    failed = next;
                    next = next.downgrade().unwrap_or(TierKind::Static);
                }
            }
        }
    }
}
