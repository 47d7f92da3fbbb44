//! init / destroy and tier construction

use tracing::{debug, info, warn};

use super::{InitOptions, PipelineController};
use crate::capability::Capability;
use crate::config::{resolve, RenderConfig};
use crate::geometry::{FieldGeometry, GridLayout};
use crate::interaction::InteractionTracker;
use crate::math::CameraState;
use crate::platform::Platform;
use crate::tier::{TierError, TierKind, TierRenderer, TierState, Viewport};

/// A constructed renderer and the geometry it draws
pub(super) type BuiltTier = (Box<dyn TierRenderer>, Option<FieldGeometry>);

impl<P: Platform> PipelineController<P> {
    /// Bring the pipeline up
    ///
    /// Resolves the config, prepares the anchor elements, probes capability
    /// and activates the best tier that can be constructed, degrading one
    /// tier per failure. Always ends in an active state; calling it again
    /// (or after `destroy`) is logged and ignored.
    pub async fn init(&mut self, options: &InitOptions) {
        let Some(probing) = self.state.begin_probe() else {
            info!("[pipeline] init ignored in state '{}'", self.state.id());
            return;
        };
        self.state = probing;

        let path = self.platform.location_path();
        let config = resolve(
            options.preset.as_deref(),
            path.as_deref(),
            &options.overrides,
            options.color,
        );

        let anchors = options.anchors();
        if let Err(err) = self.platform.ensure_anchors(&anchors) {
            warn!("[pipeline] Anchor setup incomplete: {}", err);
        }

        let capability = self.platform.probe();
        match capability {
            Capability::Gpu => debug!("[pipeline] GPU context available"),
            Capability::Dom3D => info!("[pipeline] No GPU context, using CSS 3D transforms"),
            Capability::StaticOnly => info!("[pipeline] No GPU context or CSS 3D support, static background only"),
        }

        let viewport = self.platform.viewport();
        self.viewport = viewport;
        self.camera = Some(CameraState::new(
            config.camera_distance,
            config.camera_height,
            viewport.aspect_ratio(),
        ));
        self.tracker = Some(InteractionTracker::new(
            viewport.size,
            config.parallax_weight,
            config.smoothing,
        ));
        self.config = Some(config);

        let mut kind = capability.first_tier();
        let (renderer, geometry) = loop {
            match self.build_tier(kind, &config, viewport).await {
                Ok(built) => break built,
                Err(err) => {
                    let next = kind.downgrade().unwrap_or(TierKind::Static);
                    warn!("[pipeline] {} tier failed ({}), falling back to {}", kind.id(), err, next.id());
                    kind = next;
                }
            }
        };

        self.start_ms = self.platform.now_ms();
        self.time = 0.0;
        self.activate(kind, renderer, geometry);
        info!(
            "[pipeline] Initialized: tier={}, points={}",
            kind.id(),
            self.geometry.as_ref().map_or(0, FieldGeometry::point_count)
        );
    }

    /// Tear the pipeline down
    ///
    /// Cancels the pending frame, disposes the renderer and drops geometry,
    /// camera and interaction state. Safe to call in any state, repeatedly.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.platform.cancel_frame(handle);
        }
        if let Some(mut renderer) = self.renderer.take() {
            renderer.dispose();
        }
        self.geometry = None;
        self.camera = None;
        self.tracker = None;

        if self.state != TierState::Destroyed {
            info!("[pipeline] Destroyed (was '{}')", self.state.id());
        }
        self.state = self.state.destroy();
    }

    /// Construct the renderer for `kind`, awaiting GPU device acquisition
    async fn build_tier(
        &mut self,
        kind: TierKind,
        config: &RenderConfig,
        viewport: Viewport,
    ) -> Result<BuiltTier, TierError> {
        match kind {
            TierKind::Gpu => {
                let geometry = FieldGeometry::build(config);
                let renderer = self.platform.create_gpu(config, &geometry, viewport).await?;
                Ok((renderer, Some(geometry)))
            }
            TierKind::Dom | TierKind::Static => self.build_immediate(kind, config, viewport),
        }
    }

    /// Construct a renderer that needs no asynchronous setup
    pub(super) fn build_immediate(
        &mut self,
        kind: TierKind,
        config: &RenderConfig,
        viewport: Viewport,
    ) -> Result<BuiltTier, TierError> {
        match kind {
            TierKind::Gpu => Err(TierError::ContextUnavailable(
                "GPU tier requires asynchronous setup".to_string(),
            )),
            TierKind::Dom => {
                let geometry = FieldGeometry::with_layout(GridLayout::for_dom(config));
                let renderer = self.platform.create_dom(config, &geometry, viewport)?;
                Ok((renderer, Some(geometry)))
            }
            TierKind::Static => Ok((self.platform.create_static(config), None)),
        }
    }

    /// Install a freshly built renderer and start its frame loop
    pub(super) fn activate(
        &mut self,
        kind: TierKind,
        renderer: Box<dyn TierRenderer>,
        geometry: Option<FieldGeometry>,
    ) {
        match self.state.activate(kind) {
            Some(next) => self.state = next,
            None => {
                warn!("[pipeline] Rejected transition '{}' -> {}", self.state.id(), kind.id());
                let mut renderer = renderer;
                renderer.dispose();
                return;
            }
        }

        self.platform.set_fallback_visible(kind == TierKind::Static);

        let animates = renderer.animates();
        self.renderer = Some(renderer);
        self.geometry = geometry;

        if animates {
            self.schedule_frame();
        }
    }
}
