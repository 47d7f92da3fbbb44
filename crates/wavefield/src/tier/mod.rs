//! Rendering tiers
//!
//! Three mutually exclusive strategies, ordered by fidelity:
//!
//! - **Gpu**: one instanced draw call over every point (wgpu)
//! - **Dom**: one CSS-3D-transformed element per point, reduced grid
//! - **Static**: a pre-existing gradient element, no per-frame work
//!
//! [`TierState`] is the pipeline's state machine. Transitions only ever move
//! down the fidelity order; nothing re-enters [`TierState::GpuActive`] once it
//! has been left.

mod dom;
mod points;
mod renderer;
mod state;

pub use dom::{
    dom_point_style, perspective_px, point_transform, scene_transform, tint_css, DomPointStyle,
};
pub use points::{
    disc_alpha, effective_pixel_ratio, point_size_px, point_tint, DISC_INNER_RADIUS, MAX_PIXEL_RATIO,
    POINT_ATTENUATION,
};
pub use renderer::{FrameInput, TierRenderer, Viewport};
pub use state::TierState;

use serde::{Deserialize, Serialize};

/// One of the three rendering strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Gpu,
    Dom,
    Static,
}

impl TierKind {
    /// Fidelity rank; higher is better
    pub fn rank(&self) -> u8 {
        match self {
            TierKind::Gpu => 2,
            TierKind::Dom => 1,
            TierKind::Static => 0,
        }
    }

    /// Next tier down, or `None` at the floor
    pub fn downgrade(&self) -> Option<TierKind> {
        match self {
            TierKind::Gpu => Some(TierKind::Dom),
            TierKind::Dom => Some(TierKind::Static),
            TierKind::Static => None,
        }
    }

    /// Get the string ID for this tier
    pub fn id(&self) -> &'static str {
        match self {
            TierKind::Gpu => "gpu",
            TierKind::Dom => "dom",
            TierKind::Static => "static",
        }
    }
}

/// Failures while constructing or driving a tier renderer
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TierError {
    /// No GPU drawing context could be created.
    #[error("GPU context unavailable: {0}")]
    ContextUnavailable(String),

    /// The GPU backend offered no adapter.
    #[error("no suitable GPU adapter")]
    NoAdapter,

    /// Adapter found but the device request failed.
    #[error("GPU device request failed: {0}")]
    DeviceRequest(String),

    /// Surface creation or configuration failed.
    #[error("surface error: {0}")]
    Surface(String),

    /// The current frame could not be drawn; the next one may succeed.
    #[error("frame skipped: {0}")]
    FrameSkipped(String),

    /// The tier can no longer draw at all.
    #[error("device lost: {0}")]
    DeviceLost(String),

    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// An anchor element is missing and could not be created.
    #[error("anchor element '{0}' unavailable")]
    MissingAnchor(String),
}

impl TierError {
    /// Whether the renderer must be replaced by a lower tier
    pub fn requires_downgrade(&self) -> bool {
        !matches!(self, TierError::FrameSkipped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downgrade_chain_ends_at_static() {
        assert_eq!(TierKind::Gpu.downgrade(), Some(TierKind::Dom));
        assert_eq!(TierKind::Dom.downgrade(), Some(TierKind::Static));
        assert_eq!(TierKind::Static.downgrade(), None);
    }

    #[test]
    fn test_downgrade_lowers_rank() {
        let mut tier = TierKind::Gpu;
        while let Some(next) = tier.downgrade() {
            assert!(next.rank() < tier.rank());
            tier = next;
        }
    }

    #[test]
    fn test_skipped_frame_is_not_a_downgrade() {
        assert!(!TierError::FrameSkipped("outdated".into()).requires_downgrade());
        assert!(TierError::DeviceLost("gone".into()).requires_downgrade());
    }
}
