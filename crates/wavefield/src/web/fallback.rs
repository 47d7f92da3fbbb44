//! Static fallback tier

use super::anchors::Anchor;
use crate::config::RenderConfig;
use crate::tier::{FrameInput, TierError, TierKind, TierRenderer, Viewport};

/// Background for a fallback element this crate created, tinted by `color`
fn tinted_gradient(config: &RenderConfig) -> String {
    format!(
        "radial-gradient(ellipse at 50% 120%, {}55 0%, #0b1320 60%, #05070d 100%)",
        config.color.to_css()
    )
}

/// The pre-existing gradient element; nothing to animate
pub struct StaticRenderer {
    fallback: Option<Anchor>,
}

impl StaticRenderer {
    /// Page-provided fallbacks keep their own styling; one created by the
    /// pipeline is tinted with the configured color.
    pub fn new(fallback: Option<Anchor>, config: &RenderConfig) -> Self {
        match &fallback {
            Some(anchor) if anchor.created => {
                if let Err(err) = anchor
                    .element
                    .style()
                    .set_property("background", &tinted_gradient(config))
                {
                    tracing::debug!("[fallback] tint not applied: {:?}", err);
                }
            }
            Some(_) => {}
            None => tracing::warn!("[fallback] No fallback element; background stays blank"),
        }
        Self { fallback }
    }
}

impl TierRenderer for StaticRenderer {
    fn kind(&self) -> TierKind {
        TierKind::Static
    }

    fn animates(&self) -> bool {
        false
    }

    fn paint(&mut self, _frame: &FrameInput<'_>) -> Result<(), TierError> {
        Ok(())
    }

    fn resize(&mut self, _viewport: Viewport) {
        // The element is sized by CSS
    }

    fn dispose(&mut self) {
        // The fallback element belongs to the page and is never removed
        if let Some(anchor) = self.fallback.take() {
            tracing::debug!("[fallback] Released #{}", anchor.element.id());
        }
    }
}
