//! Pipeline tier state machine

use serde::{Deserialize, Serialize};

use super::TierKind;

/// Lifecycle state of one pipeline
///
/// ```text
/// Uninitialized -> ProbingCapability -> GpuActive | DomActive | StaticFallback -> Destroyed
///                                       GpuActive -> DomActive -> StaticFallback
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierState {
    #[default]
    Uninitialized,
    ProbingCapability,
    GpuActive,
    DomActive,
    StaticFallback,
    Destroyed,
}

impl TierState {
    /// Active state for a tier
    pub fn active(kind: TierKind) -> Self {
        match kind {
            TierKind::Gpu => TierState::GpuActive,
            TierKind::Dom => TierState::DomActive,
            TierKind::Static => TierState::StaticFallback,
        }
    }

    /// Tier currently rendering, if any
    pub fn tier(&self) -> Option<TierKind> {
        match self {
            TierState::GpuActive => Some(TierKind::Gpu),
            TierState::DomActive => Some(TierKind::Dom),
            TierState::StaticFallback => Some(TierKind::Static),
            TierState::Uninitialized | TierState::ProbingCapability | TierState::Destroyed => None,
        }
    }

    /// Whether a tier renderer is alive in this state
    #[inline]
    pub fn is_active(&self) -> bool {
        self.tier().is_some()
    }

    /// `Uninitialized -> ProbingCapability`
    pub fn begin_probe(self) -> Option<Self> {
        match self {
            TierState::Uninitialized => Some(TierState::ProbingCapability),
            _ => None,
        }
    }

    /// Enter the active state for `kind`
    ///
    /// Allowed from `ProbingCapability` (any tier) and from an active state
    /// to a strictly lower tier. Everything else is rejected, which is what
    /// keeps degradation one-directional.
    pub fn activate(self, kind: TierKind) -> Option<Self> {
        match self {
            TierState::ProbingCapability => Some(TierState::active(kind)),
            TierState::GpuActive | TierState::DomActive | TierState::StaticFallback => {
                let current = self.tier()?;
                (kind.rank() < current.rank()).then(|| TierState::active(kind))
            }
            TierState::Uninitialized | TierState::Destroyed => None,
        }
    }

    /// Any state -> `Destroyed`
    #[inline]
    pub fn destroy(self) -> Self {
        TierState::Destroyed
    }

    /// Get the string ID for this state
    pub fn id(&self) -> &'static str {
        match self {
            TierState::Uninitialized => "uninitialized",
            TierState::ProbingCapability => "probingCapability",
            TierState::GpuActive => "gpuActive",
            TierState::DomActive => "domActive",
            TierState::StaticFallback => "staticFallback",
            TierState::Destroyed => "destroyed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TierState; 6] = [
        TierState::Uninitialized,
        TierState::ProbingCapability,
        TierState::GpuActive,
        TierState::DomActive,
        TierState::StaticFallback,
        TierState::Destroyed,
    ];

    #[test]
    fn test_probe_only_from_uninitialized() {
        for state in ALL {
            let expected = (state == TierState::Uninitialized).then_some(TierState::ProbingCapability);
            assert_eq!(state.begin_probe(), expected, "{:?}", state);
        }
    }

    #[test]
    fn test_probing_can_enter_any_tier() {
        let probing = TierState::ProbingCapability;
        assert_eq!(probing.activate(TierKind::Gpu), Some(TierState::GpuActive));
        assert_eq!(probing.activate(TierKind::Dom), Some(TierState::DomActive));
        assert_eq!(probing.activate(TierKind::Static), Some(TierState::StaticFallback));
    }

    #[test]
    fn test_downgrade_edges() {
        assert_eq!(TierState::GpuActive.activate(TierKind::Dom), Some(TierState::DomActive));
        assert_eq!(TierState::DomActive.activate(TierKind::Static), Some(TierState::StaticFallback));
    }

    #[test]
    fn test_gpu_never_reentered() {
        for state in ALL {
            if state == TierState::ProbingCapability {
                continue;
            }
            assert_eq!(state.activate(TierKind::Gpu), None, "{:?}", state);
        }
    }

    #[test]
    fn test_no_upgrade_or_lateral_moves() {
        assert_eq!(TierState::DomActive.activate(TierKind::Dom), None);
        assert_eq!(TierState::StaticFallback.activate(TierKind::Dom), None);
        assert_eq!(TierState::StaticFallback.activate(TierKind::Static), None);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let destroyed = TierState::GpuActive.destroy();
        assert_eq!(destroyed, TierState::Destroyed);
        assert_eq!(destroyed.begin_probe(), None);
        assert_eq!(destroyed.activate(TierKind::Static), None);
        assert!(!destroyed.is_active());
    }
}
