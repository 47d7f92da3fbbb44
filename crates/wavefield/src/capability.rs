//! Rendering capability reported by the platform probe

use serde::{Deserialize, Serialize};

use crate::tier::TierKind;

/// Highest rendering tier the environment supports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// A GPU drawing context can be created
    Gpu,
    /// No GPU context, but CSS 3D transforms are available
    Dom3D,
    /// Neither; only a static background can be shown
    StaticOnly,
}

impl Capability {
    /// Combine the two probe checks into a capability
    ///
    /// The DOM check only matters when the GPU check fails.
    pub fn from_checks(gpu_context: bool, css_3d: bool) -> Self {
        match (gpu_context, css_3d) {
            (true, _) => Capability::Gpu,
            (false, true) => Capability::Dom3D,
            (false, false) => Capability::StaticOnly,
        }
    }

    /// Tier to try first for this capability
    pub fn first_tier(&self) -> TierKind {
        match self {
            Capability::Gpu => TierKind::Gpu,
            Capability::Dom3D => TierKind::Dom,
            Capability::StaticOnly => TierKind::Static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_checks() {
        assert_eq!(Capability::from_checks(true, false), Capability::Gpu);
        assert_eq!(Capability::from_checks(true, true), Capability::Gpu);
        assert_eq!(Capability::from_checks(false, true), Capability::Dom3D);
        assert_eq!(Capability::from_checks(false, false), Capability::StaticOnly);
    }

    #[test]
    fn test_first_tier() {
        assert_eq!(Capability::Gpu.first_tier(), TierKind::Gpu);
        assert_eq!(Capability::Dom3D.first_tier(), TierKind::Dom);
        assert_eq!(Capability::StaticOnly.first_tier(), TierKind::Static);
    }
}
