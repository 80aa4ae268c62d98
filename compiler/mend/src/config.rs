//! Engine configuration.

use mend_fixes::ResolverConfig;

/// Configuration for a [`FixEngine`](crate::FixEngine).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct EngineConfig {
    /// Settings for the argument-fix resolver.
    pub resolver: ResolverConfig,
}

impl EngineConfig {
    /// Deduplicate argument fixes by how they read, not by type identity.
    pub fn by_rendered_text() -> Self {
        EngineConfig {
            resolver: ResolverConfig::by_rendered_text(),
        }
    }
}
