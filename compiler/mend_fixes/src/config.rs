//! Resolver configuration.

/// What makes two argument fixes duplicates of each other.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DedupKey {
    /// Same position and same target type.
    #[default]
    TypeIdentity,
    /// Same position and same rendered target text. Distinct types that
    /// print identically collapse into one fix.
    RenderedText,
}

/// Configuration for [`ArgumentFixResolver`](crate::ArgumentFixResolver).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct ResolverConfig {
    /// How duplicate fixes are detected.
    pub dedup: DedupKey,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never offer two fixes that would read the same to the user.
    pub fn by_rendered_text() -> Self {
        ResolverConfig {
            dedup: DedupKey::RenderedText,
        }
    }
}
