//! Fix producers keyed by diagnostic cause.
//!
//! A [`FixProvider`] looks at one diagnostic and registers whatever fixes it
//! can offer. Providers know nothing about each other; the registry runs
//! every provider declared for a diagnostic's code, in registration order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mend_ir::ProgramTree;

use crate::{Diagnostic, DiagnosticSet, ErrorCode};

/// Produces fixes for diagnostics with specific error codes.
pub trait FixProvider: Send + Sync {
    /// Error codes this provider handles.
    fn error_codes(&self) -> &'static [ErrorCode];

    /// Register fixes for `diagnostic` through [`register`](crate::register).
    fn provide(&self, tree: &ProgramTree, diagnostic: &mut Diagnostic);
}

/// Registry of fix providers.
pub struct FixProviderRegistry {
    /// All registered providers, in registration order.
    providers: Vec<Arc<dyn FixProvider>>,
    /// Index from error code to provider indices.
    by_code: HashMap<ErrorCode, Vec<usize>>,
}

impl Default for FixProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FixProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        FixProviderRegistry {
            providers: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    /// Register a provider for every error code it declares.
    pub fn register<P: FixProvider + 'static>(&mut self, provider: P) {
        let provider = Arc::new(provider);
        let idx = self.providers.len();

        for &code in provider.error_codes() {
            self.by_code.entry(code).or_default().push(idx);
        }

        self.providers.push(provider);
    }

    /// Run the providers for one diagnostic.
    pub fn provide(&self, tree: &ProgramTree, diagnostic: &mut Diagnostic) {
        if let Some(indices) = self.by_code.get(&diagnostic.code()) {
            for &idx in indices {
                self.providers[idx].provide(tree, diagnostic);
            }
        }
    }

    /// Run the providers over a whole pass.
    ///
    /// A set computed against an older generation is left untouched: the
    /// elements its diagnostics name may no longer exist.
    #[tracing::instrument(level = "debug", skip_all, fields(diagnostics = set.len()))]
    pub fn run(&self, tree: &ProgramTree, set: &mut DiagnosticSet) {
        if !set.is_current(tree) {
            tracing::debug!(
                set = %set.generation(),
                tree = %tree.generation(),
                "diagnostic set is outdated, no fixes produced"
            );
            return;
        }
        for diagnostic in set.iter_mut() {
            self.provide(tree, diagnostic);
        }
    }

    /// Check if any providers are registered for the given code.
    pub fn has_providers_for(&self, code: ErrorCode) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Get the number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Get the number of error code -> provider mappings.
    pub fn mapping_count(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for FixProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixProviderRegistry")
            .field("provider_count", &self.provider_count())
            .field("codes", &self.by_code.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
