//! The engine facade.

// Arc is needed: the member table is shared between the checker and the
// argument-mismatch provider.
use std::sync::Arc;

use mend_diagnostic::{
    ApplyError, DiagnosticSet, FixAction, FixApplier, FixProvider, FixProviderRegistry,
};
use mend_fixes::ArgumentMismatchFixes;
use mend_ir::{ElementId, Generation, SharedProgram};
use mend_types::{MemberTable, TypePool};

use crate::{CallChecker, EngineConfig};

/// Checks a shared program, offers fixes, and applies the chosen one.
pub struct FixEngine {
    program: SharedProgram,
    members: Arc<MemberTable>,
    providers: FixProviderRegistry,
    applier: FixApplier,
    config: EngineConfig,
}

impl FixEngine {
    pub fn new(program: SharedProgram, members: MemberTable) -> Self {
        Self::with_config(program, members, EngineConfig::default())
    }

    /// Create an engine with the argument-mismatch provider registered.
    pub fn with_config(program: SharedProgram, members: MemberTable, config: EngineConfig) -> Self {
        let members = Arc::new(members);
        let mut providers = FixProviderRegistry::new();
        providers.register(
            ArgumentMismatchFixes::new(Arc::clone(members.pool()), Arc::clone(&members))
                .with_config(config.resolver.clone()),
        );
        FixEngine {
            program,
            members,
            providers,
            applier: FixApplier::new(),
            config,
        }
    }

    pub fn program(&self) -> &SharedProgram {
        &self.program
    }

    pub fn pool(&self) -> &Arc<TypePool> {
        self.members.pool()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a provider. It runs after the ones already registered.
    pub fn register_provider<P: FixProvider + 'static>(&mut self, provider: P) {
        self.providers.register(provider);
    }

    /// Check every call in the program and attach fixes.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn check(&self) -> DiagnosticSet {
        let tree = self.program.read();
        let pool = self.members.pool();
        let mut set = CallChecker::new(pool, &**pool, &*self.members).check(&tree);
        self.providers.run(&tree, &mut set);
        set
    }

    /// Attach fixes to diagnostics produced elsewhere.
    pub fn post_process(&self, set: &mut DiagnosticSet) {
        let tree = self.program.read();
        self.providers.run(&tree, set);
    }

    /// Describe a fix against the current program.
    pub fn describe(&self, fix: &dyn FixAction) -> String {
        fix.describe(&self.program.read())
    }

    pub fn apply(&self, fix: &dyn FixAction) -> Result<Generation, ApplyError> {
        self.applier.apply(fix, &self.program)
    }

    /// Render an element as source text.
    pub fn render(&self, id: ElementId) -> String {
        self.program.read().render(id, &**self.pool())
    }
}

impl std::fmt::Debug for FixEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixEngine")
            .field("generation", &self.program.generation())
            .field("providers", &self.providers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
