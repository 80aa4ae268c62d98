//! Argument-mismatch fixes as a registry provider.

// Arc is needed: the pool and judge are shared with the host's analyzer.
use std::sync::Arc;

use mend_diagnostic::{Diagnostic, ErrorCode, FixProvider};
use mend_ir::{ElementId, ProgramTree, Span};
use mend_types::{CandidateSource, ConversionJudge, TypePool};

use crate::{ArgumentFixResolver, CallFailure, ResolverConfig};

/// Offers argument casts for method (`E2001`) and constructor (`E2002`)
/// argument mismatches, and for ambiguous calls (`E2007`).
///
/// The diagnostic must name the offending call as its element. Fixes are
/// registered over the call's argument list.
pub struct ArgumentMismatchFixes<S> {
    pool: Arc<TypePool>,
    source: S,
    judge: Arc<dyn ConversionJudge + Send + Sync>,
    config: ResolverConfig,
}

impl<S: CandidateSource> ArgumentMismatchFixes<S> {
    /// Use `source` for candidates and the pool's own conversion rules.
    pub fn new(pool: Arc<TypePool>, source: S) -> Self {
        let judge = Arc::clone(&pool);
        ArgumentMismatchFixes {
            pool,
            source,
            judge,
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_judge(mut self, judge: Arc<dyn ConversionJudge + Send + Sync>) -> Self {
        self.judge = judge;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S: CandidateSource + Send + Sync> FixProvider for ArgumentMismatchFixes<S> {
    fn error_codes(&self) -> &'static [ErrorCode] {
        &[ErrorCode::E2001, ErrorCode::E2002, ErrorCode::E2007]
    }

    fn provide(&self, tree: &ProgramTree, diagnostic: &mut Diagnostic) {
        let Some(failure) = CallFailure::from_code(diagnostic.code()) else {
            return;
        };
        let Some(call) = diagnostic.element() else {
            tracing::trace!(code = %diagnostic.code(), "diagnostic names no call");
            return;
        };
        if tree.args(call).map_or(true, <[ElementId]>::is_empty) {
            return;
        }
        let candidates = match self.source.candidates(tree, call) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::debug!(%err, "no candidates for call");
                return;
            }
        };
        ArgumentFixResolver::new(&self.pool, &*self.judge)
            .with_config(self.config.clone())
            .for_failure(failure)
            .register_cast_actions(
                tree,
                call,
                &candidates,
                diagnostic,
                argument_list_range(tree, call),
            );
    }
}

/// Range covering every argument of `call`.
fn argument_list_range(tree: &ProgramTree, call: ElementId) -> Option<Span> {
    tree.args(call)
        .ok()?
        .iter()
        .filter_map(|&arg| tree.get(arg).map(|node| node.span))
        .reduce(Span::merge)
}

impl<S> std::fmt::Debug for ArgumentMismatchFixes<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentMismatchFixes")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
