//! Argument-fix resolution.
//!
//! For a call that matches no overload, every candidate signature is a hint
//! at what the caller meant. Where a candidate expects a type at position
//! `i` that the argument is not assignable to but can be cast to, casting
//! that argument is a fix, provided the call then fits the candidate.
//!
//! An ambiguous call is different: every argument already fits some
//! overload. There a cast is a fix when it makes the call bind to exactly
//! one candidate, so even a widening cast qualifies.
//!
//! Methods and constructors are handled identically: the resolver only
//! sees a call element and a [`SignatureCandidateSet`].

use std::sync::Arc;

use mend_diagnostic::{register_all, Diagnostic, ErrorCode, FixRef};
use mend_ir::{ElementId, NodeKind, ProgramTree, Span, TypeId};
use mend_types::{CallResolution, ConversionJudge, SignatureCandidateSet, TypePool};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::{CastArgumentFix, DedupKey, ResolverConfig};

/// Types of one call argument.
#[derive(Copy, Clone, Debug)]
struct ArgTypes {
    element: ElementId,
    /// Static type of the argument as written.
    current: TypeId,
    /// Type of the value being converted: the operand of an existing cast,
    /// otherwise the argument itself.
    source: TypeId,
}

/// How the call failed to resolve, which decides what a cast must achieve.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CallFailure {
    /// No candidate accepts the arguments.
    #[default]
    Inapplicable,
    /// Several candidates accept them and none is most specific.
    Ambiguous,
}

impl CallFailure {
    /// The failure a diagnostic code reports, if it is a call failure.
    pub fn from_code(code: ErrorCode) -> Option<Self> {
        if code.is_argument_mismatch() {
            Some(CallFailure::Inapplicable)
        } else if code.is_ambiguous_call() {
            Some(CallFailure::Ambiguous)
        } else {
            None
        }
    }
}

/// Identity used to drop duplicate fixes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Seen {
    Type(usize, TypeId),
    Text(usize, String),
}

/// Produces cast fixes for a call from its overload candidates.
pub struct ArgumentFixResolver<'a> {
    pool: &'a TypePool,
    judge: &'a dyn ConversionJudge,
    config: ResolverConfig,
    failure: CallFailure,
}

impl<'a> ArgumentFixResolver<'a> {
    pub fn new(pool: &'a TypePool, judge: &'a dyn ConversionJudge) -> Self {
        ArgumentFixResolver {
            pool,
            judge,
            config: ResolverConfig::default(),
            failure: CallFailure::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn for_failure(mut self, failure: CallFailure) -> Self {
        self.failure = failure;
        self
    }

    /// Cast fixes for `call`, in candidate order, duplicates removed.
    ///
    /// Candidates whose arity differs from the call's are skipped, as are
    /// arguments of unknown type.
    #[tracing::instrument(
        level = "debug",
        skip(self, tree, candidates),
        fields(candidates = candidates.len())
    )]
    pub fn resolve(
        &self,
        tree: &ProgramTree,
        call: ElementId,
        candidates: &SignatureCandidateSet,
    ) -> Vec<FixRef> {
        let Some(args) = Self::argument_types(tree, call) else {
            tracing::debug!("not a live call, no fixes");
            return Vec::new();
        };
        let current: SmallVec<[TypeId; 4]> = args.iter().map(|arg| arg.current).collect();

        let mut seen = FxHashSet::default();
        let mut fixes: Vec<FixRef> = Vec::new();
        for candidate in candidates {
            let params = candidate.parameter_types(self.pool);
            if params.len() != args.len() {
                tracing::trace!(
                    signature = %candidate.signature.name,
                    arity = params.len(),
                    "arity differs, candidate skipped"
                );
                continue;
            }
            for (index, (arg, &param)) in args.iter().zip(params.iter()).enumerate() {
                if arg.source.is_unknown() || param.is_unknown() {
                    continue;
                }
                let needs_cast = match self.failure {
                    CallFailure::Inapplicable => !self.judge.is_assignable(arg.current, param),
                    CallFailure::Ambiguous => arg.current != param,
                };
                if !needs_cast {
                    continue;
                }
                if !self.judge.is_convertible(arg.source, param) {
                    tracing::trace!(index, "argument not convertible");
                    continue;
                }
                let mut converted = current.clone();
                converted[index] = param;
                if !self.cast_resolves(candidates, &params, &converted) {
                    tracing::trace!(index, "cast alone does not fix the call");
                    continue;
                }
                let name = self.pool.display(param);
                let key = match self.config.dedup {
                    DedupKey::TypeIdentity => Seen::Type(index, param),
                    DedupKey::RenderedText => Seen::Text(index, name.clone()),
                };
                if seen.insert(key) {
                    fixes.push(Arc::new(CastArgumentFix::new(
                        tree,
                        call,
                        index,
                        arg.element,
                        param,
                        name,
                    )));
                }
            }
        }
        tracing::debug!(fixes = fixes.len(), "argument fixes resolved");
        fixes
    }

    /// Resolve and register the fixes on `diagnostic` as one group.
    ///
    /// Returns the number of fixes registered.
    pub fn register_cast_actions(
        &self,
        tree: &ProgramTree,
        call: ElementId,
        candidates: &SignatureCandidateSet,
        diagnostic: &mut Diagnostic,
        range: Option<Span>,
    ) -> usize {
        let fixes = self.resolve(tree, call, candidates);
        let count = fixes.len();
        register_all(diagnostic, fixes, range);
        count
    }

    /// Whether the call with `converted` argument types is no longer broken.
    fn cast_resolves(
        &self,
        candidates: &SignatureCandidateSet,
        params: &[TypeId],
        converted: &[TypeId],
    ) -> bool {
        match self.failure {
            CallFailure::Inapplicable => self.judge.is_applicable(params, converted),
            CallFailure::Ambiguous => matches!(
                candidates.resolve(self.pool, self.judge, converted),
                CallResolution::Resolved(_)
            ),
        }
    }

    fn argument_types(tree: &ProgramTree, call: ElementId) -> Option<Vec<ArgTypes>> {
        if !tree.is_in_scope(call) {
            return None;
        }
        let args = tree.args(call).ok()?;
        args.iter()
            .map(|&element| {
                let node = tree.get(element)?;
                let source = match &node.kind {
                    NodeKind::Cast { operand, .. } => tree.type_of(*operand)?,
                    _ => node.ty,
                };
                Some(ArgTypes {
                    element,
                    current: node.ty,
                    source,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for ArgumentFixResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentFixResolver")
            .field("config", &self.config)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
