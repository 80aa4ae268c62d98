//! Reference call checker.
//!
//! Finds method and constructor calls that no visible overload accepts, or
//! that several overloads accept with none most specific, and reports them
//! with the call as the diagnostic's element, which is what the argument
//! fix provider needs. Calls to unknown methods or classes are reported
//! too, without an element.

use mend_diagnostic::{Diagnostic, DiagnosticSet, ErrorCode};
use mend_ir::{ElementId, Node, NodeKind, ProgramTree, TypeId};
use mend_types::{
    CallResolution, CandidateSource, ConversionJudge, ResolutionError, SignatureCandidateSet,
    TypePool,
};
use smallvec::SmallVec;

/// Checks every call reachable from the tree's roots.
pub struct CallChecker<'a> {
    pool: &'a TypePool,
    judge: &'a dyn ConversionJudge,
    source: &'a dyn CandidateSource,
}

impl<'a> CallChecker<'a> {
    pub fn new(
        pool: &'a TypePool,
        judge: &'a dyn ConversionJudge,
        source: &'a dyn CandidateSource,
    ) -> Self {
        CallChecker {
            pool,
            judge,
            source,
        }
    }

    /// Diagnose `tree`. Calls are reported in source order, outer first.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check(&self, tree: &ProgramTree) -> DiagnosticSet {
        let mut set = DiagnosticSet::new(tree.generation());
        let mut stack: Vec<ElementId> = tree.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = tree.get(id) else {
                continue;
            };
            stack.extend(node.kind.children().into_iter().rev());
            if let Some(diagnostic) = self.check_call(tree, id, node) {
                set.push(diagnostic);
            }
        }
        tracing::debug!(diagnostics = set.len(), "calls checked");
        set
    }

    fn check_call(&self, tree: &ProgramTree, id: ElementId, node: &Node) -> Option<Diagnostic> {
        let (code, what, name, args) = match &node.kind {
            NodeKind::Call { callee, args } => (ErrorCode::E2001, "method", callee, args),
            NodeKind::New { class, args } => (ErrorCode::E2002, "constructor", class, args),
            _ => return None,
        };
        let arg_types: SmallVec<[TypeId; 4]> = args
            .iter()
            .map(|&arg| tree.type_of(arg).unwrap_or(TypeId::UNKNOWN))
            .collect();
        // An argument of unknown type already has its own error.
        if arg_types.iter().any(|ty| ty.is_unknown()) {
            return None;
        }

        let candidates = match self.source.candidates(tree, id) {
            Ok(candidates) => candidates,
            Err(ResolutionError::UnknownMethod(name)) => {
                return Some(
                    Diagnostic::error(ErrorCode::E2004, node.span)
                        .with_message(format!("cannot find method `{name}`")),
                );
            }
            Err(ResolutionError::UnknownClass(name)) => {
                return Some(
                    Diagnostic::error(ErrorCode::E2005, node.span)
                        .with_message(format!("cannot find class `{name}`")),
                );
            }
            Err(err) => {
                tracing::trace!(%err, "call not checked");
                return None;
            }
        };

        let diagnostic = match candidates.resolve(self.pool, self.judge, &arg_types) {
            CallResolution::Resolved(_) => return None,
            CallResolution::Inapplicable => Diagnostic::error(code, node.span).with_message(
                format!("no {what} `{name}` accepts ({})", self.render(&arg_types)),
            ),
            CallResolution::Ambiguous(first, second) => {
                Diagnostic::error(ErrorCode::E2007, node.span).with_message(format!(
                    "ambiguous call to {what} `{name}`: both {name}({}) and {name}({}) match",
                    self.render_params(&candidates, first),
                    self.render_params(&candidates, second),
                ))
            }
        };
        Some(diagnostic.with_element(id))
    }

    fn render(&self, types: &[TypeId]) -> String {
        let rendered: Vec<String> = types.iter().map(|&ty| self.pool.display(ty)).collect();
        rendered.join(", ")
    }

    fn render_params(&self, candidates: &SignatureCandidateSet, index: usize) -> String {
        candidates
            .get(index)
            .map(|candidate| self.render(&candidate.parameter_types(self.pool)))
            .unwrap_or_default()
    }
}
