//! The fix-action contract.
//!
//! Every corrective action is a [`FixAction`] behind an [`Arc`], so the same
//! action can sit in a [`FixGroup`], be handed to presentation and be
//! applied later without copying. Actions name program elements by
//! [`ElementId`](mend_ir::ElementId), never by reference: the tree may have
//! changed by the time the user picks one, which is what `is_available`
//! re-checks.

// Arc is needed: fix actions are shared between the diagnostic that owns
// them and whoever applies them.
use std::fmt;
use std::sync::Arc;

use mend_ir::{ProgramTree, Span, WriteScope};

use crate::ApplyError;

/// A single executable corrective transformation.
pub trait FixAction: Send + Sync + fmt::Debug {
    /// User-facing description. Computed on demand from the current tree.
    fn describe(&self, tree: &ProgramTree) -> String;

    /// Grouping identity for batch application. Stable across re-creation
    /// of equivalent fixes.
    fn family_key(&self) -> &str;

    /// Whether the fix can still be applied to `tree`.
    ///
    /// Must not be cached: it is asked again right before application.
    fn is_available(&self, tree: &ProgramTree) -> bool;

    /// Perform the fix. Returns [`ApplyError::Stale`] without touching the
    /// tree if `is_available` would be false.
    fn apply(&self, cx: &mut ApplyContext<'_, '_>) -> Result<(), ApplyError>;

    /// Whether `apply` edits the program and needs an exclusive write scope.
    fn requires_write_scope(&self) -> bool {
        true
    }
}

/// Shared handle to a fix action.
pub type FixRef = Arc<dyn FixAction>;

/// What a fix may touch while it is applied.
pub enum ApplyContext<'a, 's> {
    /// Read-only: the fix declared it does not need a write scope.
    Read(&'a ProgramTree),
    /// Inside a write scope; edits are journaled until commit.
    Write(&'a mut WriteScope<'s>),
}

impl<'s> ApplyContext<'_, 's> {
    /// The program tree as it currently is, including uncommitted edits.
    pub fn tree(&self) -> &ProgramTree {
        match self {
            ApplyContext::Read(tree) => tree,
            ApplyContext::Write(scope) => scope,
        }
    }

    /// Edit access. Fails when no write scope was entered.
    pub fn edits(&mut self) -> Result<&mut WriteScope<'s>, ApplyError> {
        match self {
            ApplyContext::Write(scope) => Ok(&mut **scope),
            ApplyContext::Read(_) => Err(ApplyError::EditFailed(
                "fix attempted an edit without a write scope".to_string(),
            )),
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, ApplyContext::Write(_))
    }
}

/// Fixes offered together for one diagnostic at one range.
///
/// The primary is the preferred choice; alternatives keep the order their
/// producer gave them.
#[derive(Clone, Debug)]
pub struct FixGroup {
    pub primary: FixRef,
    pub alternatives: Vec<FixRef>,
    pub range: Span,
}

impl FixGroup {
    pub fn new(primary: FixRef, alternatives: Vec<FixRef>, range: Span) -> Self {
        FixGroup {
            primary,
            alternatives,
            range,
        }
    }

    /// Primary first, then alternatives.
    pub fn iter(&self) -> impl Iterator<Item = &FixRef> {
        std::iter::once(&self.primary).chain(self.alternatives.iter())
    }

    /// Number of fixes in the group, primary included.
    pub fn len(&self) -> usize {
        1 + self.alternatives.len()
    }

    /// Always false: a group holds at least its primary fix.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn has_alternatives(&self) -> bool {
        !self.alternatives.is_empty()
    }
}
