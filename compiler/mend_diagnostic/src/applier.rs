//! Executing a chosen fix.
//!
//! Application is validate-then-mutate:
//!
//! 1. Check `is_available` under a read lock; a stale fix is rejected
//!    before any lock is held exclusively.
//! 2. Enter a write scope if the fix needs one, and check again, since
//!    another writer may have committed in between.
//! 3. Apply. Success commits the scope and bumps the program generation;
//!    any error rolls back every journaled edit.
//!
//! Either the whole fix is visible afterwards or none of it is.

use mend_ir::{Generation, SharedProgram};

use crate::{ApplyContext, ApplyError, FixAction};

/// Applies fix actions to a shared program.
#[derive(Clone, Debug, Default)]
pub struct FixApplier;

impl FixApplier {
    pub fn new() -> Self {
        FixApplier
    }

    /// Apply `fix` to `program`.
    ///
    /// Returns the program generation after application: a fresh one for
    /// fixes that edited, the unchanged one for read-only fixes.
    #[tracing::instrument(level = "debug", skip_all, fields(family = fix.family_key()))]
    pub fn apply(
        &self,
        fix: &dyn FixAction,
        program: &SharedProgram,
    ) -> Result<Generation, ApplyError> {
        let result = if fix.requires_write_scope() {
            Self::apply_in_scope(fix, program)
        } else {
            Self::apply_read_only(fix, program)
        };
        match &result {
            Ok(generation) => tracing::debug!(%generation, "fix applied"),
            Err(ApplyError::Stale) => tracing::debug!("fix is stale, nothing applied"),
            Err(ApplyError::EditFailed(details)) => {
                tracing::error!(%details, "fix failed, edits rolled back");
            }
        }
        result
    }

    fn apply_read_only(
        fix: &dyn FixAction,
        program: &SharedProgram,
    ) -> Result<Generation, ApplyError> {
        let tree = program.read();
        if !fix.is_available(&tree) {
            return Err(ApplyError::Stale);
        }
        fix.apply(&mut ApplyContext::Read(&tree))?;
        Ok(tree.generation())
    }

    fn apply_in_scope(
        fix: &dyn FixAction,
        program: &SharedProgram,
    ) -> Result<Generation, ApplyError> {
        // The read guard must be released before the write lock is taken.
        let available = fix.is_available(&program.read());
        if !available {
            return Err(ApplyError::Stale);
        }

        let mut scope = program.write_scope();
        if !fix.is_available(&scope) {
            scope.rollback();
            return Err(ApplyError::Stale);
        }
        let result = fix.apply(&mut ApplyContext::Write(&mut scope));
        match result {
            Ok(()) => Ok(scope.commit()),
            Err(err) => {
                scope.rollback();
                Err(err)
            }
        }
    }
}
