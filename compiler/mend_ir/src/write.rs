//! Shared program handle and scoped writes.
//!
//! A [`WriteScope`] is the only way to mutate a shared tree. It holds the
//! exclusive lock for its whole lifetime and journals every touched slot.
//! `commit` publishes the edit and bumps the tree generation; dropping the
//! scope any other way restores the tree exactly.

// Arc is needed here: the tree is shared between the analysis side, which
// reads it, and the fix applier, which writes it.
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{EditError, ElementId, Generation, NodeKind, ProgramTree, Span, TypeId};

/// Thread-safe handle to a program tree.
#[derive(Clone, Debug, Default)]
pub struct SharedProgram(Arc<RwLock<ProgramTree>>);

impl SharedProgram {
    pub fn new(tree: ProgramTree) -> Self {
        SharedProgram(Arc::new(RwLock::new(tree)))
    }

    /// Shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, ProgramTree> {
        self.0.read()
    }

    /// Acquire exclusive write access. Blocks until readers are gone.
    pub fn write_scope(&self) -> WriteScope<'_> {
        WriteScope::begin(self.0.write())
    }

    pub fn generation(&self) -> Generation {
        self.0.read().generation()
    }
}

/// Exclusive, atomic mutation window over a program tree.
pub struct WriteScope<'a> {
    tree: RwLockWriteGuard<'a, ProgramTree>,
    finished: bool,
}

impl<'a> WriteScope<'a> {
    fn begin(mut tree: RwLockWriteGuard<'a, ProgramTree>) -> Self {
        tree.begin_journal();
        tracing::trace!(generation = %tree.generation(), "write scope opened");
        WriteScope {
            tree,
            finished: false,
        }
    }

    /// Publish the edits. Returns the new tree generation.
    pub fn commit(mut self) -> Generation {
        let generation = self.tree.commit_journal();
        self.finished = true;
        tracing::trace!(%generation, "write scope committed");
        generation
    }

    /// Discard the edits explicitly.
    pub fn rollback(mut self) {
        self.tree.rollback_journal();
        self.finished = true;
    }

    /// Create a new node. It joins the tree once placed with `replace`.
    pub fn alloc(
        &mut self,
        kind: NodeKind,
        ty: TypeId,
        span: Span,
    ) -> Result<ElementId, EditError> {
        self.tree.alloc(kind, ty, span)
    }

    /// Put `new` where `old` is. `old` is detached unless it is now a
    /// descendant of `new`.
    pub fn replace(&mut self, old: ElementId, new: ElementId) -> Result<(), EditError> {
        self.tree.replace(old, new)
    }

    /// Remove a node from its parent and invalidate its handle.
    pub fn delete(&mut self, id: ElementId) -> Result<(), EditError> {
        self.tree.delete(id)
    }
}

impl Deref for WriteScope<'_> {
    type Target = ProgramTree;

    fn deref(&self) -> &ProgramTree {
        &self.tree
    }
}

impl Drop for WriteScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.tree.rollback_journal();
            tracing::debug!("write scope dropped without commit, edits rolled back");
        }
    }
}
