//! Element handles and tree generations.
//!
//! Fixes outlive the analysis pass that produced them, so they never hold
//! references into the tree. They hold an `ElementId`, which pairs a slot
//! index with the slot's generation at the time the handle was issued.
//! Deleting a node bumps its slot generation, turning every outstanding
//! handle into a detectably stale one. Replacing a node only detaches it:
//! its handle stays valid but no longer reaches a root, so it is out of
//! scope. Every committed write also bumps the tree's [`Generation`].

use std::fmt;

/// Generation-checked handle to a node in a [`ProgramTree`](crate::ProgramTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        ElementId { index, generation }
    }

    /// Slot index in the tree's arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Slot generation this handle was issued for.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}v{})", self.index, self.generation)
    }
}

/// Commit counter of a program tree.
///
/// Bumped once per committed write scope. Anything computed against an
/// older generation (diagnostics, fixes) is considered superseded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct Generation(u64);

impl Generation {
    /// Generation of a freshly built tree.
    pub const INITIAL: Generation = Generation(0);

    #[inline]
    #[must_use]
    pub const fn next(self) -> Generation {
        Generation(self.0 + 1)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
