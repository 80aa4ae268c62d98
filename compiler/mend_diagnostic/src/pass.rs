//! Diagnostics of one analysis pass.

use mend_ir::{Generation, ProgramTree};

use crate::{Diagnostic, FixRef};

/// Every diagnostic one analysis pass produced, tagged with the program
/// generation the pass ran against.
///
/// A set is replaced wholesale by the next pass. Dropping it drops every
/// fix group its diagnostics own.
#[derive(Debug)]
pub struct DiagnosticSet {
    generation: Generation,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSet {
    pub fn new(generation: Generation) -> Self {
        DiagnosticSet {
            generation,
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the pass still describes `tree`.
    pub fn is_current(&self, tree: &ProgramTree) -> bool {
        self.generation == tree.generation()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Diagnostic> {
        self.diagnostics.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics whose fix range covers `offset`, in pass order.
    pub fn at(&self, offset: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.fix_range().contains(offset))
    }

    /// Every fix in the pass sharing `family`, for batch application.
    ///
    /// Order follows diagnostics, then groups, then primary before
    /// alternatives.
    pub fn family(&self, family: &str) -> Vec<FixRef> {
        self.diagnostics
            .iter()
            .flat_map(Diagnostic::fix_groups)
            .flat_map(|group| group.iter())
            .filter(|fix| fix.family_key() == family)
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a DiagnosticSet {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests;
