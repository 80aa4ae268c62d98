//! Attaching fixes to diagnostics.
//!
//! Producers call [`register`] independently and in no particular order.
//! Each call appends one [`FixGroup`] and widens the diagnostic's
//! `fix_range` to the union of everything registered so far. Because union
//! is commutative, associative and idempotent, the final range does not
//! depend on registration order.

use mend_ir::Span;

use crate::{Diagnostic, FixGroup, FixRef};

/// Attach `action` (with its `alternatives`) to `diagnostic`.
///
/// Absent inputs make this a no-op, so producers can pass through whatever
/// they computed without checking. `range` defaults to the diagnostic's own
/// range.
pub fn register(
    diagnostic: Option<&mut Diagnostic>,
    action: Option<FixRef>,
    range: Option<Span>,
    alternatives: Vec<FixRef>,
) {
    let (Some(diagnostic), Some(primary)) = (diagnostic, action) else {
        return;
    };
    let range = range.unwrap_or_else(|| diagnostic.range());
    tracing::trace!(
        code = %diagnostic.code(),
        ?range,
        alternatives = alternatives.len(),
        "fix group registered"
    );
    diagnostic.push_group(FixGroup::new(primary, alternatives, range));
}

/// Register an ordered fix list as one group.
///
/// The first fix becomes the primary and the rest its alternatives. An
/// empty list registers nothing.
pub fn register_all(diagnostic: &mut Diagnostic, fixes: Vec<FixRef>, range: Option<Span>) {
    let mut fixes = fixes.into_iter();
    let primary = fixes.next();
    register(Some(diagnostic), primary, range, fixes.collect());
}
