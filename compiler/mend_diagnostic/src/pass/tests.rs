use super::*;
use crate::test_helpers::{call_program, stub};
use crate::{register, ErrorCode};
use mend_ir::Span;
use pretty_assertions::assert_eq;

#[test]
fn set_tracks_generation() {
    let (program, _, x, _) = call_program();
    let set = DiagnosticSet::new(program.generation());
    assert!(set.is_current(&program.read()));
    assert!(set.is_empty());

    let mut scope = program.write_scope();
    assert_eq!(scope.delete(x), Ok(()));
    scope.commit();
    assert!(!set.is_current(&program.read()));
}

#[test]
fn lookup_by_offset_uses_fix_range() {
    let mut set = DiagnosticSet::new(Generation::INITIAL);
    let mut first = Diagnostic::error(ErrorCode::E2001, Span::new(0, 4));
    register(Some(&mut first), Some(stub("a")), Some(Span::new(0, 10)), Vec::new());
    set.push(first);
    set.push(Diagnostic::error(ErrorCode::E2005, Span::new(20, 25)));

    assert_eq!(set.len(), 2);
    let codes: Vec<ErrorCode> = set.at(8).map(Diagnostic::code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001]);
    assert_eq!(set.at(21).count(), 1);
    assert_eq!(set.at(15).count(), 0);
}

#[test]
fn family_collects_across_diagnostics() {
    let mut set = DiagnosticSet::new(Generation::INITIAL);
    for start in [0, 10] {
        let mut diag = Diagnostic::error(ErrorCode::E2001, Span::new(start, start + 5));
        register(Some(&mut diag), Some(stub("p")), None, vec![stub("q")]);
        set.push(diag);
    }

    assert_eq!(set.family("Stub").len(), 4);
    assert!(set.family("Cast argument").is_empty());
    assert_eq!((&set).into_iter().count(), 2);
}
