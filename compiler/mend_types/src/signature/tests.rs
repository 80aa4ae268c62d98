use super::*;
use crate::{ClassInfo, ClassKind};
use pretty_assertions::assert_eq;

#[test]
fn substitution_replaces_params() {
    let pool = TypePool::with_standard_classes();
    let t = pool.param("T");
    let string = pool.class("String").unwrap_or(TypeId::UNKNOWN);
    let subst = Substitution::new().with("T", string);

    assert_eq!(subst.apply(&pool, t), string);
    assert_eq!(subst.apply(&pool, TypeId::INT), TypeId::INT);
}

#[test]
fn substitution_recurses_into_applied_types() {
    let pool = TypePool::with_standard_classes();
    let list = pool.declare_class("List", ClassInfo::new(ClassKind::Interface));
    let t = pool.param("T");
    let list_t = pool.applied(list, vec![t]);
    let integer = pool.class("Integer").unwrap_or(TypeId::UNKNOWN);

    let subst = Substitution::new().with("T", integer);
    let applied = subst.apply(&pool, list_t);
    assert_eq!(pool.display(applied), "List<Integer>");
}

#[test]
fn unbound_params_stay() {
    let pool = TypePool::new();
    let u = pool.param("U");
    let subst = Substitution::new().with("T", TypeId::INT);
    assert_eq!(subst.apply(&pool, u), u);
}

#[test]
fn first_binding_wins() {
    let mut subst = Substitution::new();
    subst.bind("T", TypeId::INT);
    subst.bind("T", TypeId::LONG);
    assert_eq!(subst.get("T"), Some(TypeId::INT));
}

#[test]
fn candidate_parameter_types_apply_substitution() {
    let pool = TypePool::with_standard_classes();
    let t = pool.param("T");
    let sig = Arc::new(
        Signature::method("put", vec![Param::new("key", t), Param::new("n", TypeId::INT)])
            .with_type_params(["T"]),
    );
    let string = pool.class("String").unwrap_or(TypeId::UNKNOWN);
    let candidate = SignatureCandidate::new(sig, Substitution::new().with("T", string));

    assert_eq!(candidate.parameter_types(&pool).as_slice(), &[string, TypeId::INT]);
    assert_eq!(candidate.signature.arity(), 2);
}

#[test]
fn candidate_set_preserves_order() {
    let a = Arc::new(Signature::method("f", vec![Param::new("a", TypeId::INT)]));
    let b = Arc::new(Signature::method("f", vec![Param::new("b", TypeId::LONG)]));
    let set: SignatureCandidateSet = [a, b]
        .into_iter()
        .map(|sig| SignatureCandidate::new(sig, Substitution::new()))
        .collect();

    let names: Vec<&str> = set
        .iter()
        .map(|c| c.signature.params[0].name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
}

#[test]
fn constructor_signature_kind() {
    let sig = Signature::constructor("Point", vec![]);
    assert_eq!(sig.kind, SignatureKind::Constructor);
    assert_eq!(sig.name, "Point");
    assert_eq!(sig.arity(), 0);
}

fn overloads(shapes: &[&[TypeId]]) -> SignatureCandidateSet {
    shapes
        .iter()
        .map(|params| {
            let params = params
                .iter()
                .enumerate()
                .map(|(i, &ty)| Param::new(format!("p{i}"), ty))
                .collect();
            SignatureCandidate::new(Arc::new(Signature::method("f", params)), Substitution::new())
        })
        .collect()
}

#[test]
fn resolve_picks_most_specific_overload() {
    let pool = TypePool::with_standard_classes();
    let set = overloads(&[&[TypeId::LONG], &[TypeId::INT], &[TypeId::DOUBLE]]);

    assert_eq!(set.resolve(&pool, &pool, &[TypeId::INT]), CallResolution::Resolved(1));
    assert_eq!(set.resolve(&pool, &pool, &[TypeId::LONG]), CallResolution::Resolved(0));
    assert_eq!(
        set.resolve(&pool, &pool, &[TypePool::OBJECT]),
        CallResolution::Inapplicable
    );
}

#[test]
fn resolve_reports_incomparable_overloads_as_ambiguous() {
    let pool = TypePool::with_standard_classes();
    let set = overloads(&[
        &[TypeId::LONG, TypeId::INT],
        &[TypeId::INT, TypeId::LONG],
    ]);

    assert_eq!(
        set.resolve(&pool, &pool, &[TypeId::INT, TypeId::INT]),
        CallResolution::Ambiguous(0, 1)
    );
    assert_eq!(
        set.resolve(&pool, &pool, &[TypeId::LONG, TypeId::INT]),
        CallResolution::Resolved(0)
    );
    assert!(set.get(1).is_some());
    assert!(set.get(2).is_none());
}
