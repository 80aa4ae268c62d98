use super::*;
use mend_types::{
    CandidateSource, ClassInfo, MemberTable, Param, Signature, SignatureCandidate, Substitution,
};
use pretty_assertions::assert_eq;

/// A call under construction plus the pool its types live in.
struct Fixture {
    pool: Arc<TypePool>,
    tree: ProgramTree,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            pool: Arc::new(TypePool::with_standard_classes()),
            tree: ProgramTree::new(),
        }
    }

    fn class(&self, name: &str) -> TypeId {
        self.pool.class(name).unwrap_or(TypeId::UNKNOWN)
    }

    fn arg(&mut self, name: &str, ty: TypeId) -> ElementId {
        self.tree.push(NodeKind::Ident(name.into()), ty, Span::DUMMY)
    }

    fn call(&mut self, callee: &str, args: &[ElementId]) -> ElementId {
        let call = self.tree.push(
            NodeKind::Call {
                callee: callee.into(),
                args: args.iter().copied().collect(),
            },
            TypeId::VOID,
            Span::new(0, 10),
        );
        self.tree.add_root(call);
        call
    }

    fn candidates(&self, signatures: Vec<Signature>) -> SignatureCandidateSet {
        signatures
            .into_iter()
            .map(|sig| SignatureCandidate::new(Arc::new(sig), Substitution::new()))
            .collect()
    }

    fn describe(&self, call: ElementId, set: &SignatureCandidateSet) -> Vec<String> {
        self.resolve_with(call, set, ResolverConfig::default())
    }

    fn resolve_with(
        &self,
        call: ElementId,
        set: &SignatureCandidateSet,
        config: ResolverConfig,
    ) -> Vec<String> {
        ArgumentFixResolver::new(&self.pool, &*self.pool)
            .with_config(config)
            .resolve(&self.tree, call, set)
            .iter()
            .map(|fix| fix.describe(&self.tree))
            .collect()
    }
}

fn method(name: &str, params: &[TypeId]) -> Signature {
    Signature::method(
        name,
        params
            .iter()
            .enumerate()
            .map(|(i, &ty)| Param::new(format!("p{i}"), ty))
            .collect(),
    )
}

#[test]
fn single_argument_single_candidate() {
    let mut fx = Fixture::new();
    let x = fx.arg("x", TypeId::DOUBLE);
    let call = fx.call("f", &[x]);
    let set = fx.candidates(vec![method("f", &[TypeId::INT])]);

    assert_eq!(fx.describe(call, &set), vec!["Cast argument to 'int'"]);
}

#[test]
fn disagreeing_candidates_give_one_fix_each() {
    let mut fx = Fixture::new();
    let a = fx.arg("a", TypeId::INT);
    let b = fx.arg("b", TypeId::DOUBLE);
    let call = fx.call("f", &[a, b]);
    let set = fx.candidates(vec![
        method("f", &[TypeId::INT, TypeId::LONG]),
        method("f", &[TypeId::INT, TypeId::SHORT]),
    ]);

    assert_eq!(
        fx.describe(call, &set),
        vec!["Cast 2nd argument to 'long'", "Cast 2nd argument to 'short'"]
    );
}

#[test]
fn agreeing_candidates_are_deduplicated() {
    let mut fx = Fixture::new();
    let a = fx.arg("a", TypeId::DOUBLE);
    let b = fx.arg("b", TypeId::INT);
    let call = fx.call("f", &[a, b]);
    let string = fx.class("String");
    let set = fx.candidates(vec![
        method("f", &[TypeId::LONG, TypeId::INT]),
        // Same type at position 0, different requirement at position 1 that
        // the argument already satisfies.
        method("f", &[TypeId::LONG, TypeId::LONG]),
        // Not applicable even after the cast: `int` is not a `String`.
        method("f", &[TypeId::LONG, string]),
    ]);

    assert_eq!(fx.describe(call, &set), vec!["Cast 1st argument to 'long'"]);
}

#[test]
fn nothing_convertible_gives_no_fixes_and_no_group() {
    let mut fx = Fixture::new();
    let string = fx.class("String");
    let x = fx.arg("x", TypeId::BOOLEAN);
    let call = fx.call("f", &[x]);
    let set = fx.candidates(vec![method("f", &[TypeId::INT]), method("f", &[string])]);

    assert!(fx.describe(call, &set).is_empty());

    let mut diag = Diagnostic::error(ErrorCode::E2001, Span::new(0, 10)).with_element(call);
    let registered = ArgumentFixResolver::new(&fx.pool, &*fx.pool).register_cast_actions(
        &fx.tree,
        call,
        &set,
        &mut diag,
        None,
    );
    assert_eq!(registered, 0);
    assert!(!diag.has_fixes());
    assert_eq!(diag.fix_range(), Span::new(0, 10));
}

#[test]
fn several_fixes_register_as_one_group() {
    let mut fx = Fixture::new();
    let x = fx.arg("x", TypeId::DOUBLE);
    let call = fx.call("f", &[x]);
    let set = fx.candidates(vec![
        method("f", &[TypeId::INT]),
        method("f", &[TypeId::FLOAT]),
        method("f", &[TypeId::INT]),
    ]);

    let mut diag = Diagnostic::error(ErrorCode::E2001, Span::new(0, 10));
    let registered = ArgumentFixResolver::new(&fx.pool, &*fx.pool).register_cast_actions(
        &fx.tree,
        call,
        &set,
        &mut diag,
        Some(Span::new(2, 3)),
    );

    assert_eq!(registered, 2);
    assert_eq!(diag.fix_groups().len(), 1);
    let group = &diag.fix_groups()[0];
    assert_eq!(group.range, Span::new(2, 3));
    let labels: Vec<String> = group.iter().map(|fix| fix.describe(&fx.tree)).collect();
    assert_eq!(labels, vec!["Cast argument to 'int'", "Cast argument to 'float'"]);
}

#[test]
fn arity_mismatch_and_unknown_types_are_skipped() {
    let mut fx = Fixture::new();
    let x = fx.arg("x", TypeId::DOUBLE);
    let y = fx.arg("y", TypeId::UNKNOWN);
    let call = fx.call("f", &[x, y]);
    let set = fx.candidates(vec![
        method("f", &[TypeId::INT]),
        method("f", &[TypeId::INT, TypeId::INT, TypeId::INT]),
        method("f", &[TypeId::DOUBLE, TypeId::INT]),
    ]);

    assert!(fx.describe(call, &set).is_empty());
}

#[test]
fn existing_cast_uses_operand_type() {
    let mut fx = Fixture::new();
    let object = TypePool::OBJECT;
    let integer = fx.class("Integer");
    let o = fx.arg("o", object);
    let string = fx.class("String");
    let cast = fx.tree.push(
        NodeKind::Cast {
            target: string,
            operand: o,
        },
        string,
        Span::DUMMY,
    );
    let call = fx.call("f", &[cast]);
    // `String` is never an `Integer`, but the `Object` underneath may be.
    let set = fx.candidates(vec![method("f", &[integer])]);

    assert_eq!(fx.describe(call, &set), vec!["Cast argument to 'Integer'"]);
}

#[test]
fn dedup_by_rendered_text_collapses_lookalikes() {
    let mut fx = Fixture::new();
    let item_class = fx.pool.declare_class("Item", ClassInfo::default());
    let item_param = fx.pool.param("Item");
    assert_ne!(item_class, item_param);

    let o = fx.arg("o", TypePool::OBJECT);
    let call = fx.call("f", &[o]);
    let set = fx.candidates(vec![
        method("f", &[item_class]),
        method("f", &[item_param]).with_type_params(["Item"]),
    ]);

    assert_eq!(
        fx.describe(call, &set),
        vec!["Cast argument to 'Item'", "Cast argument to 'Item'"]
    );
    assert_eq!(
        fx.resolve_with(call, &set, ResolverConfig::by_rendered_text()),
        vec!["Cast argument to 'Item'"]
    );
}

#[test]
fn constructor_calls_resolve_like_methods() {
    let mut fx = Fixture::new();
    fx.pool.declare_class("Point", ClassInfo::default());
    let mut members = MemberTable::new(Arc::clone(&fx.pool));
    members.declare(Signature::constructor(
        "Point",
        vec![Param::new("x", TypeId::INT), Param::new("y", TypeId::INT)],
    ));
    members.declare(Signature::method(
        "point",
        vec![Param::new("x", TypeId::INT), Param::new("y", TypeId::INT)],
    ));

    let x = fx.arg("x", TypeId::INT);
    let y = fx.arg("y", TypeId::DOUBLE);
    let new = fx.tree.push(
        NodeKind::New {
            class: "Point".into(),
            args: [x, y].into_iter().collect(),
        },
        TypeId::UNKNOWN,
        Span::DUMMY,
    );
    fx.tree.add_root(new);
    let x2 = fx.arg("x", TypeId::INT);
    let y2 = fx.arg("y", TypeId::DOUBLE);
    let call = fx.call("point", &[x2, y2]);

    let (Ok(ctor_set), Ok(method_set)) = (
        members.candidates(&fx.tree, new),
        members.candidates(&fx.tree, call),
    ) else {
        panic!("candidates should resolve");
    };

    let ctor_fixes = fx.describe(new, &ctor_set);
    assert_eq!(ctor_fixes, vec!["Cast 2nd argument to 'int'"]);
    assert_eq!(ctor_fixes, fx.describe(call, &method_set));
}

#[test]
fn generic_candidate_uses_substituted_parameter() {
    let mut fx = Fixture::new();
    let mut members = MemberTable::new(Arc::clone(&fx.pool));
    let t = fx.pool.param("T");
    members.declare(
        Signature::method(
            "pair",
            vec![Param::new("first", t), Param::new("second", t)],
        )
        .with_type_params(["T"]),
    );

    let a = fx.arg("a", fx.class("Integer"));
    let b = fx.arg("b", TypePool::OBJECT);
    let call = fx.call("pair", &[a, b]);
    let Ok(set) = members.candidates(&fx.tree, call) else {
        panic!("candidates should resolve");
    };

    // `T` is inferred from the first argument.
    assert_eq!(fx.describe(call, &set), vec!["Cast 2nd argument to 'Integer'"]);
}

#[test]
fn stale_call_gives_no_fixes() {
    let mut fx = Fixture::new();
    let x = fx.arg("x", TypeId::DOUBLE);
    let call = fx.call("f", &[x]);
    let set = fx.candidates(vec![method("f", &[TypeId::INT])]);
    let orphan = fx.arg("y", TypeId::DOUBLE);

    assert!(fx.describe(orphan, &set).is_empty());
    assert_eq!(fx.describe(call, &set).len(), 1);
}

fn ambiguous(fx: &Fixture, call: ElementId, set: &SignatureCandidateSet) -> Vec<String> {
    ArgumentFixResolver::new(&fx.pool, &*fx.pool)
        .for_failure(CallFailure::Ambiguous)
        .resolve(&fx.tree, call, set)
        .iter()
        .map(|fix| fix.describe(&fx.tree))
        .collect()
}

#[test]
fn widening_casts_disambiguate_a_call() {
    let mut fx = Fixture::new();
    let a = fx.arg("a", TypeId::INT);
    let b = fx.arg("b", TypeId::INT);
    let call = fx.call("f", &[a, b]);
    let set = fx.candidates(vec![
        method("f", &[TypeId::LONG, TypeId::INT]),
        method("f", &[TypeId::INT, TypeId::LONG]),
    ]);

    // Both overloads accept the call as written, so a mismatch finds nothing.
    assert!(fx.describe(call, &set).is_empty());
    assert_eq!(
        ambiguous(&fx, call, &set),
        vec!["Cast 1st argument to 'long'", "Cast 2nd argument to 'long'"]
    );
}

#[test]
fn casts_that_leave_the_call_ambiguous_are_dropped() {
    let mut fx = Fixture::new();
    let a = fx.arg("a", TypeId::SHORT);
    let call = fx.call("f", &[a]);
    // Two identical overloads stay ambiguous whatever the argument.
    let set = fx.candidates(vec![method("f", &[TypeId::INT]), method("f", &[TypeId::INT])]);

    assert!(ambiguous(&fx, call, &set).is_empty());
}

#[test]
fn failure_follows_the_diagnostic_code() {
    assert_eq!(
        CallFailure::from_code(ErrorCode::E2001),
        Some(CallFailure::Inapplicable)
    );
    assert_eq!(
        CallFailure::from_code(ErrorCode::E2002),
        Some(CallFailure::Inapplicable)
    );
    assert_eq!(
        CallFailure::from_code(ErrorCode::E2007),
        Some(CallFailure::Ambiguous)
    );
    assert_eq!(CallFailure::from_code(ErrorCode::E2004), None);
}
