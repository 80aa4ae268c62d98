//! Type conversion judgments.
//!
//! The fix engine never decides convertibility itself. It asks a
//! [`ConversionJudge`], which the host type system implements.
//! [`TypeLattice`] is the reference judge used by the engine's own tests
//! and by hosts that model a Java-like type system:
//!
//! - assignment: identity, primitive widening, boxing/unboxing, subtyping,
//!   `null` to any reference
//! - explicit cast: everything assignable, plus numeric narrowing, reference
//!   downcasts, interface casts to non-final classes, and unboxing casts
//!   from a supertype of the box class

use mend_ir::TypeId;

use crate::{ClassKind, Primitive, TypeData, TypePool};

/// Answers conversion questions for the argument-fix resolver.
pub trait ConversionJudge {
    /// A value of `from` can be passed where `to` is expected, no cast.
    fn is_assignable(&self, from: TypeId, to: TypeId) -> bool;

    /// A value of `from` can be explicitly converted to `to`.
    fn is_convertible(&self, from: TypeId, to: TypeId) -> bool;

    /// A call with these argument types would be accepted by a signature
    /// with these (already substituted) parameter types.
    fn is_applicable(&self, params: &[TypeId], args: &[TypeId]) -> bool {
        params.len() == args.len()
            && params
                .iter()
                .zip(args)
                .all(|(&param, &arg)| self.is_assignable(arg, param))
    }
}

/// Reference conversion rules over a [`TypePool`].
#[derive(Copy, Clone, Debug)]
pub struct TypeLattice<'p> {
    pool: &'p TypePool,
}

impl<'p> TypeLattice<'p> {
    pub fn new(pool: &'p TypePool) -> Self {
        TypeLattice { pool }
    }

    /// Reflexive, transitive subtyping between reference types.
    pub fn is_subtype(self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        match (self.pool.get(sub), self.pool.get(sup)) {
            (TypeData::Null, sup_data) => is_reference_data(&sup_data),
            (TypeData::Class(_) | TypeData::Param(_) | TypeData::Applied { .. }, _)
                if sup == TypePool::OBJECT =>
            {
                true
            }
            (TypeData::Class(_), TypeData::Class(_)) => self.class_extends(sub, sup),
            // Applied types compare invariantly on arguments.
            (
                TypeData::Applied { base, args },
                TypeData::Applied {
                    base: sup_base,
                    args: sup_args,
                },
            ) => args == sup_args && self.class_extends(base, sup_base),
            // Raw supertype.
            (TypeData::Applied { base, .. }, TypeData::Class(_)) => self.class_extends(base, sup),
            _ => false,
        }
    }

    fn class_extends(self, sub: TypeId, sup: TypeId) -> bool {
        let mut stack = vec![sub];
        let mut seen = rustc_hash::FxHashSet::default();
        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(info) = self.pool.class_info(current) {
                stack.extend(info.supers.iter().map(|&s| self.raw_class(s)));
            }
        }
        false
    }

    /// Erase an applied type to its class.
    fn raw_class(self, ty: TypeId) -> TypeId {
        match self.pool.get(ty) {
            TypeData::Applied { base, .. } => base,
            _ => ty,
        }
    }

    fn is_final(self, ty: TypeId) -> bool {
        self.pool
            .class_info(self.raw_class(ty))
            .is_some_and(|info| info.kind == ClassKind::Final)
    }

    fn is_interface(self, ty: TypeId) -> bool {
        self.pool
            .class_info(self.raw_class(ty))
            .is_some_and(|info| info.kind == ClassKind::Interface)
    }

    fn is_reference_cast(self, from: TypeId, to: TypeId) -> bool {
        let (from_data, to_data) = (self.pool.get(from), self.pool.get(to));
        if !is_reference_data(&from_data) || !is_reference_data(&to_data) {
            return false;
        }
        if matches!(from_data, TypeData::Param(_)) || matches!(to_data, TypeData::Param(_)) {
            // Unchecked, but legal.
            return true;
        }
        if self.is_subtype(from, to) || self.is_subtype(to, from) {
            return true;
        }
        (self.is_interface(from) && !self.is_final(to))
            || (self.is_interface(to) && !self.is_final(from))
    }
}

fn is_reference_data(data: &TypeData) -> bool {
    matches!(
        data,
        TypeData::Class(_) | TypeData::Param(_) | TypeData::Applied { .. } | TypeData::Null
    )
}

/// Primitive widening conversion (JLS 5.1.2 shape).
fn widens(from: Primitive, to: Primitive) -> bool {
    use Primitive::{Byte, Char, Double, Float, Int, Long, Short};
    if from == to {
        return true;
    }
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short | Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
        _ => false,
    }
}

impl ConversionJudge for TypeLattice<'_> {
    fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from.is_unknown() || to.is_unknown() {
            return false;
        }
        if from == to {
            return true;
        }
        match (self.pool.primitive(from), self.pool.primitive(to)) {
            (Some(Primitive::Void), _) | (_, Some(Primitive::Void)) => false,
            (Some(f), Some(t)) => widens(f, t),
            // Boxing, then widening reference.
            (Some(f), None) => self.pool.boxed(f).is_some_and(|b| self.is_subtype(b, to)),
            // Unboxing, then widening primitive.
            (None, Some(t)) => self.pool.unboxed(from).is_some_and(|u| widens(u, t)),
            (None, None) => self.is_subtype(from, to),
        }
    }

    fn is_convertible(&self, from: TypeId, to: TypeId) -> bool {
        if self.is_assignable(from, to) {
            return true;
        }
        if from.is_unknown() || to.is_unknown() {
            return false;
        }
        match (self.pool.primitive(from), self.pool.primitive(to)) {
            (Some(Primitive::Void), _) | (_, Some(Primitive::Void)) => false,
            (Some(f), Some(t)) => f.is_numeric() && t.is_numeric(),
            (Some(_), None) => false,
            (None, Some(_)) if from == TypeId::NULL => false,
            // `(int) obj` is legal when `obj` may hold an `Integer`.
            (None, Some(t)) => self
                .pool
                .boxed(t)
                .is_some_and(|b| self.is_reference_cast(from, b)),
            (None, None) => self.is_reference_cast(from, to),
        }
    }
}

/// A pool judges with the reference lattice over itself, which lets an
/// owned `Arc<TypePool>` serve as the judge.
impl ConversionJudge for TypePool {
    fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        TypeLattice::new(self).is_assignable(from, to)
    }

    fn is_convertible(&self, from: TypeId, to: TypeId) -> bool {
        TypeLattice::new(self).is_convertible(from, to)
    }
}
