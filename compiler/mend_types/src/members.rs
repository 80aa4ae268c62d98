//! Visible members and candidate-set construction.
//!
//! [`CandidateSource`] is the resolution capability the fix engine
//! consumes: given a call in the tree, produce the overloads it could have
//! meant. Method calls look up methods by name; constructor calls look up
//! the constructors of the named class. After that point the two are
//! indistinguishable.
//!
//! [`MemberTable`] is the reference implementation. Type arguments are
//! inferred positionally: the first argument whose parameter is a bare type
//! parameter binds it (boxed if primitive); leftovers erase to `Object`.

use std::sync::Arc;

use mend_ir::{ElementId, NodeKind, ProgramTree, TypeId};
use rustc_hash::FxHashMap;

use crate::{
    Primitive, Signature, SignatureCandidate, SignatureCandidateSet, Substitution, TypeData,
    TypePool,
};

/// Why no candidate set could be produced for a call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("no method named `{0}` is visible")]
    UnknownMethod(String),
    #[error("no class named `{0}` is visible")]
    UnknownClass(String),
    #[error("element {0:?} is not a method or constructor call")]
    NotACall(ElementId),
    #[error("element {0:?} is no longer valid")]
    InvalidElement(ElementId),
}

/// Produces the overload candidates of a call.
pub trait CandidateSource {
    fn candidates(
        &self,
        tree: &ProgramTree,
        call: ElementId,
    ) -> Result<SignatureCandidateSet, ResolutionError>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for Arc<T> {
    fn candidates(
        &self,
        tree: &ProgramTree,
        call: ElementId,
    ) -> Result<SignatureCandidateSet, ResolutionError> {
        (**self).candidates(tree, call)
    }
}

/// Declared methods and constructors, keyed by name.
#[derive(Debug)]
pub struct MemberTable {
    pool: Arc<TypePool>,
    methods: FxHashMap<String, Vec<Arc<Signature>>>,
    constructors: FxHashMap<String, Vec<Arc<Signature>>>,
}

impl MemberTable {
    pub fn new(pool: Arc<TypePool>) -> Self {
        MemberTable {
            pool,
            methods: FxHashMap::default(),
            constructors: FxHashMap::default(),
        }
    }

    pub fn pool(&self) -> &Arc<TypePool> {
        &self.pool
    }

    /// Declare a method or constructor. Declaration order is candidate order.
    pub fn declare(&mut self, signature: Signature) {
        let table = match signature.kind {
            crate::SignatureKind::Method => &mut self.methods,
            crate::SignatureKind::Constructor => &mut self.constructors,
        };
        table
            .entry(signature.name.clone())
            .or_default()
            .push(Arc::new(signature));
    }

    fn infer(&self, signature: &Signature, args: &[TypeId]) -> Substitution {
        let mut substitution = Substitution::new();
        for (param, &arg) in signature.params.iter().zip(args) {
            if let TypeData::Param(name) = self.pool.get(param.ty) {
                if signature.type_params.contains(&name) {
                    if let Some(ty) = self.inferable(arg) {
                        substitution.bind(name, ty);
                    }
                }
            }
        }
        for name in &signature.type_params {
            substitution.bind(name.clone(), TypePool::OBJECT);
        }
        substitution
    }

    /// Argument type usable as a type argument.
    fn inferable(&self, arg: TypeId) -> Option<TypeId> {
        if arg.is_unknown() || arg == TypeId::NULL {
            return None;
        }
        match self.pool.primitive(arg) {
            Some(Primitive::Void) => None,
            Some(primitive) => self.pool.boxed(primitive),
            None => Some(arg),
        }
    }

    fn build(&self, overloads: &[Arc<Signature>], args: &[TypeId]) -> SignatureCandidateSet {
        overloads
            .iter()
            .map(|sig| SignatureCandidate::new(Arc::clone(sig), self.infer(sig, args)))
            .collect()
    }
}

impl CandidateSource for MemberTable {
    #[tracing::instrument(level = "trace", skip(self, tree))]
    fn candidates(
        &self,
        tree: &ProgramTree,
        call: ElementId,
    ) -> Result<SignatureCandidateSet, ResolutionError> {
        let node = tree.get(call).ok_or(ResolutionError::InvalidElement(call))?;
        let arg_types = |args: &[ElementId]| -> Vec<TypeId> {
            args.iter()
                .map(|&arg| tree.type_of(arg).unwrap_or(TypeId::UNKNOWN))
                .collect()
        };
        match &node.kind {
            NodeKind::Call { callee, args } => {
                let overloads = self
                    .methods
                    .get(callee)
                    .ok_or_else(|| ResolutionError::UnknownMethod(callee.clone()))?;
                Ok(self.build(overloads, &arg_types(args)))
            }
            NodeKind::New { class, args } => {
                if self.pool.class(class).is_none() {
                    return Err(ResolutionError::UnknownClass(class.clone()));
                }
                let overloads = self.constructors.get(class).map_or(&[][..], Vec::as_slice);
                Ok(self.build(overloads, &arg_types(args)))
            }
            _ => Err(ResolutionError::NotACall(call)),
        }
    }
}
