//! Call signatures and candidate sets.
//!
//! A [`SignatureCandidateSet`] is what overload resolution hands the fix
//! engine: every method or constructor applicable by name to a call, each
//! paired with the substitution inferred at the call site. The set keeps
//! the order the resolver produced; nothing here re-ranks it.
//!
//! [`SignatureCandidateSet::resolve`] picks the overload a call binds to,
//! Java style: among the applicable candidates, the one whose parameters
//! are all assignable to every other applicable candidate's parameters.

// Arc is needed: one declared signature is shared by every candidate set
// built for calls to it.
use std::sync::Arc;

use mend_ir::TypeId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ConversionJudge, TypeData, TypePool};

/// Whether a signature declares a method or a constructor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SignatureKind {
    Method,
    Constructor,
}

/// A declared parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: String,
    pub ty: TypeId,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

/// A declared method or constructor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    pub kind: SignatureKind,
    /// Method name, or the class name for constructors.
    pub name: String,
    /// Names of the signature's own type parameters.
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
}

impl Signature {
    pub fn method(name: impl Into<String>, params: Vec<Param>) -> Self {
        Signature {
            kind: SignatureKind::Method,
            name: name.into(),
            type_params: Vec::new(),
            params,
        }
    }

    pub fn constructor(class: impl Into<String>, params: Vec<Param>) -> Self {
        Signature {
            kind: SignatureKind::Constructor,
            name: class.into(),
            type_params: Vec::new(),
            params,
        }
    }

    #[must_use]
    pub fn with_type_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Mapping from type parameter names to concrete types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Substitution {
    map: FxHashMap<String, TypeId>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a type parameter. An existing binding is kept.
    pub fn bind(&mut self, name: impl Into<String>, ty: TypeId) {
        self.map.entry(name.into()).or_insert(ty);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, ty: TypeId) -> Self {
        self.bind(name, ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.map.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replace bound type parameters inside `ty`.
    ///
    /// Unbound parameters are left as they are.
    pub fn apply(&self, pool: &TypePool, ty: TypeId) -> TypeId {
        if self.is_empty() {
            return ty;
        }
        match pool.get(ty) {
            TypeData::Param(name) => self.get(&name).unwrap_or(ty),
            TypeData::Applied { base, args } => {
                let substituted: Vec<TypeId> =
                    args.iter().map(|&arg| self.apply(pool, arg)).collect();
                if substituted == args {
                    ty
                } else {
                    pool.applied(base, substituted)
                }
            }
            _ => ty,
        }
    }
}

/// One overload applicable by name to a call.
#[derive(Clone, Debug)]
pub struct SignatureCandidate {
    pub signature: Arc<Signature>,
    pub substitution: Substitution,
}

impl SignatureCandidate {
    pub fn new(signature: Arc<Signature>, substitution: Substitution) -> Self {
        SignatureCandidate {
            signature,
            substitution,
        }
    }

    /// Parameter types with the substitution applied.
    pub fn parameter_types(&self, pool: &TypePool) -> SmallVec<[TypeId; 4]> {
        self.signature
            .params
            .iter()
            .map(|param| self.substitution.apply(pool, param.ty))
            .collect()
    }
}

/// Outcome of overload resolution for one call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallResolution {
    /// No candidate accepts the arguments.
    Inapplicable,
    /// The call binds to the candidate at this position.
    Resolved(usize),
    /// Several candidates accept the arguments and none is most specific.
    /// Holds the positions of the first two applicable ones.
    Ambiguous(usize, usize),
}

/// Ordered overload candidates for a single call.
#[derive(Clone, Debug, Default)]
pub struct SignatureCandidateSet {
    candidates: Vec<SignatureCandidate>,
}

impl SignatureCandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: SignatureCandidate) {
        self.candidates.push(candidate);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignatureCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SignatureCandidate> {
        self.candidates.get(index)
    }

    /// Resolve a call with these argument types against the set.
    pub fn resolve(
        &self,
        pool: &TypePool,
        judge: &dyn ConversionJudge,
        args: &[TypeId],
    ) -> CallResolution {
        let applicable: Vec<(usize, SmallVec<[TypeId; 4]>)> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| (index, candidate.parameter_types(pool)))
            .filter(|(_, params)| judge.is_applicable(params, args))
            .collect();
        let most_specific: SmallVec<[usize; 2]> = applicable
            .iter()
            .filter(|(_, params)| {
                applicable
                    .iter()
                    .all(|(_, other)| is_more_specific(judge, params, other))
            })
            .map(|(index, _)| *index)
            .collect();

        if let [index] = most_specific.as_slice() {
            return CallResolution::Resolved(*index);
        }
        match applicable.as_slice() {
            [] => CallResolution::Inapplicable,
            [(only, _)] => CallResolution::Resolved(*only),
            [(first, _), (second, _), ..] => CallResolution::Ambiguous(*first, *second),
        }
    }
}

/// `params` accepts nothing that `other` would not.
fn is_more_specific(judge: &dyn ConversionJudge, params: &[TypeId], other: &[TypeId]) -> bool {
    params.len() == other.len()
        && params
            .iter()
            .zip(other)
            .all(|(&param, &other)| judge.is_assignable(param, other))
}

impl FromIterator<SignatureCandidate> for SignatureCandidateSet {
    fn from_iter<I: IntoIterator<Item = SignatureCandidate>>(iter: I) -> Self {
        SignatureCandidateSet {
            candidates: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SignatureCandidateSet {
    type Item = &'a SignatureCandidate;
    type IntoIter = std::slice::Iter<'a, SignatureCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests;
