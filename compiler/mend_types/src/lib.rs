//! Type system collaborators for the Mend quick-fix engine.
//!
//! The fix engine consumes two capabilities from the type system:
//! - a [`ConversionJudge`] answering assignability and castability
//! - a [`CandidateSource`] producing a [`SignatureCandidateSet`] for a call
//!
//! This crate defines both seams and ships reference implementations over
//! an interned [`TypePool`]: [`TypeLattice`] and [`MemberTable`]. Neither is
//! a type checker; they model just enough of a Java-like type system to
//! drive argument fixes end to end.

mod conversion;
mod members;
mod pool;
mod signature;

pub use conversion::{ConversionJudge, TypeLattice};
pub use members::{CandidateSource, MemberTable, ResolutionError};
pub use pool::{ClassInfo, ClassKind, Primitive, TypeData, TypePool};
pub use signature::{
    CallResolution, Param, Signature, SignatureCandidate, SignatureCandidateSet, SignatureKind,
    Substitution,
};
