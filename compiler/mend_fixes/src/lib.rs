//! Argument fixes for calls that match no overload, or more than one.
//!
//! When a method or constructor call is rejected because its argument types
//! fit none of the visible overloads, [`ArgumentFixResolver`] looks at every
//! candidate signature and proposes casting individual arguments to the
//! parameter type the candidate expects. Each proposal is a
//! [`CastArgumentFix`]. For ambiguous calls the same resolver proposes the
//! casts that make the call bind to a single overload.
//!
//! [`ArgumentMismatchFixes`] wires the resolver into the provider registry
//! for the argument-mismatch and ambiguous-call error codes.

mod cast;
mod config;
mod provider;
mod resolver;

pub use cast::CastArgumentFix;
pub use config::{DedupKey, ResolverConfig};
pub use provider::ArgumentMismatchFixes;
pub use resolver::{ArgumentFixResolver, CallFailure};
