//! Diagnostic side of the quick-fix engine.
//!
//! A [`Diagnostic`] is a positioned problem found by an analysis pass. Fix
//! producers attach [`FixAction`]s to it through [`register`]; presentation
//! reads the resulting [`FixGroup`]s and the combined `fix_range`; the user's
//! choice is executed by [`FixApplier`].
//!
//! # Lifecycle
//!
//! ```text
//! analyzer ─► DiagnosticSet (tagged with a Generation)
//!               │
//!               ├─► FixProviderRegistry::run ─► register(..) per producer
//!               │
//!               └─► presentation ─► FixApplier::apply(fix, program)
//! ```
//!
//! Diagnostics never outlive their pass: the next pass replaces the whole
//! set, and with it every fix group.

mod applier;
mod diagnostic;
mod error;
mod error_code;
mod fix;
mod pass;
mod providers;
mod registry;

#[cfg(test)]
mod test_helpers;

pub use applier::FixApplier;
pub use diagnostic::{Diagnostic, Severity};
pub use error::ApplyError;
pub use error_code::ErrorCode;
pub use fix::{ApplyContext, FixAction, FixGroup, FixRef};
pub use pass::DiagnosticSet;
pub use providers::{FixProvider, FixProviderRegistry};
pub use registry::{register, register_all};
