//! Mend - quick-fix resolution engine.
//!
//! Turns diagnosed problems in a typed program tree into candidate fixes,
//! and applies a chosen fix as one atomic, validated edit.
//!
//! # Architecture
//!
//! ```text
//! SharedProgram ──► CallChecker ──► DiagnosticSet (per generation)
//!                                        │
//!                                        ▼
//!                     FixProviderRegistry::run ──► FixGroups on each Diagnostic
//!                                        │
//!                                        ▼
//!                     FixApplier::apply ──► WriteScope (commit or roll back)
//! ```
//!
//! [`FixEngine`] wires these together around a [`MemberTable`]. Hosts with
//! their own analyzer feed diagnostics to [`FixEngine::post_process`]
//! instead of calling [`FixEngine::check`].

mod check;
mod config;
mod engine;

use std::sync::Once;

pub use check::CallChecker;
pub use config::EngineConfig;
pub use engine::FixEngine;

pub use mend_diagnostic::{
    register, register_all, ApplyContext, ApplyError, Diagnostic, DiagnosticSet, ErrorCode,
    FixAction, FixApplier, FixGroup, FixProvider, FixProviderRegistry, FixRef, Severity,
};
pub use mend_fixes::{
    ArgumentFixResolver, ArgumentMismatchFixes, CallFailure, CastArgumentFix, DedupKey,
    ResolverConfig,
};
pub use mend_ir::{
    EditError, ElementId, Generation, Node, NodeKind, ProgramTree, SharedProgram, Span, TypeId,
    TypeNames, WriteScope,
};
pub use mend_types::{
    CallResolution, CandidateSource, ClassInfo, ClassKind, ConversionJudge, MemberTable, Param, Primitive,
    ResolutionError, Signature, SignatureCandidate, SignatureCandidateSet, SignatureKind,
    Substitution, TypeData, TypeLattice, TypePool,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=mend_fixes=debug` or `RUST_LOG=mend=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
