//! Mend IR - program representation for the quick-fix engine.
//!
//! This crate contains the data structures fixes operate on:
//! - Spans for source locations
//! - `TypeId` handles for analyzed static types
//! - `ElementId` handles that detect staleness in O(1)
//! - The arena-backed `ProgramTree` and its validity queries
//! - `SharedProgram` / `WriteScope` for exclusive, atomic edits
//!
//! # Design Philosophy
//!
//! - **Handles, not references**: fixes outlive the pass that created them,
//!   so they name nodes by generation-checked ids.
//! - **Journal, then commit**: every edit is undoable until the scope
//!   commits, which is what makes a failed fix invisible.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod element;
mod error;
mod span;
mod tree;
mod type_id;
mod write;

pub use element::{ElementId, Generation};
pub use error::EditError;
pub use span::Span;
pub use tree::{ArgList, Node, NodeKind, ProgramTree};
pub use type_id::{TypeId, TypeNames};
pub use write::{SharedProgram, WriteScope};
