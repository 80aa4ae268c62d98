//! Edit primitive failures.

use crate::ElementId;

/// Reason an edit primitive rejected a mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Handle refers to a deleted node or a reused slot.
    #[error("element {0:?} is no longer valid")]
    InvalidElement(ElementId),
    /// Node has no parent and is not a root.
    #[error("element {0:?} is detached from the program tree")]
    Detached(ElementId),
    #[error("element {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ElementId, child: ElementId },
    /// Parent cannot exist without this child (cast operand, binary side).
    #[error("element {child:?} is a required child of {parent:?}")]
    RequiredChild { parent: ElementId, child: ElementId },
    /// Placing `child` under `parent` would make a node its own ancestor.
    #[error("placing {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: ElementId, child: ElementId },
    #[error("element {0:?} is not a method or constructor call")]
    NotACall(ElementId),
    #[error("argument {index} out of range for call {call:?} with {len} arguments")]
    ArgumentOutOfRange {
        call: ElementId,
        index: usize,
        len: usize,
    },
}
