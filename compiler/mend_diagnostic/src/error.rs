//! Fix application failures.

use mend_ir::EditError;

/// Why a fix could not be applied.
///
/// Either way the program is left exactly as it was before the attempt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The fix no longer matches the program: an element it names was
    /// deleted or replaced, or the program moved to a newer generation.
    #[error("fix is no longer applicable to the current program")]
    Stale,
    /// An edit primitive rejected the mutation.
    #[error("edit failed: {0}")]
    EditFailed(String),
}

impl From<EditError> for ApplyError {
    fn from(err: EditError) -> Self {
        ApplyError::EditFailed(err.to_string())
    }
}
