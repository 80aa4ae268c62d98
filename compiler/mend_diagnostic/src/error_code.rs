//! Error codes for diagnostics the fix engine understands.
//!
//! Each error code names the semantic cause of a diagnostic. Fix providers
//! are keyed by code, so the code, not the message, decides which fixes a
//! diagnostic is offered.

use std::fmt;

/// Semantic cause of a diagnostic.
///
/// Format: E####; the first digit is the analysis phase (2 = type
/// checking).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// No method overload accepts the argument types
    E2001,
    /// No constructor accepts the argument types
    E2002,
    /// Unknown method
    E2004,
    /// Unknown class
    E2005,
    /// Ambiguous call: more than one overload is equally specific
    E2007,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// When adding a variant: add it to the enum, `as_str()`, `description()`
    /// and here.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2007,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2007 => "E2007",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "method cannot be applied to the given argument types",
            ErrorCode::E2002 => "constructor cannot be applied to the given argument types",
            ErrorCode::E2004 => "unknown method",
            ErrorCode::E2005 => "unknown class",
            ErrorCode::E2007 => "ambiguous call",
        }
    }

    /// Whether this is an argument/parameter mismatch on a call.
    pub fn is_argument_mismatch(self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002)
    }

    /// Whether the call matched several overloads, none most specific.
    pub fn is_ambiguous_call(self) -> bool {
        matches!(self, ErrorCode::E2007)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"e2001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
