//! Core diagnostic type.
//!
//! A [`Diagnostic`] is fixed once the analyzer builds it. The only state
//! that changes afterwards is owned by the fix registry: the ordered fix
//! groups and the combined range they cover.

use std::fmt;

use mend_ir::{ElementId, Span};

use crate::{ErrorCode, FixGroup};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A positioned semantic problem awaiting correction.
#[derive(Debug)]
pub struct Diagnostic {
    code: ErrorCode,
    severity: Severity,
    message: String,
    range: Span,
    /// The offending program element, when the analyzer knows it.
    element: Option<ElementId>,
    /// Union of `range` and every registered group's range.
    fix_range: Span,
    fix_groups: Vec<FixGroup>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity, range: Span) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            range,
            element: None,
            fix_range: range,
            fix_groups: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode, range: Span) -> Self {
        Self::new_with_severity(code, Severity::Error, range)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode, range: Span) -> Self {
        Self::new_with_severity(code, Severity::Warning, range)
    }

    /// Set the main message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Name the element the problem is about.
    #[must_use]
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The highlighted range.
    pub fn range(&self) -> Span {
        self.range
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Range covered by the diagnostic and all of its fixes.
    pub fn fix_range(&self) -> Span {
        self.fix_range
    }

    /// Registered fix groups, in registration order.
    pub fn fix_groups(&self) -> &[FixGroup] {
        &self.fix_groups
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    pub fn has_fixes(&self) -> bool {
        !self.fix_groups.is_empty()
    }

    /// Append a group and widen `fix_range` to cover it.
    pub(crate) fn push_group(&mut self, group: FixGroup) {
        self.fix_range = self.fix_range.merge(group.range);
        self.fix_groups.push(group);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        write!(f, "\n  --> {:?}", self.range)?;
        if self.has_fixes() {
            let count: usize = self.fix_groups.iter().map(FixGroup::len).sum();
            write!(f, "\n  = help: {count} fix(es) available")?;
        }
        Ok(())
    }
}
