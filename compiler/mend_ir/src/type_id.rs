//! Interned type identifier.
//!
//! The program tree records each node's static type as a `TypeId`. The
//! type pool that gives these ids meaning lives in `mend_types`; this crate
//! only needs the handle and a way to render it.

use std::fmt;

/// Interned type identifier.
///
/// Primitive types are pre-interned at fixed indices so that both the
/// tree and the type pool agree on them without coordination.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOLEAN: TypeId = TypeId(0);
    pub const BYTE: TypeId = TypeId(1);
    pub const SHORT: TypeId = TypeId(2);
    pub const CHAR: TypeId = TypeId(3);
    pub const INT: TypeId = TypeId(4);
    pub const LONG: TypeId = TypeId(5);
    pub const FLOAT: TypeId = TypeId(6);
    pub const DOUBLE: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    /// Type of the `null` literal.
    pub const NULL: TypeId = TypeId(9);
    /// Static type could not be determined by the analyzer.
    pub const UNKNOWN: TypeId = TypeId(10);

    /// First ID for types interned at runtime.
    pub const FIRST_DYNAMIC: u32 = 11;

    /// Create a `TypeId` from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the pool's storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive (including `void`).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 <= Self::VOID.0
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Renders type ids as source text.
///
/// Implemented by the type pool; the tree uses it to print casts.
pub trait TypeNames {
    fn type_name(&self, ty: TypeId) -> String;
}

#[cfg(test)]
mod tests;
