//! Interned type pool.
//!
//! All types are stored once and referenced by [`TypeId`]. Primitives, the
//! null type and the unknown marker occupy fixed indices shared with
//! `mend_ir`; `Object` is always the first dynamic type.
//!
//! # Thread Safety
//! Interning takes `&self`. Storage sits behind a `parking_lot::RwLock`, so
//! substitution can intern applied types while the pool is shared.

use std::fmt;

use mend_ir::{TypeId, TypeNames};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Primitive value types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    const ALL: [Primitive; 9] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Char,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Char => "char",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// Fixed id of this primitive.
    pub fn type_id(self) -> TypeId {
        match self {
            Primitive::Boolean => TypeId::BOOLEAN,
            Primitive::Byte => TypeId::BYTE,
            Primitive::Short => TypeId::SHORT,
            Primitive::Char => TypeId::CHAR,
            Primitive::Int => TypeId::INT,
            Primitive::Long => TypeId::LONG,
            Primitive::Float => TypeId::FLOAT,
            Primitive::Double => TypeId::DOUBLE,
            Primitive::Void => TypeId::VOID,
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean | Primitive::Void)
    }
}

/// Structure of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Primitive(Primitive),
    /// Type of the `null` literal.
    Null,
    /// Placeholder for types the analyzer could not determine.
    Unknown,
    /// Named class or interface. Details live in [`ClassInfo`].
    Class(String),
    /// Type parameter of a generic method or class.
    Param(String),
    /// Generic class applied to arguments, e.g. `List<String>`.
    Applied { base: TypeId, args: Vec<TypeId> },
}

/// How a class can be extended and converted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ClassKind {
    #[default]
    Class,
    /// Cannot be subclassed.
    Final,
    Interface,
}

/// Declared facts about a class.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ClassInfo {
    pub kind: ClassKind,
    /// Direct supertypes. Every class implicitly extends `Object`.
    pub supers: Vec<TypeId>,
    /// Primitive this class boxes, e.g. `Integer` boxes `int`.
    pub boxes: Option<Primitive>,
}

impl ClassInfo {
    pub fn new(kind: ClassKind) -> Self {
        ClassInfo {
            kind,
            ..ClassInfo::default()
        }
    }

    #[must_use]
    pub fn extends(mut self, ty: TypeId) -> Self {
        self.supers.push(ty);
        self
    }

    #[must_use]
    pub fn boxing(mut self, primitive: Primitive) -> Self {
        self.boxes = Some(primitive);
        self
    }
}

#[derive(Default)]
struct PoolInner {
    types: Vec<TypeData>,
    index: FxHashMap<TypeData, TypeId>,
    classes: FxHashMap<TypeId, ClassInfo>,
    boxes: FxHashMap<Primitive, TypeId>,
}

impl PoolInner {
    fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.index.get(&data) {
            return id;
        }
        let id = TypeId::from_raw(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(data.clone());
        self.index.insert(data, id);
        id
    }
}

/// Interned store of every type the engine reasons about.
pub struct TypePool {
    inner: RwLock<PoolInner>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// The root reference type.
    pub const OBJECT: TypeId = TypeId::from_raw(TypeId::FIRST_DYNAMIC);

    /// Create a pool holding primitives, `null`, the unknown marker and
    /// `Object`.
    pub fn new() -> Self {
        let mut inner = PoolInner::default();
        for primitive in Primitive::ALL {
            inner.intern(TypeData::Primitive(primitive));
        }
        inner.intern(TypeData::Null);
        inner.intern(TypeData::Unknown);
        let object = inner.intern(TypeData::Class("Object".to_string()));
        inner.classes.insert(object, ClassInfo::default());
        debug_assert_eq!(object, Self::OBJECT);
        TypePool {
            inner: RwLock::new(inner),
        }
    }

    /// Create a pool that also declares the standard library classes the
    /// conversion rules know about: `String`, `Number` and the box types.
    pub fn with_standard_classes() -> Self {
        let pool = Self::new();
        let char_sequence =
            pool.declare_class("CharSequence", ClassInfo::new(ClassKind::Interface));
        pool.declare_class(
            "String",
            ClassInfo::new(ClassKind::Final).extends(char_sequence),
        );
        let number = pool.declare_class("Number", ClassInfo::new(ClassKind::Class));
        for (name, primitive) in [
            ("Byte", Primitive::Byte),
            ("Short", Primitive::Short),
            ("Integer", Primitive::Int),
            ("Long", Primitive::Long),
            ("Float", Primitive::Float),
            ("Double", Primitive::Double),
        ] {
            pool.declare_class(
                name,
                ClassInfo::new(ClassKind::Final)
                    .extends(number)
                    .boxing(primitive),
            );
        }
        pool.declare_class(
            "Boolean",
            ClassInfo::new(ClassKind::Final).boxing(Primitive::Boolean),
        );
        pool.declare_class(
            "Character",
            ClassInfo::new(ClassKind::Final).boxing(Primitive::Char),
        );
        pool
    }

    /// Declare (or redeclare) a class. Returns its id.
    pub fn declare_class(&self, name: &str, info: ClassInfo) -> TypeId {
        let mut inner = self.inner.write();
        let id = inner.intern(TypeData::Class(name.to_string()));
        if let Some(primitive) = info.boxes {
            inner.boxes.insert(primitive, id);
        }
        inner.classes.insert(id, info);
        id
    }

    /// Look up a declared class by name.
    pub fn class(&self, name: &str) -> Option<TypeId> {
        let inner = self.inner.read();
        inner
            .index
            .get(&TypeData::Class(name.to_string()))
            .copied()
            .filter(|id| inner.classes.contains_key(id))
    }

    /// Intern a type parameter.
    pub fn param(&self, name: &str) -> TypeId {
        self.inner.write().intern(TypeData::Param(name.to_string()))
    }

    /// Intern a generic application.
    pub fn applied(&self, base: TypeId, args: Vec<TypeId>) -> TypeId {
        self.inner.write().intern(TypeData::Applied { base, args })
    }

    /// Structure of a type. Unknown ids read as [`TypeData::Unknown`].
    pub fn get(&self, id: TypeId) -> TypeData {
        self.inner
            .read()
            .types
            .get(id.index())
            .cloned()
            .unwrap_or(TypeData::Unknown)
    }

    pub fn class_info(&self, id: TypeId) -> Option<ClassInfo> {
        self.inner.read().classes.get(&id).cloned()
    }

    /// Box class of a primitive, if declared.
    pub fn boxed(&self, primitive: Primitive) -> Option<TypeId> {
        self.inner.read().boxes.get(&primitive).copied()
    }

    /// Primitive that a class boxes.
    pub fn unboxed(&self, id: TypeId) -> Option<Primitive> {
        self.inner.read().classes.get(&id).and_then(|c| c.boxes)
    }

    /// Primitive kind of a type, if it is one.
    pub fn primitive(&self, id: TypeId) -> Option<Primitive> {
        match self.get(id) {
            TypeData::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Class, interface, type parameter, applied generic or `null`.
    pub fn is_reference(&self, id: TypeId) -> bool {
        matches!(
            self.get(id),
            TypeData::Class(_) | TypeData::Param(_) | TypeData::Applied { .. } | TypeData::Null
        )
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.inner.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a type as source text.
    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.display_into(id, &mut out);
        out
    }

    fn display_into(&self, id: TypeId, out: &mut String) {
        match self.get(id) {
            TypeData::Primitive(p) => out.push_str(p.name()),
            TypeData::Null => out.push_str("null"),
            TypeData::Unknown => out.push_str("<unknown>"),
            TypeData::Class(name) | TypeData::Param(name) => out.push_str(&name),
            TypeData::Applied { base, args } => {
                self.display_into(base, out);
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.display_into(*arg, out);
                }
                out.push('>');
            }
        }
    }
}

impl TypeNames for TypePool {
    fn type_name(&self, ty: TypeId) -> String {
        self.display(ty)
    }
}

impl fmt::Debug for TypePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePool")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
