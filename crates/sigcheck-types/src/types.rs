//! Type descriptor representation.
//!
//! Types are stored once in the [`TypeInterner`](crate::TypeInterner) and
//! referred to everywhere else by a [`TypeId`] handle. Unnamed types are
//! interned structurally, so two `[]int` descriptors built independently get
//! the same id; named types get a fresh id per declaration. Type identity is
//! therefore plain `TypeId` equality.

use crate::def::DefId;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for parameter and result lists. Most signatures fit.
pub const TYPE_LIST_INLINE: usize = 4;

pub type TypeList = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

// =============================================================================
// TypeId - Interned Type Handle
// =============================================================================

/// Interned handle to a type descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const INT8: TypeId = TypeId(2);
    pub const INT16: TypeId = TypeId(3);
    pub const INT32: TypeId = TypeId(4);
    pub const INT64: TypeId = TypeId(5);
    pub const UINT: TypeId = TypeId(6);
    pub const UINT8: TypeId = TypeId(7);
    pub const UINT16: TypeId = TypeId(8);
    pub const UINT32: TypeId = TypeId(9);
    pub const UINT64: TypeId = TypeId(10);
    pub const UINTPTR: TypeId = TypeId(11);
    pub const FLOAT32: TypeId = TypeId(12);
    pub const FLOAT64: TypeId = TypeId(13);
    pub const COMPLEX64: TypeId = TypeId(14);
    pub const COMPLEX128: TypeId = TypeId(15);
    pub const STRING: TypeId = TypeId(16);
    /// `interface {}` (also spelled `any`).
    pub const EMPTY_INTERFACE: TypeId = TypeId(17);
    /// The predeclared named interface `error`.
    pub const ERROR: TypeId = TypeId(18);

    /// `byte` is an alias for `uint8`.
    pub const BYTE: TypeId = TypeId::UINT8;
    /// `rune` is an alias for `int32`.
    pub const RUNE: TypeId = TypeId::INT32;

    /// Number of ids reserved for predeclared types.
    pub const FIRST_USER: u32 = 19;

    /// Check if this id is one of the predeclared types.
    pub const fn is_predeclared(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Basic types
// =============================================================================

/// Predeclared scalar types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    /// All basic kinds, in predeclared `TypeId` order.
    pub const ALL: [BasicKind; 17] = [
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            BasicKind::Int
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, BasicKind::Float32 | BasicKind::Float64)
    }

    pub const fn is_complex(self) -> bool {
        matches!(self, BasicKind::Complex64 | BasicKind::Complex128)
    }

    pub const fn is_string(self) -> bool {
        matches!(self, BasicKind::String)
    }
}

// =============================================================================
// TypeKind - coarse classification
// =============================================================================

/// Coarse kind of a type, as compared by the signature validator.
///
/// A named type has the kind of its underlying type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive,
    Interface,
    Sequence,
    Mapping,
    Struct,
    Function,
    Pointer,
    /// A named type whose definition is still pending.
    Invalid,
}

impl TypeKind {
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Primitive => "primitive",
            TypeKind::Interface => "interface",
            TypeKind::Sequence => "sequence",
            TypeKind::Mapping => "mapping",
            TypeKind::Struct => "struct",
            TypeKind::Function => "function",
            TypeKind::Pointer => "pointer",
            TypeKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// A function signature.
///
/// When `variadic` is set the last entry of `params` is the slice type of
/// the variadic parameter: `func(...int)` stores `params = [[]int]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: TypeList,
    pub results: TypeList,
    pub variadic: bool,
}

impl FunctionShape {
    pub fn new(params: impl Into<TypeList>, results: impl Into<TypeList>, variadic: bool) -> Self {
        let params: TypeList = params.into();
        // A variadic flag without a parameter to carry it is meaningless.
        let variadic = variadic && !params.is_empty();
        Self {
            params,
            results: results.into(),
            variadic,
        }
    }

    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// The slice type of the variadic parameter, if any.
    pub fn variadic_param(&self) -> Option<TypeId> {
        if self.variadic {
            self.params.last().copied()
        } else {
            None
        }
    }
}

/// A method name paired with its signature (a function type without receiver).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSig {
    pub name: String,
    pub signature: TypeId,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, signature: TypeId) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}

/// Interface method set, sorted by name with no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InterfaceShape {
    pub methods: Vec<MethodSig>,
}

impl InterfaceShape {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn method(&self, name: &str) -> Option<&MethodSig> {
        self.methods
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.methods[idx])
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    /// Embedded fields promote the methods of their type.
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    pub fn embedded(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StructShape {
    pub fields: Vec<Field>,
}

// =============================================================================
// TypeData - the interned structure
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Basic(BasicKind),
    /// A declared (named) type. Its underlying type and methods live in the
    /// [`DefinitionStore`](crate::DefinitionStore).
    Named(DefId),
    Pointer(TypeId),
    Slice(TypeId),
    Map {
        key: TypeId,
        elem: TypeId,
    },
    Struct(StructShape),
    Interface(InterfaceShape),
    Function(FunctionShape),
}

impl TypeData {
    /// Kind of this structure. `Named` has no kind of its own; callers must
    /// resolve the underlying type first.
    pub fn structural_kind(&self) -> Option<TypeKind> {
        match self {
            TypeData::Basic(_) => Some(TypeKind::Primitive),
            TypeData::Named(_) => None,
            TypeData::Pointer(_) => Some(TypeKind::Pointer),
            TypeData::Slice(_) => Some(TypeKind::Sequence),
            TypeData::Map { .. } => Some(TypeKind::Mapping),
            TypeData::Struct(_) => Some(TypeKind::Struct),
            TypeData::Interface(_) => Some(TypeKind::Interface),
            TypeData::Function(_) => Some(TypeKind::Function),
        }
    }
}
