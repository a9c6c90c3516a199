//! Type descriptors for signature checking.
//!
//! Every type a signature can mention is interned into a [`TypeInterner`]
//! and handled as a [`TypeId`]:
//!
//! - **Interning**: unnamed types deduplicate structurally, named types are
//!   unique per declaration, so identity is `TypeId` comparison
//! - **Definitions**: named types are declared, then defined, which allows
//!   recursive declarations
//! - **Queries**: kind, element/key type, function shape via [`TypeDatabase`]
//! - **Relations**: assignability and convertibility via [`ConversionChecker`]
pub mod convert;
pub mod def;
mod format;
mod intern;
pub mod method_set;
pub mod types;

pub use convert::ConversionChecker;
pub use def::{DefId, DefinitionInfo, DefinitionStore, TypeError};
pub use format::{TypeFormatter, type_to_string};
pub use intern::{TypeDatabase, TypeInterner};
pub use method_set::method_set;
pub use types::{
    BasicKind, Field, FunctionShape, InterfaceShape, MethodSig, StructShape, TypeData, TypeId,
    TypeKind, TypeList,
};
