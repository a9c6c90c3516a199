//! Type interning for structural deduplication.
//!
//! This module implements the interning engine that turns [`TypeData`]
//! structures into lightweight [`TypeId`] handles.
//!
//! Benefits:
//! - O(1) type identity (just compare `TypeId` values)
//! - Each unique structure stored once
//! - Descriptors are immutable snapshots, safe to share across threads

use crate::def::{DefId, DefinitionInfo, DefinitionStore, TypeError};
use crate::types::*;
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

// =============================================================================
// TypeDatabase - read-only query surface
// =============================================================================

/// Read-only view over interned type descriptors.
///
/// The validator and the conversion rules only ever read through this trait,
/// so any reflection source that can answer these queries can drive them.
pub trait TypeDatabase: Send + Sync {
    fn lookup(&self, id: TypeId) -> Option<Arc<TypeData>>;

    fn definition(&self, id: DefId) -> Option<DefinitionInfo>;

    /// Definition behind a named type handle.
    fn named_definition(&self, id: TypeId) -> Option<DefinitionInfo> {
        match self.lookup(id)?.as_ref() {
            TypeData::Named(def_id) => self.definition(*def_id),
            _ => None,
        }
    }

    fn is_named(&self, id: TypeId) -> bool {
        matches!(self.lookup(id).as_deref(), Some(TypeData::Named(_)))
    }

    /// Underlying type: the type itself for unnamed types, the defined
    /// underlying type for named ones. A pending named type is its own
    /// underlying type.
    fn underlying(&self, id: TypeId) -> TypeId {
        match self.lookup(id).as_deref() {
            Some(TypeData::Named(def_id)) => self.definition_underlying(*def_id).unwrap_or(id),
            _ => id,
        }
    }

    fn definition_underlying(&self, id: DefId) -> Option<TypeId> {
        self.definition(id).and_then(|info| info.underlying)
    }

    fn underlying_data(&self, id: TypeId) -> Option<Arc<TypeData>> {
        self.lookup(self.underlying(id))
    }

    fn kind(&self, id: TypeId) -> TypeKind {
        self.underlying_data(id)
            .and_then(|data| data.structural_kind())
            .unwrap_or(TypeKind::Invalid)
    }

    /// Element type of a sequence, mapping or pointer.
    fn element_type(&self, id: TypeId) -> Option<TypeId> {
        match self.underlying_data(id)?.as_ref() {
            TypeData::Slice(elem) | TypeData::Pointer(elem) => Some(*elem),
            TypeData::Map { elem, .. } => Some(*elem),
            _ => None,
        }
    }

    /// Key type of a mapping.
    fn key_type(&self, id: TypeId) -> Option<TypeId> {
        match self.underlying_data(id)?.as_ref() {
            TypeData::Map { key, .. } => Some(*key),
            _ => None,
        }
    }

    fn function_shape(&self, id: TypeId) -> Option<FunctionShape> {
        match self.underlying_data(id)?.as_ref() {
            TypeData::Function(shape) => Some(shape.clone()),
            _ => None,
        }
    }

    fn interface_shape(&self, id: TypeId) -> Option<InterfaceShape> {
        match self.underlying_data(id)?.as_ref() {
            TypeData::Interface(shape) => Some(shape.clone()),
            _ => None,
        }
    }

    fn basic_kind(&self, id: TypeId) -> Option<BasicKind> {
        match self.underlying_data(id)?.as_ref() {
            TypeData::Basic(kind) => Some(*kind),
            _ => None,
        }
    }
}

// =============================================================================
// TypeInterner
// =============================================================================

#[derive(Default, Debug)]
struct TypeTable {
    types: Vec<Arc<TypeData>>,
    index: FxHashMap<Arc<TypeData>, TypeId>,
}

/// Owner of all type descriptors.
#[derive(Debug)]
pub struct TypeInterner {
    table: RwLock<TypeTable>,
    defs: DefinitionStore,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with the predeclared types registered.
    pub fn new() -> Self {
        let interner = TypeInterner {
            table: RwLock::new(TypeTable::default()),
            defs: DefinitionStore::new(),
        };
        interner.register_predeclared();
        interner
    }

    fn register_predeclared(&self) {
        for kind in BasicKind::ALL {
            self.intern(TypeData::Basic(kind));
        }
        let empty = self.intern(TypeData::Interface(InterfaceShape::default()));
        debug_assert_eq!(empty, TypeId::EMPTY_INTERFACE);

        // `error` is the one predeclared named type:
        //   type error interface { Error() string }
        let Ok(error) = self.declare_named("error") else {
            return;
        };
        debug_assert_eq!(error, TypeId::ERROR);
        let error_sig = self.function(FunctionShape::new(
            Vec::new(),
            vec![TypeId::STRING],
            false,
        ));
        let body = self.intern(TypeData::Interface(InterfaceShape {
            methods: vec![MethodSig::new("Error", error_sig)],
        }));
        let _ = self.define_named(error, body, Vec::new());
    }

    /// Intern a structure, returning its handle.
    pub fn intern(&self, data: TypeData) -> TypeId {
        {
            let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(&id) = table.index.get(&data) {
                return id;
            }
        }

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have interned it between the two locks.
        if let Some(&id) = table.index.get(&data) {
            return id;
        }
        let id = TypeId(table.types.len() as u32);
        let data = Arc::new(data);
        table.types.push(Arc::clone(&data));
        table.index.insert(data, id);
        id
    }

    /// Number of interned types (predeclared included).
    pub fn len(&self) -> usize {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.defs
    }

    // =========================================================================
    // Constructors for unnamed types
    // =========================================================================

    pub fn basic(&self, kind: BasicKind) -> TypeId {
        self.intern(TypeData::Basic(kind))
    }

    pub fn slice(&self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Slice(elem))
    }

    pub fn map(&self, key: TypeId, elem: TypeId) -> TypeId {
        self.intern(TypeData::Map { key, elem })
    }

    pub fn pointer(&self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Pointer(elem))
    }

    pub fn struct_type(&self, fields: Vec<Field>) -> TypeId {
        self.intern(TypeData::Struct(StructShape { fields }))
    }

    /// Intern a function type. For a variadic shape the last parameter must
    /// already be the slice type; see [`TypeInterner::variadic_function`].
    pub fn function(&self, shape: FunctionShape) -> TypeId {
        debug_assert!(
            shape
                .variadic_param()
                .is_none_or(|last| self.kind(last) == TypeKind::Sequence),
            "variadic parameter must be a slice type"
        );
        self.intern(TypeData::Function(shape))
    }

    /// `func(params..., ...elem) (results...)`
    pub fn variadic_function(
        &self,
        mut params: Vec<TypeId>,
        elem: TypeId,
        results: Vec<TypeId>,
    ) -> TypeId {
        params.push(self.slice(elem));
        self.intern(TypeData::Function(FunctionShape::new(params, results, true)))
    }

    /// Intern an interface type. Methods are sorted by name; repeating a
    /// method with the same signature is allowed, conflicting signatures
    /// are not.
    pub fn interface(&self, mut methods: Vec<MethodSig>) -> Result<TypeId, TypeError> {
        for method in &methods {
            if self.kind(method.signature) != TypeKind::Function {
                return Err(TypeError::MethodNotFunction {
                    name: "interface".to_string(),
                    method: method.name.clone(),
                });
            }
        }
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods.dedup();
        if let Some(dup) = methods.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(TypeError::DuplicateMethod {
                name: "interface".to_string(),
                method: dup[0].name.clone(),
            });
        }
        Ok(self.intern(TypeData::Interface(InterfaceShape { methods })))
    }

    // =========================================================================
    // Named types
    // =========================================================================

    /// Reserve a named type. Its body is supplied later with
    /// [`TypeInterner::define_named`].
    pub fn declare_named(&self, name: &str) -> Result<TypeId, TypeError> {
        let (_, type_id) = self
            .defs
            .declare(name, |def_id| self.intern(TypeData::Named(def_id)))?;
        Ok(type_id)
    }

    /// Supply the underlying type and declared methods of a named type.
    ///
    /// A named `underlying` contributes its own underlying type, as in
    /// `type Celsius Temperature`; it must already be defined.
    pub fn define_named(
        &self,
        named: TypeId,
        underlying: TypeId,
        methods: Vec<MethodSig>,
    ) -> Result<(), TypeError> {
        let Some(def_id) = self.def_id(named) else {
            return Err(TypeError::NotNamed { id: named });
        };

        let resolved = self.underlying(underlying);
        if self.is_named(resolved) {
            return Err(TypeError::UndefinedUnderlying {
                name: self.defs.name(def_id).unwrap_or_default(),
                underlying: self.type_name(underlying).unwrap_or_default(),
            });
        }

        for method in &methods {
            if self.kind(method.signature) != TypeKind::Function {
                return Err(TypeError::MethodNotFunction {
                    name: self.defs.name(def_id).unwrap_or_default(),
                    method: method.name.clone(),
                });
            }
        }

        trace!(
            named = named.0,
            underlying = resolved.0,
            "defining named type"
        );
        self.defs.define(def_id, resolved, methods)
    }

    /// Declare and define in one step.
    pub fn named(
        &self,
        name: &str,
        underlying: TypeId,
        methods: Vec<MethodSig>,
    ) -> Result<TypeId, TypeError> {
        let id = self.declare_named(name)?;
        self.define_named(id, underlying, methods)?;
        Ok(id)
    }

    /// Look up a named type by name.
    pub fn lookup_named(&self, name: &str) -> Option<TypeId> {
        let def_id = self.defs.lookup_name(name)?;
        self.defs.get(def_id).map(|info| info.type_id)
    }

    pub fn def_id(&self, id: TypeId) -> Option<DefId> {
        match self.lookup(id)?.as_ref() {
            TypeData::Named(def_id) => Some(*def_id),
            _ => None,
        }
    }

    pub fn type_name(&self, id: TypeId) -> Option<String> {
        self.def_id(id).and_then(|def_id| self.defs.name(def_id))
    }
}

impl TypeDatabase for TypeInterner {
    fn lookup(&self, id: TypeId) -> Option<Arc<TypeData>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .get(id.0 as usize)
            .cloned()
    }

    fn definition(&self, id: DefId) -> Option<DefinitionInfo> {
        self.defs.get(id)
    }

    fn definition_underlying(&self, id: DefId) -> Option<TypeId> {
        self.defs.underlying(id)
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
