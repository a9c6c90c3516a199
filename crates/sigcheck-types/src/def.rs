//! Named type definitions.
//!
//! A named type is declared in two phases so that recursive and mutually
//! referencing declarations work:
//!
//! 1. `declare` reserves a [`DefId`] for a name (the interner wraps it in a
//!    `TypeData::Named` handle immediately);
//! 2. `define` attaches the underlying type and the declared methods.
//!
//! ```go
//! type Node struct { next *Node }   // *Node needs Node's id before its body
//! ```

use crate::types::{MethodSig, TypeId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;
use tracing::trace;

// =============================================================================
// DefId - Definition Identifier
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Ids are handed out from here upwards.
    pub const FIRST_VALID: u32 = 1;
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type {name} is already declared")]
    DuplicateName { name: String },
    #[error("type {name} is already defined")]
    AlreadyDefined { name: String },
    #[error("type {name} is declared but its underlying type {underlying} is not yet defined")]
    UndefinedUnderlying { name: String, underlying: String },
    #[error("type {name} has duplicate method {method}")]
    DuplicateMethod { name: String, method: String },
    #[error("method {method} of type {name} must have a function signature")]
    MethodNotFunction { name: String, method: String },
    #[error("{id} is not a named type")]
    NotNamed { id: TypeId },
    #[error("unknown definition {0:?}")]
    UnknownDefinition(DefId),
}

// =============================================================================
// Definition Info
// =============================================================================

#[derive(Clone, Debug)]
pub struct DefinitionInfo {
    pub name: String,
    /// The interned handle wrapping this definition.
    pub type_id: TypeId,
    /// `None` between `declare` and `define`.
    pub underlying: Option<TypeId>,
    /// Declared methods, sorted by name.
    pub methods: Vec<MethodSig>,
}

impl DefinitionInfo {
    pub fn is_defined(&self) -> bool {
        self.underlying.is_some()
    }

    pub fn method(&self, name: &str) -> Option<&MethodSig> {
        self.methods
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.methods[idx])
    }
}

// =============================================================================
// DefinitionStore
// =============================================================================

/// Concurrent storage for named type definitions.
#[derive(Debug)]
pub struct DefinitionStore {
    definitions: DashMap<DefId, DefinitionInfo>,
    names: DashMap<String, DefId>,
    next_id: AtomicU32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self {
            definitions: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    /// Reserve a `DefId` for `name`.
    ///
    /// `make_type` turns the reserved id into its interned handle; it runs
    /// while the name slot is held so a racing declaration of the same name
    /// observes either nothing or the finished entry.
    pub fn declare(
        &self,
        name: &str,
        make_type: impl FnOnce(DefId) -> TypeId,
    ) -> Result<(DefId, TypeId), TypeError> {
        let entry = match self.names.entry(name.to_string()) {
            Entry::Occupied(_) => {
                return Err(TypeError::DuplicateName {
                    name: name.to_string(),
                });
            }
            Entry::Vacant(entry) => entry,
        };

        let id = DefId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let type_id = make_type(id);
        self.definitions.insert(
            id,
            DefinitionInfo {
                name: name.to_string(),
                type_id,
                underlying: None,
                methods: Vec::new(),
            },
        );
        entry.insert(id);
        trace!(name, def_id = id.0, type_id = type_id.0, "declared named type");
        Ok((id, type_id))
    }

    /// Attach the underlying type and methods to a declared definition.
    ///
    /// `underlying` must already be resolved to an unnamed type.
    pub fn define(
        &self,
        id: DefId,
        underlying: TypeId,
        mut methods: Vec<MethodSig>,
    ) -> Result<(), TypeError> {
        let Some(mut info) = self.definitions.get_mut(&id) else {
            return Err(TypeError::UnknownDefinition(id));
        };
        if info.is_defined() {
            return Err(TypeError::AlreadyDefined {
                name: info.name.clone(),
            });
        }

        methods.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(dup) = methods.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(TypeError::DuplicateMethod {
                name: info.name.clone(),
                method: dup[0].name.clone(),
            });
        }

        info.underlying = Some(underlying);
        info.methods = methods;
        trace!(
            name = info.name.as_str(),
            underlying = underlying.0,
            methods = info.methods.len(),
            "defined named type"
        );
        Ok(())
    }

    pub fn get(&self, id: DefId) -> Option<DefinitionInfo> {
        self.definitions.get(&id).map(|info| info.value().clone())
    }

    pub fn lookup_name(&self, name: &str) -> Option<DefId> {
        self.names.get(name).map(|id| *id)
    }

    pub fn name(&self, id: DefId) -> Option<String> {
        self.definitions.get(&id).map(|info| info.name.clone())
    }

    pub fn underlying(&self, id: DefId) -> Option<TypeId> {
        self.definitions.get(&id).and_then(|info| info.underlying)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Names declared but never defined.
    pub fn undefined_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .definitions
            .iter()
            .filter(|entry| !entry.is_defined())
            .map(|entry| entry.name.clone())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
