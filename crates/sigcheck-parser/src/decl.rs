//! Named-type declarations.
//!
//! A batch of declarations is applied in two phases: every name is declared
//! first so bodies may refer to each other in any order, then bodies are
//! parsed and defined. A declaration whose underlying type is another named
//! type waits until that type is defined (`type Celsius Temperature`), as
//! does an interface embedding one that is not defined yet.

use crate::parser::{ParseError, parse_method, parse_type};
use serde::{Deserialize, Serialize};
use sigcheck_types::{TypeDatabase, TypeError, TypeId, TypeInterner};
use thiserror::Error;
use tracing::{debug, trace};

/// `type <name> <underlying>` plus its declared methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Type expression for the underlying type.
    pub underlying: String,
    /// Method declarations such as `"String() string"`.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, underlying: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: underlying.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum DeclError {
    #[error("type {name}: {source}")]
    Type {
        name: String,
        #[source]
        source: TypeError,
    },
    #[error("type {name}: cannot parse `{text}`: {source}")]
    Parse {
        name: String,
        text: String,
        #[source]
        source: ParseError,
    },
    #[error("underlying types never resolve for: {}", names.join(", "))]
    UnresolvedUnderlying { names: Vec<String> },
}

/// Declare and define every type in `decls`, returning their handles in
/// input order.
pub fn declare_types(db: &TypeInterner, decls: &[TypeDecl]) -> Result<Vec<TypeId>, DeclError> {
    let mut ids = Vec::with_capacity(decls.len());
    for decl in decls {
        let id = db.declare_named(&decl.name).map_err(|source| DeclError::Type {
            name: decl.name.clone(),
            source,
        })?;
        ids.push(id);
    }

    let mut pending: Vec<usize> = (0..decls.len()).collect();
    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();

        for idx in pending {
            let decl = &decls[idx];
            let underlying = match parse_type(db, &decl.underlying) {
                Ok(underlying) => underlying,
                // An embedded interface whose body is not defined yet.
                Err(ParseError::PendingType { name, .. }) => {
                    trace!(
                        name = decl.name.as_str(),
                        waiting_on = name.as_str(),
                        "deferring definition"
                    );
                    deferred.push(idx);
                    continue;
                }
                Err(source) => {
                    return Err(DeclError::Parse {
                        name: decl.name.clone(),
                        text: decl.underlying.clone(),
                        source,
                    });
                }
            };

            // A still-pending named underlying has no body to borrow yet.
            if db.is_named(db.underlying(underlying)) {
                trace!(name = decl.name.as_str(), "deferring definition");
                deferred.push(idx);
                continue;
            }

            let methods = decl
                .methods
                .iter()
                .map(|text| {
                    parse_method(db, text).map_err(|source| DeclError::Parse {
                        name: decl.name.clone(),
                        text: text.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            db.define_named(ids[idx], underlying, methods)
                .map_err(|source| DeclError::Type {
                    name: decl.name.clone(),
                    source,
                })?;
        }

        if deferred.len() == before {
            let names = deferred.iter().map(|&idx| decls[idx].name.clone()).collect();
            return Err(DeclError::UnresolvedUnderlying { names });
        }
        pending = deferred;
    }

    debug!(count = ids.len(), "declared named types");
    Ok(ids)
}

#[cfg(test)]
#[path = "../tests/decl_tests.rs"]
mod tests;
