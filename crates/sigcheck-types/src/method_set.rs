//! Method set computation.
//!
//! The method set of a type decides whether it implements an interface:
//!
//! - an interface's method set is its own method list;
//! - a named type contributes its declared methods at depth 0;
//! - embedded struct fields promote the methods of their types one level
//!   deeper each time they are nested;
//! - a pointer `*T` has the method set of `T`.
//!
//! Among promoted methods the shallowest depth wins. Two candidates of the
//! same name at the shallowest depth are ambiguous and neither is in the set,
//! and a field of the same name at that depth hides the method entirely.

use crate::intern::TypeDatabase;
use crate::types::{MethodSig, TypeData, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use sigcheck_common::limits::MAX_EMBEDDING_DEPTH;
use tracing::trace;

/// Compute the method set of `ty`, sorted by method name.
pub fn method_set(db: &dyn TypeDatabase, ty: TypeId) -> Vec<MethodSig> {
    if let Some(shape) = db.interface_shape(ty) {
        return shape.methods;
    }

    // *T has the methods of T. A pointer to an interface or to a pointer
    // has no methods.
    let base = match db.lookup(ty).as_deref() {
        Some(TypeData::Pointer(elem)) => {
            let elem = *elem;
            match db.underlying_data(elem).as_deref() {
                Some(TypeData::Interface(_)) | Some(TypeData::Pointer(_)) => return Vec::new(),
                _ => elem,
            }
        }
        _ => ty,
    };

    let mut found: FxHashMap<String, MethodSig> = FxHashMap::default();
    // Selectors already decided at a shallower depth (found, ambiguous or
    // hidden by a field).
    let mut blocked: FxHashSet<String> = FxHashSet::default();
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();
    let mut current = vec![base];

    for depth in 0..=MAX_EMBEDDING_DEPTH {
        if current.is_empty() {
            break;
        }

        let mut candidates: FxHashMap<String, (MethodSig, u32)> = FxHashMap::default();
        let mut field_names: FxHashSet<String> = FxHashSet::default();
        let mut next = Vec::new();

        for &t in &current {
            if seen.contains(&t) {
                continue;
            }

            if let Some(info) = db.named_definition(t) {
                for method in info.methods {
                    let entry = candidates
                        .entry(method.name.clone())
                        .or_insert_with(|| (method, 0));
                    entry.1 += 1;
                }
            }

            match db.underlying_data(t).as_deref() {
                Some(TypeData::Struct(shape)) => {
                    for field in &shape.fields {
                        field_names.insert(field.name.clone());
                        if field.embedded {
                            next.push(embedded_base(db, field.ty));
                        }
                    }
                }
                // Only reachable through embedding: depth 0 interfaces
                // returned above.
                Some(TypeData::Interface(shape)) if depth > 0 => {
                    for method in &shape.methods {
                        let entry = candidates
                            .entry(method.name.clone())
                            .or_insert_with(|| (method.clone(), 0));
                        entry.1 += 1;
                    }
                }
                _ => {}
            }
        }

        for (name, (method, count)) in candidates {
            if blocked.contains(&name) {
                continue;
            }
            if count == 1 && !field_names.contains(&name) {
                found.insert(name.clone(), method);
            } else {
                trace!(method = name.as_str(), depth, "ambiguous or hidden method");
            }
            blocked.insert(name);
        }
        blocked.extend(field_names);

        seen.extend(current.iter().copied());
        current = next;
    }

    let mut methods: Vec<MethodSig> = found.into_values().collect();
    methods.sort_by(|a, b| a.name.cmp(&b.name));
    methods
}

/// Embedded `*T` promotes the methods of `T`.
fn embedded_base(db: &dyn TypeDatabase, ty: TypeId) -> TypeId {
    match db.lookup(ty).as_deref() {
        Some(TypeData::Pointer(elem)) => *elem,
        _ => ty,
    }
}

/// Look up one method by name in a sorted method list.
pub fn find_method<'m>(methods: &'m [MethodSig], name: &str) -> Option<&'m MethodSig> {
    methods
        .binary_search_by(|m| m.name.as_str().cmp(name))
        .ok()
        .map(|idx| &methods[idx])
}

#[cfg(test)]
#[path = "../tests/method_set_tests.rs"]
mod tests;
