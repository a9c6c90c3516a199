//! Assignability and convertibility between type descriptors.
//!
//! These are the host type-system rules behind the validator's
//! "is type X convertible to type Y" predicate. They follow the Go
//! conversion rules for the subset of types the descriptors model.

use crate::intern::TypeDatabase;
use crate::method_set::{find_method, method_set};
use crate::types::{BasicKind, TypeData, TypeId, TypeKind};

/// Relation checks over a [`TypeDatabase`].
#[derive(Clone, Copy)]
pub struct ConversionChecker<'a> {
    db: &'a dyn TypeDatabase,
}

impl<'a> ConversionChecker<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self { db }
    }

    /// Type identity. Interning makes this handle equality.
    #[inline]
    pub fn is_identical(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    /// Whether the method set of `ty` covers every method of `iface`.
    ///
    /// Returns false when `iface` is not an interface type.
    pub fn implements(&self, ty: TypeId, iface: TypeId) -> bool {
        let Some(shape) = self.db.interface_shape(iface) else {
            return false;
        };
        if shape.is_empty() {
            return true;
        }
        let methods = method_set(self.db, ty);
        shape.methods.iter().all(|required| {
            find_method(&methods, &required.name)
                .is_some_and(|have| have.signature == required.signature)
        })
    }

    /// A value of type `source` may be assigned to a variable of `target`.
    pub fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if source == target {
            return true;
        }

        let source_underlying = self.db.underlying(source);
        let target_underlying = self.db.underlying(target);
        if source_underlying == target_underlying
            && (!self.db.is_named(source) || !self.db.is_named(target))
        {
            return true;
        }

        self.db.kind(target) == TypeKind::Interface && self.implements(source, target)
    }

    /// A value of type `source` may be explicitly converted to `target`.
    pub fn is_convertible(&self, source: TypeId, target: TypeId) -> bool {
        if self.is_assignable(source, target) {
            return true;
        }

        if self.db.underlying(source) == self.db.underlying(target) {
            return true;
        }

        if self.unnamed_pointers_to_identical_bases(source, target) {
            return true;
        }

        match (self.db.basic_kind(source), self.db.basic_kind(target)) {
            (Some(s), Some(t)) => {
                if is_real_numeric(s) && is_real_numeric(t) {
                    return true;
                }
                if s.is_complex() && t.is_complex() {
                    return true;
                }
                if s.is_integer() && t.is_string() {
                    return true;
                }
                false
            }
            (None, Some(t)) if t.is_string() => self.is_byte_or_rune_slice(source),
            (Some(s), None) if s.is_string() => self.is_byte_or_rune_slice(target),
            _ => false,
        }
    }

    fn unnamed_pointers_to_identical_bases(&self, source: TypeId, target: TypeId) -> bool {
        let source_data = self.db.lookup(source);
        let target_data = self.db.lookup(target);
        match (source_data.as_deref(), target_data.as_deref()) {
            (Some(TypeData::Pointer(s_elem)), Some(TypeData::Pointer(t_elem))) => {
                self.db.underlying(*s_elem) == self.db.underlying(*t_elem)
            }
            _ => false,
        }
    }

    fn is_byte_or_rune_slice(&self, ty: TypeId) -> bool {
        match self.db.underlying_data(ty).as_deref() {
            Some(TypeData::Slice(elem)) => matches!(
                self.db.basic_kind(*elem),
                Some(BasicKind::Uint8 | BasicKind::Int32)
            ),
            _ => false,
        }
    }
}

fn is_real_numeric(kind: BasicKind) -> bool {
    kind.is_integer() || kind.is_float()
}

#[cfg(test)]
#[path = "../tests/convert_tests.rs"]
mod tests;
