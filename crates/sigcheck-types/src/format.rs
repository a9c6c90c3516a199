//! Human-readable rendering of type descriptors.
//!
//! Output uses Go type syntax, which is what failure messages quote back to
//! the user: `[]int`, `map[interface {}]int`, `func(int, ...string) (bool, error)`.

use crate::intern::TypeDatabase;
use crate::types::{FunctionShape, TypeData, TypeId};
use sigcheck_common::limits::MAX_FORMAT_DEPTH;
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
    max_depth: u32,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self {
            db,
            max_depth: MAX_FORMAT_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id, 0);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId, depth: u32) {
        if depth > self.max_depth {
            out.push_str("...");
            return;
        }

        let Some(data) = self.db.lookup(id) else {
            let _ = write!(out, "<unknown {id}>");
            return;
        };

        match data.as_ref() {
            TypeData::Basic(kind) => out.push_str(kind.name()),
            TypeData::Named(def_id) => match self.db.definition(*def_id) {
                Some(info) => out.push_str(&info.name),
                None => {
                    let _ = write!(out, "<unknown {id}>");
                }
            },
            TypeData::Pointer(elem) => {
                out.push('*');
                self.write_type(out, *elem, depth + 1);
            }
            TypeData::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, *elem, depth + 1);
            }
            TypeData::Map { key, elem } => {
                out.push_str("map[");
                self.write_type(out, *key, depth + 1);
                out.push(']');
                self.write_type(out, *elem, depth + 1);
            }
            TypeData::Struct(shape) => {
                if shape.fields.is_empty() {
                    out.push_str("struct {}");
                    return;
                }
                out.push_str("struct { ");
                for (i, field) in shape.fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    self.write_type(out, field.ty, depth + 1);
                }
                out.push_str(" }");
            }
            TypeData::Interface(shape) => {
                if shape.methods.is_empty() {
                    out.push_str("interface {}");
                    return;
                }
                out.push_str("interface { ");
                for (i, method) in shape.methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    match self.db.function_shape(method.signature) {
                        Some(sig) => self.write_signature(out, &sig, depth + 1),
                        None => out.push_str("()"),
                    }
                }
                out.push_str(" }");
            }
            TypeData::Function(shape) => {
                out.push_str("func");
                self.write_signature(out, shape, depth + 1);
            }
        }
    }

    /// `(params) results`, without the leading `func`.
    fn write_signature(&self, out: &mut String, shape: &FunctionShape, depth: u32) {
        out.push('(');
        let last = shape.params.len().saturating_sub(1);
        for (i, &param) in shape.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if shape.variadic && i == last {
                out.push_str("...");
                match self.db.element_type(param) {
                    Some(elem) => self.write_type(out, elem, depth + 1),
                    None => self.write_type(out, param, depth + 1),
                }
            } else {
                self.write_type(out, param, depth + 1);
            }
        }
        out.push(')');

        match shape.results.as_slice() {
            [] => {}
            [single] => {
                out.push(' ');
                self.write_type(out, *single, depth + 1);
            }
            results => {
                out.push_str(" (");
                for (i, &result) in results.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, result, depth + 1);
                }
                out.push(')');
            }
        }
    }
}

/// Shorthand for `TypeFormatter::new(db).format(id)`.
pub fn type_to_string(db: &dyn TypeDatabase, id: TypeId) -> String {
    TypeFormatter::new(db).format(id)
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
