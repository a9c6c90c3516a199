//! The declared variadic parameter.
//!
//! A declared `...E` parameter is stored as `[]E`. The substitute's last
//! parameter is an ordinary type and stands in when it is:
//!
//! - exactly `[]E`;
//! - `[]S` where `E` is an interface and `S` converts to `E`
//!   (`...interface{}` accepts `[]int`);
//! - `[]J` where `J` is an interface and `E` converts to `J`
//!   (`...int` accepts `[]interface{}`).
//!
//! Anything else is a `VariadicMismatch`.

use crate::diagnostics::{ArgumentSite, MismatchReason, SignatureTracer};
use crate::signature::SignatureChecker;
use sigcheck_types::{TypeId, TypeKind};
use tracing::trace;

impl<'a> SignatureChecker<'a> {
    pub(crate) fn check_variadic<T: SignatureTracer>(
        &self,
        declared: TypeId,
        actual: TypeId,
        position: usize,
        tracer: &mut T,
    ) -> bool {
        if self.convert.is_identical(actual, declared)
            || self.variadic_elements_compatible(declared, actual)
        {
            return true;
        }
        tracer.on_mismatch(|| {
            ArgumentSite::input(position).fail(MismatchReason::VariadicMismatch {
                expected: declared,
                actual,
            })
        })
    }

    fn variadic_elements_compatible(&self, declared: TypeId, actual: TypeId) -> bool {
        if self.db.kind(actual) != TypeKind::Sequence {
            return false;
        }
        let (Some(declared_elem), Some(actual_elem)) =
            (self.db.element_type(declared), self.db.element_type(actual))
        else {
            return false;
        };
        trace!(
            declared_elem = declared_elem.0,
            actual_elem = actual_elem.0,
            "comparing variadic elements"
        );

        if self.db.kind(declared_elem) == TypeKind::Interface
            && self.convert.is_convertible(actual_elem, declared_elem)
        {
            return true;
        }
        self.db.kind(actual_elem) == TypeKind::Interface
            && self.convert.is_convertible(declared_elem, actual_elem)
    }
}
