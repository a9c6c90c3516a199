//! Generic argument matching.
//!
//! Only interface-typed slots and mapping key/element slots get conversion
//! leniency. Everything else must be the identical type, so `[]string` does
//! not stand in for `[]interface{}` and one struct type does not stand in for
//! another with the same fields.

use crate::diagnostics::{ArgumentSite, MismatchReason, SignatureTracer, Slot};
use crate::signature::SignatureChecker;
use sigcheck_types::{TypeId, TypeKind};

impl<'a> SignatureChecker<'a> {
    /// Compare the substitute's type at one position with the declared type.
    pub(crate) fn check_argument<T: SignatureTracer>(
        &self,
        actual: TypeId,
        expected: TypeId,
        site: ArgumentSite,
        tracer: &mut T,
    ) -> bool {
        let expected_kind = self.db.kind(expected);
        if expected_kind == TypeKind::Interface {
            return self.check_interface_slot(actual, expected, Slot::Value, site, tracer);
        }

        let actual_kind = self.db.kind(actual);
        if expected_kind != actual_kind {
            return tracer.on_mismatch(|| {
                site.fail(MismatchReason::KindMismatch {
                    expected: expected_kind,
                    actual: actual_kind,
                })
            });
        }

        if expected_kind == TypeKind::Mapping {
            return self.check_mapping(actual, expected, site, tracer);
        }

        self.check_identical(actual, expected, Slot::Value, site, tracer)
    }

    pub(crate) fn check_identical<T: SignatureTracer>(
        &self,
        actual: TypeId,
        expected: TypeId,
        slot: Slot,
        site: ArgumentSite,
        tracer: &mut T,
    ) -> bool {
        if self.convert.is_identical(actual, expected) {
            return true;
        }
        tracer.on_mismatch(|| {
            site.fail(MismatchReason::TypeMismatch {
                expected,
                actual,
                slot,
            })
        })
    }
}
