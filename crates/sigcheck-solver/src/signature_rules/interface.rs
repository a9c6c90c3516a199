//! Interface-typed slots accept any type convertible to the interface.

use crate::diagnostics::{ArgumentSite, MismatchReason, SignatureTracer, Slot};
use crate::signature::SignatureChecker;
use sigcheck_types::TypeId;

impl<'a> SignatureChecker<'a> {
    pub(crate) fn check_interface_slot<T: SignatureTracer>(
        &self,
        actual: TypeId,
        expected: TypeId,
        slot: Slot,
        site: ArgumentSite,
        tracer: &mut T,
    ) -> bool {
        if self.convert.is_convertible(actual, expected) {
            return true;
        }
        tracer.on_mismatch(|| {
            site.fail(MismatchReason::NotConvertible {
                expected,
                actual,
                slot,
            })
        })
    }
}
