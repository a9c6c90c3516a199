//! Mapping parameters.
//!
//! Key and element are checked independently, key first. Each is lenient
//! only when the declared key (or element) type is an interface:
//!
//! ```text
//! declared map[interface{}]int   accepts map[string]int
//! declared map[interface{}]int   rejects map[string]string  (element)
//! declared map[int]interface{}   rejects map[int64]string   (key)
//! ```

use crate::diagnostics::{ArgumentSite, MismatchReason, SignatureTracer, Slot};
use crate::signature::SignatureChecker;
use sigcheck_types::{TypeId, TypeKind};

impl<'a> SignatureChecker<'a> {
    /// Both `actual` and `expected` are mapping kinds.
    pub(crate) fn check_mapping<T: SignatureTracer>(
        &self,
        actual: TypeId,
        expected: TypeId,
        site: ArgumentSite,
        tracer: &mut T,
    ) -> bool {
        let (Some(expected_key), Some(expected_elem), Some(actual_key), Some(actual_elem)) = (
            self.db.key_type(expected),
            self.db.element_type(expected),
            self.db.key_type(actual),
            self.db.element_type(actual),
        ) else {
            return tracer.on_mismatch(|| {
                site.fail(MismatchReason::KindMismatch {
                    expected: self.db.kind(expected),
                    actual: self.db.kind(actual),
                })
            });
        };

        self.check_map_slot(actual_key, expected_key, Slot::MapKey, site, tracer)
            && self.check_map_slot(actual_elem, expected_elem, Slot::MapElement, site, tracer)
    }

    fn check_map_slot<T: SignatureTracer>(
        &self,
        actual: TypeId,
        expected: TypeId,
        slot: Slot,
        site: ArgumentSite,
        tracer: &mut T,
    ) -> bool {
        if self.db.kind(expected) == TypeKind::Interface {
            self.check_interface_slot(actual, expected, slot, site, tracer)
        } else {
            self.check_identical(actual, expected, slot, site, tracer)
        }
    }
}
