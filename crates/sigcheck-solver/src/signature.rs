//! Signature Validator.
//!
//! Compares a declared (mocked) function signature against a substitute
//! (delegate) signature, in a fixed order:
//!
//! 1. both must be function types (declared first);
//! 2. input arity;
//! 3. the declared variadic parameter, if any;
//! 4. remaining inputs, in increasing position;
//! 5. return arity;
//! 6. return values, in increasing position.
//!
//! The first mismatch ends the check. The per-argument rules live in
//! `signature_rules`.

use crate::diagnostics::{
    ArgumentSite, Phase, SignatureFailure, SignatureRole, SignatureTracer,
};
use sigcheck_types::{ConversionChecker, TypeDatabase, TypeId};
use tracing::trace;

/// Checks whether a substitute function can stand in for a declared one.
///
/// Holds only borrowed read-only state, so one checker may be reused for
/// any number of checks.
#[derive(Clone, Copy)]
pub struct SignatureChecker<'a> {
    pub(crate) db: &'a dyn TypeDatabase,
    pub(crate) convert: ConversionChecker<'a>,
}

impl<'a> SignatureChecker<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self {
            db,
            convert: ConversionChecker::new(db),
        }
    }

    /// Run the full comparison, reporting the first mismatch to `tracer`.
    pub fn check_signatures<T: SignatureTracer>(
        &self,
        declared: TypeId,
        substitute: TypeId,
        tracer: &mut T,
    ) -> bool {
        trace!(
            declared = declared.0,
            substitute = substitute.0,
            "check_signatures"
        );

        let Some(declared_shape) = self.db.function_shape(declared) else {
            return tracer.on_mismatch(|| SignatureFailure::NotAFunction {
                role: SignatureRole::Declared,
                actual: declared,
            });
        };
        let Some(substitute_shape) = self.db.function_shape(substitute) else {
            return tracer.on_mismatch(|| SignatureFailure::NotAFunction {
                role: SignatureRole::Substitute,
                actual: substitute,
            });
        };

        // Inputs. A declared variadic parameter counts as one slot.
        let expected = declared_shape.param_count();
        let actual = substitute_shape.param_count();
        if expected != actual {
            return tracer.on_mismatch(|| SignatureFailure::ArityMismatch {
                phase: Phase::Input,
                expected,
                actual,
            });
        }

        let mut positional = expected;
        if let Some(variadic) = declared_shape.variadic_param() {
            let last = expected - 1;
            if !self.check_variadic(variadic, substitute_shape.params[last], last, tracer) {
                return false;
            }
            positional = last;
        }

        for position in 0..positional {
            if !self.check_argument(
                substitute_shape.params[position],
                declared_shape.params[position],
                ArgumentSite::input(position),
                tracer,
            ) {
                return false;
            }
        }

        // Results.
        let expected = declared_shape.result_count();
        let actual = substitute_shape.result_count();
        if expected != actual {
            return tracer.on_mismatch(|| SignatureFailure::ArityMismatch {
                phase: Phase::Return,
                expected,
                actual,
            });
        }

        for position in 0..expected {
            if !self.check_argument(
                substitute_shape.results[position],
                declared_shape.results[position],
                ArgumentSite::result(position),
                tracer,
            ) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
