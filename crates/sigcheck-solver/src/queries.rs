//! Validation entrypoints.
//!
//! Callers use these instead of driving [`SignatureChecker`] and a tracer
//! directly.

use crate::diagnostics::{DiagnosticTracer, FastTracer, SignatureError, SignatureFailure};
use crate::signature::SignatureChecker;
use sigcheck_types::{TypeDatabase, TypeId};
use tracing::debug;

/// Validate `substitute` against `declared`, returning the first failure.
pub fn validate_signatures(
    db: &dyn TypeDatabase,
    declared: TypeId,
    substitute: TypeId,
) -> Result<(), SignatureFailure> {
    let mut tracer = DiagnosticTracer::new();
    let compatible = SignatureChecker::new(db).check_signatures(declared, substitute, &mut tracer);
    match tracer.take_failure() {
        Some(failure) => {
            debug!(
                declared = declared.0,
                substitute = substitute.0,
                kind = %failure.kind(),
                "substitute signature rejected"
            );
            Err(failure)
        }
        None => {
            debug_assert!(compatible, "rejection without a recorded failure");
            Ok(())
        }
    }
}

/// Like [`validate_signatures`], with the failure rendered into an error.
pub fn check_signatures(
    db: &dyn TypeDatabase,
    declared: TypeId,
    substitute: TypeId,
) -> Result<(), SignatureError> {
    validate_signatures(db, declared, substitute)
        .map_err(|failure| SignatureError::new(db, failure))
}

/// Boolean check that never builds a failure.
pub fn is_signature_compatible(
    db: &dyn TypeDatabase,
    declared: TypeId,
    substitute: TypeId,
) -> bool {
    SignatureChecker::new(db).check_signatures(declared, substitute, &mut FastTracer)
}

#[cfg(test)]
#[path = "../tests/queries_tests.rs"]
mod tests;
