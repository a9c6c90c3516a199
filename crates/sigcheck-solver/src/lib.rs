//! Signature compatibility checking.
//!
//! Decides whether a substitute function may stand in for a declared one:
//!
//! - **Signature Validator** (`signature`): arity, then arguments, then results
//! - **Rules** (`signature_rules`): generic, interface, mapping and variadic slots
//! - **Diagnostics**: structured failures, rendered lazily
//!
//! The entrypoints in [`queries`] are what callers use.
pub mod diagnostics;
pub mod queries;
mod signature;
mod signature_rules;

pub use diagnostics::{
    ArgumentSite, DiagnosticTracer, FailureKind, FastTracer, MismatchReason, Phase,
    SignatureError, SignatureFailure, SignatureRole, SignatureTracer, Slot,
};
pub use queries::{check_signatures, is_signature_compatible, validate_signatures};
pub use signature::SignatureChecker;
