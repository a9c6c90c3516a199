//! Signature compatibility checking for mock delegates.
//!
//! A mock framework lets a test attach a delegate function to an expected
//! call. Before the delegate is registered its signature is validated
//! against the mocked method's, so a mismatch is reported at setup time
//! rather than when the call happens.
//!
//! - `sigcheck_types` - interned type descriptors and conversion rules
//! - `sigcheck_parser` - Go-style type expressions and named declarations
//! - `sigcheck_solver` - the signature validator and its diagnostics
//! - [`delegate`] - attaching validated delegates to an expected call
//! - [`cli`] - the `sigcheck` command-line tool

pub use sigcheck_common as common;
pub use sigcheck_parser as parser;
pub use sigcheck_solver as solver;
pub use sigcheck_types as types;

pub use sigcheck_parser::{TypeDecl, declare_types, parse_type};
pub use sigcheck_solver::{
    FailureKind, SignatureError, SignatureFailure, check_signatures, is_signature_compatible,
    validate_signatures,
};
pub use sigcheck_types::{TypeDatabase, TypeId, TypeInterner};

pub mod cli;
pub mod delegate;
pub use delegate::{Action, Call, DelegateError};

pub mod tracing_config;
