//! Failure reasons for signature validation.
//!
//! ## Architecture: Lazy Diagnostics
//!
//! Checking records structured failures that hold only `TypeId`s and counts.
//! Strings are produced later by [`SignatureFailure::render`], so the boolean
//! fast path never touches the formatter.
//!
//! ## Tracer Pattern
//!
//! The same checking code serves both entrypoints:
//!
//! - **FastTracer**: stops at the first mismatch without building a reason
//! - **DiagnosticTracer**: stops at the first mismatch and keeps its reason

use serde::Serialize;
use sigcheck_types::{TypeDatabase, TypeFormatter, TypeId, TypeKind};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Tracer Pattern
// =============================================================================

/// Receives signature mismatches as they are detected.
///
/// The failure is built lazily through a closure, so `FastTracer` never
/// constructs one.
pub trait SignatureTracer {
    /// Called on the first mismatch. The returned value becomes the result
    /// of the check that failed.
    fn on_mismatch(&mut self, failure: impl FnOnce() -> SignatureFailure) -> bool;
}

/// Tracer for boolean checks. The failure closure is never called.
#[derive(Clone, Copy, Debug)]
pub struct FastTracer;

impl SignatureTracer for FastTracer {
    #[inline(always)]
    fn on_mismatch(&mut self, _failure: impl FnOnce() -> SignatureFailure) -> bool {
        false
    }
}

/// Tracer that keeps the first failure for reporting.
#[derive(Debug, Default)]
pub struct DiagnosticTracer {
    failure: Option<SignatureFailure>,
}

impl DiagnosticTracer {
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// Take the collected failure, leaving `None` in its place.
    pub fn take_failure(&mut self) -> Option<SignatureFailure> {
        self.failure.take()
    }

    pub fn get_failure(&self) -> Option<&SignatureFailure> {
        self.failure.as_ref()
    }

    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }
}

impl SignatureTracer for DiagnosticTracer {
    #[inline]
    fn on_mismatch(&mut self, failure: impl FnOnce() -> SignatureFailure) -> bool {
        // Validation stops at the first mismatch, so there is never a second.
        if self.failure.is_none() {
            self.failure = Some(failure());
        }
        false
    }
}

// =============================================================================
// Failure reasons
// =============================================================================

/// Which list of the signature a failure is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Input,
    Return,
}

/// Which of the two compared signatures a failure refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureRole {
    Declared,
    Substitute,
}

impl fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignatureRole::Declared => "declared",
            SignatureRole::Substitute => "substitute",
        })
    }
}

/// Where inside an argument type a mismatch was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The argument type itself.
    Value,
    MapKey,
    MapElement,
}

/// Position of one argument or return value being compared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArgumentSite {
    pub phase: Phase,
    pub position: usize,
}

impl ArgumentSite {
    pub const fn input(position: usize) -> Self {
        Self {
            phase: Phase::Input,
            position,
        }
    }

    pub const fn result(position: usize) -> Self {
        Self {
            phase: Phase::Return,
            position,
        }
    }

    pub fn fail(self, reason: MismatchReason) -> SignatureFailure {
        SignatureFailure::Argument {
            phase: self.phase,
            position: self.position,
            reason,
        }
    }
}

/// Why one argument (or return value) was rejected.
///
/// `expected` is always the declared side, `actual` the substitute side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    /// Non-interface declared type whose kind differs from the substitute's.
    KindMismatch { expected: TypeKind, actual: TypeKind },
    /// Same kind, but the types are not identical.
    TypeMismatch {
        expected: TypeId,
        actual: TypeId,
        slot: Slot,
    },
    /// Interface-typed slot whose substitute type does not convert to it.
    NotConvertible {
        expected: TypeId,
        actual: TypeId,
        slot: Slot,
    },
    /// The substitute cannot stand in for the declared variadic parameter.
    /// `expected` is the declared parameter's slice type.
    VariadicMismatch { expected: TypeId, actual: TypeId },
}

/// The first reason a substitute signature was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureFailure {
    /// One of the two types is not a function type.
    NotAFunction { role: SignatureRole, actual: TypeId },
    /// Parameter or result counts differ.
    ArityMismatch {
        phase: Phase,
        expected: usize,
        actual: usize,
    },
    /// A parameter or result at `position` is incompatible.
    Argument {
        phase: Phase,
        position: usize,
        reason: MismatchReason,
    },
}

/// Failure taxonomy, flattened for reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotAFunction,
    ArityMismatch,
    KindMismatch,
    TypeMismatch,
    NotConvertible,
    VariadicMismatch,
}

impl FailureKind {
    pub const fn name(self) -> &'static str {
        match self {
            FailureKind::NotAFunction => "not_a_function",
            FailureKind::ArityMismatch => "arity_mismatch",
            FailureKind::KindMismatch => "kind_mismatch",
            FailureKind::TypeMismatch => "type_mismatch",
            FailureKind::NotConvertible => "not_convertible",
            FailureKind::VariadicMismatch => "variadic_mismatch",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MismatchReason {
    pub fn kind(&self) -> FailureKind {
        match self {
            MismatchReason::KindMismatch { .. } => FailureKind::KindMismatch,
            MismatchReason::TypeMismatch { .. } => FailureKind::TypeMismatch,
            MismatchReason::NotConvertible { .. } => FailureKind::NotConvertible,
            MismatchReason::VariadicMismatch { .. } => FailureKind::VariadicMismatch,
        }
    }
}

impl SignatureFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            SignatureFailure::NotAFunction { .. } => FailureKind::NotAFunction,
            SignatureFailure::ArityMismatch { .. } => FailureKind::ArityMismatch,
            SignatureFailure::Argument { reason, .. } => reason.kind(),
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            SignatureFailure::NotAFunction { .. } => None,
            SignatureFailure::ArityMismatch { phase, .. }
            | SignatureFailure::Argument { phase, .. } => Some(*phase),
        }
    }

    /// Zero-based argument position, for per-argument failures.
    pub fn position(&self) -> Option<usize> {
        match self {
            SignatureFailure::Argument { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Render the human-readable message.
    pub fn render(&self, db: &dyn TypeDatabase) -> String {
        let formatter = TypeFormatter::new(db);
        match self {
            SignatureFailure::NotAFunction { role, actual } => format!(
                "expected a function type for the {role} signature, got {}",
                formatter.format(*actual)
            ),
            SignatureFailure::ArityMismatch {
                phase: Phase::Input,
                expected,
                actual,
            } => format!("expected function to have {expected} arguments not {actual}"),
            SignatureFailure::ArityMismatch {
                phase: Phase::Return,
                expected,
                actual,
            } => format!("expected function to have {expected} return values not {actual}"),
            SignatureFailure::Argument {
                position,
                reason: MismatchReason::VariadicMismatch { expected, actual },
                ..
            } => format!(
                "expected function to have arg of type {} at position {position} not type {}",
                formatter.format(*expected),
                formatter.format(*actual)
            ),
            SignatureFailure::Argument {
                phase,
                position,
                reason,
            } => {
                let prefix = match phase {
                    Phase::Input => "input argument",
                    Phase::Return => "return value",
                };
                format!("{prefix} at {position}: {}", render_reason(&formatter, reason))
            }
        }
    }
}

fn render_reason(formatter: &TypeFormatter<'_>, reason: &MismatchReason) -> String {
    match reason {
        MismatchReason::KindMismatch { expected, actual } => {
            format!("expected arg of kind {expected} not {actual}")
        }
        MismatchReason::TypeMismatch {
            expected,
            actual,
            slot,
        } => {
            let what = match slot {
                Slot::Value => "arg",
                Slot::MapKey => "map key",
                Slot::MapElement => "map element",
            };
            format!(
                "expected {what} of type {} not type {}",
                formatter.format(*expected),
                formatter.format(*actual)
            )
        }
        MismatchReason::NotConvertible {
            expected,
            actual,
            slot,
        } => {
            let message = format!(
                "expected arg convertible to type {} not type {}",
                formatter.format(*expected),
                formatter.format(*actual)
            );
            match slot {
                Slot::Value => message,
                Slot::MapKey => format!("map key: {message}"),
                Slot::MapElement => format!("map element: {message}"),
            }
        }
        MismatchReason::VariadicMismatch { expected, actual } => format!(
            "expected arg of type {} not type {}",
            formatter.format(*expected),
            formatter.format(*actual)
        ),
    }
}

// =============================================================================
// SignatureError
// =============================================================================

/// A rejected substitute, with its message already rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SignatureError {
    failure: SignatureFailure,
    message: String,
}

impl SignatureError {
    pub fn new(db: &dyn TypeDatabase, failure: SignatureFailure) -> Self {
        let message = failure.render(db);
        Self { failure, message }
    }

    pub fn failure(&self) -> &SignatureFailure {
        &self.failure
    }

    pub fn kind(&self) -> FailureKind {
        self.failure.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_failure(self) -> SignatureFailure {
        self.failure
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
