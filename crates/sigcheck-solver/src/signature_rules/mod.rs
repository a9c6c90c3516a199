//! Per-argument rules used by the Signature Validator.
//!
//! Organized by the shape of the declared slot:
//! - `argument` - Generic matcher (kind check, then exact identity)
//! - `interface` - Interface-typed slots (convertibility)
//! - `mapping` - Mapping parameters (key and element checked separately)
//! - `variadic` - The declared variadic parameter

mod argument;
mod interface;
mod mapping;
mod variadic;

#[cfg(test)]
#[path = "../../tests/signature_rules_tests.rs"]
mod tests;
