//! Common types and utilities shared by the sigcheck crates.
//!
//! - Source spans (`Span`) for diagnostics produced while parsing type text
//! - Centralized limits for recursive algorithms

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
