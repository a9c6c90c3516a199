//! Centralized limits for the recursive algorithms in the workspace.
//!
//! Type descriptors can be recursive (a named struct embedding a pointer to
//! itself, a method whose signature mentions its own receiver type). Every
//! walk over a descriptor graph is bounded by one of these constants.

/// Maximum depth of embedded-field promotion when computing a method set.
///
/// ```go
/// type A struct{}
/// func (A) Name() string
/// type B struct { A }   // Name promoted at depth 1
/// type C struct { B }   // Name promoted at depth 2
/// ```
pub const MAX_EMBEDDING_DEPTH: u32 = 16;

/// Maximum nesting rendered by the type formatter before it prints `...`.
pub const MAX_FORMAT_DEPTH: u32 = 32;

/// Maximum nesting accepted by the type-expression parser.
///
/// `[][][][]...int` or deeply nested `func(func(func(...)))` beyond this
/// depth is rejected instead of overflowing the stack.
pub const MAX_TYPE_NESTING: u32 = 64;
