//! Type-expression parsing for sigcheck.
//!
//! This crate turns Go-style type text into interned descriptors:
//! - `scanner` - Tokenizer (`SyntaxKind`, `Token`, `Scanner`)
//! - `parser` - Recursive-descent parser producing `TypeId`s
//! - `decl` - Named-type declarations (`TypeDecl`) and their two-phase definition
pub mod decl;
pub mod parser;
pub mod scanner;

pub use decl::{DeclError, TypeDecl, declare_types};
pub use parser::{ParseError, TypeParser, parse_method, parse_type};
pub use scanner::{Scanner, SyntaxKind, Token};
