//! Recursive-descent parser for type expressions.
//!
//! ```text
//! type      := IDENT | '*' type | '[' ']' type | 'map' '[' type ']' type
//!            | 'func' signature | 'interface' '{' [ method { ';' method } ] [';'] '}'
//!            | 'struct' '{' [ field { ';' field } ] [';'] '}' | '(' type ')'
//! signature := '(' [ param { ',' param } [','] ] ')' [ result ]
//! param     := [ IDENT ] [ '...' ] type
//! result    := type | '(' [ param { ',' param } ] ')'
//! method    := IDENT signature | IDENT            (embedded interface)
//! field     := IDENT { ',' IDENT } type | IDENT | '*' IDENT
//! ```
//!
//! Identifiers resolve to predeclared types or to named types already
//! declared in the interner.

use crate::scanner::{SyntaxKind, Token, tokenize};
use sigcheck_common::Span;
use sigcheck_common::limits::MAX_TYPE_NESTING;
use sigcheck_types::{
    Field, FunctionShape, MethodSig, TypeDatabase, TypeError, TypeId, TypeInterner,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("undefined type {name} at {span}")]
    UndefinedType { name: String, span: Span },
    #[error("`...` is only allowed on the final parameter (at {span})")]
    MisplacedEllipsis { span: Span },
    #[error("type expression nested too deeply at {span}")]
    TooDeep { span: Span },
    #[error("unexpected trailing input at {span}")]
    TrailingInput { span: Span },
    #[error("{name} is not an interface and cannot be embedded in one (at {span})")]
    NotAnInterface { name: String, span: Span },
    /// A named type used where its body is needed has not been defined yet.
    #[error("{name} is declared but not yet defined (at {span})")]
    PendingType { name: String, span: Span },
    #[error("invalid type at {span}: {error}")]
    InvalidType {
        #[source]
        error: TypeError,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UndefinedType { span, .. }
            | ParseError::MisplacedEllipsis { span }
            | ParseError::TooDeep { span }
            | ParseError::TrailingInput { span }
            | ParseError::NotAnInterface { span, .. }
            | ParseError::PendingType { span, .. }
            | ParseError::InvalidType { span, .. } => *span,
        }
    }
}

/// Parse a complete type expression.
pub fn parse_type(db: &TypeInterner, text: &str) -> Result<TypeId, ParseError> {
    let mut parser = TypeParser::new(db, text);
    let ty = parser.parse_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse a method declaration such as `Name() string`.
pub fn parse_method(db: &TypeInterner, text: &str) -> Result<MethodSig, ParseError> {
    let mut parser = TypeParser::new(db, text);
    let name = parser.expect_identifier()?;
    let shape = parser.parse_signature()?;
    parser.expect_end()?;
    Ok(MethodSig::new(name, db.function(shape)))
}

/// Resolve a predeclared identifier.
pub fn predeclared_type(name: &str) -> Option<TypeId> {
    let id = match name {
        "bool" => TypeId::BOOL,
        "int" => TypeId::INT,
        "int8" => TypeId::INT8,
        "int16" => TypeId::INT16,
        "int32" | "rune" => TypeId::INT32,
        "int64" => TypeId::INT64,
        "uint" => TypeId::UINT,
        "uint8" | "byte" => TypeId::UINT8,
        "uint16" => TypeId::UINT16,
        "uint32" => TypeId::UINT32,
        "uint64" => TypeId::UINT64,
        "uintptr" => TypeId::UINTPTR,
        "float32" => TypeId::FLOAT32,
        "float64" => TypeId::FLOAT64,
        "complex64" => TypeId::COMPLEX64,
        "complex128" => TypeId::COMPLEX128,
        "string" => TypeId::STRING,
        "any" => TypeId::EMPTY_INTERFACE,
        "error" => TypeId::ERROR,
        _ => return None,
    };
    Some(id)
}

pub struct TypeParser<'a> {
    db: &'a TypeInterner,
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
}

impl<'a> TypeParser<'a> {
    pub fn new(db: &'a TypeInterner, text: &'a str) -> Self {
        Self {
            db,
            text,
            tokens: tokenize(text),
            pos: 0,
            depth: 0,
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn current(&self) -> Token {
        // tokenize always ends with EndOfFileToken, and bump never moves past it.
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self, offset: usize) -> Token {
        self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current().kind == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.current();
        if token.kind != SyntaxKind::EndOfFileToken {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn token_text(&self, token: Token) -> &'a str {
        token.span.slice(self.text)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            SyntaxKind::Identifier | SyntaxKind::Unknown => {
                format!("`{}`", self.token_text(token))
            }
            kind => kind.describe().to_string(),
        };
        ParseError::UnexpectedToken {
            expected,
            found,
            span: token.span,
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.expect(SyntaxKind::Identifier)?;
        Ok(self.token_text(token).to_string())
    }

    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_semicolons();
        if self.at(SyntaxKind::EndOfFileToken) {
            Ok(())
        } else {
            Err(ParseError::TrailingInput {
                span: self.current().span,
            })
        }
    }

    /// Members of an interface or struct body are separated by `;` (or a
    /// line break); the last one may run straight into `}`.
    fn expect_member_end(&self) -> Result<(), ParseError> {
        match self.current().kind {
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken => Ok(()),
            _ => Err(self.unexpected("`;` or `}`")),
        }
    }

    fn skip_semicolons(&mut self) {
        while self.eat(SyntaxKind::SemicolonToken) {}
    }

    fn resolve_identifier(&self, token: Token) -> Result<TypeId, ParseError> {
        let name = self.token_text(token);
        predeclared_type(name)
            .or_else(|| self.db.lookup_named(name))
            .ok_or_else(|| ParseError::UndefinedType {
                name: name.to_string(),
                span: token.span,
            })
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn parse_type(&mut self) -> Result<TypeId, ParseError> {
        if self.depth >= MAX_TYPE_NESTING {
            return Err(ParseError::TooDeep {
                span: self.current().span,
            });
        }
        self.depth += 1;
        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeId, ParseError> {
        match self.current().kind {
            SyntaxKind::Identifier => {
                let token = self.bump();
                self.resolve_identifier(token)
            }
            SyntaxKind::AsteriskToken => {
                self.bump();
                let elem = self.parse_type()?;
                Ok(self.db.pointer(elem))
            }
            SyntaxKind::OpenBracketToken => {
                self.bump();
                // Only slices; fixed-length arrays are not modelled.
                self.expect(SyntaxKind::CloseBracketToken)?;
                let elem = self.parse_type()?;
                Ok(self.db.slice(elem))
            }
            SyntaxKind::MapKeyword => {
                self.bump();
                self.expect(SyntaxKind::OpenBracketToken)?;
                let key = self.parse_type()?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                let elem = self.parse_type()?;
                Ok(self.db.map(key, elem))
            }
            SyntaxKind::FuncKeyword => {
                self.bump();
                let shape = self.parse_signature()?;
                Ok(self.db.function(shape))
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface(),
            SyntaxKind::StructKeyword => self.parse_struct(),
            SyntaxKind::OpenParenToken => {
                self.bump();
                let ty = self.parse_type()?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Ok(ty)
            }
            _ => Err(self.unexpected("type")),
        }
    }

    /// `'(' params ')' [result]`
    pub fn parse_signature(&mut self) -> Result<FunctionShape, ParseError> {
        let (params, variadic) = self.parse_parameters(true)?;
        let results = if self.at(SyntaxKind::OpenParenToken) {
            let (results, _) = self.parse_parameters(false)?;
            results
        } else if self.current().kind.starts_type() {
            vec![self.parse_type()?]
        } else {
            Vec::new()
        };
        Ok(FunctionShape::new(params, results, variadic))
    }

    fn parse_parameters(&mut self, allow_variadic: bool) -> Result<(Vec<TypeId>, bool), ParseError> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut params = Vec::new();
        let mut variadic = false;

        while !self.at(SyntaxKind::CloseParenToken) {
            if variadic {
                // Something follows the `...` parameter.
                let span = self.current().span;
                return Err(ParseError::MisplacedEllipsis { span });
            }

            // An identifier followed by the start of a type is a parameter name.
            if self.at(SyntaxKind::Identifier) {
                let next = self.peek(1).kind;
                if next.starts_type() || next == SyntaxKind::DotDotDotToken {
                    self.bump();
                }
            }

            if self.at(SyntaxKind::DotDotDotToken) {
                let ellipsis = self.bump();
                if !allow_variadic {
                    return Err(ParseError::MisplacedEllipsis {
                        span: ellipsis.span,
                    });
                }
                let elem = self.parse_type()?;
                params.push(self.db.slice(elem));
                variadic = true;
            } else {
                params.push(self.parse_type()?);
            }

            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }

        self.expect(SyntaxKind::CloseParenToken)?;
        Ok((params, variadic))
    }

    fn parse_interface(&mut self) -> Result<TypeId, ParseError> {
        let start = self.bump().span;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut methods = Vec::new();

        loop {
            self.skip_semicolons();
            if self.at(SyntaxKind::CloseBraceToken) {
                break;
            }
            let name_token = self.expect(SyntaxKind::Identifier)?;
            let name = self.token_text(name_token);
            if self.at(SyntaxKind::OpenParenToken) {
                let shape = self.parse_signature()?;
                methods.push(MethodSig::new(name, self.db.function(shape)));
            } else {
                // Embedded interface: its methods are flattened in.
                let embedded = self.resolve_identifier(name_token)?;
                if self.db.is_named(self.db.underlying(embedded)) {
                    return Err(ParseError::PendingType {
                        name: name.to_string(),
                        span: name_token.span,
                    });
                }
                let Some(shape) = self.db.interface_shape(embedded) else {
                    return Err(ParseError::NotAnInterface {
                        name: name.to_string(),
                        span: name_token.span,
                    });
                };
                methods.extend(shape.methods);
            }
            self.expect_member_end()?;
        }

        let end = self.expect(SyntaxKind::CloseBraceToken)?.span;
        self.db
            .interface(methods)
            .map_err(|error| ParseError::InvalidType {
                error,
                span: start.merge(end),
            })
    }

    fn parse_struct(&mut self) -> Result<TypeId, ParseError> {
        self.bump();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut fields = Vec::new();

        loop {
            self.skip_semicolons();
            if self.at(SyntaxKind::CloseBraceToken) {
                break;
            }

            if self.eat(SyntaxKind::AsteriskToken) {
                let token = self.expect(SyntaxKind::Identifier)?;
                let base = self.resolve_identifier(token)?;
                fields.push(Field::embedded(
                    embedded_field_name(self.token_text(token)),
                    self.db.pointer(base),
                ));
                self.expect_member_end()?;
                continue;
            }

            let first = self.expect(SyntaxKind::Identifier)?;
            if matches!(
                self.current().kind,
                SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken
            ) {
                let ty = self.resolve_identifier(first)?;
                fields.push(Field::embedded(
                    embedded_field_name(self.token_text(first)),
                    ty,
                ));
                continue;
            }

            let mut names = vec![self.token_text(first).to_string()];
            while self.eat(SyntaxKind::CommaToken) {
                names.push(self.expect_identifier()?);
            }
            let ty = self.parse_type()?;
            fields.extend(names.into_iter().map(|name| Field::new(name, ty)));
            self.expect_member_end()?;
        }

        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.db.struct_type(fields))
    }
}

/// An embedded `io.Reader` is a field named `Reader`.
fn embedded_field_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
