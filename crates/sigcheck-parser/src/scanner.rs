//! Tokenizer for type expressions.

use sigcheck_common::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Identifier,
    FuncKeyword,
    MapKeyword,
    InterfaceKeyword,
    StructKeyword,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    AsteriskToken,
    CommaToken,
    SemicolonToken,
    DotDotDotToken,
    EndOfFileToken,
    Unknown,
}

impl SyntaxKind {
    /// Description used in "expected ..., found ..." messages.
    pub const fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::FuncKeyword => "`func`",
            SyntaxKind::MapKeyword => "`map`",
            SyntaxKind::InterfaceKeyword => "`interface`",
            SyntaxKind::StructKeyword => "`struct`",
            SyntaxKind::OpenParenToken => "`(`",
            SyntaxKind::CloseParenToken => "`)`",
            SyntaxKind::OpenBracketToken => "`[`",
            SyntaxKind::CloseBracketToken => "`]`",
            SyntaxKind::OpenBraceToken => "`{`",
            SyntaxKind::CloseBraceToken => "`}`",
            SyntaxKind::AsteriskToken => "`*`",
            SyntaxKind::CommaToken => "`,`",
            SyntaxKind::SemicolonToken => "`;`",
            SyntaxKind::DotDotDotToken => "`...`",
            SyntaxKind::EndOfFileToken => "end of input",
            SyntaxKind::Unknown => "unknown character",
        }
    }

    /// Tokens that can begin a type expression.
    pub const fn starts_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::FuncKeyword
                | SyntaxKind::MapKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    /// Kind of the last token returned, for newline-as-separator handling.
    last: Option<SyntaxKind>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            last: None,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn token_text(&self, token: Token) -> &'a str {
        token.span.slice(self.text)
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        self.last = Some(token.kind);
        token
    }

    /// A newline after a token that can end a type acts as `;`, so
    /// interface and struct members may be written one per line.
    fn ends_member(&self) -> bool {
        matches!(
            self.last,
            Some(
                SyntaxKind::Identifier
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
            )
        )
    }

    fn scan(&mut self) -> Token {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' && self.ends_member() {
                let start = self.pos;
                self.pos += 1;
                return Token {
                    kind: SyntaxKind::SemicolonToken,
                    span: self.span_from(start),
                };
            }
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }

        let start = self.pos;
        let Some(ch) = self.peek_char() else {
            return Token {
                kind: SyntaxKind::EndOfFileToken,
                span: Span::at(start as u32),
            };
        };
        self.pos += ch.len_utf8();

        let kind = match ch {
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '*' => SyntaxKind::AsteriskToken,
            ',' => SyntaxKind::CommaToken,
            ';' => SyntaxKind::SemicolonToken,
            '.' => {
                if self.text[self.pos..].starts_with("..") {
                    self.pos += 2;
                    SyntaxKind::DotDotDotToken
                } else {
                    SyntaxKind::Unknown
                }
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_rest();
                keyword_kind(&self.text[start..self.pos])
            }
            _ => SyntaxKind::Unknown,
        };

        Token {
            kind,
            span: self.span_from(start),
        }
    }

    /// Identifiers may be package-qualified (`io.Reader`).
    fn scan_identifier_rest(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_identifier_part(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '.'
                && self.text[self.pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(is_identifier_start)
            {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn keyword_kind(text: &str) -> SyntaxKind {
    match text {
        "func" => SyntaxKind::FuncKeyword,
        "map" => SyntaxKind::MapKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "struct" => SyntaxKind::StructKeyword,
        _ => SyntaxKind::Identifier,
    }
}

/// Scan the whole text, ending with an `EndOfFileToken`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        tokens.push(token);
        if token.kind == SyntaxKind::EndOfFileToken {
            return tokens;
        }
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
