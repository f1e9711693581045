//! Monkey Parse - top-down operator precedence parser.
//!
//! Produces a `Program` plus every error encountered. Parsing does not stop
//! at the first error: a failed statement is dropped and the parser resumes
//! at the next token, so one pass reports as many problems as it can.
//!
//! # Precedence
//!
//! `LOWEST < EQUALS < LESSGREATER < SUM < PRODUCT < PREFIX < CALL < INDEX`

mod cursor;
mod error;
mod grammar;

use cursor::Cursor;
use monkey_ir::{Program, Span};
use monkey_lexer::{lex, Token, TokenKind};

pub use error::ParseError;

/// Output of a parse: the (possibly partial) program and all errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program if parsing was clean, otherwise the errors in source order.
    pub fn into_result(self) -> Result<Program, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }
}

/// Lex and parse `source`.
pub fn parse(source: &str) -> ParseOutput {
    parse_tokens(lex(source))
}

/// Parse an already lexed token stream.
pub fn parse_tokens(tokens: Vec<Token>) -> ParseOutput {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    ParseOutput {
        program,
        errors: parser.errors,
    }
}

/// Parser state.
struct Parser {
    cursor: Cursor,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.cursor.advance();
        }
        Program::new(statements)
    }

    // Cursor helpers

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        &self.cursor.current().kind
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current().span
    }

    /// Advance if the next token is `kind`; otherwise record an error.
    fn expect_peek(&mut self, kind: &TokenKind) -> bool {
        if self.cursor.peek_is(kind) {
            self.cursor.advance();
            true
        } else {
            let peek = self.cursor.peek();
            self.errors.push(ParseError::UnexpectedToken {
                expected: kind.describe(),
                found: peek.kind.describe(),
                span: peek.span,
            });
            false
        }
    }

    /// Consume an optional trailing `;`.
    fn skip_optional_semicolon(&mut self) {
        if self.cursor.peek_is(&TokenKind::Semicolon) {
            self.cursor.advance();
        }
    }
}
