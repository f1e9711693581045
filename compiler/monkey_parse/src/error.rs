//! Parse error types.

use monkey_ir::Span;
use thiserror::Error;

/// A single parse error.
///
/// The `Display` text is what the REPL prints (tab-indented) and what the
/// `eval` builtin folds into its error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The parser required a specific token next and saw another.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    /// No expression can start with this token.
    #[error("no prefix parse function for {token} found")]
    NoPrefixParse { token: &'static str, span: Span },
    /// Integer literal out of `i64` range.
    #[error("could not parse {literal} as integer")]
    InvalidInteger { literal: String, span: Span },
}

impl ParseError {
    /// Source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixParse { span, .. }
            | ParseError::InvalidInteger { span, .. } => *span,
        }
    }
}
