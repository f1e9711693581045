//! Token cursor for navigating the token stream.
//!
//! Keeps a current and a one-token lookahead position. The token vector
//! always ends with `Eof`, and the cursor never moves past it.

use monkey_ir::Span;
use monkey_lexer::{Token, TokenKind};

pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor at the first token. An `Eof` token is appended if the
    /// input vector lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = tokens
            .last()
            .map_or(true, |token| !matches!(token.kind, TokenKind::Eof));
        if needs_eof {
            let end = tokens
                .last()
                .map_or(Span::DUMMY, |token| Span::point(token.span.end));
            tokens.push(Token::new(TokenKind::Eof, end));
        }
        Cursor { tokens, pos: 0 }
    }

    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// The current token.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.last_index())]
    }

    /// The token after the current one (`Eof` at the end).
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos.saturating_add(1).min(self.last_index())]
    }

    /// Move to the next token; stays on `Eof`.
    pub fn advance(&mut self) {
        if self.pos < self.last_index() {
            self.pos = self.pos.saturating_add(1);
        }
    }

    pub fn current_is(&self, kind: &TokenKind) -> bool {
        self.current().kind.same_kind(kind)
    }

    pub fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek().kind.same_kind(kind)
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }
}
