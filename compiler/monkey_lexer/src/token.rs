//! Token types produced by the lexer.

use std::fmt;

use monkey_ir::Span;

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident(String),
    Int(i64),
    /// Integer literal that does not fit in an `i64`; carries the source text.
    IntOverflow(String),
    String(String),

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    Macro,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    /// Character sequence the lexer does not recognize.
    Illegal(String),
    Eof,
}

impl TokenKind {
    /// Token class name used in parser diagnostics.
    ///
    /// Punctuation reports its own symbol; literal and keyword classes
    /// report an upper-case class name (`IDENT`, `INT`, `FUNCTION`, ...).
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "IDENT",
            TokenKind::Int(_) | TokenKind::IntOverflow(_) => "INT",
            TokenKind::String(_) => "STRING",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::Macro => "MACRO",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Illegal(_) => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }

    /// Whether two kinds are the same variant, ignoring payloads.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
