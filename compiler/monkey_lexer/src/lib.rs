//! Lexer for Monkey using logos.
//!
//! Produces a `Vec<Token>` that always ends with a single `Eof` token.
//! Unrecognized input is not fatal: it becomes an `Illegal` token and the
//! parser turns it into an ordinary parse error.

mod token;

use logos::Logos;
use monkey_ir::Span;

pub use token::{Token, TokenKind};

/// Raw token from logos (before conversion).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // Keywords
    #[token("fn")]
    Function,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("macro")]
    Macro,

    // Operators
    #[token("==")]
    Eq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Delimiters
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Literals
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""[^"]*""#)]
    String,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a token vector.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        let kind = match token_result {
            Ok(raw) => convert_token(raw, slice),
            Err(()) => TokenKind::Illegal(slice.to_string()),
        };
        tokens.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    tokens.push(Token::new(TokenKind::Eof, eof));
    tokens
}

fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Function => TokenKind::Function,
        RawToken::Let => TokenKind::Let,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Return => TokenKind::Return,
        RawToken::Macro => TokenKind::Macro,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Int => match slice.parse::<i64>() {
            Ok(value) => TokenKind::Int(value),
            Err(_) => TokenKind::IntOverflow(slice.to_string()),
        },
        // Regex guarantees the surrounding quotes.
        RawToken::String => TokenKind::String(slice[1..slice.len() - 1].to_string()),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
    }
}
