//! Expression productions.
//!
//! Pratt parsing: every token kind that can start an expression has a prefix
//! rule, and every operator token has a binding precedence used by the infix
//! loop in `parse_expression`.

use monkey_ir::{BlockStatement, Expr, InfixOp, PrefixOp};
use monkey_lexer::TokenKind;
use monkey_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Binding power of infix operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_op(kind: &TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Asterisk => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Lt => InfixOp::Lt,
        TokenKind::Gt => InfixOp::Gt,
        TokenKind::Eq => InfixOp::Eq,
        TokenKind::NotEq => InfixOp::NotEq,
        _ => return None,
    };
    Some(op)
}

impl Parser {
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            while !self.cursor.peek_is(&TokenKind::Semicolon)
                && precedence < precedence_of(&self.cursor.peek().kind)
            {
                self.cursor.advance();
                left = self.parse_infix(left)?;
            }
            Some(left)
        })
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let span = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Ident(name) => Some(Expr::Identifier(name)),
            TokenKind::Int(value) => Some(Expr::Integer(value)),
            TokenKind::IntOverflow(literal) => {
                self.errors
                    .push(ParseError::InvalidInteger { literal, span });
                None
            }
            TokenKind::String(value) => Some(Expr::String(value)),
            TokenKind::True => Some(Expr::Boolean(true)),
            TokenKind::False => Some(Expr::Boolean(false)),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOp::Neg),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => {
                let (parameters, body) = self.parse_function_parts()?;
                Some(Expr::function(parameters, body))
            }
            TokenKind::Macro => {
                let (parameters, body) = self.parse_function_parts()?;
                Some(Expr::macro_literal(parameters, body))
            }
            TokenKind::LBracket => self
                .parse_expression_list(&TokenKind::RBracket)
                .map(Expr::Array),
            TokenKind::LBrace => self.parse_hash_literal(),
            other => {
                self.errors.push(ParseError::NoPrefixParse {
                    token: other.describe(),
                    span,
                });
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        if self.cursor.current_is(&TokenKind::LParen) {
            let arguments = self.parse_expression_list(&TokenKind::RParen)?;
            return Some(Expr::call(left, arguments));
        }
        if self.cursor.current_is(&TokenKind::LBracket) {
            return self.parse_index_expression(left);
        }

        let kind = self.current_kind();
        let op = infix_op(kind)?;
        let precedence = precedence_of(kind);
        self.cursor.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expr::infix(op, left, right))
    }

    fn parse_prefix_expression(&mut self, op: PrefixOp) -> Option<Expr> {
        self.cursor.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix {
            op,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.cursor.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    /// `if (<cond>) { ... } else { ... }`
    fn parse_if_expression(&mut self) -> Option<Expr> {
        if !self.expect_peek(&TokenKind::LParen) {
            return None;
        }
        self.cursor.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(&TokenKind::RParen) || !self.expect_peek(&TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement()?;

        let alternative = if self.cursor.peek_is(&TokenKind::Else) {
            self.cursor.advance();
            if !self.expect_peek(&TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    /// `(<params>) { <body> }` following `fn` or `macro`.
    fn parse_function_parts(&mut self) -> Option<(Vec<String>, BlockStatement)> {
        if !self.expect_peek(&TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(&TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement()?;
        Some((parameters, body))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let ident = TokenKind::Ident(String::new());
        let mut parameters = Vec::new();

        if self.cursor.peek_is(&TokenKind::RParen) {
            self.cursor.advance();
            return Some(parameters);
        }

        if !self.expect_peek(&ident) {
            return None;
        }
        parameters.push(self.current_identifier()?);

        while self.cursor.peek_is(&TokenKind::Comma) {
            self.cursor.advance();
            if !self.expect_peek(&ident) {
                return None;
            }
            parameters.push(self.current_identifier()?);
        }

        if !self.expect_peek(&TokenKind::RParen) {
            return None;
        }
        Some(parameters)
    }

    /// Comma-separated expressions up to `end`, with the cursor on the opener.
    fn parse_expression_list(&mut self, end: &TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.cursor.peek_is(end) {
            self.cursor.advance();
            return Some(list);
        }

        self.cursor.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.cursor.peek_is(&TokenKind::Comma) {
            self.cursor.advance();
            self.cursor.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        self.cursor.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::RBracket) {
            return None;
        }
        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    /// `{<key>: <value>, ...}`
    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let mut pairs = Vec::new();

        while !self.cursor.peek_is(&TokenKind::RBrace) {
            self.cursor.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(&TokenKind::Colon) {
                return None;
            }
            self.cursor.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.cursor.peek_is(&TokenKind::RBrace) && !self.expect_peek(&TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(&TokenKind::RBrace) {
            return None;
        }
        Some(Expr::Hash(pairs))
    }
}
