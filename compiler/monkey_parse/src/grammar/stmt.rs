//! Statement productions.

use monkey_ir::{BlockStatement, Statement};
use monkey_lexer::TokenKind;

use super::expr::Precedence;
use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <ident> = <expr>;`
    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(&TokenKind::Ident(String::new())) {
            return None;
        }
        let name = self.current_identifier()?;

        if !self.expect_peek(&TokenKind::Assign) {
            return None;
        }
        self.cursor.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Let { name, value })
    }

    /// `return <expr>;`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.cursor.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Expression(expr))
    }

    /// `{ <statements> }` with the cursor on `{`. Leaves the cursor on `}`.
    pub(crate) fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        self.cursor.advance();
        let mut statements = Vec::new();

        while !self.cursor.current_is(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                self.errors.push(ParseError::UnexpectedToken {
                    expected: TokenKind::RBrace.describe(),
                    found: TokenKind::Eof.describe(),
                    span: self.current_span(),
                });
                return None;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.cursor.advance();
        }

        Some(BlockStatement::new(statements))
    }

    /// Name of the identifier under the cursor.
    pub(crate) fn current_identifier(&self) -> Option<String> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(name.clone()),
            _ => None,
        }
    }
}
