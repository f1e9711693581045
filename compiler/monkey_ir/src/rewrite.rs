//! Bottom-up tree rewriting.
//!
//! `modify_*` rebuilds a tree, rewriting children before their parent and
//! handing every expression node to the callback once its children are done.
//! Statements and blocks are walked structurally; only expressions are offered
//! to the callback.
//!
//! Used by `quote` (substituting `unquote(...)` calls) and by macro expansion
//! (replacing macro calls with their expansion).

use std::sync::Arc;

use crate::ast::{BlockStatement, Expr, FunctionLiteral, Program, Statement};

/// Rewrite every expression in `program`.
pub fn modify_program<F>(program: Program, f: &mut F) -> Program
where
    F: FnMut(Expr) -> Expr,
{
    Program {
        statements: modify_statements(program.statements, f),
    }
}

/// Rewrite every expression in `block`.
pub fn modify_block<F>(block: BlockStatement, f: &mut F) -> BlockStatement
where
    F: FnMut(Expr) -> Expr,
{
    BlockStatement {
        statements: modify_statements(block.statements, f),
    }
}

fn modify_statements<F>(statements: Vec<Statement>, f: &mut F) -> Vec<Statement>
where
    F: FnMut(Expr) -> Expr,
{
    statements
        .into_iter()
        .map(|statement| modify_statement(statement, f))
        .collect()
}

fn modify_statement<F>(statement: Statement, f: &mut F) -> Statement
where
    F: FnMut(Expr) -> Expr,
{
    match statement {
        Statement::Let { name, value } => Statement::Let {
            name,
            value: modify_expr(value, f),
        },
        Statement::Return(value) => Statement::Return(modify_expr(value, f)),
        Statement::Expression(expr) => Statement::Expression(modify_expr(expr, f)),
    }
}

fn modify_literal<F>(literal: Arc<FunctionLiteral>, f: &mut F) -> Arc<FunctionLiteral>
where
    F: FnMut(Expr) -> Expr,
{
    let FunctionLiteral { parameters, body } = Arc::unwrap_or_clone(literal);
    Arc::new(FunctionLiteral {
        parameters,
        body: modify_block(body, f),
    })
}

fn modify_boxed<F>(expr: Box<Expr>, f: &mut F) -> Box<Expr>
where
    F: FnMut(Expr) -> Expr,
{
    Box::new(modify_expr(*expr, f))
}

/// Rewrite `expr` and all of its sub-expressions.
pub fn modify_expr<F>(expr: Expr, f: &mut F) -> Expr
where
    F: FnMut(Expr) -> Expr,
{
    let rebuilt = match expr {
        Expr::Identifier(_) | Expr::Integer(_) | Expr::Boolean(_) | Expr::String(_) => expr,
        Expr::Prefix { op, right } => Expr::Prefix {
            op,
            right: modify_boxed(right, f),
        },
        Expr::Infix { op, left, right } => {
            let left = modify_boxed(left, f);
            let right = modify_boxed(right, f);
            Expr::Infix { op, left, right }
        }
        Expr::If {
            condition,
            consequence,
            alternative,
        } => Expr::If {
            condition: modify_boxed(condition, f),
            consequence: modify_block(consequence, f),
            alternative: alternative.map(|block| modify_block(block, f)),
        },
        Expr::Function(literal) => Expr::Function(modify_literal(literal, f)),
        Expr::Macro(literal) => Expr::Macro(modify_literal(literal, f)),
        Expr::Call {
            function,
            arguments,
        } => {
            let function = modify_boxed(function, f);
            let arguments = arguments
                .into_iter()
                .map(|argument| modify_expr(argument, f))
                .collect();
            Expr::Call {
                function,
                arguments,
            }
        }
        Expr::Array(elements) => Expr::Array(
            elements
                .into_iter()
                .map(|element| modify_expr(element, f))
                .collect(),
        ),
        Expr::Index { left, index } => {
            let left = modify_boxed(left, f);
            let index = modify_boxed(index, f);
            Expr::Index { left, index }
        }
        Expr::Hash(pairs) => Expr::Hash(
            pairs
                .into_iter()
                .map(|(key, value)| {
                    let key = modify_expr(key, f);
                    let value = modify_expr(value, f);
                    (key, value)
                })
                .collect(),
        ),
    };
    f(rebuilt)
}
