//! Monkey IR - syntax tree types shared by the parser and the evaluator.
//!
//! # Architecture
//!
//! ```text
//! source ──► monkey_lexer ──► monkey_parse ──► Program ──► monkey_eval
//!                                                 │
//!                                                 └──► rewrite::modify (quote, macros)
//! ```
//!
//! Function and macro literals are stored behind `Arc` so that runtime
//! function values can share their parameter list and body with the tree
//! (and with other threads) without copying.

mod ast;
mod operators;
pub mod rewrite;
mod span;

pub use ast::{BlockStatement, Expr, FunctionLiteral, Program, Statement};
pub use operators::{InfixOp, PrefixOp};
pub use rewrite::{modify_block, modify_expr, modify_program};
pub use span::Span;
