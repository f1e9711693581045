//! Tree-walking interpreter.
//!
//! Evaluation never fails in the host sense: every language error is a
//! [`Value::Error`] that each composite evaluation checks for immediately
//! and returns unchanged, so the first error wins.
//!
//! `return` produces a [`Value::Return`] wrapper that is handled the same
//! way: it stops every enclosing expression and statement sequence, so it is
//! never bound, stored or used as an operand. Function calls and programs
//! strip it.

mod builder;
mod function_call;
mod intrinsics;

use std::collections::BTreeMap;

use monkey_ir::{BlockStatement, Expr, Program, Statement};
use monkey_stack::ensure_sufficient_stack;

use crate::builtins::lookup_builtin;
use crate::environment::Environment;
use crate::errors::{identifier_not_found, index_not_supported, unusable_as_hash_key};
use crate::operators::evaluate_infix;
use crate::print_handler::SharedPrintHandler;
use crate::quote::quote;
use crate::thread_registry::ThreadRegistry;
use crate::unary_operators::evaluate_prefix;
use crate::value::{Intrinsic, Value};

pub use builder::InterpreterBuilder;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Evaluator state: the shared task registry, the `puts` destination and
/// the call-depth accounting for this thread of evaluation.
///
/// Each launched task runs on its own interpreter that shares the registry
/// and print handler but starts at call depth zero.
pub struct Interpreter {
    registry: ThreadRegistry,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// Interpreter with a fresh registry, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn registry(&self) -> &ThreadRegistry {
        &self.registry
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Evaluate a program's statements in order.
    ///
    /// Stops at the first error or `return`; a returned value is unwrapped.
    /// An empty program evaluates to `null`.
    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> Value {
        self.eval_statements(&program.statements, env).unwrap_return()
    }

    /// Evaluate a block, passing a `return` wrapper through to the caller.
    pub(crate) fn eval_block(&mut self, block: &BlockStatement, env: &Environment) -> Value {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statements(&mut self, statements: &[Statement], env: &Environment) -> Value {
        let mut result = Value::Null;
        for statement in statements {
            result = self.eval_statement(statement, env);
            if matches!(result, Value::Return(_) | Value::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_statement(&mut self, statement: &Statement, env: &Environment) -> Value {
        match statement {
            Statement::Let { name, value } => {
                let value = self.eval_expr(value, env);
                if value.is_return_or_error() {
                    return value;
                }
                env.set(name.as_str(), value)
            }
            Statement::Return(value) => {
                let value = self.eval_expr(value, env);
                if value.is_return_or_error() {
                    return value;
                }
                Value::return_value(value)
            }
            Statement::Expression(expr) => self.eval_expr(expr, env),
        }
    }

    /// Evaluate one expression.
    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> Value {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> Value {
        match expr {
            Expr::Identifier(name) => eval_identifier(name, env),
            Expr::Integer(n) => Value::Integer(*n),
            Expr::Boolean(b) => Value::Boolean(*b),
            Expr::String(s) => Value::string(s.as_str()),
            Expr::Prefix { op, right } => {
                let right = self.eval_expr(right, env);
                if right.is_return_or_error() {
                    return right;
                }
                evaluate_prefix(*op, &right)
            }
            Expr::Infix { op, left, right } => {
                let left = self.eval_expr(left, env);
                if left.is_return_or_error() {
                    return left;
                }
                let right = self.eval_expr(right, env);
                if right.is_return_or_error() {
                    return right;
                }
                evaluate_infix(*op, &left, &right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expr(condition, env);
                if condition.is_return_or_error() {
                    return condition;
                }
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Value::Null
                }
            }
            Expr::Function(literal) => Value::function(literal.clone(), env.clone()),
            Expr::Macro(literal) => Value::macro_value(literal.clone(), env.clone()),
            Expr::Call {
                function,
                arguments,
            } => {
                if function.as_identifier() == Some("quote") {
                    return quote(self, arguments, env);
                }
                let callee = self.eval_expr(function, env);
                if callee.is_return_or_error() {
                    return callee;
                }
                match self.eval_expressions(arguments, env) {
                    Ok(args) => self.apply(callee, args, env),
                    Err(err) => err,
                }
            }
            Expr::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Value::array(elements),
                Err(err) => err,
            },
            Expr::Index { left, index } => {
                let left = self.eval_expr(left, env);
                if left.is_return_or_error() {
                    return left;
                }
                let index = self.eval_expr(index, env);
                if index.is_return_or_error() {
                    return index;
                }
                eval_index(&left, &index)
            }
            Expr::Hash(pairs) => self.eval_hash_literal(pairs, env),
        }
    }

    /// Evaluate expressions left to right, stopping at the first error or
    /// `return` wrapper.
    fn eval_expressions(&mut self, exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let value = self.eval_expr(expr, env);
            if value.is_return_or_error() {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Keys then values, in source order. Later duplicates overwrite.
    fn eval_hash_literal(&mut self, pairs: &[(Expr, Expr)], env: &Environment) -> Value {
        let mut entries = BTreeMap::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env);
            if key.is_return_or_error() {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return unusable_as_hash_key(&key);
            };
            let value = self.eval_expr(value_expr, env);
            if value.is_return_or_error() {
                return value;
            }
            entries.insert(hash_key, value);
        }
        Value::hash(entries)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Intrinsics first, so `eval`, `launch` and `await` cannot be shadowed;
/// then the environment chain; then the general builtin table.
fn eval_identifier(name: &str, env: &Environment) -> Value {
    if let Some(intrinsic) = Intrinsic::from_name(name) {
        return Value::Intrinsic(intrinsic);
    }
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = lookup_builtin(name) {
        return Value::Builtin(builtin);
    }
    identifier_not_found(name)
}

/// Out-of-range array indices and missing hash keys yield `null`.
fn eval_index(left: &Value, index: &Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Value::Null),
        (Value::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs.get(&key).cloned().unwrap_or(Value::Null),
            None => unusable_as_hash_key(index),
        },
        _ => index_not_supported(left),
    }
}

#[cfg(test)]
mod tests;
