//! `quote` / `unquote`.
//!
//! `quote(expr)` is intercepted by name before its callee is evaluated and
//! yields the argument as unevaluated syntax. Inside it, every
//! `unquote(e)` call is replaced by the syntax of `e`'s value, evaluated
//! in the current environment. Values with no literal syntax (arrays,
//! functions, ...) leave the `unquote` call as it was; an error aborts
//! the whole quote.

use monkey_ir::{modify_expr, Expr};

use crate::environment::Environment;
use crate::errors::wrong_arg_count;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Evaluate a `quote(...)` call given its argument expressions.
pub(crate) fn quote(interp: &mut Interpreter, arguments: &[Expr], env: &Environment) -> Value {
    let Some(node) = arguments.first() else {
        return wrong_arg_count(0, 1);
    };
    match eval_unquote_calls(interp, node.clone(), env) {
        Ok(node) => Value::quote(node),
        Err(err) => err,
    }
}

/// Substitute every `unquote(..)` inside `node`.
///
/// The first `unquote` argument that evaluates to an error aborts the
/// quote with that error; later `unquote` calls are not evaluated.
fn eval_unquote_calls(
    interp: &mut Interpreter,
    node: Expr,
    env: &Environment,
) -> Result<Expr, Value> {
    let mut failure = None;
    let node = modify_expr(node, &mut |expr: Expr| {
        if failure.is_some() {
            return expr;
        }
        let Some(argument) = unquote_argument(&expr) else {
            return expr;
        };
        let value = interp.eval_expr(argument, env).unwrap_return();
        if value.is_error() {
            failure = Some(value);
            return expr;
        }
        value_to_node(&value).unwrap_or(expr)
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(node),
    }
}

/// The argument of an `unquote(<arg>)` call.
fn unquote_argument(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Call {
            function,
            arguments,
        } if function.as_identifier() == Some("unquote") && arguments.len() == 1 => {
            arguments.first()
        }
        _ => None,
    }
}

/// Literal syntax for a value, if it has one.
pub fn value_to_node(value: &Value) -> Option<Expr> {
    match value {
        Value::Integer(n) => Some(Expr::Integer(*n)),
        Value::Boolean(b) => Some(Expr::Boolean(*b)),
        Value::String(s) => Some(Expr::String(String::clone(s))),
        Value::Quote(node) => Some(Expr::clone(node)),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
