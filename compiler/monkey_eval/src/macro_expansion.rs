//! Macro definition and expansion.
//!
//! Runs between parsing and evaluation:
//!
//! 1. [`define_macros`] removes top-level `let name = macro(...) { ... };`
//!    statements and binds them in a dedicated macro environment.
//! 2. [`expand_macros`] replaces every call to a bound macro with the syntax
//!    its body returns. Arguments reach the body unevaluated, as quotes, and
//!    the body must itself return a quote.

use monkey_ir::{modify_program, Expr, Program, Statement};
use thiserror::Error;

use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::value::{FunctionValue, Heap, Value};

/// A macro call that could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("macro `{name}` must return quoted code, got {type_name}")]
    NotQuoted {
        name: String,
        type_name: &'static str,
    },
    #[error("macro `{name}` failed: {message}")]
    Failed { name: String, message: String },
    #[error("macro `{name}` expects {want} arguments, got {got}")]
    WrongArity {
        name: String,
        want: usize,
        got: usize,
    },
}

/// Move top-level macro definitions out of `program` into `env`.
pub fn define_macros(program: &mut Program, env: &Environment) {
    let statements = std::mem::take(&mut program.statements);
    for statement in statements {
        match statement {
            Statement::Let {
                name,
                value: Expr::Macro(literal),
            } => {
                env.set(name, Value::macro_value(literal, env.clone()));
            }
            other => program.statements.push(other),
        }
    }
}

/// Expand every call to a macro bound in `env`.
///
/// Expansion stops at the first failing macro call.
pub fn expand_macros(
    program: Program,
    env: &Environment,
    interp: &mut Interpreter,
) -> Result<Program, ExpansionError> {
    let mut failure = None;
    let expanded = modify_program(program, &mut |expr: Expr| {
        if failure.is_some() {
            return expr;
        }
        let Some((name, arguments, mac)) = macro_call(&expr, env) else {
            return expr;
        };
        match expand_call(interp, name, &mac, arguments) {
            Ok(node) => node,
            Err(err) => {
                failure = Some(err);
                expr
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(expanded),
    }
}

/// Name, arguments and definition of a call to a bound macro.
fn macro_call<'a>(
    expr: &'a Expr,
    env: &Environment,
) -> Option<(&'a str, &'a [Expr], Heap<FunctionValue>)> {
    let Expr::Call {
        function,
        arguments,
    } = expr
    else {
        return None;
    };
    let name = function.as_identifier()?;
    match env.get(name)? {
        Value::Macro(mac) => Some((name, arguments, mac)),
        _ => None,
    }
}

fn expand_call(
    interp: &mut Interpreter,
    name: &str,
    mac: &FunctionValue,
    arguments: &[Expr],
) -> Result<Expr, ExpansionError> {
    let parameters = mac.parameters();
    if arguments.len() < parameters.len() {
        return Err(ExpansionError::WrongArity {
            name: name.to_string(),
            want: parameters.len(),
            got: arguments.len(),
        });
    }

    let scope = Environment::new_enclosed(mac.env());
    for (param, argument) in parameters.iter().zip(arguments) {
        scope.set(param.as_str(), Value::quote(argument.clone()));
    }

    match interp.eval_block(mac.body(), &scope).unwrap_return() {
        Value::Quote(node) => Ok(Expr::clone(&node)),
        Value::Error(message) => Err(ExpansionError::Failed {
            name: name.to_string(),
            message: String::clone(&message),
        }),
        other => Err(ExpansionError::NotQuoted {
            name: name.to_string(),
            type_name: other.type_name(),
        }),
    }
}
