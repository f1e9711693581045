//! Centralized error constructors for the evaluator.
//!
//! Every language-level error is a [`Value::Error`] built by one of these
//! functions, so message wording lives in one place.

use std::io;

use monkey_ir::{InfixOp, PrefixOp};
use monkey_parse::ParseError;

use crate::thread_registry::ThreadId;
use crate::value::Value;

// Operators

pub fn unknown_prefix_operator(op: PrefixOp, right: &Value) -> Value {
    Value::error(format!("unknown operator: {op}{}", right.type_name()))
}

pub fn unknown_infix_operator(left: &Value, op: InfixOp, right: &Value) -> Value {
    Value::error(format!(
        "unknown operator: {} {op} {}",
        left.type_name(),
        right.type_name()
    ))
}

pub fn type_mismatch(left: &Value, op: InfixOp, right: &Value) -> Value {
    Value::error(format!(
        "type mismatch: {} {op} {}",
        left.type_name(),
        right.type_name()
    ))
}

pub fn division_by_zero() -> Value {
    Value::error("division by zero")
}

// Names and calls

pub fn identifier_not_found(name: &str) -> Value {
    Value::error(format!("identifier not found: {name}"))
}

pub fn not_a_function(callee: &Value) -> Value {
    Value::error(format!("not a function: {}", callee.type_name()))
}

/// A user function received fewer arguments than it declares.
pub fn wrong_function_args(want: usize, got: usize) -> Value {
    Value::error(format!("wrong number of arguments: want={want}, got={got}"))
}

/// Arity error for builtins and intrinsics.
pub fn wrong_arg_count(got: usize, want: usize) -> Value {
    Value::error(format!("wrong number of arguments. got={got}, want={want}"))
}

pub fn stack_overflow(limit: usize) -> Value {
    Value::error(format!("stack overflow: maximum call depth {limit} exceeded"))
}

// Indexing

pub fn index_not_supported(left: &Value) -> Value {
    Value::error(format!("index operator not supported: {}", left.type_name()))
}

pub fn unusable_as_hash_key(key: &Value) -> Value {
    Value::error(format!("unusable as hash key: {}", key.type_name()))
}

// Intrinsics

pub fn eval_requires_string(arg: &Value) -> Value {
    Value::error(format!("argument of eval must be STRING. got={}", arg.type_name()))
}

pub fn eval_parse_error(errors: &[ParseError]) -> Value {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Value::error(format!("parse error at eval: {}", messages.join("; ")))
}

pub fn launch_requires_function(arg: &Value) -> Value {
    Value::error(format!(
        "argument for launch must be FUNCTION. got={}",
        arg.type_name()
    ))
}

pub fn launch_failed(err: &io::Error) -> Value {
    Value::error(format!("failed to launch thread: {err}"))
}

pub fn await_requires_thread(arg: &Value) -> Value {
    Value::error(format!(
        "argument for await must be THREAD_HANDLE. got={}",
        arg.type_name()
    ))
}

pub fn thread_not_found(id: ThreadId) -> Value {
    Value::error(format!("thread not found: {id}"))
}

// General builtins

pub fn len_not_supported(arg: &Value) -> Value {
    Value::error(format!("argument to `len` not supported, got {}", arg.type_name()))
}

pub fn requires_array(builtin: &str, arg: &Value) -> Value {
    Value::error(format!(
        "argument to `{builtin}` must be ARRAY, got {}",
        arg.type_name()
    ))
}
