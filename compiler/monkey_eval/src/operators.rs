//! Infix operator evaluation.
//!
//! Dispatch is on the operand type pair. Integers and strings get their own
//! operator tables; any other pair of the same type supports only `==` and
//! `!=`, which compare by identity. Operands of different types are a type
//! mismatch regardless of the operator.

use monkey_ir::InfixOp;

use crate::errors::{division_by_zero, type_mismatch, unknown_infix_operator};
use crate::value::Value;

/// Apply an infix operator to two already evaluated, non-error operands.
pub fn evaluate_infix(op: InfixOp, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(op, *a, *b),
        (Value::String(a), Value::String(b)) => eval_string_infix(op, a, b, left, right),
        _ if left.type_name() != right.type_name() => type_mismatch(left, op, right),
        _ => match op {
            InfixOp::Eq => Value::Boolean(left.identical(right)),
            InfixOp::NotEq => Value::Boolean(!left.identical(right)),
            _ => unknown_infix_operator(left, op, right),
        },
    }
}

/// Wrapping 64-bit arithmetic; division truncates toward zero.
fn eval_integer_infix(op: InfixOp, a: i64, b: i64) -> Value {
    match op {
        InfixOp::Add => Value::Integer(a.wrapping_add(b)),
        InfixOp::Sub => Value::Integer(a.wrapping_sub(b)),
        InfixOp::Mul => Value::Integer(a.wrapping_mul(b)),
        InfixOp::Div => {
            if b == 0 {
                division_by_zero()
            } else {
                Value::Integer(a.wrapping_div(b))
            }
        }
        InfixOp::Lt => Value::Boolean(a < b),
        InfixOp::Gt => Value::Boolean(a > b),
        InfixOp::Eq => Value::Boolean(a == b),
        InfixOp::NotEq => Value::Boolean(a != b),
    }
}

fn eval_string_infix(op: InfixOp, a: &str, b: &str, left: &Value, right: &Value) -> Value {
    match op {
        InfixOp::Add => Value::string(format!("{a}{b}")),
        InfixOp::Eq => Value::Boolean(a == b),
        InfixOp::NotEq => Value::Boolean(a != b),
        _ => unknown_infix_operator(left, op, right),
    }
}
