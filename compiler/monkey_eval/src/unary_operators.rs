//! Prefix operator evaluation.

use monkey_ir::PrefixOp;

use crate::errors::unknown_prefix_operator;
use crate::value::Value;

/// Apply a prefix operator to an already evaluated, non-error operand.
pub fn evaluate_prefix(op: PrefixOp, right: &Value) -> Value {
    match op {
        PrefixOp::Not => Value::Boolean(!right.is_truthy()),
        PrefixOp::Neg => match right {
            Value::Integer(n) => Value::Integer(n.wrapping_neg()),
            _ => unknown_prefix_operator(op, right),
        },
    }
}
