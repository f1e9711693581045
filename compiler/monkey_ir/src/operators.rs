//! Prefix and infix operator definitions.

use std::fmt;

/// Prefix (unary) operators: `!x`, `-x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Not,
    Neg,
}

impl PrefixOp {
    /// Source symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            PrefixOp::Not => "!",
            PrefixOp::Neg => "-",
        }
    }
}

/// Infix (binary) operators.
///
/// There are no short-circuiting boolean operators in the language; both
/// operands of every infix expression are always evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOp {
    /// Source symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }

    /// Whether this operator yields a Boolean on integer operands.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            InfixOp::Lt | InfixOp::Gt | InfixOp::Eq | InfixOp::NotEq
        )
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
