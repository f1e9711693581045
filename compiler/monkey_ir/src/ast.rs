//! Syntax tree definitions.
//!
//! The tree is produced by `monkey_parse` already validated for structure,
//! and consumed by the evaluator. Every node renders back to canonical
//! source through `Display`; quoted code is inspected through this rendering.

use std::fmt;
use std::sync::Arc;

use crate::operators::{InfixOp, PrefixOp};

/// A parsed program: a sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }
}

/// Statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: String, value: Expr },
    /// `return <value>;`
    Return(Expr),
    /// A bare expression used as a statement.
    Expression(Expr),
}

/// `{ ... }` body of a function, macro or conditional branch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        BlockStatement { statements }
    }
}

/// Parameter list and body shared by `fn` and `macro` literals.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier: `x`, `len`, `launch`.
    Identifier(String),
    /// Integer literal.
    Integer(i64),
    /// `true` / `false`.
    Boolean(bool),
    /// String literal (no escape sequences).
    String(String),
    /// Prefix operation: `!x`, `-x`.
    Prefix { op: PrefixOp, right: Box<Expr> },
    /// Infix operation: `a + b`.
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `if (<condition>) { ... } else { ... }`
    If {
        condition: Box<Expr>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    /// `fn(<params>) { <body> }`
    Function(Arc<FunctionLiteral>),
    /// `macro(<params>) { <body> }`
    Macro(Arc<FunctionLiteral>),
    /// Call: `f(a, b)`.
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// Array literal: `[1, 2, 3]`.
    Array(Vec<Expr>),
    /// Index access: `arr[0]`, `hash["k"]`.
    Index { left: Box<Expr>, index: Box<Expr> },
    /// Hash literal: `{"a": 1, 2: true}` (pairs in declaration order).
    Hash(Vec<(Expr, Expr)>),
}

impl Expr {
    /// The identifier name if this expression is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Build a function literal expression.
    pub fn function(parameters: Vec<String>, body: BlockStatement) -> Self {
        Expr::Function(Arc::new(FunctionLiteral { parameters, body }))
    }

    /// Build a macro literal expression.
    pub fn macro_literal(parameters: Vec<String>, body: BlockStatement) -> Self {
        Expr::Macro(Arc::new(FunctionLiteral { parameters, body }))
    }

    /// Build a call expression.
    pub fn call(function: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            function: Box::new(function),
            arguments,
        }
    }

    /// Build an infix expression.
    pub fn infix(op: InfixOp, left: Expr, right: Expr) -> Self {
        Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// Source rendering

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return(value) => write!(f, "return {value};"),
            Statement::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_separated(f, &self.parameters)?;
        write!(f, ") {{ {} }}", self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::Integer(value) => write!(f, "{value}"),
            Expr::Boolean(value) => write!(f, "{value}"),
            Expr::String(value) => write!(f, "\"{value}\""),
            Expr::Prefix { op, right } => write!(f, "({op}{right})"),
            Expr::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {{ {consequence} }}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {alternative} }}")?;
                }
                Ok(())
            }
            Expr::Function(literal) => write!(f, "fn{literal}"),
            Expr::Macro(literal) => write!(f, "macro{literal}"),
            Expr::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_separated(f, arguments)?;
                f.write_str(")")
            }
            Expr::Array(elements) => {
                f.write_str("[")?;
                write_separated(f, elements)?;
                f.write_str("]")
            }
            Expr::Index { left, index } => write!(f, "({left}[{index}])"),
            Expr::Hash(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
