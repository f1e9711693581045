//! Callable value payloads: closures, native builtins and intrinsics.

use std::fmt;
use std::sync::Arc;

use monkey_ir::{BlockStatement, FunctionLiteral};

use super::Value;
use crate::environment::Environment;
use crate::print_handler::PrintHandlerImpl;

/// A closure: a function or macro literal plus the environment it was
/// defined in.
///
/// The literal is shared with the syntax tree, and the environment is
/// shared with every other closure created in the same scope.
#[derive(Clone)]
pub struct FunctionValue {
    literal: Arc<FunctionLiteral>,
    env: Environment,
}

impl FunctionValue {
    pub fn new(literal: Arc<FunctionLiteral>, env: Environment) -> Self {
        FunctionValue { literal, env }
    }

    #[inline]
    pub fn parameters(&self) -> &[String] {
        &self.literal.parameters
    }

    #[inline]
    pub fn body(&self) -> &BlockStatement {
        &self.literal.body
    }

    /// The captured (defining) environment.
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// `(x, y) {\n<body>\n}`, shared by the function and macro renderings.
    pub(super) fn fmt_signature_and_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {{\n{}\n}}", self.parameters().join(", "), self.body())
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("parameters", &self.literal.parameters)
            .finish_non_exhaustive()
    }
}

/// Native implementation of a general builtin.
///
/// Receives the evaluated arguments and the interpreter's print handler
/// (only `puts` writes to it).
pub type BuiltinFn = fn(&[Value], &PrintHandlerImpl) -> Value;

/// Entry of the general builtin table.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    #[inline]
    pub fn call(&self, args: &[Value], out: &PrintHandlerImpl) -> Value {
        (self.func)(args, out)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// Pseudo-builtins that need the evaluator itself (caller environment,
/// thread registry), resolved before any environment lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    /// `eval(source)`
    Eval,
    /// `launch(fn)`
    Launch,
    /// `await(handle)`
    Await,
}

impl Intrinsic {
    /// The intrinsic reserved under `name`, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eval" => Some(Intrinsic::Eval),
            "launch" => Some(Intrinsic::Launch),
            "await" => Some(Intrinsic::Await),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Eval => "eval",
            Intrinsic::Launch => "launch",
            Intrinsic::Await => "await",
        }
    }
}
