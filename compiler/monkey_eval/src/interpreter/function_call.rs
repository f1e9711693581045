//! Call dispatch and user-function application.

use tracing::trace;

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{not_a_function, stack_overflow, wrong_function_args};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    /// Call `callee` with already evaluated arguments. `env` is the caller's
    /// environment, which the intrinsics need.
    pub(super) fn apply(&mut self, callee: Value, args: Vec<Value>, env: &Environment) -> Value {
        match callee {
            Value::Function(func) => self.call_function(&func, args),
            Value::Builtin(builtin) => builtin.call(&args, &self.print_handler),
            Value::Intrinsic(intrinsic) => self.call_intrinsic(intrinsic, args, env),
            other => not_a_function(&other),
        }
    }

    /// Bind parameters positionally in a scope enclosing the closure's
    /// environment, run the body and strip any `return` wrapper.
    ///
    /// Surplus arguments are ignored; missing ones are an error.
    pub(crate) fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> Value {
        let parameters = func.parameters();
        if args.len() < parameters.len() {
            return wrong_function_args(parameters.len(), args.len());
        }
        if self.call_depth >= self.max_call_depth {
            return stack_overflow(self.max_call_depth);
        }

        let scope = Environment::new_enclosed(func.env());
        for (name, arg) in parameters.iter().zip(args) {
            scope.set(name.as_str(), arg);
        }

        trace!(
            params = parameters.len(),
            depth = self.call_depth,
            "apply function"
        );
        self.call_depth += 1;
        let result = self.eval_block(func.body(), &scope);
        self.call_depth -= 1;
        result.unwrap_return()
    }
}
