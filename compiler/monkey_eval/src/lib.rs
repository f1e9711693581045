//! Monkey Eval - tree-walking evaluator for Monkey programs.
//!
//! # Architecture
//!
//! - [`Value`]: the runtime object model
//! - [`Environment`]: shared, chained scopes implementing closures
//! - [`ThreadRegistry`]: launched tasks and their result channels
//! - [`Interpreter`]: the recursive evaluator, including the `eval`,
//!   `launch` and `await` intrinsics and `quote` interception
//! - `evaluate_infix` / `evaluate_prefix`: operator dispatch
//! - [`define_macros`] / [`expand_macros`]: the macro pass run before
//!   evaluation
//!
//! # Concurrency
//!
//! `launch` runs a function body on its own OS thread against a scope that
//! encloses the caller's, sharing the registry. Values are `Send + Sync`,
//! scopes synchronize their bindings, and the registry is a mutex-guarded
//! table, so tasks never race on shared state.

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod macro_expansion;
mod operators;
mod print_handler;
mod quote;
mod thread_registry;
mod unary_operators;
mod value;

use monkey_ir::Program;

pub use builtins::{builtins, lookup_builtin};
pub use environment::Environment;
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use macro_expansion::{define_macros, expand_macros, ExpansionError};
pub use operators::evaluate_infix;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use quote::value_to_node;
pub use thread_registry::{TaskHandle, ThreadId, ThreadRegistry};
pub use unary_operators::evaluate_prefix;
pub use value::{Builtin, BuiltinFn, FunctionValue, HashKey, HashPairs, Heap, Intrinsic, Value};

/// Evaluate `program` in `env`, launching tasks into `registry`.
///
/// Output of `puts` goes to stdout; use [`InterpreterBuilder`] for other
/// destinations.
pub fn evaluate(program: &Program, env: &Environment, registry: &ThreadRegistry) -> Value {
    InterpreterBuilder::new()
        .registry(registry.clone())
        .build()
        .eval_program(program, env)
}
