//! `eval`, `launch` and `await`.
//!
//! Unlike general builtins these see the caller's environment and the
//! thread registry. Each takes exactly one argument.

use std::thread;

use monkey_parse::parse;
use tracing::{debug, warn};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{
    await_requires_thread, eval_parse_error, eval_requires_string, launch_failed,
    launch_requires_function, thread_not_found, wrong_arg_count,
};
use crate::value::{Intrinsic, Value};

impl Interpreter {
    pub(super) fn call_intrinsic(
        &mut self,
        intrinsic: Intrinsic,
        args: Vec<Value>,
        env: &Environment,
    ) -> Value {
        let arg = match <[Value; 1]>::try_from(args) {
            Ok([arg]) => arg,
            Err(args) => return wrong_arg_count(args.len(), 1),
        };
        match intrinsic {
            Intrinsic::Eval => self.eval_source(&arg, env),
            Intrinsic::Launch => self.launch(&arg, env),
            Intrinsic::Await => self.await_task(&arg),
        }
    }

    /// Parse a string and evaluate it in a scope enclosing the caller's.
    fn eval_source(&mut self, arg: &Value, env: &Environment) -> Value {
        let Some(source) = arg.as_str() else {
            return eval_requires_string(arg);
        };
        match parse(source).into_result() {
            Ok(program) => self.eval_program(&program, &Environment::new_enclosed(env)),
            Err(errors) => eval_parse_error(&errors),
        }
    }

    /// Start the function's body on a new thread in a scope enclosing the
    /// caller's environment, and return its handle without waiting.
    ///
    /// Parameters are not bound; the body sees the caller's names.
    fn launch(&mut self, arg: &Value, env: &Environment) -> Value {
        let Value::Function(func) = arg else {
            return launch_requires_function(arg);
        };

        let func = func.clone();
        let scope = Environment::new_enclosed(env);
        let (id, sender) = self.registry.register();
        let mut task = self.child();

        let spawned = thread::Builder::new()
            .name(format!("monkey-task-{id}"))
            .spawn(move || {
                let result = task.eval_block(func.body(), &scope).unwrap_return();
                debug!(thread_id = id.raw(), "task completed");
                if sender.send(result).is_err() {
                    warn!(thread_id = id.raw(), "task result dropped");
                }
            });

        match spawned {
            Ok(_) => {
                debug!(thread_id = id.raw(), "task launched");
                Value::ThreadHandle(id)
            }
            Err(err) => {
                warn!(thread_id = id.raw(), error = %err, "failed to spawn task thread");
                launch_failed(&err)
            }
        }
    }

    /// Block until the task finishes and return its result.
    fn await_task(&self, arg: &Value) -> Value {
        let Value::ThreadHandle(id) = arg else {
            return await_requires_thread(arg);
        };
        let Some(task) = self.registry.lookup(*id) else {
            return thread_not_found(*id);
        };
        debug!(thread_id = id.raw(), "awaiting task");
        task.join()
    }

    /// Interpreter for a launched task: same registry, output and limit,
    /// fresh call depth.
    fn child(&self) -> Interpreter {
        Interpreter {
            registry: self.registry.clone(),
            print_handler: self.print_handler.clone(),
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}
