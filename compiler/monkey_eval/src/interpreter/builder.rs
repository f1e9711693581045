//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::thread_registry::ThreadRegistry;

/// Builder for [`Interpreter`].
///
/// Unset options default to: stdout printing, a fresh thread registry and a
/// call-depth limit of [`DEFAULT_MAX_CALL_DEPTH`].
#[derive(Default)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    registry: Option<ThreadRegistry>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `puts` writes. Launched tasks inherit it.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Share an existing registry, e.g. one that outlives several
    /// interpreters in a REPL session.
    #[must_use]
    pub fn registry(mut self, registry: ThreadRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Limit on nested user-function calls before evaluation fails with a
    /// stack overflow error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            registry: self.registry.unwrap_or_default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH),
            call_depth: 0,
        }
    }
}
