//! State that persists across REPL lines.

use monkey_eval::{define_macros, expand_macros, Environment, Interpreter, Value};
use monkey_parse::parse;
use tracing::debug;

use crate::CliError;

/// One interpreter with its global and macro environments.
pub struct Session {
    interp: Interpreter,
    env: Environment,
    macro_env: Environment,
}

impl Session {
    pub fn new(interp: Interpreter) -> Self {
        Session {
            interp,
            env: Environment::new(),
            macro_env: Environment::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interp
    }

    /// Parse `source`, define and expand its macros, then evaluate it.
    ///
    /// Returns `None` when no statements remain after macro definitions are
    /// removed. Runtime failures come back as `Some(Value::Error(..))`.
    pub fn eval_source(&mut self, source: &str) -> Result<Option<Value>, CliError> {
        let mut program = parse(source).into_result().map_err(CliError::Parse)?;
        define_macros(&mut program, &self.macro_env);
        let program = expand_macros(program, &self.macro_env, &mut self.interp)?;
        if program.statements.is_empty() {
            return Ok(None);
        }
        debug!(statements = program.statements.len(), "evaluating program");
        Ok(Some(self.interp.eval_program(&program, &self.env)))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Interpreter::new())
    }
}
