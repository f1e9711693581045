//! Monkey driver: the interactive REPL and the file runner behind the
//! `monkey` binary.
//!
//! A [`Session`] owns everything that persists between inputs: the
//! interpreter (and with it the thread registry), the global environment
//! and the macro environment.

mod repl;
mod session;

use std::fmt::Write as _;
use std::io;
use std::sync::Once;

use monkey_eval::{ExpansionError, Value};
use monkey_parse::ParseError;
use thiserror::Error;

pub use repl::{repl, BANNER, PROMPT};
pub use session::Session;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Logging stays off unless `RUST_LOG` is set. Output goes to stderr so it
/// never interleaves with REPL results.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_thread_names(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Failure of a driver operation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", describe_io(path, source))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{}", render_parse_errors(.0))]
    Parse(Vec<ParseError>),
    #[error(transparent)]
    Expansion(#[from] ExpansionError),
    /// The program evaluated to an error value.
    #[error("ERROR: {0}")]
    Runtime(String),
}

fn describe_io(path: &str, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {err}"),
    }
}

/// `parse errors:` followed by one tab-indented message per line.
pub fn render_parse_errors(errors: &[ParseError]) -> String {
    let mut out = String::from("parse errors:\n");
    for error in errors {
        let _ = writeln!(out, "\t{error}");
    }
    out
}

/// Evaluate the file at `path` in `session`.
///
/// An error value produced by the program is reported as
/// [`CliError::Runtime`]. A file with nothing to evaluate yields `null`.
pub fn run_file(path: &str, session: &mut Session) -> Result<Value, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    tracing::debug!(path, bytes = source.len(), "running file");
    match session.eval_source(&source)? {
        Some(Value::Error(message)) => Err(CliError::Runtime(String::clone(&message))),
        Some(value) => Ok(value),
        None => Ok(Value::Null),
    }
}
