//! Read-eval-print loop.

use std::io::{self, BufRead, Write};

use crate::{render_parse_errors, CliError, Session};

pub const PROMPT: &str = ">> ";

/// Printed above parse errors.
pub const BANNER: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
Woops! We ran into some monkey business here!
"#;

/// Run the loop until `input` is exhausted.
///
/// Each line is evaluated in `session` and its result written to `output`.
/// `puts` output goes to the session's print handler, not to `output`.
pub fn repl<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    session: &mut Session,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match session.eval_source(&line?) {
            Ok(Some(value)) => writeln!(output, "{}", value.inspect())?,
            Ok(None) => {}
            Err(CliError::Parse(errors)) => {
                output.write_all(BANNER.as_bytes())?;
                output.write_all(render_parse_errors(&errors).as_bytes())?;
            }
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}
