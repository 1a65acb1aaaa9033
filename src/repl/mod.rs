//! Interactive text loop.
//!
//! Each line is parsed into a [`Command`] and dispatched straight to the
//! operations library; there is no expression buffer here.

mod detection;

pub use detection::{Command, detect_command};

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::calculator::{Environment, format_number};
use crate::error::Result;

/// The line-oriented calculator session.
#[derive(Clone, Debug)]
pub struct TextLoop {
    env: Environment,
    precision: usize,
    prompt: Option<String>,
}

impl TextLoop {
    pub fn new(env: Environment, precision: usize) -> Self {
        Self {
            env,
            precision,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Evaluate one line. `Ok(None)` means the user asked to quit.
    pub fn eval_line(&self, line: &str) -> Result<Option<String>> {
        let (op, operands) = match detect_command(line)? {
            Command::Quit => return Ok(None),
            Command::Binary { op, lhs, rhs } => (op, vec![lhs, rhs]),
            Command::Unary { op, arg } => (op, vec![arg]),
        };
        debug!(%op, ?operands, "dispatching command");
        let value = self.env.call(op, &operands)?;
        Ok(Some(format_number(value, self.precision)))
    }

    /// Run until `quit`/`exit` or end of input.
    ///
    /// Calculation errors are printed and the loop continues; only I/O
    /// errors end it early.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(output, "{prompt}")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            match self.eval_line(&line) {
                Ok(Some(result)) => writeln!(output, "= {result}")?,
                Ok(None) => break,
                Err(err) => writeln!(output, "Error: {err}")?,
            }
        }
        Ok(())
    }
}

impl Default for TextLoop {
    fn default() -> Self {
        Self::new(Environment::new(), crate::calculator::DEFAULT_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use pretty_assertions::assert_eq;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        TextLoop::default().run(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_eval_line() {
        let repl = TextLoop::default();
        assert_eq!(repl.eval_line("7 * 8"), Ok(Some("56".to_string())));
        assert_eq!(repl.eval_line("sqrt 2"), Ok(Some("1.414213562".into())));
        assert_eq!(repl.eval_line("exit"), Ok(None));
        assert_eq!(repl.eval_line("1 / 0"), Err(CalcError::DivisionByZero));
        assert!(matches!(
            repl.eval_line("x + 1"),
            Err(CalcError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn test_session_continues_after_errors() {
        let output = session("1 / 0\nhello\nlog 0\n2 pow 10\nquit\n3 + 3\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Error: cannot divide by zero");
        assert!(lines[1].starts_with("Error: invalid syntax"));
        assert!(lines[1].ends_with("got `hello`"));
        let log_error = "Error: cannot calculate logarithm of a non-positive number";
        assert_eq!(lines[2], log_error);
        assert_eq!(lines[3], "= 1024");
    }

    #[test]
    fn test_session_ends_at_end_of_input() {
        assert_eq!(session("2 + 2"), "= 4\n");
        assert_eq!(session(""), "");
    }

    #[test]
    fn test_prompt() {
        let mut output = Vec::new();
        TextLoop::default()
            .with_prompt("> ")
            .run("1 + 1\n".as_bytes(), &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "> = 2\n> ");
    }
}
