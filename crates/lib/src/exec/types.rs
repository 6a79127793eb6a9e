//! Structured command lines and execution errors.

use std::fmt;

use thiserror::Error;

/// Placeholder shown instead of a secret argument.
pub const REDACTED: &str = "****";

/// A single argument of a [`CommandLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
  pub value: String,
  /// Secret arguments are passed to the process but never displayed.
  pub secret: bool,
}

/// An external program invocation: a program and its argument vector.
///
/// Commands are executed directly, never through a shell, so argument values are not subject to
/// word splitting or metacharacter interpretation. The [`Display`](fmt::Display) form quotes
/// arguments for the operator's benefit and redacts secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
  program: String,
  args: Vec<Arg>,
}

impl CommandLine {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, value: impl Into<String>) -> Self {
    self.args.push(Arg {
      value: value.into(),
      secret: false,
    });
    self
  }

  pub fn args<I, S>(mut self, values: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    for value in values {
      self = self.arg(value);
    }
    self
  }

  /// Add an argument whose value must not appear in logs or error messages.
  pub fn secret_arg(mut self, value: impl Into<String>) -> Self {
    self.args.push(Arg {
      value: value.into(),
      secret: true,
    });
    self
  }

  /// Add `flag value` as two arguments.
  pub fn flag(self, flag: &str, value: impl Into<String>) -> Self {
    self.arg(flag).arg(value)
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  /// The raw argument values, secrets included, as passed to the process.
  pub fn argv(&self) -> impl Iterator<Item = &str> {
    self.args.iter().map(|a| a.value.as_str())
  }

  /// The argument values as displayed, with secrets redacted.
  pub fn display_args(&self) -> Vec<&str> {
    self
      .args
      .iter()
      .map(|a| if a.secret { REDACTED } else { a.value.as_str() })
      .collect()
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", quote(&self.program))?;
    for arg in self.display_args() {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

/// Quote a word for display in POSIX shell syntax, if it needs quoting.
fn quote(word: &str) -> String {
  let safe = !word.is_empty()
    && word
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
  if safe {
    word.to_string()
  } else {
    format!("'{}'", word.replace('\'', r"'\''"))
  }
}

/// Whether the runner should capture the command's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
  /// Inherit stdout and stderr; nothing is returned.
  None,
  /// Capture stdout (returned, trailing whitespace trimmed) and stderr (reported on failure).
  Stdout,
}

/// Errors that can occur while executing an external command.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The program could not be started at all.
  #[error("failed to run `{command}`: {source}")]
  Spawn { command: String, source: std::io::Error },

  /// The program ran and exited unsuccessfully.
  #[error("command `{command}` failed ({status}){}", detail_suffix(.detail))]
  Failed {
    command: String,
    status: String,
    code: Option<i32>,
    detail: String,
  },
}

fn detail_suffix(detail: &str) -> String {
  if detail.is_empty() {
    String::new()
  } else {
    format!(": {}", detail)
  }
}
