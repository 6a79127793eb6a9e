//! Test utilities for menderkit-lib.
//!
//! [`RecordingRunner`] stands in for [`ProcessRunner`](crate::exec::ProcessRunner): it records
//! every command line it is asked to run, answers captured commands with canned output, and can
//! be told to fail a specific invocation.

use std::cell::RefCell;

use crate::exec::{Capture, CommandLine, CommandRunner, ExecuteError};

#[derive(Debug, Default)]
pub struct RecordingRunner {
  invocations: RefCell<Vec<CommandLine>>,
  /// `(prefix, stdout)`: captured commands whose display form starts with `prefix` get `stdout`.
  outputs: Vec<(String, String)>,
  /// 1-based index of the invocation that fails.
  fail_on: Option<usize>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_output(mut self, prefix: &str, stdout: &str) -> Self {
    self.outputs.push((prefix.to_string(), stdout.to_string()));
    self
  }

  pub fn failing_on(mut self, n: usize) -> Self {
    self.fail_on = Some(n);
    self
  }

  /// Display forms of the recorded invocations, in execution order.
  pub fn commands(&self) -> Vec<String> {
    self.invocations.borrow().iter().map(|c| c.to_string()).collect()
  }

  /// The recorded invocations, in execution order.
  pub fn invocations(&self) -> Vec<CommandLine> {
    self.invocations.borrow().clone()
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(&self, command: &CommandLine, capture: Capture) -> Result<Option<String>, ExecuteError> {
    let rendered = command.to_string();
    let count = {
      let mut invocations = self.invocations.borrow_mut();
      invocations.push(command.clone());
      invocations.len()
    };

    if self.fail_on == Some(count) {
      return Err(ExecuteError::Failed {
        command: rendered,
        status: "exit status: 1".to_string(),
        code: Some(1),
        detail: "simulated failure".to_string(),
      });
    }

    match capture {
      Capture::None => Ok(None),
      Capture::Stdout => Ok(Some(
        self
          .outputs
          .iter()
          .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
          .map(|(_, out)| out.clone())
          .unwrap_or_default(),
      )),
    }
  }
}
