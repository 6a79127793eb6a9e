//! Execution of external commands.
//!
//! Every external tool (docker, git, id, getent) is invoked through a [`CommandRunner`]. The
//! drivers await each invocation before constructing the next one, so execution is strictly
//! sequential, and the first failure is returned to the caller without running anything else.

mod types;

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

pub use types::{Arg, Capture, CommandLine, ExecuteError, REDACTED};

/// Runs external commands.
///
/// Implemented by [`ProcessRunner`] for real execution; tests substitute a recording double.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  /// Execute `command` to completion.
  ///
  /// Returns the captured stdout (trailing whitespace trimmed) when `capture` is
  /// [`Capture::Stdout`], `None` otherwise.
  async fn run(&self, command: &CommandLine, capture: Capture) -> Result<Option<String>, ExecuteError>;
}

/// Executes commands as child processes, without a shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
  /// Echo each command line at `info` level before executing it.
  pub verbose: bool,
}

impl ProcessRunner {
  pub fn new(verbose: bool) -> Self {
    Self { verbose }
  }
}

impl CommandRunner for ProcessRunner {
  async fn run(&self, command: &CommandLine, capture: Capture) -> Result<Option<String>, ExecuteError> {
    let rendered = command.to_string();
    if self.verbose {
      info!("Executing: {}", rendered);
    } else {
      debug!(command = %rendered, "executing command");
    }

    let mut child = Command::new(command.program());
    child.args(command.argv());

    let spawn_err = |source| ExecuteError::Spawn {
      command: rendered.clone(),
      source,
    };

    match capture {
      Capture::None => {
        let status = child.status().await.map_err(spawn_err)?;
        if !status.success() {
          return Err(ExecuteError::Failed {
            command: rendered,
            status: status.to_string(),
            code: status.code(),
            detail: String::new(),
          });
        }
        Ok(None)
      }
      Capture::Stdout => {
        let output = child
          .stdin(Stdio::null())
          .stdout(Stdio::piped())
          .stderr(Stdio::piped())
          .output()
          .await
          .map_err(spawn_err)?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
          return Err(ExecuteError::Failed {
            command: rendered,
            status: output.status.to_string(),
            code: output.status.code(),
            detail: stderr.trim().to_string(),
          });
        }
        if !stderr.trim().is_empty() {
          debug!(stderr = %stderr.trim(), "command stderr");
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        debug!(stdout = %stdout, "command output");
        Ok(Some(stdout))
      }
    }
  }
}
