//! Loading of the project configuration file.
//!
//! A missing file is not an error: the tool falls back to an empty configuration, which expands
//! to an empty build matrix. A file that exists but does not parse stops the run before any
//! external command is executed.

mod types;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use types::{AppSpec, ImageRef, ProjectConfig};

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },
}

/// Load the project configuration from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file exists but cannot be read, and
/// [`ConfigError::Parse`] if its content is not a well-formed configuration document.
pub fn load(path: &Path) -> Result<ProjectConfig, ConfigError> {
  let contents = match fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      debug!(path = %path.display(), "config not found, using defaults");
      return Ok(ProjectConfig::default());
    }
    Err(e) => {
      return Err(ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
      });
    }
  };

  parse(&contents).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse a configuration document. Blank documents yield the default configuration.
pub fn parse(contents: &str) -> Result<ProjectConfig, serde_yaml::Error> {
  if contents.trim().is_empty() {
    return Ok(ProjectConfig::default());
  }
  Ok(serde_yaml::from_str::<Option<ProjectConfig>>(contents)?.unwrap_or_default())
}
