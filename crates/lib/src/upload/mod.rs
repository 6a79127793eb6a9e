//! The `upload-artifacts` pipeline.
//!
//! Logs in to the Mender server once, then uploads every artifact found directly in the output
//! directory. Artifacts are uploaded in lexicographic file-name order so that runs are
//! reproducible regardless of how the filesystem lists the directory.

pub mod command;
mod credentials;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::artifact::is_artifact_file;
use crate::config::ProjectConfig;
use crate::exec::{Capture, CommandRunner, ExecuteError};
use crate::util::{OutsideWorkdir, container_path};

pub use command::UploadCommandBuilder;
pub use credentials::Credentials;

/// Errors that can occur during an upload run.
#[derive(Debug, Error)]
pub enum UploadError {
  #[error("login to {server} failed: {source}")]
  Login { server: String, source: ExecuteError },

  #[error("failed to list artifacts in {}: {source}", path.display())]
  ListDir { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  OutsideWorkdir(#[from] OutsideWorkdir),

  #[error("failed to upload {}: {source}", path.display())]
  Upload { path: PathBuf, source: ExecuteError },
}

/// Options for an upload run.
#[derive(Debug, Clone)]
pub struct UploadOptions {
  /// Directory scanned (non-recursively) for `*.mender` files.
  pub output_dir: PathBuf,
  /// Host directory mounted into the `mender-cli` container.
  pub workdir: PathBuf,
}

/// Result of a successful upload run.
#[derive(Debug, Clone, Default)]
pub struct UploadResult {
  /// Artifacts uploaded, in upload order.
  pub uploaded: Vec<PathBuf>,
}

/// List the artifact files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`UploadError::ListDir`] if the directory cannot be read.
pub fn discover_artifacts(dir: &Path) -> Result<Vec<PathBuf>, UploadError> {
  let list_err = |source| UploadError::ListDir {
    path: dir.to_path_buf(),
    source,
  };

  let mut found = Vec::new();
  for entry in fs::read_dir(dir).map_err(list_err)? {
    let entry = entry.map_err(list_err)?;
    let name = entry.file_name();
    let is_file = entry.file_type().map_err(list_err)?.is_file();
    if is_file && is_artifact_file(&name.to_string_lossy()) {
      found.push(entry.path());
    }
  }
  found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
  Ok(found)
}

/// Log in, then upload every artifact in `options.output_dir`.
///
/// # Errors
///
/// An output directory the container cannot see is rejected before login. A failed login aborts
/// before any upload. A failed upload aborts the remaining ones.
pub async fn run<R: CommandRunner>(
  runner: &R,
  config: &ProjectConfig,
  options: &UploadOptions,
  credentials: &Credentials,
) -> Result<UploadResult, UploadError> {
  container_path(&options.output_dir, &options.workdir)?;
  let builder = UploadCommandBuilder::new(config.build_image_name(), &options.workdir);

  info!(server = %credentials.server_url, "logging in to mender server");
  runner
    .run(&builder.login(credentials), Capture::None)
    .await
    .map_err(|source| UploadError::Login {
      server: credentials.server_url.clone(),
      source,
    })?;

  let artifacts = discover_artifacts(&options.output_dir)?;
  if artifacts.is_empty() {
    info!(dir = %options.output_dir.display(), "no artifacts to upload");
  }

  let mut result = UploadResult::default();
  for path in artifacts {
    info!(path = %path.display(), "uploading artifact");
    runner
      .run(&builder.upload(&path, &credentials.server_url)?, Capture::None)
      .await
      .map_err(|source| UploadError::Upload {
        path: path.clone(),
        source,
      })?;
    info!(path = %path.display(), "uploaded artifact");
    result.uploaded.push(path);
  }

  Ok(result)
}
