//! Shared utilities.
//!
//! Path translation for the build container and test helpers.

#[cfg(test)]
pub mod testutil;

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::consts::CONTAINER_WORKDIR;

/// A host path that the build container cannot see.
#[derive(Debug, Error)]
#[error(
  "{} is outside the working directory {} mounted at {}",
  path.display(),
  workdir.display(),
  CONTAINER_WORKDIR
)]
pub struct OutsideWorkdir {
  pub path: PathBuf,
  pub workdir: PathBuf,
}

/// Translate a host path into the path the build container sees.
///
/// `workdir` is mounted at [`CONTAINER_WORKDIR`]. Relative paths are re-rooted there, absolute
/// paths must lie under `workdir`. The comparison is lexical; symlinks are not resolved.
///
/// # Errors
///
/// Returns [`OutsideWorkdir`] if the path leaves the mounted directory.
pub fn container_path(host_path: &Path, workdir: &Path) -> Result<String, OutsideWorkdir> {
  let outside = || OutsideWorkdir {
    path: host_path.to_path_buf(),
    workdir: workdir.to_path_buf(),
  };

  let relative = if host_path.is_absolute() {
    host_path.strip_prefix(workdir).map_err(|_| outside())?
  } else {
    host_path
  };

  let mut inside = PathBuf::from(CONTAINER_WORKDIR);
  let mut depth = 0usize;
  for component in relative.components() {
    match component {
      Component::CurDir => {}
      Component::Normal(part) => {
        inside.push(part);
        depth += 1;
      }
      Component::ParentDir if depth > 0 => {
        inside.pop();
        depth -= 1;
      }
      Component::ParentDir | Component::RootDir | Component::Prefix(_) => return Err(outside()),
    }
  }

  Ok(inside.to_string_lossy().into_owned())
}
