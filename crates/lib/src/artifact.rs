//! Deterministic artifact naming.
//!
//! An artifact is identified by `project-app-device-arch-version`, where the architecture has
//! every `/` replaced with `_` (Docker platforms look like `linux/arm64`, which is not a valid
//! file name). The same inputs always produce the same name, so re-running a build overwrites
//! nothing unexpected and no two cells of a matrix share a file.

use std::path::{Path, PathBuf};

use crate::consts::ARTIFACT_EXTENSION;

/// Make an architecture string safe for use in a file name.
pub fn format_architecture(architecture: &str) -> String {
  architecture.replace('/', "_")
}

/// The canonical artifact identifier.
pub fn artifact_name(project: &str, app_name: &str, device_type: &str, architecture: &str, version: &str) -> String {
  format!(
    "{}-{}-{}-{}-{}",
    project,
    app_name,
    device_type,
    format_architecture(architecture),
    version
  )
}

/// Where the artifact `artifact_id` is written inside `output_dir`.
pub fn artifact_path(output_dir: &Path, artifact_id: &str) -> PathBuf {
  output_dir.join(format!("{}.{}", artifact_id, ARTIFACT_EXTENSION))
}

/// Whether `file_name` looks like an artifact produced by this tool.
pub fn is_artifact_file(file_name: &str) -> bool {
  file_name.ends_with(&format!(".{}", ARTIFACT_EXTENSION))
}
