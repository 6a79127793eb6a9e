//! Construction of the `mender-cli` invocations, run inside the build image.

use std::path::{Path, PathBuf};

use crate::consts::{CONTAINER_WORKDIR, MENDER_CACHE_VOLUME};
use crate::exec::CommandLine;
use crate::upload::Credentials;
use crate::util::{OutsideWorkdir, container_path};

/// Builds `mender-cli` command lines.
///
/// Login and upload run in separate containers that share the `cache` volume, which is where
/// `mender-cli` keeps the token obtained by `login`.
#[derive(Debug, Clone)]
pub struct UploadCommandBuilder {
  image_name: String,
  workdir: PathBuf,
}

impl UploadCommandBuilder {
  pub fn new(image_name: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
    Self {
      image_name: image_name.into(),
      workdir: workdir.into(),
    }
  }

  fn mender_cli(&self) -> CommandLine {
    CommandLine::new("docker")
      .arg("run")
      .arg("--rm")
      .flag("-v", format!("{}:{}", self.workdir.display(), CONTAINER_WORKDIR))
      .flag("-v", MENDER_CACHE_VOLUME)
      .arg(&self.image_name)
      .arg("mender-cli")
  }

  /// `mender-cli login`; the password and tenant token are redacted when displayed.
  pub fn login(&self, credentials: &Credentials) -> CommandLine {
    self
      .mender_cli()
      .arg("login")
      .flag("--server", &credentials.server_url)
      .flag("--username", &credentials.username)
      .arg("--password")
      .secret_arg(&credentials.password)
      .arg("--token-value")
      .secret_arg(&credentials.tenant_token)
  }

  /// `mender-cli artifacts upload` for one artifact file on the host.
  ///
  /// # Errors
  ///
  /// Returns [`OutsideWorkdir`] if the artifact is not under the mounted workdir.
  pub fn upload(&self, artifact: &Path, server_url: &str) -> Result<CommandLine, OutsideWorkdir> {
    Ok(
      self
        .mender_cli()
        .arg("artifacts")
        .arg("upload")
        .arg(container_path(artifact, &self.workdir)?)
        .flag("--server", server_url),
    )
  }
}
