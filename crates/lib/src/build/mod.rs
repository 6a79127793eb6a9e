//! The `build-artifacts` pipeline.
//!
//! Resolves the version, probes the host, rebuilds the build image, then walks the build matrix
//! in order and runs one `app-gen` container per cell. Execution stops at the first failing
//! command; artifacts already written stay in the output directory.

pub mod command;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::artifact::{artifact_name, artifact_path};
use crate::config::ProjectConfig;
use crate::exec::{Capture, CommandRunner, ExecuteError};
use crate::host::{HostIds, resolve_version};
use crate::matrix;
use crate::util::{OutsideWorkdir, container_path};

pub use command::{BuildCommandBuilder, BuildToolConfig, env_variables, image_flags};

/// Errors that can occur during a build run.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A preparation step (version lookup, host probe, image build) failed.
  #[error(transparent)]
  Execute(#[from] ExecuteError),

  #[error("failed to create output directory {}: {source}", path.display())]
  CreateOutputDir { path: PathBuf, source: std::io::Error },

  /// A path handed to the build container is not under the mounted workdir.
  #[error(transparent)]
  OutsideWorkdir(#[from] OutsideWorkdir),

  /// Building a specific artifact failed.
  #[error("failed to build artifact {artifact}: {source}")]
  Artifact { artifact: String, source: ExecuteError },
}

/// Options for a build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Version stamp; defaults to the short git revision when `None`.
  pub version: Option<String>,
  pub output_dir: PathBuf,
  /// Pass the local-images flag to `app-gen`.
  pub use_local: bool,
  /// Host directory mounted into the build container.
  pub workdir: PathBuf,
  /// Overrides the default local-images flag text.
  pub local_images_flag: Option<String>,
}

/// Result of a successful build run.
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
  /// The version shared by every artifact of the run.
  pub version: String,
  /// Artifacts written, in build order.
  pub artifacts: Vec<PathBuf>,
}

/// Build every artifact of the matrix described by `config`.
///
/// # Errors
///
/// Returns the first failure; no command after it is executed. An output directory the
/// container cannot see is rejected before any command runs.
pub async fn run<R: CommandRunner>(
  runner: &R,
  config: &ProjectConfig,
  options: &BuildOptions,
) -> Result<BuildResult, BuildError> {
  container_path(&options.output_dir, &options.workdir)?;

  let version = resolve_version(runner, options.version.as_deref()).await?;
  let host = HostIds::probe(runner).await?;

  let mut tool = BuildToolConfig::new(config.build_image_name(), &options.workdir);
  if let Some(flag) = &options.local_images_flag {
    tool.local_images_flag = flag.clone();
  }
  let builder = BuildCommandBuilder::new(tool, host);

  info!(image = %builder.tool().image_name, "building docker image");
  runner.run(&builder.image_build_command(), Capture::None).await?;

  fs::create_dir_all(&options.output_dir).map_err(|source| BuildError::CreateOutputDir {
    path: options.output_dir.clone(),
    source,
  })?;

  let mut result = BuildResult {
    version: version.clone(),
    artifacts: Vec::new(),
  };

  for request in matrix::requests(config, &version, options.use_local) {
    let artifact = artifact_name(
      &request.project,
      &request.app_name,
      &request.device_type,
      &request.architecture,
      &request.version,
    );
    let output_path = artifact_path(&options.output_dir, &artifact);

    info!(
      app = %request.app_name,
      device = %request.device_type,
      platform = %request.architecture,
      version = %request.version,
      "building mender artifact"
    );

    let cmd = builder.command(&request, &artifact, &output_path)?;
    runner
      .run(&cmd, Capture::None)
      .await
      .map_err(|source| BuildError::Artifact {
        artifact: artifact.clone(),
        source,
      })?;

    info!(path = %output_path.display(), "mender artifact built");
    result.artifacts.push(output_path);
  }

  Ok(result)
}
