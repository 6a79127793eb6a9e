//! Construction of the `docker build` and `docker run ... app-gen` invocations.

use std::path::{Path, PathBuf};

use crate::config::ImageRef;
use crate::consts::{CONTAINER_WORKDIR, DEFAULT_LOCAL_IMAGES_FLAG, DOCKERFILE, ORCHESTRATOR};
use crate::exec::CommandLine;
use crate::host::HostIds;
use crate::matrix::BuildRequest;
use crate::util::{OutsideWorkdir, container_path};

/// Host sockets mounted into the build container so `app-gen` can drive the host daemon.
const SOCKET_MOUNTS: [&str; 2] = [
  "/var/run/docker.sock:/var/run/docker.sock",
  "/run/containerd/containerd.sock:/run/containerd/containerd.sock",
];

/// Settings of the external build tool that do not vary per artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildToolConfig {
  /// Tag of the image that contains `app-gen`.
  pub image_name: String,
  /// Host directory mounted at `/workdir`.
  pub workdir: PathBuf,
  /// Flag that tells `app-gen` to use images from the local daemon.
  pub local_images_flag: String,
  /// Dockerfile the build image is built from.
  pub dockerfile: String,
}

impl BuildToolConfig {
  pub fn new(image_name: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
    Self {
      image_name: image_name.into(),
      workdir: workdir.into(),
      local_images_flag: DEFAULT_LOCAL_IMAGES_FLAG.to_string(),
      dockerfile: DOCKERFILE.to_string(),
    }
  }
}

/// `NAME=image` for every image reference that has both a name and an image.
pub fn env_variables(images: &[ImageRef]) -> Vec<String> {
  images
    .iter()
    .filter_map(|i| Some(format!("{}={}", i.name()?, i.image()?)))
    .collect()
}

/// The image of every reference that has one, whether or not it is named.
pub fn image_flags(images: &[ImageRef]) -> Vec<String> {
  images.iter().filter_map(|i| i.image().map(str::to_string)).collect()
}

/// Builds the command lines for one build run.
#[derive(Debug, Clone)]
pub struct BuildCommandBuilder {
  tool: BuildToolConfig,
  host: HostIds,
}

impl BuildCommandBuilder {
  pub fn new(tool: BuildToolConfig, host: HostIds) -> Self {
    Self { tool, host }
  }

  pub fn tool(&self) -> &BuildToolConfig {
    &self.tool
  }

  /// `docker build -t <image> -f <dockerfile> .`
  pub fn image_build_command(&self) -> CommandLine {
    CommandLine::new("docker")
      .arg("build")
      .flag("-t", &self.tool.image_name)
      .flag("-f", &self.tool.dockerfile)
      .arg(".")
  }

  /// The full `docker run` invocation that produces the artifact `artifact_id` at `output_path`.
  ///
  /// # Errors
  ///
  /// Returns [`OutsideWorkdir`] if the manifest or output path is not under the mounted workdir.
  pub fn command(
    &self,
    request: &BuildRequest,
    artifact_id: &str,
    output_path: &Path,
  ) -> Result<CommandLine, OutsideWorkdir> {
    let manifests_dir = container_path(Path::new(&request.manifest), &self.tool.workdir)?;
    let output_path = container_path(output_path, &self.tool.workdir)?;

    let mut cmd = CommandLine::new("docker").arg("run").arg("--rm").flag(
      "-v",
      format!("{}:{}", self.tool.workdir.display(), CONTAINER_WORKDIR),
    );
    for mount in SOCKET_MOUNTS {
      cmd = cmd.flag("-v", mount);
    }
    cmd = cmd
      .flag("-e", format!("UID={}", self.host.uid))
      .flag("-e", format!("GID={}", self.host.gid))
      .flag("-e", format!("DID={}", self.host.docker_gid));
    for var in env_variables(&request.images) {
      cmd = cmd.flag("-e", var);
    }

    cmd = cmd
      .arg(&self.tool.image_name)
      .arg("app-gen")
      .flag("--artifact-name", artifact_id);
    if request.use_local {
      cmd = cmd.arg(&self.tool.local_images_flag);
    }
    cmd = cmd
      .flag("--device-type", &request.device_type)
      .flag("--platform", &request.architecture)
      .flag("--application-name", &request.app_name);
    for image in image_flags(&request.images) {
      cmd = cmd.flag("--image", image);
    }

    Ok(
      cmd
        .flag("--orchestrator", ORCHESTRATOR)
        .flag("--manifests-dir", manifests_dir)
        .flag("--output-path", output_path)
        .arg("--")
        .arg(format!("--software-name={}", request.app_name))
        .arg(format!("--software-version={}", request.version)),
    )
  }
}
