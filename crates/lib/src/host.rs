//! Probes of the host system that feed into the build container.
//!
//! The build container writes artifacts into the mounted working directory and talks to the
//! host Docker daemon, so it needs the invoking user's uid/gid and the gid of the `docker`
//! group. The default artifact version comes from the working tree's git revision.

use tracing::{debug, warn};

use crate::exec::{Capture, CommandLine, CommandRunner, ExecuteError};

/// Numeric ids passed to the build container as `UID`, `GID` and `DID`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostIds {
  pub uid: String,
  pub gid: String,
  /// Empty when the `docker` group cannot be resolved.
  pub docker_gid: String,
}

impl HostIds {
  /// Query the current user's ids and the `docker` group id.
  ///
  /// `id -u` and `id -g` must succeed. The docker group lookup is best effort: if `getent`
  /// fails or the group does not exist, `docker_gid` is left empty.
  pub async fn probe<R: CommandRunner>(runner: &R) -> Result<Self, ExecuteError> {
    let uid = capture(runner, CommandLine::new("id").arg("-u")).await?;
    let gid = capture(runner, CommandLine::new("id").arg("-g")).await?;

    let docker_gid = match capture(runner, CommandLine::new("getent").args(["group", "docker"])).await {
      Ok(entry) => group_id(&entry).unwrap_or_default(),
      Err(e) => {
        warn!(error = %e, "could not resolve the docker group id");
        String::new()
      }
    };

    debug!(uid = %uid, gid = %gid, docker_gid = %docker_gid, "host ids");
    Ok(Self { uid, gid, docker_gid })
  }
}

/// Resolve the artifact version: the explicit value if given, otherwise the short revision
/// hash of the current git checkout.
pub async fn resolve_version<R: CommandRunner>(runner: &R, explicit: Option<&str>) -> Result<String, ExecuteError> {
  match explicit {
    Some(version) => Ok(version.to_string()),
    None => capture(runner, CommandLine::new("git").args(["rev-parse", "--short", "HEAD"])).await,
  }
}

/// Extract the gid from a `group:password:gid:members` entry.
fn group_id(entry: &str) -> Option<String> {
  entry
    .lines()
    .next()?
    .split(':')
    .nth(2)
    .map(str::trim)
    .filter(|gid| !gid.is_empty())
    .map(str::to_string)
}

async fn capture<R: CommandRunner>(runner: &R, command: CommandLine) -> Result<String, ExecuteError> {
  Ok(runner.run(&command, Capture::Stdout).await?.unwrap_or_default())
}
