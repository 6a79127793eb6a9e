//! Implementation of the `menderkit build-artifacts` command.
//!
//! Loads the project configuration and builds one Mender artifact per application,
//! architecture and device type, stopping at the first failure.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use menderkit_lib::build::{self, BuildOptions};
use menderkit_lib::config;
use menderkit_lib::consts::DEFAULT_OUTPUT_DIR;
use menderkit_lib::exec::ProcessRunner;

use crate::output::{format_duration, print_item, print_stat, print_success, print_warning};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Version or git hash for the build (default: the current short git hash)
  #[arg(long = "version", value_name = "VERSION")]
  pub artifact_version: Option<String>,

  /// Output directory for the generated artifacts
  #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
  pub output_dir: PathBuf,

  /// Print every executed command
  #[arg(long)]
  pub verbose: bool,

  /// Use images from the local Docker daemon
  #[arg(long)]
  pub use_local: bool,

  /// Flag passed to app-gen when --use-local is set
  #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
  pub local_images_flag: Option<String>,
}

/// Execute the build-artifacts command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be parsed or if any external command fails.
pub fn cmd_build(config_path: &Path, args: BuildArgs) -> Result<()> {
  let project = config::load(config_path).context("Failed to load configuration")?;
  let workdir = std::env::current_dir().context("Failed to determine working directory")?;

  let options = BuildOptions {
    version: args.artifact_version,
    output_dir: args.output_dir,
    use_local: args.use_local,
    workdir,
    local_images_flag: args.local_images_flag,
  };
  let runner = ProcessRunner::new(args.verbose);

  let started = Instant::now();
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let result = rt
    .block_on(build::run(&runner, &project, &options))
    .context("Build failed")?;

  println!();
  if result.artifacts.is_empty() {
    print_warning("The build matrix is empty, no artifacts were built");
  } else {
    print_success(&format!("Built {} artifact(s)", result.artifacts.len()));
    for artifact in &result.artifacts {
      print_item(&artifact.display().to_string());
    }
  }
  print_stat("Version", &result.version);
  print_stat("Elapsed", &format_duration(started.elapsed()));

  Ok(())
}
