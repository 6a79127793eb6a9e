//! Implementation of the `menderkit upload-artifacts` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use menderkit_lib::config;
use menderkit_lib::consts::DEFAULT_OUTPUT_DIR;
use menderkit_lib::exec::ProcessRunner;
use menderkit_lib::upload::{self, Credentials, UploadOptions};

use crate::output::{format_duration, print_item, print_stat, print_success, print_warning};

#[derive(Debug, Args)]
pub struct UploadArgs {
  /// Output directory containing the artifacts to upload
  #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
  pub output_dir: PathBuf,

  /// Print every executed command
  #[arg(long)]
  pub verbose: bool,
}

/// Execute the upload-artifacts command.
///
/// Credentials come from the `MENDER_*` environment variables, which may be set in a `.env`
/// file in the working directory.
pub fn cmd_upload(config_path: &Path, args: UploadArgs) -> Result<()> {
  let project = config::load(config_path).context("Failed to load configuration")?;
  let workdir = std::env::current_dir().context("Failed to determine working directory")?;
  let credentials = Credentials::from_env();

  let options = UploadOptions {
    output_dir: args.output_dir,
    workdir,
  };
  let runner = ProcessRunner::new(args.verbose);

  let started = Instant::now();
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let result = rt
    .block_on(upload::run(&runner, &project, &options, &credentials))
    .context("Upload failed")?;

  println!();
  if result.uploaded.is_empty() {
    print_warning(&format!("No artifacts found in {}", options.output_dir.display()));
  } else {
    print_success(&format!("Uploaded {} artifact(s)", result.uploaded.len()));
    for artifact in &result.uploaded {
      print_item(&artifact.display().to_string());
    }
  }
  print_stat("Server", &credentials.server_url);
  print_stat("Elapsed", &format_duration(started.elapsed()));

  Ok(())
}
