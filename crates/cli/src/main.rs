use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use menderkit_lib::consts::DEFAULT_CONFIG_FILE;

mod cmd;
mod output;

use cmd::{BuildArgs, UploadArgs};

/// menderkit - build and upload Mender artifacts for a device matrix
#[derive(Parser)]
#[command(name = "menderkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the project configuration file
  #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build Mender artifacts for each platform, device type, and manifest
  BuildArtifacts(BuildArgs),

  /// Upload Mender artifacts to the Mender server
  UploadArtifacts(UploadArgs),
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let verbose = match &cli.command {
    Commands::BuildArtifacts(args) => args.verbose,
    Commands::UploadArtifacts(args) => args.verbose,
  };
  let default_level = if verbose { "debug" } else { "info" };

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  let result = load_dotenv().and_then(|()| match cli.command {
    Commands::BuildArtifacts(args) => cmd::cmd_build(&cli.config, args),
    Commands::UploadArtifacts(args) => cmd::cmd_upload(&cli.config, args),
  });

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      output::print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

/// Load `.env` from the working directory, if there is one.
fn load_dotenv() -> Result<()> {
  match dotenvy::dotenv() {
    Ok(path) => {
      debug!(path = %path.display(), "loaded environment file");
      Ok(())
    }
    Err(e) if e.not_found() => Ok(()),
    Err(e) => Err(e).context("Invalid .env file"),
  }
}
