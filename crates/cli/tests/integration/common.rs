//! Shared test helpers for CLI integration tests.
//!
//! Each test runs the binary in its own temporary working directory with a `bin/` directory
//! prepended to `PATH`. That directory holds fake `docker`, `git`, `id` and `getent`
//! executables which append their argv to `calls.log`. A fake exits 1 when its command line
//! contains the value of `FAKE_FAIL_ON`.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Short revision reported by the fake `git`.
pub const FAKE_REVISION: &str = "feedbee";

pub const CONFIG: &str = r#"
project: gateway
application:
  - name: web
    architectures: [linux/arm64, linux/amd64]
    device-types: [rpi4, imx8]
    manifest: manifests/web
    images:
      - name: WEB_IMAGE
        image: registry.example.com/web:1.0
      - image: redis:7
  - name: idle
    architectures: [linux/arm64]
    device-types: []
"#;

/// Isolated test environment.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with `config.yaml` containing `config`.
  pub fn with_config(config: &str) -> Self {
    let env = Self::empty();
    env.write_file("config.yaml", config);
    env
  }

  /// Create an environment without a configuration file.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };
    env.install_fake("docker", "");
    env.install_fake("git", &format!("echo {}", FAKE_REVISION));
    env.install_fake(
      "id",
      r#"case "$1" in -u) echo 1000 ;; -g) echo 1001 ;; esac"#,
    );
    env.install_fake("getent", "echo docker:x:998:ops");
    env
  }

  /// Write a file relative to the working directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  fn install_fake(&self, name: &str, body: &str) {
    let script = format!(
      "#!/bin/sh\n\
       echo \"{name} $*\" >> \"$FAKE_LOG\"\n\
       if [ -n \"$FAKE_FAIL_ON\" ]; then\n\
         case \"{name} $*\" in *\"$FAKE_FAIL_ON\"*) exit 1 ;; esac\n\
       fi\n\
       {body}\n"
    );
    let path = self.path("bin").join(name);
    self.write_file(&format!("bin/{}", name), &script);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Lines logged by the fake tools, in call order.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.path("calls.log"))
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// `docker run` calls only.
  pub fn docker_runs(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter(|c| c.starts_with("docker run"))
      .collect()
  }

  /// Get a pre-configured Command for the menderkit binary.
  ///
  /// Runs in the temporary directory with the fake tools first on `PATH`, and clears the
  /// upload credentials and `RUST_LOG` inherited from the test process.
  pub fn menderkit_cmd(&self) -> Command {
    let path = format!(
      "{}:{}",
      self.path("bin").display(),
      std::env::var("PATH").unwrap_or_default()
    );
    let mut cmd: Command = cargo_bin_cmd!("menderkit");
    cmd.current_dir(self.temp.path());
    cmd.env("PATH", path);
    cmd.env("FAKE_LOG", self.path("calls.log"));
    cmd.env_remove("FAKE_FAIL_ON");
    cmd.env_remove("RUST_LOG");
    for var in ["MENDER_SERVER_URL", "MENDER_USERNAME", "MENDER_PASSWORD", "MENDER_TENANT_TOKEN"] {
      cmd.env_remove(var);
    }
    cmd
  }
}
