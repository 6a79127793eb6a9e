//! upload-artifacts integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const CONFIG: &str = "project: gateway\n";

fn env_with_artifacts(files: &[&str]) -> TestEnv {
  let env = TestEnv::with_config(CONFIG);
  for file in files {
    env.write_file(&format!("artifacts/{}", file), "artifact");
  }
  env
}

fn with_credentials(cmd: &mut assert_cmd::Command) -> &mut assert_cmd::Command {
  cmd
    .env("MENDER_SERVER_URL", "https://hosted.mender.io")
    .env("MENDER_USERNAME", "ops@example.com")
    .env("MENDER_PASSWORD", "hunter2")
    .env("MENDER_TENANT_TOKEN", "tenant-token")
}

#[test]
fn login_then_upload_in_name_order() {
  let env = env_with_artifacts(&["b.mender", "a.mender", "readme.txt"]);

  with_credentials(env.menderkit_cmd().arg("upload-artifacts"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Uploaded 2 artifact(s)"));

  let runs = env.docker_runs();
  assert_eq!(runs.len(), 3);
  assert!(runs[0].contains(
    "gateway-build mender-cli login --server https://hosted.mender.io --username ops@example.com \
     --password hunter2 --token-value tenant-token"
  ));
  assert!(runs[0].contains("-v cache:/home/user/.cache/mender/"));
  assert!(runs[1].ends_with("mender-cli artifacts upload /workdir/artifacts/a.mender --server https://hosted.mender.io"));
  assert!(runs[2].ends_with("mender-cli artifacts upload /workdir/artifacts/b.mender --server https://hosted.mender.io"));
}

#[test]
fn login_runs_even_without_artifacts() {
  let env = env_with_artifacts(&[]);
  std::fs::create_dir_all(env.path("artifacts")).unwrap();

  with_credentials(env.menderkit_cmd().arg("upload-artifacts"))
    .assert()
    .success()
    .stderr(predicate::str::contains("No artifacts found"));

  let runs = env.docker_runs();
  assert_eq!(runs.len(), 1);
  assert!(runs[0].contains("mender-cli login"));
}

#[test]
fn login_failure_aborts_uploads() {
  let env = env_with_artifacts(&["a.mender"]);

  with_credentials(env.menderkit_cmd().arg("upload-artifacts"))
    .env("FAKE_FAIL_ON", "mender-cli login")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("login to https://hosted.mender.io failed"));

  assert_eq!(env.docker_runs().len(), 1);
}

#[test]
fn upload_failure_stops_remaining_uploads() {
  let env = env_with_artifacts(&["a.mender", "b.mender", "c.mender"]);

  with_credentials(env.menderkit_cmd().arg("upload-artifacts"))
    .env("FAKE_FAIL_ON", "artifacts/b.mender")
    .assert()
    .code(1);

  assert_eq!(env.docker_runs().len(), 3);
}

#[test]
fn missing_output_dir_fails_after_login() {
  let env = TestEnv::with_config(CONFIG);

  with_credentials(env.menderkit_cmd().args(["upload-artifacts", "--output-dir", "nowhere"]))
    .assert()
    .code(1)
    .stderr(predicate::str::contains("failed to list artifacts"));

  assert_eq!(env.docker_runs().len(), 1);
}

#[test]
fn credentials_are_read_from_env_file() {
  let env = env_with_artifacts(&["a.mender"]);
  env.write_file(
    ".env",
    "MENDER_SERVER_URL=https://from-dotenv.example.com\nMENDER_USERNAME=dotenv-user\n",
  );

  env.menderkit_cmd().arg("upload-artifacts").assert().success();

  let runs = env.docker_runs();
  assert!(runs[0].contains("--server https://from-dotenv.example.com --username dotenv-user"));
  assert!(runs[1].ends_with("--server https://from-dotenv.example.com"));
}

#[test]
fn verbose_echo_redacts_password() {
  let env = env_with_artifacts(&[]);
  std::fs::create_dir_all(env.path("artifacts")).unwrap();

  with_credentials(env.menderkit_cmd().args(["upload-artifacts", "--verbose"]))
    .assert()
    .success()
    .stderr(predicate::str::contains("--password ****"))
    .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn output_dir_outside_working_directory_is_rejected_before_login() {
  let env = TestEnv::with_config(CONFIG);
  let elsewhere = tempfile::TempDir::new().unwrap();
  std::fs::write(elsewhere.path().join("a.mender"), "artifact").unwrap();

  with_credentials(env.menderkit_cmd().args(["upload-artifacts", "--output-dir"]))
    .arg(elsewhere.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("is outside the working directory"));

  assert!(env.docker_runs().is_empty());
}
