use std::env::{self, VarError};

use tracing::warn;

use crate::consts::{ENV_PASSWORD, ENV_SERVER_URL, ENV_TENANT_TOKEN, ENV_USERNAME};

/// Mender server credentials used by `mender-cli login`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
  pub server_url: String,
  pub username: String,
  pub password: String,
  pub tenant_token: String,
}

impl Credentials {
  /// Read the credentials from the process environment.
  ///
  /// Unset or non-UTF-8 variables become empty strings; each one is reported with a warning and
  /// left for `mender-cli` to reject.
  pub fn from_env() -> Self {
    Self {
      server_url: var(ENV_SERVER_URL),
      username: var(ENV_USERNAME),
      password: var(ENV_PASSWORD),
      tenant_token: var(ENV_TENANT_TOKEN),
    }
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("server_url", &self.server_url)
      .field("username", &self.username)
      .field("password", &"****")
      .field("tenant_token", &"****")
      .finish()
  }
}

fn var(name: &str) -> String {
  match env::var(name) {
    Ok(value) => value,
    Err(VarError::NotPresent) => {
      warn!(variable = name, "environment variable not set");
      String::new()
    }
    Err(VarError::NotUnicode(_)) => {
      warn!(variable = name, "environment variable is not valid unicode, ignoring it");
      String::new()
    }
  }
}
