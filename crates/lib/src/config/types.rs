//! Project configuration types.
//!
//! Mirrors the layout of `config.yaml`:
//!
//! ```yaml
//! project: gateway
//! application:
//!   - name: telemetry
//!     architectures: [linux/arm64, linux/amd64]
//!     device-types: [rpi4, imx8]
//!     manifest: manifests/telemetry
//!     images:
//!       - name: TELEMETRY_IMAGE
//!         image: registry.example.com/telemetry:1.2
//! ```
//!
//! Every field is optional. Absent fields (and explicit `null`s) fall back to an empty string or
//! an empty list, so a sparse configuration yields a smaller matrix instead of an error.

use serde::{Deserialize, Deserializer};

use crate::consts::BUILD_IMAGE_SUFFIX;

/// The whole project configuration, loaded once per invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  #[serde(deserialize_with = "null_as_default")]
  pub project: String,
  /// Applications in declaration order. The YAML key is singular.
  #[serde(rename = "application", deserialize_with = "null_as_default")]
  pub applications: Vec<AppSpec>,
}

impl ProjectConfig {
  /// Tag of the Docker image that hosts `app-gen` and `mender-cli`.
  pub fn build_image_name(&self) -> String {
    format!("{}{}", self.project, BUILD_IMAGE_SUFFIX)
  }
}

/// One application whose artifacts are built for every architecture x device type pair.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSpec {
  #[serde(deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub architectures: Vec<String>,
  #[serde(rename = "device-types", deserialize_with = "null_as_default")]
  pub device_types: Vec<String>,
  /// Path to the manifest directory, relative to the working directory.
  #[serde(deserialize_with = "null_as_default")]
  pub manifest: String,
  #[serde(deserialize_with = "null_as_default")]
  pub images: Vec<ImageRef>,
}

/// A container image referenced by an application.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageRef {
  pub name: Option<String>,
  pub image: Option<String>,
}

impl ImageRef {
  pub fn new(name: Option<&str>, image: Option<&str>) -> Self {
    Self {
      name: name.map(str::to_string),
      image: image.map(str::to_string),
    }
  }

  /// The variable name, if set and non-empty.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref().filter(|s| !s.is_empty())
  }

  /// The image reference, if set and non-empty.
  pub fn image(&self) -> Option<&str> {
    self.image.as_deref().filter(|s| !s.is_empty())
  }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
