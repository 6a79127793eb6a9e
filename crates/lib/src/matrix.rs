//! Build-matrix expansion.
//!
//! Each application is built for the full cross product of its architectures and device types.
//! Iteration is architecture-major and preserves the declaration order of both lists. An
//! application with no architectures or no device types contributes nothing.

use crate::config::{AppSpec, ImageRef, ProjectConfig};

/// One cell of the build matrix: everything needed to build a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  pub project: String,
  pub app_name: String,
  pub device_type: String,
  pub architecture: String,
  pub version: String,
  pub manifest: String,
  pub images: Vec<ImageRef>,
  pub use_local: bool,
}

/// Expand one application into `(architecture, device_type)` pairs.
pub fn expand(app: &AppSpec) -> Vec<(String, String)> {
  app
    .architectures
    .iter()
    .flat_map(|arch| app.device_types.iter().map(move |device| (arch.clone(), device.clone())))
    .collect()
}

/// Expand every application of `config` into build requests, applications in declaration order.
pub fn requests(config: &ProjectConfig, version: &str, use_local: bool) -> Vec<BuildRequest> {
  config
    .applications
    .iter()
    .flat_map(|app| {
      expand(app).into_iter().map(move |(architecture, device_type)| BuildRequest {
        project: config.project.clone(),
        app_name: app.name.clone(),
        device_type,
        architecture,
        version: version.to_string(),
        manifest: app.manifest.clone(),
        images: app.images.clone(),
        use_local,
      })
    })
    .collect()
}
