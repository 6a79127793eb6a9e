mod build;
mod upload;

pub use build::{BuildArgs, cmd_build};
pub use upload::{UploadArgs, cmd_upload};
