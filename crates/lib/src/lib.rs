//! menderkit-lib: build-matrix expansion and command construction for Mender artifacts.
//!
//! This crate provides everything the `menderkit` CLI does besides argument parsing:
//! - `config`: the project configuration model and its YAML loader
//! - `matrix`: expansion of an application into (architecture, device type) build requests
//! - `artifact`: deterministic artifact naming
//! - `build` / `upload`: command builders and the sequential, fail-fast drivers
//! - `exec`: structured command lines and the runner that executes them

pub mod artifact;
pub mod build;
pub mod config;
pub mod consts;
pub mod exec;
pub mod host;
pub mod matrix;
pub mod upload;
pub mod util;
