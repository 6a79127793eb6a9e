//! Integration tests that run menderkit against fake external tools.

#![cfg(unix)]

mod common;
mod upload_tests;
