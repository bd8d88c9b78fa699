//! Core building blocks shared by every release-kit command
//!
//! - **config**: release.toml parsing, defaults and validation
//! - **env**: resolution of the release version from `VERSION`
//! - **error**: error categories with contextual help and exit codes
//! - **fs**: atomic replacement and append-mode writes

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
