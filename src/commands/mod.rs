//! CLI commands for release-kit
//!
//! - **bump**: write the release version into every version target
//! - **manifest**: build the updater manifest from the bundle signature
//! - **status**: show the version each target currently holds
//!
//! Every command receives the project root explicitly; the release version is
//! resolved once at the top of the command and passed down.

pub mod bump;
pub mod manifest;
pub mod status;

pub use bump::run_bump;
pub use manifest::{ManifestArgs, run_manifest};
pub use status::run_status;
