//! Release version resolution
//!
//! The pipeline hands the version over through `VERSION`. It is read exactly
//! once, at the command boundary, and threaded through as a plain `&str`.

use crate::core::error::{ConfigError, ReleaseResult};
use std::env::VarError;

/// Environment variable carrying the release version
pub const VERSION_VAR: &str = "VERSION";

/// Resolve the release version from an explicit override or the process environment
pub fn resolve_version(explicit: Option<String>) -> ReleaseResult<String> {
  resolve_version_with(explicit, |var| std::env::var(var))
}

/// Resolve the release version using a custom variable lookup
///
/// An explicit value wins. Otherwise `VERSION` must be present; an empty
/// value counts as missing, a non-UTF-8 value is invalid.
pub fn resolve_version_with<F>(explicit: Option<String>, lookup: F) -> ReleaseResult<String>
where
  F: Fn(&str) -> Result<String, VarError>,
{
  if let Some(version) = explicit {
    return Ok(version);
  }

  match lookup(VERSION_VAR) {
    Ok(version) if !version.is_empty() => Ok(version),
    Err(VarError::NotUnicode(raw)) => Err(
      ConfigError::InvalidValue {
        field: VERSION_VAR.to_string(),
        value: raw.to_string_lossy().into_owned(),
      }
      .into(),
    ),
    _ => Err(
      ConfigError::MissingEnv {
        var: VERSION_VAR.to_string(),
      }
      .into(),
    ),
  }
}
