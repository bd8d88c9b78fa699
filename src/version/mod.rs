//! Version synchronization across structured manifest files
//!
//! A release version lives in several places at once: `package.json`,
//! `tauri.conf.json`, `Cargo.toml`. Each place is a [`ConfigTarget`]: a file,
//! its format, and the dotted key path of the version field.
//!
//! Targets are processed one at a time. Each file is read whole, one field is
//! replaced, and the result replaces the file atomically. There is no
//! transaction across files: a failure on target N leaves targets before N
//! updated and targets after N untouched.

pub mod json;
pub mod toml;

use crate::core::config::{FileFormat, TargetConfig};
use crate::core::error::{ParseError, ReleaseResult};
use crate::core::fs;
use std::path::{Path, PathBuf};

/// A resolved version target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
  /// Absolute path to the file
  pub path: PathBuf,
  /// Path as configured, for display
  pub display_path: PathBuf,
  pub format: FileFormat,
  /// Dot-separated key path
  pub key: String,
}

/// What applying a version to a target did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
  /// The file was rewritten
  Updated { previous: String },
  /// The file already had exactly this content; nothing written
  Unchanged,
  /// Dry run: the file would be rewritten
  WouldUpdate { previous: String },
}

impl ConfigTarget {
  /// Resolve a configured target against the project root
  pub fn resolve(root: &Path, config: &TargetConfig) -> ReleaseResult<Self> {
    let format = config.resolved_format().ok_or_else(|| ParseError::UnknownFormat {
      path: config.path.clone(),
    })?;

    Ok(Self {
      path: root.join(&config.path),
      display_path: config.path.clone(),
      format,
      key: config.key.clone(),
    })
  }

  /// Resolve every configured target, failing on the first unusable one
  pub fn resolve_all(root: &Path, configs: &[TargetConfig]) -> ReleaseResult<Vec<Self>> {
    configs.iter().map(|c| Self::resolve(root, c)).collect()
  }

  /// Read the version currently stored at the key path
  pub fn read_version(&self) -> ReleaseResult<String> {
    let content = fs::read_to_string(&self.path)?;
    match self.format {
      FileFormat::Json => json::get_version(&self.display_path, &content, &self.key),
      FileFormat::Toml => toml::get_version(&self.display_path, &content, &self.key),
    }
  }

  /// Render the file with `version` at the key path
  ///
  /// Returns the previous value, the original text and the new text.
  fn render(&self, version: &str) -> ReleaseResult<(String, String, String)> {
    let content = fs::read_to_string(&self.path)?;
    let (previous, rendered) = match self.format {
      FileFormat::Json => json::set_version(&self.display_path, &content, &self.key, version)?,
      FileFormat::Toml => toml::set_version(&self.display_path, &content, &self.key, version)?,
    };
    Ok((previous, content, rendered))
  }

  /// Write `version` into this target
  pub fn apply(&self, version: &str, dry_run: bool) -> ReleaseResult<TargetOutcome> {
    let (previous, original, rendered) = self.render(version)?;

    if rendered == original {
      return Ok(TargetOutcome::Unchanged);
    }

    if dry_run {
      return Ok(TargetOutcome::WouldUpdate { previous });
    }

    fs::write_atomic(&self.path, &rendered)?;
    Ok(TargetOutcome::Updated { previous })
  }
}
