use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration for release-kit
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every section is optional. Without a config file the defaults describe a
/// Tauri app: `package.json`, `src-tauri/tauri.conf.json` and
/// `src-tauri/Cargo.toml` as version targets, and a two-entry macOS manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default = "default_targets")]
  pub targets: Vec<TargetConfig>,
  #[serde(default)]
  pub manifest: ManifestConfig,
}

/// A structured file holding a copy of the release version
///
/// # Example
///
/// ```toml
/// [[targets]]
/// path = "src-tauri/tauri.conf.json"
/// key = "package.version"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
  /// File path (relative to the project root)
  pub path: PathBuf,

  /// File format; inferred from the extension when omitted
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<FileFormat>,

  /// Dot-separated key path to the version field
  pub key: String,
}

/// Structured file formats a target can use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
  Json,
  Toml,
}

impl FileFormat {
  /// Guess the format from a file extension
  pub fn from_extension(path: &Path) -> Option<Self> {
    match path.extension().and_then(|e| e.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("json") => Some(FileFormat::Json),
      Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(FileFormat::Toml),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      FileFormat::Json => "json",
      FileFormat::Toml => "toml",
    }
  }
}

/// Release manifest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
  /// Detached signature file of the update bundle
  #[serde(default)]
  pub signature: Option<PathBuf>,

  /// Download URL with `{version}` and `{platform}` placeholders
  #[serde(default)]
  pub url_template: Option<String>,

  /// Manifest file to write (default: manifest.json)
  #[serde(default = "default_output")]
  pub output: PathBuf,

  /// How the descriptor lands in the output file (default: append)
  #[serde(default)]
  pub mode: WriteMode,

  /// Platform identifiers to publish (default: darwin-aarch64, darwin-x86_64)
  #[serde(default = "default_platforms")]
  pub platforms: Vec<String>,

  /// Published manifest used as the merge base in `merge` mode
  #[serde(default)]
  pub existing_url: Option<String>,

  /// Release notes copied into the descriptor
  #[serde(default)]
  pub notes: Option<String>,
}

/// How a built release descriptor is written to the manifest file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
  /// Append the serialized descriptor; repeated runs concatenate documents
  #[default]
  Append,
  /// Replace the file with the single descriptor
  Overwrite,
  /// Overlay the descriptor on the existing manifest and replace the file
  Merge,
}

impl FromStr for WriteMode {
  type Err = ReleaseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "append" => Ok(WriteMode::Append),
      "overwrite" => Ok(WriteMode::Overwrite),
      "merge" => Ok(WriteMode::Merge),
      other => Err(
        ConfigError::InvalidValue {
          field: "mode".to_string(),
          value: other.to_string(),
        }
        .into(),
      ),
    }
  }
}

fn default_targets() -> Vec<TargetConfig> {
  vec![
    TargetConfig {
      path: PathBuf::from("package.json"),
      format: Some(FileFormat::Json),
      key: "version".to_string(),
    },
    TargetConfig {
      path: PathBuf::from("src-tauri").join("tauri.conf.json"),
      format: Some(FileFormat::Json),
      key: "package.version".to_string(),
    },
    TargetConfig {
      path: PathBuf::from("src-tauri").join("Cargo.toml"),
      format: Some(FileFormat::Toml),
      key: "package.version".to_string(),
    },
  ]
}

fn default_output() -> PathBuf {
  PathBuf::from("manifest.json")
}

fn default_platforms() -> Vec<String> {
  vec!["darwin-aarch64".to_string(), "darwin-x86_64".to_string()]
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      signature: None,
      url_template: None,
      output: default_output(),
      mode: WriteMode::default(),
      platforms: default_platforms(),
      existing_url: None,
      notes: None,
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      targets: default_targets(),
      manifest: ManifestConfig::default(),
    }
  }
}

impl TargetConfig {
  /// Resolve the declared or inferred file format
  pub fn resolved_format(&self) -> Option<FileFormat> {
    self.format.or_else(|| FileFormat::from_extension(&self.path))
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from release.toml, falling back to defaults when none exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Unreadable {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Unreadable {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration
  pub fn validate(&self) -> ReleaseResult<()> {
    for target in &self.targets {
      if target.key.is_empty() || target.key.split('.').any(str::is_empty) {
        return Err(
          ConfigError::InvalidValue {
            field: format!("key for target {}", target.path.display()),
            value: target.key.clone(),
          }
          .into(),
        );
      }
    }

    if self.manifest.platforms.is_empty() {
      return Err(
        ConfigError::InvalidValue {
          field: "manifest.platforms".to_string(),
          value: "[]".to_string(),
        }
        .into(),
      );
    }

    Ok(())
  }
}
