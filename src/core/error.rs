//! Error types for release-kit with contextual messages and exit codes
//!
//! Every command returns `ReleaseResult`. Nothing is caught internally: the
//! first failure aborts the command, and `main` prints it and exits with the
//! category's exit code. Files already written stay written.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Exit codes for release-kit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, missing VERSION, malformed manifests)
  User = 1,
  /// System error (I/O, network)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-kit
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors (environment, release.toml, CLI values)
  Config(ConfigError),

  /// Missing or unreadable files
  Io { path: PathBuf, source: io::Error },

  /// Malformed JSON/TOML or a key path that cannot be resolved
  Parse(ParseError),

  /// Failed fetch of a published manifest
  Network(NetworkError),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Wrap an I/O error with the path it happened on
  pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
    ReleaseError::Io {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Io { .. } => ExitCode::System,
      ReleaseError::Parse(_) => ExitCode::User,
      ReleaseError::Network(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Parse(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
      ReleaseError::Parse(e) => write!(f, "{}", e),
      ReleaseError::Network(e) => write!(f, "{}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io { source, .. } => Some(source),
      ReleaseError::Parse(ParseError::Json { source, .. }) => Some(source),
      ReleaseError::Parse(ParseError::Toml { source, .. }) => Some(source),
      ReleaseError::Network(NetworkError::Request { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<ParseError> for ReleaseError {
  fn from(err: ParseError) -> Self {
    ReleaseError::Parse(err)
  }
}

impl From<NetworkError> for ReleaseError {
  fn from(err: NetworkError) -> Self {
    ReleaseError::Network(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Required environment variable is not set
  MissingEnv { var: String },

  /// Required setting absent from both release.toml and the command line
  MissingField { field: String },

  /// A setting has a value release-kit does not understand
  InvalidValue { field: String, value: String },

  /// release.toml exists but could not be read or deserialized
  Unreadable { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingEnv { var } => Some(format!(
        "Export {} before running, or pass the version explicitly with --set.",
        var
      )),
      ConfigError::MissingField { field } => Some(format!(
        "Set `{}` in release.toml or pass it on the command line.",
        field
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingEnv { var } => write!(f, "Environment variable {} is not set", var),
      ConfigError::MissingField { field } => write!(f, "Missing required setting: {}", field),
      ConfigError::InvalidValue { field, value } => write!(f, "Invalid value for {}: '{}'", field, value),
      ConfigError::Unreadable { path, reason } => {
        write!(f, "Could not load config from {}: {}", path.display(), reason)
      }
    }
  }
}

/// Errors raised while parsing or navigating a structured file
#[derive(Debug)]
pub enum ParseError {
  /// Malformed JSON
  Json { path: PathBuf, source: serde_json::Error },

  /// Malformed TOML
  Toml {
    path: PathBuf,
    source: toml_edit::TomlError,
  },

  /// A segment of the key path does not exist (or is not a table/object)
  MissingKey { path: PathBuf, key: String },

  /// The key path resolves to something other than a string
  NotAString { path: PathBuf, key: String },

  /// The file format could not be determined from the extension
  UnknownFormat { path: PathBuf },
}

impl ParseError {
  fn help_message(&self) -> Option<String> {
    match self {
      ParseError::MissingKey { .. } | ParseError::NotAString { .. } => {
        Some("Check the `key` of this target in release.toml.".to_string())
      }
      ParseError::UnknownFormat { .. } => Some("Set `format = \"json\"` or `format = \"toml\"` on the target.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::Json { path, source } => write!(f, "Failed to parse {} as JSON: {}", path.display(), source),
      ParseError::Toml { path, source } => write!(f, "Failed to parse {} as TOML: {}", path.display(), source),
      ParseError::MissingKey { path, key } => write!(f, "Key '{}' not found in {}", key, path.display()),
      ParseError::NotAString { path, key } => {
        write!(f, "Key '{}' in {} does not hold a string value", key, path.display())
      }
      ParseError::UnknownFormat { path } => write!(f, "Cannot infer file format of {}", path.display()),
    }
  }
}

/// Errors from fetching a published manifest
#[derive(Debug)]
pub enum NetworkError {
  /// The request could not be sent or the body could not be read
  Request { url: String, source: reqwest::Error },

  /// The server answered with a non-success status
  Status { url: String, status: u16 },
}

impl fmt::Display for NetworkError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NetworkError::Request { url, source } => write!(f, "Request to {} failed: {}", url, source),
      NetworkError::Status { url, status } => write!(f, "GET {} returned HTTP {}", url, status),
    }
  }
}

/// Result type alias for release-kit
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
