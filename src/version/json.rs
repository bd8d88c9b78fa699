//! JSON version targets (package.json, tauri.conf.json)
//!
//! Documents are parsed into `serde_json::Value` with `preserve_order`, so
//! keys come back out in file order, and `arbitrary_precision`, so numbers keep
//! their original text. Output is 2-space indented with a
//! trailing newline.

use crate::core::error::{ParseError, ReleaseResult};
use serde_json::Value;
use std::path::Path;

/// Read the string stored at `key`
pub fn get_version(path: &Path, content: &str, key: &str) -> ReleaseResult<String> {
  let doc = parse(path, content)?;

  let mut current = &doc;
  for segment in key.split('.') {
    current = current
      .as_object()
      .and_then(|obj| obj.get(segment))
      .ok_or_else(|| missing_key(path, key))?;
  }

  current
    .as_str()
    .map(str::to_string)
    .ok_or_else(|| not_a_string(path, key))
}

/// Set the string at `key` to `version`
///
/// Returns the previous value and the re-serialized document.
pub fn set_version(path: &Path, content: &str, key: &str, version: &str) -> ReleaseResult<(String, String)> {
  let mut doc = parse(path, content)?;

  let mut current = &mut doc;
  for segment in key.split('.') {
    current = current
      .as_object_mut()
      .and_then(|obj| obj.get_mut(segment))
      .ok_or_else(|| missing_key(path, key))?;
  }

  let previous = current
    .as_str()
    .map(str::to_string)
    .ok_or_else(|| not_a_string(path, key))?;
  *current = Value::String(version.to_string());

  Ok((previous, render(&doc)?))
}

fn parse(path: &Path, content: &str) -> ReleaseResult<Value> {
  serde_json::from_str(content).map_err(|source| {
    ParseError::Json {
      path: path.to_path_buf(),
      source,
    }
    .into()
  })
}

fn render(doc: &Value) -> ReleaseResult<String> {
  let mut out = serde_json::to_string_pretty(doc)?;
  out.push('\n');
  Ok(out)
}

fn missing_key(path: &Path, key: &str) -> crate::core::error::ReleaseError {
  ParseError::MissingKey {
    path: path.to_path_buf(),
    key: key.to_string(),
  }
  .into()
}

fn not_a_string(path: &Path, key: &str) -> crate::core::error::ReleaseError {
  ParseError::NotAString {
    path: path.to_path_buf(),
    key: key.to_string(),
  }
  .into()
}
