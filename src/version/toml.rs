//! TOML version targets (Cargo.toml)
//!
//! Edited through `toml_edit` so comments, ordering and spacing survive. Only
//! the version value itself is replaced, keeping its surrounding decor.

use crate::core::error::{ParseError, ReleaseError, ReleaseResult};
use std::path::Path;
use toml_edit::{DocumentMut, Item, TableLike, Value};

/// Read the string stored at `key`
pub fn get_version(path: &Path, content: &str, key: &str) -> ReleaseResult<String> {
  let doc = parse(path, content)?;

  let (parents, leaf) = split_key(key);
  let mut table: &dyn TableLike = doc.as_table();
  for segment in parents {
    table = table
      .get(segment)
      .and_then(Item::as_table_like)
      .ok_or_else(|| missing_key(path, key))?;
  }

  let item = table.get(leaf).ok_or_else(|| missing_key(path, key))?;
  item
    .as_str()
    .map(str::to_string)
    .ok_or_else(|| not_a_string(path, key))
}

/// Set the string at `key` to `version`
///
/// Returns the previous value and the re-serialized document.
pub fn set_version(path: &Path, content: &str, key: &str, version: &str) -> ReleaseResult<(String, String)> {
  let mut doc = parse(path, content)?;

  let (parents, leaf) = split_key(key);
  let mut table: &mut dyn TableLike = doc.as_table_mut();
  for segment in parents {
    table = table
      .get_mut(segment)
      .and_then(Item::as_table_like_mut)
      .ok_or_else(|| missing_key(path, key))?;
  }

  let value = table
    .get_mut(leaf)
    .ok_or_else(|| missing_key(path, key))?
    .as_value_mut()
    .ok_or_else(|| not_a_string(path, key))?;

  let previous = value.as_str().map(str::to_string).ok_or_else(|| not_a_string(path, key))?;

  let decor = value.decor().clone();
  *value = Value::from(version);
  *value.decor_mut() = decor;

  Ok((previous, doc.to_string()))
}

fn parse(path: &Path, content: &str) -> ReleaseResult<DocumentMut> {
  content.parse::<DocumentMut>().map_err(|source| {
    ParseError::Toml {
      path: path.to_path_buf(),
      source,
    }
    .into()
  })
}

/// Split `a.b.c` into (`[a, b]`, `c`)
fn split_key(key: &str) -> (Vec<&str>, &str) {
  let mut segments: Vec<&str> = key.split('.').collect();
  let leaf = segments.pop().unwrap_or_default();
  (segments, leaf)
}

fn missing_key(path: &Path, key: &str) -> ReleaseError {
  ParseError::MissingKey {
    path: path.to_path_buf(),
    key: key.to_string(),
  }
  .into()
}

fn not_a_string(path: &Path, key: &str) -> ReleaseError {
  ParseError::NotAString {
    path: path.to_path_buf(),
    key: key.to_string(),
  }
  .into()
}
