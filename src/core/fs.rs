//! File helpers shared by the version and manifest writers

use crate::core::error::{ReleaseError, ReleaseResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a whole file as UTF-8, reporting the path on failure
pub fn read_to_string(path: &Path) -> ReleaseResult<String> {
  fs::read_to_string(path).map_err(|e| ReleaseError::io(path, e))
}

/// Replace `path` with `contents` in one step
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over the target. Readers never observe a half-written file.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> ReleaseResult<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  fs::create_dir_all(dir).map_err(|e| ReleaseError::io(dir, e))?;

  let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ReleaseError::io(dir, e))?;
  tmp
    .write_all(contents.as_bytes())
    .map_err(|e| ReleaseError::io(tmp.path(), e))?;
  tmp.as_file().sync_all().map_err(|e| ReleaseError::io(tmp.path(), e))?;

  // Temp files are created 0600; keep the original file's mode
  if let Ok(meta) = fs::metadata(path) {
    fs::set_permissions(tmp.path(), meta.permissions()).map_err(|e| ReleaseError::io(tmp.path(), e))?;
  }

  tmp.persist(path).map_err(|e| ReleaseError::io(path, e.error))?;

  Ok(())
}

/// Append `contents` to `path`, creating the file if it does not exist
pub fn append(path: &Path, contents: &str) -> ReleaseResult<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|e| ReleaseError::io(parent, e))?;
  }

  let mut file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .map_err(|e| ReleaseError::io(path, e))?;
  file
    .write_all(contents.as_bytes())
    .map_err(|e| ReleaseError::io(path, e))?;

  Ok(())
}
