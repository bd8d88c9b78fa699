//! Progress indicators for multi-file operations
//!
//! Uses `linya`, which draws to stderr and stays out of stdout so JSON
//! output remains machine-readable.

use linya::{Bar, Progress};

/// Progress bar over a batch of version targets
pub struct TargetProgress {
  progress: Progress,
  bar: Bar,
}

impl TargetProgress {
  /// Create a new progress bar for `total` targets
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
