//! Release manifest construction
//!
//! Builds a [`ReleaseDescriptor`] from the release version, the detached
//! signature of the update bundle and a download URL template, then writes it
//! to the manifest file according to a [`WriteMode`]:
//!
//! - `append`: the serialized descriptor is appended; the file is created if
//!   needed. Repeated runs leave concatenated JSON documents behind.
//! - `overwrite`: the file holds exactly the new descriptor.
//! - `merge`: the previously published manifest (fetched from
//!   `existing_url`, or read from the output file) is the base; the new
//!   descriptor's platforms are laid over it and the result replaces the file.
//!
//! The signature is read before anything is written, so a missing signature
//! never leaves a partial manifest.

pub mod descriptor;
pub mod fetch;

pub use descriptor::{DescriptorInput, ReleaseDescriptor};

use crate::core::config::WriteMode;
use crate::core::error::{ParseError, ReleaseResult, ResultExt};
use crate::core::fs;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Fully resolved manifest settings (config merged with CLI overrides)
#[derive(Debug, Clone)]
pub struct ManifestOptions {
  pub signature: PathBuf,
  pub url_template: String,
  pub output: PathBuf,
  pub mode: WriteMode,
  pub platforms: Vec<String>,
  pub existing_url: Option<String>,
  pub notes: Option<String>,
}

/// Where a merge base came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeBase {
  Remote(String),
  Local(PathBuf),
  None,
}

/// Result of writing a manifest
#[derive(Debug, Clone)]
pub struct ManifestReport {
  /// Descriptor as written to disk
  pub descriptor: ReleaseDescriptor,
  /// Exact text written (appended or replaced)
  pub text: String,
  pub base: MergeBase,
}

pub struct ManifestBuilder<'a> {
  options: &'a ManifestOptions,
}

impl<'a> ManifestBuilder<'a> {
  pub fn new(options: &'a ManifestOptions) -> Self {
    Self { options }
  }

  /// Read the signature and build the descriptor for `version`
  pub fn build(&self, version: &str, now: DateTime<Utc>) -> ReleaseResult<ReleaseDescriptor> {
    let signature = fs::read_to_string(&self.options.signature)?;

    let input = DescriptorInput {
      version,
      signature: &signature,
      url_template: &self.options.url_template,
      platforms: &self.options.platforms,
      notes: self.options.notes.as_deref(),
    };

    Ok(ReleaseDescriptor::build(&input, now))
  }

  /// Write `descriptor` to the output file according to the configured mode
  pub fn write(&self, descriptor: ReleaseDescriptor) -> ReleaseResult<ManifestReport> {
    let output = &self.options.output;

    match self.options.mode {
      WriteMode::Append => {
        let text = descriptor
          .to_json()
          .with_context(|| format!("Failed to serialize release {}", descriptor.version))?;
        fs::append(output, &text)?;
        Ok(ManifestReport {
          descriptor,
          text,
          base: MergeBase::None,
        })
      }
      WriteMode::Overwrite => {
        let text = render_document(&descriptor)?;
        fs::write_atomic(output, &text)?;
        Ok(ManifestReport {
          descriptor,
          text,
          base: MergeBase::None,
        })
      }
      WriteMode::Merge => {
        let (base, origin) = self.load_base()?;
        let merged = match &base {
          Some(base) => descriptor.merged_onto(base),
          None => descriptor,
        };
        let text = render_document(&merged)?;
        fs::write_atomic(output, &text)?;
        Ok(ManifestReport {
          descriptor: merged,
          text,
          base: origin,
        })
      }
    }
  }

  /// Build and write in one step
  pub fn run(&self, version: &str, now: DateTime<Utc>) -> ReleaseResult<ManifestReport> {
    let descriptor = self.build(version, now)?;
    self.write(descriptor)
  }

  /// Load the manifest to merge onto: remote first, then the local output file
  fn load_base(&self) -> ReleaseResult<(Option<ReleaseDescriptor>, MergeBase)> {
    if let Some(url) = &self.options.existing_url {
      let body = fetch::fetch_text(url)?;
      let base = parse_descriptor(&PathBuf::from(url), &body)?;
      return Ok((Some(base), MergeBase::Remote(url.clone())));
    }

    let output = &self.options.output;
    if output.exists() {
      let body = fs::read_to_string(output)?;
      let base = parse_descriptor(output, &body)?;
      return Ok((Some(base), MergeBase::Local(output.clone())));
    }

    Ok((None, MergeBase::None))
  }
}

fn render_document(descriptor: &ReleaseDescriptor) -> ReleaseResult<String> {
  let mut text = descriptor
    .to_json()
    .with_context(|| format!("Failed to serialize release {}", descriptor.version))?;
  text.push('\n');
  Ok(text)
}

fn parse_descriptor(origin: &std::path::Path, body: &str) -> ReleaseResult<ReleaseDescriptor> {
  serde_json::from_str(body).map_err(|source| {
    ParseError::Json {
      path: origin.to_path_buf(),
      source,
    }
    .into()
  })
}
