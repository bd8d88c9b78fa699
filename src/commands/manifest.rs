//! `release-kit manifest`: build the updater manifest for a release

use crate::core::config::{ManifestConfig, ReleaseConfig, WriteMode};
use crate::core::env;
use crate::core::error::{ConfigError, ReleaseResult};
use crate::manifest::{ManifestBuilder, ManifestOptions, MergeBase};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Command-line overrides for the `[manifest]` section
#[derive(Debug, Default)]
pub struct ManifestArgs {
  pub version: Option<String>,
  pub signature: Option<PathBuf>,
  pub url_template: Option<String>,
  pub output: Option<PathBuf>,
  pub mode: Option<String>,
  pub existing_url: Option<String>,
  pub notes: Option<String>,
  pub platforms: Vec<String>,
}

/// Run the manifest command
pub fn run_manifest(root: &Path, args: ManifestArgs) -> ReleaseResult<()> {
  let version = env::resolve_version(args.version.clone())?;

  let config = ReleaseConfig::load(root)?;
  let options = resolve_options(root, &config.manifest, args)?;

  let report = ManifestBuilder::new(&options).run(&version, Utc::now())?;

  println!("{}", report.text.trim_end());
  println!();

  match &report.base {
    MergeBase::Remote(url) => println!("   Merged onto published manifest {}", url),
    MergeBase::Local(path) => println!("   Merged onto {}", path.display()),
    MergeBase::None => {}
  }
  let verb = match options.mode {
    WriteMode::Append => "Appended to",
    WriteMode::Overwrite | WriteMode::Merge => "Wrote",
  };
  println!(
    "✅ Updated release manifest for {} ({} {}, {} platforms)",
    report.descriptor.version,
    verb,
    options.output.display(),
    report.descriptor.platforms.len()
  );

  Ok(())
}

/// Combine config and command-line values; the command line wins
pub fn resolve_options(root: &Path, config: &ManifestConfig, args: ManifestArgs) -> ReleaseResult<ManifestOptions> {
  let signature = args
    .signature
    .or_else(|| config.signature.clone())
    .ok_or_else(|| ConfigError::MissingField {
      field: "manifest.signature".to_string(),
    })?;

  let url_template = args
    .url_template
    .or_else(|| config.url_template.clone())
    .ok_or_else(|| ConfigError::MissingField {
      field: "manifest.url_template".to_string(),
    })?;

  let mode = match args.mode {
    Some(mode) => mode.parse::<WriteMode>()?,
    None => config.mode,
  };

  let platforms = if args.platforms.is_empty() {
    config.platforms.clone()
  } else {
    args.platforms
  };

  Ok(ManifestOptions {
    signature: root.join(signature),
    url_template,
    output: root.join(args.output.unwrap_or_else(|| config.output.clone())),
    mode,
    platforms,
    existing_url: args.existing_url.or_else(|| config.existing_url.clone()),
    notes: args.notes.or_else(|| config.notes.clone()),
  })
}
