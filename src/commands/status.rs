use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::version::ConfigTarget;

/// Version stored in a single target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetStatus {
  /// Path as configured
  pub path: String,

  /// Key path of the version field
  pub key: String,

  /// File format
  pub format: String,

  /// Current value, if the target could be read
  pub version: Option<String>,

  /// Whether the value parses as semver
  pub semver: bool,

  /// Why the target could not be read
  pub error: Option<String>,
}

/// Versions across all targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
  pub targets: Vec<TargetStatus>,

  /// Every target is readable and holds the same version
  pub consistent: bool,
}

/// Run the status command
pub fn run_status(root: &Path, json: bool, strict: bool) -> ReleaseResult<()> {
  let config = ReleaseConfig::load(root)?;
  let targets = ConfigTarget::resolve_all(root, &config.targets)?;

  let report = collect_status(&targets);

  if json {
    let rendered = serde_json::to_string_pretty(&report).context("Failed to render status report")?;
    println!("{}", rendered);
  } else {
    print_status(&report);
  }

  if strict && !report.consistent {
    return Err(ReleaseError::with_help(
      "Version targets are out of sync",
      "Run `release-kit bump` to write one version everywhere.",
    ));
  }

  Ok(())
}

/// Read every target without failing on individual errors
pub fn collect_status(targets: &[ConfigTarget]) -> StatusReport {
  let statuses: Vec<TargetStatus> = targets
    .iter()
    .map(|target| {
      let (version, error) = match target.read_version() {
        Ok(v) => (Some(v), None),
        Err(e) => (None, Some(e.to_string())),
      };
      let semver = version
        .as_deref()
        .is_some_and(|v| semver::Version::parse(v).is_ok());

      TargetStatus {
        path: target.display_path.display().to_string(),
        key: target.key.clone(),
        format: target.format.as_str().to_string(),
        version,
        semver,
        error,
      }
    })
    .collect();

  let consistent = match statuses.first().and_then(|s| s.version.as_ref()) {
    Some(first) => statuses.iter().all(|s| s.version.as_ref() == Some(first)),
    None => statuses.is_empty(),
  };

  StatusReport {
    targets: statuses,
    consistent,
  }
}

fn print_status(report: &StatusReport) {
  println!("📋 Version targets");
  println!();

  if report.targets.is_empty() {
    println!("   (none configured)");
    return;
  }

  for status in &report.targets {
    match (&status.version, &status.error) {
      (Some(version), _) => {
        let note = if status.semver { "" } else { "  (not semver)" };
        println!("   {:<32} {:<18} {}{}", status.path, status.key, version, note);
      }
      (None, Some(error)) => {
        println!("   {:<32} {:<18} ❌ {}", status.path, status.key, error);
      }
      (None, None) => {}
    }
  }

  println!();
  if report.consistent {
    println!("✅ All targets agree");
  } else {
    println!("⚠️  Targets disagree");
  }
}
