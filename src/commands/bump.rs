//! `release-kit bump`: write the release version into every version target

use crate::core::config::ReleaseConfig;
use crate::core::env;
use crate::core::error::ReleaseResult;
use crate::ui::progress::TargetProgress;
use crate::version::{ConfigTarget, TargetOutcome};
use std::path::Path;

/// Run the bump command
pub fn run_bump(root: &Path, version: Option<String>, dry_run: bool) -> ReleaseResult<()> {
  // Resolve the version before touching anything
  let version = env::resolve_version(version)?;

  let config = ReleaseConfig::load(root)?;
  let targets = ConfigTarget::resolve_all(root, &config.targets)?;

  if targets.is_empty() {
    println!("⚠️  No version targets configured in release.toml");
    return Ok(());
  }

  println!("📦 Syncing version {} into {} file(s)", version, targets.len());
  println!();

  let mut lines = Vec::with_capacity(targets.len());
  let result = sync_targets(&targets, &version, dry_run, &mut lines);

  // Report what happened even when a later target failed
  for line in &lines {
    println!("{}", line);
  }
  result?;

  println!();
  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
  } else {
    println!("✅ Version {} synced", version);
  }

  Ok(())
}

/// Apply `version` to each target in order, stopping at the first failure
fn sync_targets(targets: &[ConfigTarget], version: &str, dry_run: bool, lines: &mut Vec<String>) -> ReleaseResult<()> {
  let mut progress = TargetProgress::new(targets.len(), "Syncing version");

  for target in targets {
    let outcome = target.apply(version, dry_run)?;
    progress.inc();
    lines.push(describe(target, &outcome, version));
  }

  Ok(())
}

fn describe(target: &ConfigTarget, outcome: &TargetOutcome, version: &str) -> String {
  let path = target.display_path.display();
  match outcome {
    TargetOutcome::Updated { previous } => {
      format!("   Updated {} ({}: {} → {})", path, target.key, previous, version)
    }
    TargetOutcome::WouldUpdate { previous } => {
      format!("   Would update {} ({}: {} → {})", path, target.key, previous, version)
    }
    TargetOutcome::Unchanged => format!("   Unchanged {} ({} already {})", path, target.key, version),
  }
}
