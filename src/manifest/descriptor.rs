//! Release descriptor: the document an auto-updater polls

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One downloadable artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformEntry {
  pub signature: String,
  pub url: String,
  /// Fields other tools added to a published entry
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A single release as published to updater clients
///
/// ```json
/// {
///   "version": "1.2.3",
///   "pub_date": "2025-01-15T10:00:00.000000+00:00",
///   "platforms": {
///     "darwin-aarch64": { "signature": "...", "url": "https://..." }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseDescriptor {
  pub version: String,
  pub pub_date: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  pub platforms: BTreeMap<String, PlatformEntry>,
  /// Top-level fields carried over from a published manifest
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Inputs for building a descriptor
#[derive(Debug, Clone)]
pub struct DescriptorInput<'a> {
  pub version: &'a str,
  pub signature: &'a str,
  pub url_template: &'a str,
  pub platforms: &'a [String],
  pub notes: Option<&'a str>,
}

impl ReleaseDescriptor {
  /// Build a descriptor published at `now`
  ///
  /// Every platform receives the same signature. URLs come from the template,
  /// so platforms share a URL unless the template mentions `{platform}`.
  pub fn build(input: &DescriptorInput<'_>, now: DateTime<Utc>) -> Self {
    let platforms = input
      .platforms
      .iter()
      .map(|platform| {
        (
          platform.clone(),
          PlatformEntry {
            signature: input.signature.to_string(),
            url: expand_url(input.url_template, input.version, platform),
            extra: Map::new(),
          },
        )
      })
      .collect();

    Self {
      version: input.version.to_string(),
      pub_date: format_pub_date(now),
      notes: input.notes.map(str::to_string),
      platforms,
      extra: Map::new(),
    }
  }

  /// Overlay this descriptor on a previously published one
  ///
  /// Version, date and notes come from `self`; platforms missing from `self`
  /// are carried over from `base`. Unknown fields of `base`, top-level and
  /// per-platform, survive unless `self` sets them.
  pub fn merged_onto(&self, base: &ReleaseDescriptor) -> ReleaseDescriptor {
    let mut platforms = base.platforms.clone();
    for (id, entry) in &self.platforms {
      let mut extra = platforms.remove(id).map(|old| old.extra).unwrap_or_default();
      extra.extend(entry.extra.clone());
      platforms.insert(
        id.clone(),
        PlatformEntry {
          signature: entry.signature.clone(),
          url: entry.url.clone(),
          extra,
        },
      );
    }

    let mut extra = base.extra.clone();
    extra.extend(self.extra.clone());

    ReleaseDescriptor {
      version: self.version.clone(),
      pub_date: self.pub_date.clone(),
      notes: self.notes.clone(),
      platforms,
      extra,
    }
  }

  /// Serialize with 2-space indentation
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

/// ISO-8601 UTC timestamp with microseconds and an explicit `+00:00` offset
pub fn format_pub_date(now: DateTime<Utc>) -> String {
  now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Substitute `{version}` and `{platform}` in a URL template
pub fn expand_url(template: &str, version: &str, platform: &str) -> String {
  template.replace("{version}", version).replace("{platform}", platform)
}
