//! Integration tests for `release-kit manifest`

use crate::helpers::*;
use anyhow::Result;

const URL_1_2_3: &str = "https://storage.example.com/pretzl-releases/1.2.3/macos/Pretzl.app.tar.gz";

#[test]
fn test_manifest_populates_both_darwin_platforms() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;

  let output = run_release_kit(&project.path, &["manifest"], Some("1.2.3"))?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Updated release manifest for 1.2.3"), "{}", stdout);
  assert!(stdout.contains("2 platforms"), "{}", stdout);

  let manifest: serde_json::Value = serde_json::from_str(&project.read_file("manifest.json")?)?;
  assert_eq!(manifest["version"], "1.2.3");
  for platform in ["darwin-aarch64", "darwin-x86_64"] {
    assert_eq!(manifest["platforms"][platform]["signature"], "SIGABC");
    assert_eq!(manifest["platforms"][platform]["url"], URL_1_2_3);
  }

  let pub_date = manifest["pub_date"].as_str().unwrap();
  assert!(pub_date.ends_with("+00:00"), "pub_date should be UTC: {}", pub_date);
  assert!(chrono::DateTime::parse_from_rfc3339(pub_date).is_ok());
  Ok(())
}

#[test]
fn test_manifest_uses_two_space_indent() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;

  run_release_kit(&project.path, &["manifest"], Some("1.2.3"))?;

  let manifest = project.read_file("manifest.json")?;
  assert!(manifest.starts_with("{\n  \"version\": \"1.2.3\",\n  \"pub_date\": "));
  assert!(manifest.contains("\n  \"platforms\": {\n    \"darwin-aarch64\": {\n      \"signature\": \"SIGABC\""));
  Ok(())
}

#[test]
fn test_manifest_appends_by_default() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;
  project.write_file("manifest.json", "PREVIOUS")?;

  run_release_kit(&project.path, &["manifest"], Some("1.2.3"))?;
  run_release_kit(&project.path, &["manifest"], Some("1.2.4"))?;

  let manifest = project.read_file("manifest.json")?;
  assert!(manifest.starts_with("PREVIOUS{"));
  assert_eq!(manifest.matches("\"version\"").count(), 2);
  Ok(())
}

#[test]
fn test_manifest_overwrite_mode() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;
  project.write_file("manifest.json", "PREVIOUS")?;

  run_release_kit(&project.path, &["manifest", "--mode", "overwrite"], Some("1.2.3"))?;

  let manifest: serde_json::Value = serde_json::from_str(&project.read_file("manifest.json")?)?;
  assert_eq!(manifest["version"], "1.2.3");
  Ok(())
}

#[test]
fn test_manifest_missing_signature_writes_nothing() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;

  let output = release_kit(&project.path, &["manifest"], Some("1.2.3"))?;

  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Pretzl.app.tar.gz.sig"));
  assert!(!project.file_exists("manifest.json"));
  Ok(())
}

#[test]
fn test_manifest_missing_version_is_config_error() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;

  let output = release_kit(&project.path, &["manifest"], None)?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!project.file_exists("manifest.json"));
  Ok(())
}

#[test]
fn test_manifest_requires_url_template() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file(SIG_PATH, "SIGABC")?;

  let output = release_kit(&project.path, &["manifest", "--signature", SIG_PATH], Some("1.2.3"))?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("manifest.url_template"));
  Ok(())
}

#[test]
fn test_manifest_cli_flags_without_config() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file("bundle/App.sig", "SIG")?;

  run_release_kit(
    &project.path,
    &[
      "manifest",
      "--signature",
      "bundle/App.sig",
      "--url-template",
      "https://cdn.example.com/{version}/{platform}/App.tar.gz",
      "--output",
      "releases.json",
      "--platform",
      "linux-x86_64",
      "--platform",
      "windows-x86_64",
      "--notes",
      "First public build",
    ],
    Some("0.5.0"),
  )?;

  let manifest: serde_json::Value = serde_json::from_str(&project.read_file("releases.json")?)?;
  assert_eq!(manifest["notes"], "First public build");
  assert_eq!(
    manifest["platforms"]["linux-x86_64"]["url"],
    "https://cdn.example.com/0.5.0/linux-x86_64/App.tar.gz"
  );
  assert_eq!(
    manifest["platforms"]["windows-x86_64"]["url"],
    "https://cdn.example.com/0.5.0/windows-x86_64/App.tar.gz"
  );
  assert!(manifest["platforms"].get("darwin-aarch64").is_none());
  Ok(())
}

#[tokio::test]
async fn test_manifest_merge_with_published_manifest() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file(SIG_PATH, "NEWSIG")?;

  let published = r#"{
  "version": "1.0.0",
  "pub_date": "2025-01-01T00:00:00.000000+00:00",
  "platforms": {
    "windows-x86_64": { "signature": "WINSIG", "url": "https://example.com/1.0.0/Pretzl.msi.zip" },
    "darwin-aarch64": { "signature": "OLDSIG", "url": "https://example.com/1.0.0/Pretzl.app.tar.gz" }
  }
}"#;
  let server = published_manifest(200, published).await;
  project.write_manifest_config(&format!(
    "mode = \"merge\"\nexisting_url = \"{}/releases.json\"\n",
    server.uri()
  ))?;

  let output = release_kit_blocking(&project.path, &["manifest"], Some("1.2.3")).await?;
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
  assert!(String::from_utf8_lossy(&output.stdout).contains("Merged onto published manifest"));

  let manifest: serde_json::Value = serde_json::from_str(&project.read_file("manifest.json")?)?;
  assert_eq!(manifest["version"], "1.2.3");
  assert_eq!(manifest["platforms"]["windows-x86_64"]["signature"], "WINSIG");
  assert_eq!(manifest["platforms"]["darwin-aarch64"]["signature"], "NEWSIG");
  assert_eq!(manifest["platforms"]["darwin-x86_64"]["url"], URL_1_2_3);
  Ok(())
}

#[tokio::test]
async fn test_manifest_merge_fetch_failure_is_network_error() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file(SIG_PATH, "SIGABC")?;
  let server = published_manifest(500, "").await;
  project.write_manifest_config(&format!(
    "mode = \"merge\"\nexisting_url = \"{}/releases.json\"\n",
    server.uri()
  ))?;

  let output = release_kit_blocking(&project.path, &["manifest"], Some("1.2.3")).await?;

  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("500"));
  assert!(!project.file_exists("manifest.json"));
  Ok(())
}

#[test]
fn test_manifest_invalid_mode() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;

  let output = release_kit(&project.path, &["manifest", "--mode", "prepend"], Some("1.2.3"))?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!project.file_exists("manifest.json"));
  Ok(())
}

#[test]
fn test_manifest_overwrite_into_new_directory() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_manifest_config("")?;
  project.write_file(SIG_PATH, "SIGABC")?;

  run_release_kit(
    &project.path,
    &["manifest", "--mode", "overwrite", "--output", "dist/manifest.json"],
    Some("1.2.3"),
  )?;

  let manifest: serde_json::Value = serde_json::from_str(&project.read_file("dist/manifest.json")?)?;
  assert_eq!(manifest["version"], "1.2.3");
  Ok(())
}
