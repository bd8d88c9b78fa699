//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PACKAGE_JSON: &str = r#"{"name":"pretzl","private":true,"version":"0.1.0","scripts":{"dev":"vite","tauri":"tauri"},"devDependencies":{"@tauri-apps/cli":"^1.5.0"}}"#;

pub const TAURI_CONF: &str = r#"{
    "build": {
        "beforeBuildCommand": "npm run build",
        "distDir": "../dist"
    },
    "package": {
        "productName": "Pretzl",
        "version": "0.1.0"
    },
    "tauri": {
        "updater": {
            "active": true,
            "endpoints": ["https://storage.example.com/pretzl-releases/manifest.json"]
        }
    }
}"#;

pub const CARGO_TOML: &str = r#"[package]
name = "pretzl"
version = "0.1.0"
description = "A Tauri App"
edition = "2021"

# See more keys at https://doc.rust-lang.org/cargo/reference/manifest.html

[build-dependencies]
tauri-build = { version = "1.5", features = [] }

[dependencies]
tauri = { version = "1.5", features = ["updater"] }
serde_json = "1.0"
"#;

pub const SIG_PATH: &str = "src-tauri/target/universal-apple-darwin/release/bundle/macos/Pretzl.app.tar.gz.sig";

pub const URL_TEMPLATE: &str = "https://storage.example.com/pretzl-releases/{version}/macos/Pretzl.app.tar.gz";

/// A throwaway Tauri project layout
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Empty project directory
  pub fn empty() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Project with package.json, tauri.conf.json and Cargo.toml at their default locations
  pub fn tauri() -> Result<Self> {
    let project = Self::empty()?;
    project.write_file("package.json", PACKAGE_JSON)?;
    project.write_file("src-tauri/tauri.conf.json", TAURI_CONF)?;
    project.write_file("src-tauri/Cargo.toml", CARGO_TOML)?;
    Ok(project)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Write release.toml with the manifest settings used by most tests
  pub fn write_manifest_config(&self, extra: &str) -> Result<()> {
    self.write_file(
      "release.toml",
      &format!(
        "[manifest]\nsignature = \"{}\"\nurl_template = \"{}\"\n{}",
        SIG_PATH, URL_TEMPLATE, extra
      ),
    )
  }
}

/// Run release-kit with VERSION set (or unset when `version` is None), returning output regardless of status
pub fn release_kit(cwd: &Path, args: &[&str], version: Option<&str>) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-kit");

  let mut cmd = Command::new(bin);
  cmd
    .current_dir(cwd)
    .args(args)
    .env_remove("VERSION")
    .env_remove("HTTP_PROXY")
    .env_remove("http_proxy")
    .env_remove("ALL_PROXY")
    .env_remove("all_proxy");
  if let Some(version) = version {
    cmd.env("VERSION", version);
  }

  cmd.output().context("Failed to run release-kit")
}

/// Run release-kit and require success
pub fn run_release_kit(cwd: &Path, args: &[&str], version: Option<&str>) -> Result<Output> {
  let output = release_kit(cwd, args, version)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-kit command failed: release-kit {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Start a server publishing `body` at `/releases.json` with the given status
pub async fn published_manifest(status: u16, body: &str) -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/releases.json"))
    .respond_with(
      ResponseTemplate::new(status)
        .insert_header("content-type", "application/json")
        .set_body_string(body),
    )
    .mount(&server)
    .await;
  server
}

/// Run release-kit from an async test without blocking the runtime
pub async fn release_kit_blocking(cwd: &Path, args: &'static [&'static str], version: Option<&'static str>) -> Result<Output> {
  let cwd = cwd.to_path_buf();
  tokio::task::spawn_blocking(move || release_kit(&cwd, args, version)).await?
}
