mod commands;
mod core;
mod manifest;
mod ui;
mod version;

use clap::{Parser, Subcommand};
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Keep app versions in sync and publish auto-update manifests
#[derive(Parser)]
#[command(name = "release-kit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Project root containing release.toml and the version targets
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write the release version into every configured file
  Bump {
    /// Version to write (default: $VERSION)
    #[arg(long = "set", value_name = "VERSION")]
    release: Option<String>,
    /// Show what would change without writing
    #[arg(long)]
    dry_run: bool,
  },

  /// Build the auto-update manifest for this release
  Manifest {
    /// Release version (default: $VERSION)
    #[arg(long = "set", value_name = "VERSION")]
    release: Option<String>,
    /// Detached signature file of the update bundle
    #[arg(long, value_name = "PATH")]
    signature: Option<PathBuf>,
    /// Download URL template; `{version}` and `{platform}` are substituted
    #[arg(long, value_name = "TEMPLATE")]
    url_template: Option<String>,
    /// Manifest file to write (default: manifest.json)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Write mode: append (concatenate), overwrite (single document), merge (overlay on published manifest)
    #[arg(long)]
    mode: Option<String>,
    /// Published manifest to merge onto (merge mode)
    #[arg(long, value_name = "URL")]
    existing_url: Option<String>,
    /// Release notes
    #[arg(long)]
    notes: Option<String>,
    /// Platform identifier to publish (repeatable)
    #[arg(long = "platform", value_name = "ID")]
    platforms: Vec<String>,
  },

  /// Show the version each configured file currently holds
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
    /// Exit with an error when the files disagree
    #[arg(long)]
    strict: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let result = match cli.command {
    Commands::Bump { release, dry_run } => commands::run_bump(&root, release, dry_run),
    Commands::Manifest {
      release,
      signature,
      url_template,
      output,
      mode,
      existing_url,
      notes,
      platforms,
    } => commands::run_manifest(
      &root,
      commands::ManifestArgs {
        version: release,
        signature,
        url_template,
        output,
        mode,
        existing_url,
        notes,
        platforms,
      },
    ),
    Commands::Status { json, strict } => commands::run_status(&root, json, strict),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
