//! CLI argument parsing module for verbump

use clap::Parser;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Accept any non-blank, single-line version token verbatim
fn parse_version(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("version must not be empty".to_string());
    }
    if s.contains(['\n', '\r']) {
        return Err("version must not contain line breaks".to_string());
    }
    Ok(s.to_string())
}

/// Propagate a release version into project metadata files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "verbump",
    about = "Propagate a release version into project metadata files"
)]
pub struct CliArgs {
    /// New version to write; prints the current version when omitted
    #[arg(value_parser = parse_version)]
    pub new_version: Option<String>,

    /// Project root that configured paths are relative to
    #[arg(short = 'C', long = "path", default_value = ".")]
    pub path: PathBuf,

    /// Config file (default: .versionrc.toml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    // General options
    /// Dry run mode - show what would be written without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Fail when a bump file has no version marker
    #[arg(long)]
    pub strict: bool,

    /// Do not run the post-bump script
    #[arg(long)]
    pub no_script: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long, conflicts_with = "diff")]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Print version information
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,
}

impl CliArgs {
    /// Returns the default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Whether text output should be colored
    pub fn use_color(&self) -> bool {
        color_enabled(self.no_color, std::env::var_os("NO_COLOR").as_deref())
    }
}

/// A non-empty NO_COLOR disables color the same way `--no-color` does
fn color_enabled(no_color_flag: bool, no_color_env: Option<&OsStr>) -> bool {
    match no_color_env {
        Some(value) if !value.is_empty() => false,
        _ => !no_color_flag,
    }
}
