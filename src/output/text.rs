//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-file bump results with colors
//! - Warnings for bump files without a version marker
//! - Post-bump script outcome

use crate::bump::{BumpReport, ChangeStatus, FileChange};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, dry_run: bool) -> String {
        if !dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn paint(&self, text: &str, status: ChangeStatus) -> String {
        if !self.color {
            return text.to_string();
        }
        match status {
            ChangeStatus::Updated => text.green().to_string(),
            ChangeStatus::UpToDate => text.dimmed().to_string(),
            ChangeStatus::MarkerMissing => text.yellow().to_string(),
        }
    }

    fn format_change(
        &self,
        change: &FileChange,
        new_version: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let path = change.path.display();
        match change.status {
            ChangeStatus::Updated => {
                let from = change.previous_version.as_deref().unwrap_or("?");
                writeln!(
                    writer,
                    "  {} {} -> {}",
                    path,
                    from,
                    self.paint(new_version, change.status)
                )?;
            }
            ChangeStatus::UpToDate => {
                if self.verbosity == Verbosity::Verbose {
                    writeln!(
                        writer,
                        "  {} {}",
                        path,
                        self.paint(change.status.label(), change.status)
                    )?;
                }
            }
            ChangeStatus::MarkerMissing => {
                writeln!(
                    writer,
                    "  {} {} ({})",
                    path,
                    self.paint(change.status.label(), change.status),
                    change.convention
                )?;
            }
        }

        if self.verbosity == Verbosity::Verbose && change.status != ChangeStatus::UpToDate {
            let role = if change.package_file {
                "package file"
            } else {
                "bump file"
            };
            writeln!(writer, "    {} [{}]", role, change.convention)?;
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_current(&self, version: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", version)
    }

    fn format_report(&self, report: &BumpReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(report.dry_run);
        let plan = &report.plan;

        if self.verbosity == Verbosity::Quiet {
            writeln!(writer, "{}{}", prefix, plan.new_version)?;
            return Ok(());
        }

        writeln!(
            writer,
            "{}Bumping {} -> {}",
            prefix, report.current_version, plan.new_version
        )?;
        for change in &plan.changes {
            self.format_change(change, &plan.new_version, writer)?;
        }

        if let Some(script) = &report.script {
            let status = if script.success { "ok" } else { "failed" };
            let status = match (self.color, script.success) {
                (false, _) => status.to_string(),
                (true, true) => status.green().to_string(),
                (true, false) => status.red().to_string(),
            };
            writeln!(writer, "  postbump: {} ({})", script.command, status)?;
            if self.verbosity == Verbosity::Verbose && !script.stdout.is_empty() {
                write!(writer, "{}", script.stdout)?;
            }
        }

        let updated = plan.count(ChangeStatus::Updated);
        let missing = plan.count(ChangeStatus::MarkerMissing);
        write!(writer, "{}{} file(s) updated", prefix, updated)?;
        if missing > 0 {
            write!(writer, ", {} without a version marker", missing)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
