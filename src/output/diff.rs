//! Diff output formatter for showing changed version lines

use crate::bump::BumpReport;
use crate::output::OutputFormatter;
use std::io::Write;

/// Diff formatter for showing the rewritten line of each file
#[derive(Debug, Default)]
pub struct DiffFormatter;

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new() -> Self {
        Self
    }
}

/// Changed lines between two versions of a file that differ in one line
fn changed_lines<'a>(original: &'a str, updated: &'a str) -> Vec<(usize, &'a str, &'a str)> {
    original
        .lines()
        .zip(updated.lines())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(index, (old, new))| (index + 1, old, new))
        .collect()
}

impl OutputFormatter for DiffFormatter {
    fn format_current(&self, version: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", version)
    }

    fn format_report(&self, report: &BumpReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = if report.dry_run { "(dry-run) " } else { "" };

        for change in report.plan.changes.iter().filter(|c| c.needs_write()) {
            writeln!(writer, "{}--- a/{}", prefix, change.path.display())?;
            writeln!(writer, "{}+++ b/{}", prefix, change.path.display())?;

            for (line, old, new) in changed_lines(&change.original, &change.updated) {
                writeln!(writer, "@@ -{line},1 +{line},1 @@")?;
                writeln!(writer, "-{}", old)?;
                writeln!(writer, "+{}", new)?;
            }

            writeln!(writer)?;
        }

        let count = report.plan.changes.iter().filter(|c| c.needs_write()).count();
        writeln!(writer, "{}# {} file(s) changed", prefix, count)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_report;

    #[test]
    fn test_changed_lines() {
        let lines = changed_lines("a\nb\nc\n", "a\nB\nc\n");
        assert_eq!(lines, vec![(2, "b", "B")]);
        assert!(changed_lines("a\n", "a\n").is_empty());
    }

    #[test]
    fn test_format_diff() {
        let mut output = Vec::new();
        DiffFormatter::new()
            .format_report(&sample_report(false), &mut output)
            .unwrap();
        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("--- a/pyproject.toml"));
        assert!(output_str.contains("+++ b/pyproject.toml"));
        assert!(output_str.contains("@@ -2,1 +2,1 @@"));
        assert!(output_str.contains("-version = \"1.2.3\""));
        assert!(output_str.contains("+version = \"1.3.0\""));
        assert!(!output_str.contains("pkg/version.py"));
        assert!(output_str.contains("# 1 file(s) changed"));
    }

    #[test]
    fn test_format_diff_dry_run() {
        let mut output = Vec::new();
        DiffFormatter::new()
            .format_report(&sample_report(true), &mut output)
            .unwrap();
        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("(dry-run) --- a/pyproject.toml"));
    }
}
