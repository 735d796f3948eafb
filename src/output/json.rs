//! JSON output formatter for machine processing

use crate::bump::{BumpReport, ChangeStatus};
use crate::output::{OutputFormatter, Verbosity};
use crate::script::ScriptResult;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the current version
#[derive(Serialize)]
struct JsonCurrent<'a> {
    version: &'a str,
}

/// JSON representation of a bump run
#[derive(Serialize)]
struct JsonOutput<'a> {
    dry_run: bool,
    from: &'a str,
    to: &'a str,
    files: Vec<JsonFile<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    script: Option<&'a ScriptResult>,
}

/// JSON representation of one bump file
#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    convention: &'a str,
    package_file: bool,
    status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_version: Option<&'a str>,
    written: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format_current(&self, version: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&JsonCurrent { version })?;
        writeln!(writer, "{}", json)
    }

    fn format_report(&self, report: &BumpReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let files = report
            .plan
            .changes
            .iter()
            // up-to-date files are only listed in verbose mode
            .filter(|c| {
                self.verbosity == Verbosity::Verbose || c.status != ChangeStatus::UpToDate
            })
            .map(|change| JsonFile {
                path: change.path.display().to_string(),
                convention: &change.convention,
                package_file: change.package_file,
                status: change.status,
                previous_version: change.previous_version.as_deref(),
                written: report.written.contains(&change.path),
            })
            .collect();

        let output = JsonOutput {
            dry_run: report.dry_run,
            from: &report.current_version,
            to: &report.plan.new_version,
            files,
            script: report.script.as_ref(),
        };

        let json = serde_json::to_string_pretty(&output)?;
        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_report;

    fn render(report: &BumpReport, verbosity: Verbosity) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new(verbosity)
            .format_report(report, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_format_current() {
        let mut output = Vec::new();
        JsonFormatter::new(Verbosity::Normal)
            .format_current("0.9.0", &mut output)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["version"], "0.9.0");
    }

    #[test]
    fn test_format_report_schema() {
        let value = render(&sample_report(false), Verbosity::Normal);

        assert_eq!(value["dry_run"], false);
        assert_eq!(value["from"], "1.2.3");
        assert_eq!(value["to"], "1.3.0");
        assert!(value.get("script").is_none());

        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "pyproject.toml");
        assert_eq!(files[0]["status"], "updated");
        assert_eq!(files[0]["previous_version"], "1.2.3");
        assert_eq!(files[0]["written"], true);
        assert_eq!(files[1]["status"], "marker_missing");
        assert!(files[1].get("previous_version").is_none());
        assert_eq!(files[1]["written"], false);
    }

    #[test]
    fn test_format_report_dry_run() {
        let value = render(&sample_report(true), Verbosity::Normal);
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["files"][0]["written"], false);
    }

    #[test]
    fn test_up_to_date_files_only_in_verbose() {
        let mut report = sample_report(false);
        report.plan.changes[1].status = ChangeStatus::UpToDate;

        let value = render(&report, Verbosity::Normal);
        assert_eq!(value["files"].as_array().unwrap().len(), 1);

        let value = render(&report, Verbosity::Verbose);
        assert_eq!(value["files"].as_array().unwrap().len(), 2);
        assert_eq!(value["files"][1]["status"], "up_to_date");
    }
}
