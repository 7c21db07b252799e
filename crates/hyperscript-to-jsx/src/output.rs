//! Output formatting.

use crate::cli::{Mode, OutputFormat};
use crate::source::SkippedLocation;
use camino::Utf8PathBuf;
use serde::Serialize;

/// The outcome of processing one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// The file path.
    pub path: Utf8PathBuf,
    /// Whether the transform rewrote anything.
    pub changed: bool,
    /// Number of builder calls rewritten to JSX.
    pub transformed: usize,
    /// Whether the builder import was removed.
    pub import_pruned: bool,
    /// Builder calls left in place.
    pub skipped: Vec<SkippedLocation>,
    /// Why the file could not be processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The transformed code, in print mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FileReport {
    /// Creates a report for a file that failed.
    pub fn failed(path: Utf8PathBuf, error: String) -> Self {
        Self {
            path,
            changed: false,
            transformed: 0,
            import_pruned: false,
            skipped: Vec::new(),
            error: Some(error),
            code: None,
        }
    }
}

/// Formats file reports for output.
pub struct Formatter {
    format: OutputFormat,
    mode: Mode,
    report_skipped: bool,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, mode: Mode, report_skipped: bool) -> Self {
        Self {
            format,
            mode,
            report_skipped,
        }
    }

    /// Formats the per-file part of the output.
    pub fn format(&self, reports: &[FileReport]) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(reports),
            OutputFormat::Json => self.format_json(reports),
        }
    }

    fn format_human(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();

        for report in reports {
            if let Some(error) = &report.error {
                output.push_str(&format!("error: {}\n", error));
                continue;
            }

            if report.changed {
                let verb = match self.mode {
                    Mode::Write => "rewrote",
                    Mode::Check => "would rewrite",
                    Mode::Print => "transformed",
                };
                output.push_str(&format!(
                    "{} {} ({} {})\n",
                    verb,
                    report.path,
                    report.transformed,
                    plural(report.transformed, "call", "calls")
                ));
            }

            if self.report_skipped {
                for skipped in &report.skipped {
                    output.push_str(&format!(
                        "{}:{}:{}: skipped: {} ({})\n",
                        report.path, skipped.line, skipped.column, skipped.message, skipped.reason
                    ));
                }
            }
        }

        output
    }

    fn format_json(&self, reports: &[FileReport]) -> String {
        let summary = RunSummary::from_reports(reports, self.mode);
        let document = JsonOutput {
            files: reports,
            summary: &summary,
        };
        serde_json::to_string_pretty(&document).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: &'a [FileReport],
    summary: &'a RunSummary,
}

/// Summary of a run.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of files processed.
    pub file_count: usize,
    /// Number of files the transform rewrote.
    pub changed_count: usize,
    /// Number of builder calls rewritten.
    pub transformed_count: usize,
    /// Number of builder calls left in place.
    pub skipped_count: usize,
    /// Number of files that could not be read, parsed or written.
    pub error_count: usize,
    /// Whether changed files fail the run.
    #[serde(skip)]
    pub fail_on_change: bool,
}

impl RunSummary {
    /// Tallies a set of file reports.
    pub fn from_reports(reports: &[FileReport], mode: Mode) -> Self {
        let mut summary = Self {
            file_count: reports.len(),
            fail_on_change: mode == Mode::Check,
            ..Default::default()
        };
        for report in reports {
            if report.error.is_some() {
                summary.error_count += 1;
            }
            if report.changed {
                summary.changed_count += 1;
            }
            summary.transformed_count += report.transformed;
            summary.skipped_count += report.skipped.len();
        }
        summary
    }

    /// Returns whether the process should exit with a failure status.
    pub fn should_fail(&self) -> bool {
        self.error_count > 0 || (self.fail_on_change && self.changed_count > 0)
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        format!(
            "hyperscript-to-jsx: {} {} changed, {} {} transformed, {} skipped, {} {} in {} {}",
            self.changed_count,
            plural(self.changed_count, "file", "files"),
            self.transformed_count,
            plural(self.transformed_count, "call", "calls"),
            self.skipped_count,
            self.error_count,
            plural(self.error_count, "error", "errors"),
            self.file_count,
            plural(self.file_count, "file", "files"),
        )
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed_report() -> FileReport {
        FileReport {
            path: Utf8PathBuf::from("src/view.js"),
            changed: true,
            transformed: 2,
            import_pruned: false,
            skipped: vec![SkippedLocation {
                line: 4,
                column: 9,
                reason: "position",
                message: "call is not in a position that renders markup".to_string(),
            }],
            error: None,
            code: None,
        }
    }

    #[test]
    fn test_format_human() {
        let formatter = Formatter::new(OutputFormat::Human, Mode::Write, false);
        let output = formatter.format(&[changed_report()]);
        assert!(output.contains("rewrote src/view.js (2 calls)"));
        assert!(!output.contains("skipped"));
    }

    #[test]
    fn test_format_human_report() {
        let formatter = Formatter::new(OutputFormat::Human, Mode::Check, true);
        let output = formatter.format(&[changed_report()]);
        assert!(output.contains("would rewrite src/view.js"));
        assert!(output.contains("src/view.js:4:9: skipped"));
        assert!(output.contains("(position)"));
    }

    #[test]
    fn test_format_human_error() {
        let formatter = Formatter::new(OutputFormat::Human, Mode::Print, false);
        let report = FileReport::failed(
            Utf8PathBuf::from("broken.js"),
            "broken.js:1:11: Expression expected".to_string(),
        );
        let output = formatter.format(&[report]);
        assert!(output.starts_with("error: broken.js:1:11"));
    }

    #[test]
    fn test_format_json() {
        let formatter = Formatter::new(OutputFormat::Json, Mode::Check, false);
        let output = formatter.format(&[changed_report()]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["files"][0]["path"], "src/view.js");
        assert_eq!(value["files"][0]["importPruned"], false);
        assert_eq!(value["files"][0]["skipped"][0]["reason"], "position");
        assert!(value["files"][0].get("error").is_none());
        assert_eq!(value["summary"]["changedCount"], 1);
        assert_eq!(value["summary"]["skippedCount"], 1);
    }

    #[test]
    fn test_summary() {
        let reports = vec![
            changed_report(),
            FileReport::failed(Utf8PathBuf::from("b.js"), "boom".to_string()),
        ];
        let summary = RunSummary::from_reports(&reports, Mode::Print);
        let output = summary.format();
        assert!(output.contains("1 file changed"));
        assert!(output.contains("2 calls transformed"));
        assert!(output.contains("1 error"));
        assert!(output.contains("in 2 files"));
        assert!(summary.should_fail());
    }

    #[test]
    fn test_check_fails_on_change() {
        let reports = vec![changed_report()];
        assert!(!RunSummary::from_reports(&reports, Mode::Print).should_fail());
        assert!(RunSummary::from_reports(&reports, Mode::Check).should_fail());
    }
}
