//! Suite reporting and export
//!
//! Renders a batch of [`PuzzleResult`]s as plain text, JSON, JUnit XML or
//! Markdown for terminals and CI.

use crate::runner::PuzzleResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Output formats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Junit,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "junit" => Ok(Self::Junit),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown output format '{}' (expected text, json, junit or markdown)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Junit => "junit",
            Self::Markdown => "markdown",
        })
    }
}

// ============================================================================
// Report
// ============================================================================

/// Full suite report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Report timestamp (Unix ms)
    pub timestamp_ms: i64,
    /// Test environment
    pub environment: String,
    /// Sum of per-puzzle durations (ms)
    pub total_duration_ms: u64,
    /// All puzzle results, registry order
    pub results: Vec<PuzzleResult>,
    /// Summary stats
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_puzzles: u32,
    pub puzzles_passed: u32,
    pub puzzles_failed: u32,
    pub total_cases: u64,
}

impl SuiteReport {
    pub fn new(results: Vec<PuzzleResult>) -> Self {
        let total_puzzles = results.len() as u32;
        let puzzles_passed = results.iter().filter(|r| r.passed).count() as u32;

        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            environment: environment_name(),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            summary: ReportSummary {
                total_puzzles,
                puzzles_passed,
                puzzles_failed: total_puzzles - puzzles_passed,
                total_cases: results.iter().map(|r| r.cases_run).sum(),
            },
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.summary.puzzles_failed == 0
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Junit => self.to_junit_xml(),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }

    /// One line per puzzle, mismatch details under failures.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            out.push_str(&result.summary_line());
            out.push('\n');
            if let Some(ref failure) = result.failure {
                out.push_str(&format!("ERROR: {}\n", failure));
            }
        }
        out.push_str(&format!(
            "Total: {} puzzles, {} passed, {} failed, {} cases\n",
            self.summary.total_puzzles,
            self.summary.puzzles_passed,
            self.summary.puzzles_failed,
            self.summary.total_cases
        ));
        out
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Export as JUnit XML (for CI systems)
    pub fn to_junit_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites tests=\"{}\" failures=\"{}\" time=\"{}\">\n",
            self.summary.total_puzzles,
            self.summary.puzzles_failed,
            seconds(self.total_duration_ms)
        ));
        xml.push_str(&format!(
            "  <testsuite name=\"puzzles\" tests=\"{}\" failures=\"{}\" time=\"{}\">\n",
            self.summary.total_puzzles,
            self.summary.puzzles_failed,
            seconds(self.total_duration_ms)
        ));

        for result in &self.results {
            match result.failure {
                None => xml.push_str(&format!(
                    "    <testcase name=\"{}\" time=\"{}\"/>\n",
                    escape_xml(&result.name),
                    seconds(result.duration_ms)
                )),
                Some(ref failure) => {
                    xml.push_str(&format!(
                        "    <testcase name=\"{}\" time=\"{}\">\n",
                        escape_xml(&result.name),
                        seconds(result.duration_ms)
                    ));
                    xml.push_str(&format!(
                        "      <failure message=\"{}\">{}</failure>\n",
                        escape_xml(&format!(
                            "Gives {}. Should be {}",
                            failure.actual, failure.expected
                        )),
                        escape_xml(&failure.to_string())
                    ));
                    xml.push_str("    </testcase>\n");
                }
            }
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        xml
    }

    /// Export as Markdown summary
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Puzzle Check Report\n\n");
        md.push_str(&format!(
            "**Date:** {}\n",
            chrono::DateTime::from_timestamp_millis(self.timestamp_ms)
                .unwrap_or_default()
                .format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!("**Environment:** {}\n\n", self.environment));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!(
            "| Puzzles | {} ({} passed, {} failed) |\n",
            self.summary.total_puzzles, self.summary.puzzles_passed, self.summary.puzzles_failed
        ));
        md.push_str(&format!("| Cases | {} |\n", self.summary.total_cases));
        md.push_str(&format!("| Duration | {} ms |\n\n", self.total_duration_ms));

        md.push_str("## Results\n\n");
        md.push_str("| Puzzle | Cases | Status |\n");
        md.push_str("|--------|-------|--------|\n");
        for result in &self.results {
            let status = if result.passed { "✓" } else { "✗" };
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                result.name, result.cases_run, status
            ));
        }

        let failed: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        if !failed.is_empty() {
            md.push_str("\n## Failures\n\n");
            for result in failed {
                md.push_str(&format!("### {}\n\n", result.name));
                if let Some(ref failure) = result.failure {
                    md.push_str(&format!("```text\n{}\n```\n\n", failure));
                }
            }
        }

        md
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn seconds(ms: u64) -> String {
    format!("{:.3}", ms as f64 / 1000.0)
}

fn environment_name() -> String {
    if std::env::var("CI").is_ok() {
        "CI".to_string()
    } else {
        "local".to_string()
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{Repr, Value};
    use crate::runner::Mismatch;

    fn results() -> Vec<PuzzleResult> {
        vec![
            PuzzleResult {
                name: "bitAnd".to_string(),
                cases_run: 1000,
                passed: true,
                failure: None,
                duration_ms: 4,
            },
            PuzzleResult {
                name: "isLess".to_string(),
                cases_run: 12,
                passed: false,
                failure: Some(Mismatch {
                    puzzle: "isLess".to_string(),
                    inputs: vec![Value::new(1, Repr::I32), Value::new(2, Repr::I32)],
                    expected: Value::new(1, Repr::I32),
                    actual: Value::new(0, Repr::I32),
                }),
                duration_ms: 1,
            },
        ]
    }

    #[test]
    fn test_report_summary() {
        let report = SuiteReport::new(results());
        assert_eq!(
            report.summary,
            ReportSummary {
                total_puzzles: 2,
                puzzles_passed: 1,
                puzzles_failed: 1,
                total_cases: 1012,
            }
        );
        assert_eq!(report.total_duration_ms, 5);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_text_output() {
        let text = SuiteReport::new(results()).to_text();
        assert!(text.contains("PASS  bitAnd (1000 cases, 4 ms)"));
        assert!(text.contains("FAIL  isLess"));
        assert!(text.contains("ERROR: Test isLess(1[0x1], 2[0x2]) failed...\n...Gives 0[0x0]. Should be 1[0x1]"));
        assert!(text.ends_with("Total: 2 puzzles, 1 passed, 1 failed, 1012 cases\n"));
    }

    #[test]
    fn test_json_round_trip_of_results() {
        let report = SuiteReport::new(results());
        let json = report.to_json();
        let parsed: SuiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results, report.results);
    }

    #[test]
    fn test_junit_and_markdown() {
        let report = SuiteReport::new(results());
        let xml = report.to_junit_xml();
        assert!(xml.contains("<testsuites tests=\"2\" failures=\"1\""));
        assert!(xml.contains("<testcase name=\"bitAnd\" time=\"0.004\"/>"));
        assert!(xml.contains("<failure message=\"Gives 0[0x0]. Should be 1[0x1]\">"));

        let md = report.to_markdown();
        assert!(md.contains("| isLess | 12 | ✗ |"));
        assert!(md.contains("### isLess"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("junit".parse::<OutputFormat>(), Ok(OutputFormat::Junit));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
