// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Finding and report types.

use crate::cli::args::OutputFormat;
use console::{style, Style};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A Mandatory or Prohibited rule failed.
    Violation,
    /// A Preferred or Restricted rule surfaced something.
    Info,
}

impl Severity {
    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Violation => "violation",
            Severity::Info => "info",
        }
    }
}

/// A single rule-check outcome.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Identifier of the rule that produced this finding.
    pub rule: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// 1-based line number of the match, if located.
    pub line: Option<usize>,
    /// 1-based column number of the match, if located.
    pub column: Option<usize>,
}

impl Finding {
    /// Format the finding for terminal output.
    pub fn format(&self) -> String {
        let prefix = match self.severity {
            Severity::Violation => style("✗").red().bold(),
            Severity::Info => style("⚠").yellow().bold(),
        };

        let rule_style = match self.severity {
            Severity::Violation => Style::new().red(),
            Severity::Info => Style::new().yellow(),
        };

        let location = match (self.line, self.column) {
            (Some(line), Some(column)) => format!(" [{}:{}]", line, column),
            (Some(line), None) => format!(" [{}]", line),
            _ => String::new(),
        };

        let mut output = format!(
            "{} {} {}{}",
            prefix,
            rule_style.apply_to(&self.rule),
            self.message,
            style(location).dim()
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }
}

/// Ordered findings for one validated artifact.
#[derive(Debug, Clone)]
pub struct Report {
    /// What was validated (a subject line, a file path, `<stdin>`).
    pub source: String,
    /// Findings in rule-document order, then by match position.
    pub findings: Vec<Finding>,
}

impl Report {
    /// Create an empty report.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            findings: Vec::new(),
        }
    }

    /// Whether the report contains no violations.
    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }

    /// Number of violation findings.
    pub fn violation_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Violation)
            .count()
    }

    /// Number of info findings.
    pub fn info_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Info)
            .count()
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        let status = if self.is_clean() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("{} {}", status, style(&self.source).cyan());

        for finding in &self.findings {
            println!("  {}", finding.format());
        }
    }

    fn print_json(&self) {
        let json = serde_json::json!({
            "source": self.source,
            "clean": self.is_clean(),
            "findings": self.findings.iter().map(|f| {
                serde_json::json!({
                    "rule": f.rule,
                    "severity": f.severity.as_str(),
                    "message": f.message,
                    "suggestion": f.suggestion,
                    "line": f.line,
                    "column": f.column,
                })
            }).collect::<Vec<_>>(),
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            if self.findings.is_empty() {
                "Clean".to_string()
            } else {
                format!("Clean ({} info)", self.info_count())
            }
        } else {
            format!(
                "Failed ({} violations, {} info)",
                self.violation_count(),
                self.info_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: &str) -> Finding {
        Finding {
            rule: rule.to_string(),
            severity: Severity::Violation,
            message: "something failed".to_string(),
            suggestion: None,
            line: Some(1),
            column: None,
        }
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = Report::new("feat: test");
        assert!(report.is_clean());
        assert_eq!(report.summary(), "Clean");
    }

    #[test]
    fn test_report_with_violation() {
        let mut report = Report::new("test");
        report.findings.push(violation("commit-type"));
        assert!(!report.is_clean());
        assert_eq!(report.violation_count(), 1);
        assert!(report.summary().contains("Failed"));
    }

    #[test]
    fn test_info_does_not_fail() {
        let mut report = Report::new("test");
        report.findings.push(Finding {
            severity: Severity::Info,
            ..violation("subject-case")
        });
        assert!(report.is_clean());
        assert_eq!(report.info_count(), 1);
        assert!(report.summary().contains("1 info"));
    }

    #[test]
    fn test_finding_format_includes_location() {
        let mut f = violation("lombok-data");
        f.line = Some(3);
        f.column = Some(1);
        let formatted = f.format();
        assert!(formatted.contains("lombok-data"));
        assert!(formatted.contains("3:1"));
    }
}
