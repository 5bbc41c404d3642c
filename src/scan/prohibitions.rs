// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Prohibition scanning over source text and trees.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{LintError, Result, ScanError};
use crate::rules::{Finding, Severity};

lazy_static! {
    /// Built-in prohibitions from the policy corpus.
    pub static ref BUILTIN_PROHIBITIONS: Vec<Prohibition> = vec![
        Prohibition {
            id: "lombok-data".to_string(),
            message: "Lombok @Data is prohibited on persistence classes".to_string(),
            pattern: Regex::new(r"@Data\b").unwrap(),
            severity: Severity::Violation,
            exempt: vec![glob::Pattern::new("**/dto/**").unwrap()],
        },
        Prohibition {
            id: "field-injection".to_string(),
            message: "field injection; inject dependencies through the constructor".to_string(),
            pattern: Regex::new(r"@Autowired\s+(?:private|protected|public)\b").unwrap(),
            severity: Severity::Violation,
            exempt: Vec::new(),
        },
        Prohibition {
            id: "stdout-logging".to_string(),
            message: "System.out printing; use the logger".to_string(),
            pattern: Regex::new(r"System\.(?:out|err)\.print(?:ln)?").unwrap(),
            severity: Severity::Violation,
            exempt: Vec::new(),
        },
        Prohibition {
            id: "eager-fetch".to_string(),
            message: "eager fetching on an association".to_string(),
            pattern: Regex::new(r"FetchType\.EAGER").unwrap(),
            severity: Severity::Violation,
            exempt: Vec::new(),
        },
        Prohibition {
            id: "ddl-auto".to_string(),
            message: "hibernate ddl-auto must not manage the schema".to_string(),
            pattern: Regex::new(r"ddl-auto\s*[:=]\s*(?:update|create-drop|create)").unwrap(),
            severity: Severity::Violation,
            exempt: Vec::new(),
        },
        Prohibition {
            id: "lombok-tostring".to_string(),
            message: "Lombok @ToString is restricted; it can touch lazy relations".to_string(),
            pattern: Regex::new(r"@ToString\b").unwrap(),
            severity: Severity::Info,
            exempt: vec![glob::Pattern::new("**/dto/**").unwrap()],
        },
        Prohibition {
            id: "lombok-equals".to_string(),
            message: "Lombok @EqualsAndHashCode is restricted on persistence classes".to_string(),
            pattern: Regex::new(r"@EqualsAndHashCode\b").unwrap(),
            severity: Severity::Info,
            exempt: vec![glob::Pattern::new("**/dto/**").unwrap()],
        },
    ];
}

/// A pattern ban compiled from a Prohibited or Restricted rule.
#[derive(Debug, Clone)]
pub struct Prohibition {
    /// Identifier of the originating rule.
    pub id: String,
    /// Message reported on every match.
    pub message: String,
    /// Pattern to scan for.
    pub pattern: Regex,
    /// Violation for Prohibited rules, Info for Restricted ones.
    pub severity: Severity,
    /// Path globs the ban does not apply to (e.g. DTO directories).
    pub exempt: Vec<glob::Pattern>,
}

impl Prohibition {
    /// Build a prohibition from a literal code span.
    pub fn literal(
        id: impl Into<String>,
        span: &str,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            // An escaped literal always compiles.
            pattern: Regex::new(&regex::escape(span)).unwrap(),
            severity,
            exempt: Vec::new(),
        }
    }

    /// Whether the ban is exempt for the given path.
    pub fn is_exempt(&self, path: &Path) -> bool {
        // Globs are written relative; drop a leading root so absolute
        // paths match too.
        let path = path.strip_prefix("/").unwrap_or(path);
        self.exempt.iter().any(|g| g.matches_path(path))
    }
}

/// Scanner for prohibited and restricted patterns.
pub struct Scanner {
    prohibitions: Vec<Prohibition>,
}

impl Scanner {
    /// Create a scanner over the given prohibitions.
    pub fn new(prohibitions: Vec<Prohibition>) -> Self {
        Self { prohibitions }
    }

    /// Scan raw text with no path context; exemption globs do not apply.
    pub fn scan_text(&self, text: &str) -> Vec<Finding> {
        self.scan_impl(text, None)
    }

    /// Scan a file, honoring per-prohibition exemption globs.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Finding>> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.scan_impl(&text, Some(path)))
    }

    /// Scan a directory tree, visiting files whose extension is listed.
    ///
    /// Returns per-file findings for files that produced any; unreadable
    /// files are skipped with a debug breadcrumb.
    pub fn scan_tree(
        &self,
        root: &Path,
        extensions: &[String],
    ) -> Result<Vec<(PathBuf, Vec<Finding>)>> {
        if !root.exists() {
            return Err(LintError::Scan(ScanError::PathNotFound {
                path: root.to_path_buf(),
            }));
        }

        let mut results = Vec::new();

        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|x| x == e))
                .unwrap_or(false);
            if !matches_ext {
                continue;
            }

            match self.scan_file(path) {
                Ok(findings) if !findings.is_empty() => {
                    results.push((path.to_path_buf(), findings));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("skipping {}: {}", path.display(), e);
                }
            }
        }

        Ok(results)
    }

    fn scan_impl(&self, text: &str, path: Option<&Path>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for prohibition in &self.prohibitions {
            if let Some(path) = path {
                if prohibition.is_exempt(path) {
                    continue;
                }
            }

            for m in prohibition.pattern.find_iter(text) {
                let (line, column) = position(text, m.start());
                findings.push(Finding {
                    rule: prohibition.id.clone(),
                    severity: prohibition.severity,
                    message: prohibition.message.clone(),
                    suggestion: None,
                    line: Some(line),
                    column: Some(column),
                });
            }
        }

        findings
    }
}

/// Translate a byte offset into 1-based (line, column).
fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = offset - before.rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
    (line, column)
}
