// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule set compilation and the validator engine.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::CommitMessage;
use crate::config::LintConfig;
use crate::error::{CommitError, LintError, Result, ScanError};
use crate::policy::{PolicyDocument, RuleCategory};
use crate::scan::{Prohibition, Scanner, BUILTIN_PROHIBITIONS};

use super::builtin::{
    apply_commit_checks, RULE_SUBJECT_CASE, RULE_SUBJECT_IMPERATIVE, RULE_SUBJECT_LENGTH,
    RULE_SUBJECT_PERIOD,
};
use super::findings::{Finding, Report, Severity};

lazy_static! {
    /// A span that looks like a commit type token.
    static ref TYPE_TOKEN: Regex = Regex::new(r"^[a-z][a-z0-9-]*$").unwrap();
}

/// The compiled, checkable form of configuration plus an optional policy
/// document.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Allowed commit type tokens.
    pub allowed_types: Vec<String>,
    /// Additional tokens accepted as explicitly justified.
    pub justified_types: Vec<String>,
    /// Maximum subject length for the style preference.
    pub max_subject_length: usize,
    /// Style preference toggles.
    pub check_subject_case: bool,
    pub check_trailing_period: bool,
    pub check_imperative: bool,
    /// Rule id reported for malformed subjects.
    pub subject_rule: String,
    /// Rule id reported for type-token failures.
    pub type_rule: String,
    /// Rule id reported for breaking-signal failures.
    pub breaking_rule: String,
    /// Rule id reported for footer-token failures.
    pub footer_rule: String,
    /// Compiled pattern bans, in rule order.
    pub prohibitions: Vec<Prohibition>,

    // Rule id -> position for the ordering tie-break.
    order: HashMap<String, usize>,
}

impl RuleSet {
    /// Build a rule set from configuration alone.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let mut prohibitions = Vec::new();

        if config.scan.builtin {
            prohibitions.extend(BUILTIN_PROHIBITIONS.iter().cloned());
        }

        for custom in &config.scan.patterns {
            let pattern = Regex::new(&custom.pattern).map_err(|e| {
                LintError::Scan(ScanError::InvalidPattern {
                    name: custom.name.clone(),
                    message: e.to_string(),
                })
            })?;

            let mut exempt = Vec::new();
            for raw in &custom.exempt {
                let compiled = glob::Pattern::new(raw).map_err(|e| {
                    LintError::Scan(ScanError::InvalidExemption {
                        pattern: raw.clone(),
                        message: e.to_string(),
                    })
                })?;
                exempt.push(compiled);
            }

            prohibitions.push(Prohibition {
                id: custom.name.clone(),
                message: custom
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("matched pattern '{}'", custom.name)),
                pattern,
                severity: if custom.restricted {
                    Severity::Info
                } else {
                    Severity::Violation
                },
                exempt,
            });
        }

        let mut rules = Self {
            allowed_types: config.commit.allowed_types.clone(),
            justified_types: config.commit.justified_types.clone(),
            max_subject_length: config.commit.max_subject_length,
            check_subject_case: config.commit.style.subject_case,
            check_trailing_period: config.commit.style.trailing_period,
            check_imperative: config.commit.style.imperative_mood,
            subject_rule: "commit-subject".to_string(),
            type_rule: "commit-type".to_string(),
            breaking_rule: "commit-breaking".to_string(),
            footer_rule: "commit-footer".to_string(),
            prohibitions,
            order: HashMap::new(),
        };
        rules.rebuild_order(&[]);
        Ok(rules)
    }

    /// Overlay a policy document: recognized Mandatory rules take over the
    /// built-in check bindings, and Prohibited/Restricted code spans become
    /// pattern bans. Document order governs the finding order.
    pub fn apply_document(&mut self, doc: &PolicyDocument) {
        let mut doc_ids = Vec::new();

        for rule in &doc.rules {
            doc_ids.push(rule.id.clone());
            let lower = rule.text.to_lowercase();

            match rule.category {
                RuleCategory::Mandatory => {
                    let token_list = rule.patterns.len() >= 2
                        && rule.patterns.iter().all(|p| TYPE_TOKEN.is_match(p));
                    if token_list && lower.contains("type") {
                        self.allowed_types = rule.patterns.clone();
                        self.type_rule = rule.id.clone();
                    }
                    if rule.text.contains("<type>") {
                        self.subject_rule = rule.id.clone();
                    }
                    if lower.contains("breaking") {
                        self.breaking_rule = rule.id.clone();
                    }
                    if lower.contains("footer") {
                        self.footer_rule = rule.id.clone();
                    }
                }
                RuleCategory::Prohibited | RuleCategory::Restricted => {
                    let severity = if rule.category == RuleCategory::Prohibited {
                        Severity::Violation
                    } else {
                        Severity::Info
                    };
                    for span in &rule.patterns {
                        self.prohibitions.push(Prohibition::literal(
                            rule.id.clone(),
                            span,
                            rule.text.clone(),
                            severity,
                        ));
                    }
                }
                // Preferred rules without patterns are not machine-checkable;
                // the style preferences keep their built-in ids.
                RuleCategory::Preferred => {}
            }
        }

        self.rebuild_order(&doc_ids);
    }

    /// Ordering position of a rule id; unknown ids sort last.
    pub fn rule_index(&self, id: &str) -> usize {
        self.order.get(id).copied().unwrap_or(usize::MAX)
    }

    fn rebuild_order(&mut self, doc_ids: &[String]) {
        self.order.clear();
        let mut next = 0usize;

        // Document rules first, in document order.
        for id in doc_ids {
            self.order.entry(id.clone()).or_insert_with(|| {
                let idx = next;
                next += 1;
                idx
            });
        }

        // Built-in bindings and style rules after.
        let builtin: Vec<String> = vec![
            self.subject_rule.clone(),
            self.type_rule.clone(),
            self.breaking_rule.clone(),
            self.footer_rule.clone(),
            RULE_SUBJECT_CASE.to_string(),
            RULE_SUBJECT_PERIOD.to_string(),
            RULE_SUBJECT_IMPERATIVE.to_string(),
            RULE_SUBJECT_LENGTH.to_string(),
        ];
        for id in builtin {
            self.order.entry(id).or_insert_with(|| {
                let idx = next;
                next += 1;
                idx
            });
        }

        let prohibition_ids: Vec<String> =
            self.prohibitions.iter().map(|p| p.id.clone()).collect();
        for id in prohibition_ids {
            self.order.entry(id).or_insert_with(|| {
                let idx = next;
                next += 1;
                idx
            });
        }
    }
}

/// The rule validator.
///
/// A pure function over its inputs: owns no shared resource, safe to call
/// concurrently.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleSet,
}

impl Validator {
    /// Create a validator over a compiled rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Access the underlying rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate a parsed commit message.
    pub fn check_message(&self, message: &CommitMessage) -> Report {
        let mut report = Report::new(message.header());
        report.findings = apply_commit_checks(message, &self.rules);
        self.finalize(&mut report);
        report
    }

    /// Parse and validate a commit message string.
    ///
    /// A malformed subject is reported as a finding, never thrown; the
    /// caller decides whether that blocks anything. Empty input stays a
    /// typed error.
    pub fn check_message_text(&self, text: &str) -> Result<Report> {
        match CommitMessage::parse(text) {
            Ok(message) => Ok(self.check_message(&message)),
            Err(LintError::Commit(CommitError::MalformedSubject { reason })) => {
                let subject = text.lines().next().unwrap_or("").to_string();
                let mut report = Report::new(subject);
                report.findings.push(Finding {
                    rule: self.rules.subject_rule.clone(),
                    severity: Severity::Violation,
                    message: format!("malformed subject: {}", reason),
                    suggestion: Some(
                        "format the subject as <type>[(scope)][!]: <description>".to_string(),
                    ),
                    line: Some(1),
                    column: None,
                });
                Ok(report)
            }
            Err(err) => Err(err),
        }
    }

    /// Scan source text against the prohibition bans.
    pub fn check_source_text(&self, text: &str) -> Result<Report> {
        if text.trim().is_empty() {
            return Err(LintError::EmptyInput);
        }

        let scanner = Scanner::new(self.rules.prohibitions.clone());
        let mut report = Report::new("<text>");
        report.findings = scanner.scan_text(text);
        self.finalize(&mut report);
        Ok(report)
    }

    /// Sort findings into rule order, then match position, and drop
    /// duplicates for the same rule and location.
    pub fn finalize(&self, report: &mut Report) {
        report.findings.sort_by_key(|f| {
            (
                self.rules.rule_index(&f.rule),
                f.line.unwrap_or(0),
                f.column.unwrap_or(0),
            )
        });
        report
            .findings
            .dedup_by(|a, b| a.rule == b.rule && a.line == b.line && a.column == b.column);
    }
}
