// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Policy document parsing.
//!
//! An AGENTS.md-style guide is structured Markdown: a title heading, an
//! optional Scope section, and a Decision Rules section whose sub-headings
//! are the four rule categories. Bullets under a category heading become
//! rules in document order.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{LintError, PolicyError, Result};

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap();
    static ref BULLET: Regex = Regex::new(r"^\s*(?:[-*]|\d+\.)\s+(.+)$").unwrap();
    static ref CODE_SPAN: Regex = Regex::new(r"`([^`]+)`").unwrap();
}

/// The category a decision rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Mandatory,
    Preferred,
    Restricted,
    Prohibited,
}

impl RuleCategory {
    /// Get the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Mandatory => "mandatory",
            RuleCategory::Preferred => "preferred",
            RuleCategory::Restricted => "restricted",
            RuleCategory::Prohibited => "prohibited",
        }
    }

    /// Get all categories.
    pub fn all() -> &'static [RuleCategory] {
        &[
            RuleCategory::Mandatory,
            RuleCategory::Preferred,
            RuleCategory::Restricted,
            RuleCategory::Prohibited,
        ]
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mandatory" => Ok(RuleCategory::Mandatory),
            "preferred" => Ok(RuleCategory::Preferred),
            "restricted" => Ok(RuleCategory::Restricted),
            "prohibited" => Ok(RuleCategory::Prohibited),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single decision rule from a policy document.
#[derive(Debug, Clone)]
pub struct PolicyRule {
    /// Derived identifier, e.g. `prohibited-2`.
    pub id: String,
    /// Rule category.
    pub category: RuleCategory,
    /// Natural-language condition, verbatim bullet text.
    pub text: String,
    /// Backtick code spans lifted from the text; the machine-checkable part.
    pub patterns: Vec<String>,
}

/// A parsed policy document.
#[derive(Debug, Clone)]
pub struct PolicyDocument {
    /// Document title, from the first level-1 heading.
    pub title: String,
    /// Free-text scope description, not semantically parsed.
    pub scope: Option<String>,
    /// Rules in document order.
    pub rules: Vec<PolicyRule>,
}

impl PolicyDocument {
    /// Parse a policy document from Markdown text.
    pub fn parse(markdown: &str) -> Result<Self> {
        let mut title: Option<String> = None;
        let mut scope_lines: Vec<String> = Vec::new();
        let mut rules: Vec<PolicyRule> = Vec::new();

        // Per-category counters for derived rule ids.
        let mut counters: [usize; 4] = [0; 4];

        // Heading level of the enclosing Decision Rules section, if inside one.
        let mut decision_level: Option<usize> = None;
        let mut current_category: Option<RuleCategory> = None;
        let mut in_scope = false;

        for (idx, line) in markdown.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = HEADING.captures(line) {
                let level = caps[1].len();
                let text = caps[2].trim();

                in_scope = false;

                if title.is_none() && level == 1 {
                    title = Some(text.to_string());
                }

                if text.eq_ignore_ascii_case("scope") {
                    current_category = None;
                    in_scope = true;
                    continue;
                }

                if text.eq_ignore_ascii_case("decision rules") {
                    decision_level = Some(level);
                    current_category = None;
                    continue;
                }

                if let Some(section_level) = decision_level {
                    if level > section_level {
                        // Sub-headings of Decision Rules must name a category.
                        match text.parse::<RuleCategory>() {
                            Ok(category) => current_category = Some(category),
                            Err(()) => {
                                return Err(LintError::Policy(
                                    PolicyError::UnknownRuleCategory {
                                        heading: text.to_string(),
                                        line: line_no,
                                    },
                                ));
                            }
                        }
                        continue;
                    }
                    // A heading at or above the section level ends it.
                    decision_level = None;
                }

                // Bare category headings outside a Decision Rules section
                // also collect rules; small documents use this layout.
                current_category = text.parse::<RuleCategory>().ok();
                continue;
            }

            if in_scope {
                if !line.trim().is_empty() {
                    scope_lines.push(line.trim().to_string());
                }
                continue;
            }

            if let Some(category) = current_category {
                if let Some(caps) = BULLET.captures(line) {
                    let text = caps[1].trim().to_string();
                    let patterns: Vec<String> = CODE_SPAN
                        .captures_iter(&text)
                        .map(|c| c[1].to_string())
                        .collect();

                    let slot = category as usize;
                    counters[slot] += 1;
                    rules.push(PolicyRule {
                        id: format!("{}-{}", category.as_str(), counters[slot]),
                        category,
                        text,
                        patterns,
                    });
                }
            }
        }

        let title = title.ok_or(LintError::Policy(PolicyError::MissingTitle))?;

        let scope = if scope_lines.is_empty() {
            None
        } else {
            Some(scope_lines.join(" "))
        };

        Ok(Self {
            title,
            scope,
            rules,
        })
    }

    /// Load and parse a policy document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LintError::Policy(PolicyError::NotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            LintError::Policy(PolicyError::ReadFailed {
                message: format!("{}: {}", path.display(), e),
            })
        })?;

        Self::parse(&content)
    }

    /// Rules belonging to a category, in document order.
    pub fn rules_in(&self, category: RuleCategory) -> impl Iterator<Item = &PolicyRule> {
        self.rules.iter().filter(move |r| r.category == category)
    }
}
