// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from
//! agentlint.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The main configuration structure for agentlint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Commit-message rule configuration.
    pub commit: CommitConfig,

    /// Source-scan configuration.
    pub scan: ScanConfig,

    /// Policy document configuration.
    pub policy: PolicyConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Commit-message rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Allowed commit type tokens.
    pub allowed_types: Vec<String>,

    /// Additional tokens accepted as explicitly justified.
    pub justified_types: Vec<String>,

    /// Maximum subject length (style preference).
    pub max_subject_length: usize,

    /// Style preference toggles.
    pub style: StyleConfig,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            allowed_types: vec![
                "feat".to_string(),
                "fix".to_string(),
                "docs".to_string(),
                "style".to_string(),
                "refactor".to_string(),
                "perf".to_string(),
                "test".to_string(),
                "chore".to_string(),
                "revert".to_string(),
                "build".to_string(),
                "ci".to_string(),
            ],
            justified_types: Vec::new(),
            max_subject_length: 72,
            style: StyleConfig::default(),
        }
    }
}

/// Style preference toggles for the subject line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Flag descriptions that start with an uppercase letter.
    pub subject_case: bool,

    /// Flag descriptions that end with a period.
    pub trailing_period: bool,

    /// Flag non-imperative first words.
    pub imperative_mood: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            subject_case: true,
            trailing_period: true,
            imperative_mood: true,
        }
    }
}

/// Source-scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Whether the built-in prohibition table is active.
    pub builtin: bool,

    /// File extensions visited when scanning a tree.
    pub extensions: Vec<String>,

    /// Custom pattern bans.
    pub patterns: Vec<CustomPattern>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            extensions: vec![
                "java".to_string(),
                "kt".to_string(),
                "xml".to_string(),
                "properties".to_string(),
                "yml".to_string(),
                "yaml".to_string(),
            ],
            patterns: Vec::new(),
        }
    }
}

/// Custom pattern ban definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Name of the pattern; used as the rule id.
    pub name: String,

    /// Regex pattern to match.
    pub pattern: String,

    /// Optional message reported on a match.
    pub message: Option<String>,

    /// Report matches as info instead of violations.
    #[serde(default)]
    pub restricted: bool,

    /// Path globs the ban does not apply to.
    #[serde(default)]
    pub exempt: Vec<String>,
}

/// Policy document configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Default policy document path.
    pub path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert_eq!(config.commit.max_subject_length, 72);
        assert!(config.commit.allowed_types.contains(&"feat".to_string()));
        assert!(config.scan.builtin);
        assert!(config.output.color);
    }

    #[test]
    fn test_config_serialization() {
        let config = LintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("max_subject_length"));
    }

    #[test]
    fn test_custom_pattern_defaults() {
        let toml = r#"
[[scan.patterns]]
name = "no-printstacktrace"
pattern = "printStackTrace"
"#;
        let config: LintConfig = toml::from_str(toml).unwrap();
        let pattern = &config.scan.patterns[0];
        assert!(!pattern.restricted);
        assert!(pattern.exempt.is_empty());
    }
}
