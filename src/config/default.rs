// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::LintConfig;

/// Get the default configuration.
pub fn default_config() -> LintConfig {
    LintConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# agentlint Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Commit-message rules
[commit]
max_subject_length = 72
allowed_types = ["feat", "fix", "docs", "style", "refactor", "perf", "test", "chore", "revert", "build", "ci"]
# Extra tokens accepted as explicitly justified
justified_types = []

[commit.style]
subject_case = true
trailing_period = true
imperative_mood = true

# Source-scan configuration
[scan]
builtin = true
extensions = ["java", "kt", "xml", "properties", "yml", "yaml"]

[[scan.patterns]]
name = "no-printstacktrace"
pattern = "printStackTrace"
message = "use the logger instead of printStackTrace"
exempt = ["**/test/**"]

[[scan.patterns]]
name = "raw-date"
pattern = "new Date\\("
message = "use java.time instead of java.util.Date"
restricted = true

# Policy document
[policy]
path = "AGENTS.md"

# Output configuration
[output]
color = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.commit.max_subject_length, 72);
        assert!(config.scan.builtin);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: LintConfig = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.scan.patterns.len(), 2);
    }
}
