// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in commit-message checks.

use crate::commit::CommitMessage;

use super::engine::RuleSet;
use super::findings::{Finding, Severity};

/// Rule id for the subject-case style preference.
pub const RULE_SUBJECT_CASE: &str = "subject-case";
/// Rule id for the trailing-period style preference.
pub const RULE_SUBJECT_PERIOD: &str = "subject-period";
/// Rule id for the imperative-mood style preference.
pub const RULE_SUBJECT_IMPERATIVE: &str = "subject-imperative";
/// Rule id for the header-length style preference.
pub const RULE_SUBJECT_LENGTH: &str = "subject-length";

/// Apply all built-in checks to a commit message.
pub fn apply_commit_checks(message: &CommitMessage, rules: &RuleSet) -> Vec<Finding> {
    let mut findings = Vec::new();

    // Mandatory checks
    if let Some(finding) = check_type_token(message, rules) {
        findings.push(finding);
    }
    findings.extend(check_breaking_footer_case(message, rules));
    findings.extend(check_footer_tokens(message, rules));

    // Preferred style checks
    if rules.check_subject_case {
        if let Some(finding) = check_subject_case(message) {
            findings.push(finding);
        }
    }
    if rules.check_trailing_period {
        if let Some(finding) = check_trailing_period(message) {
            findings.push(finding);
        }
    }
    if rules.check_imperative {
        if let Some(finding) = check_imperative_mood(message) {
            findings.push(finding);
        }
    }
    if let Some(finding) = check_header_length(message, rules) {
        findings.push(finding);
    }

    findings
}

/// Check that the type token is allowed or explicitly justified.
fn check_type_token(message: &CommitMessage, rules: &RuleSet) -> Option<Finding> {
    let token = message.commit_type.as_str();

    if rules.allowed_types.is_empty() {
        return None;
    }
    if rules.allowed_types.iter().any(|t| t == token)
        || rules.justified_types.iter().any(|t| t == token)
    {
        return None;
    }

    Some(Finding {
        rule: rules.type_rule.clone(),
        severity: Severity::Violation,
        message: format!("type token '{}' is not in the allowed set", token),
        suggestion: Some(format!("use one of: {}", rules.allowed_types.join(", "))),
        line: Some(1),
        column: None,
    })
}

/// Check that a breaking-change footer token is the uppercase literal.
///
/// Signaling via the subject `!` alone is sufficient; breaking intent is
/// never inferred from prose.
fn check_breaking_footer_case(message: &CommitMessage, rules: &RuleSet) -> Vec<Finding> {
    message
        .footers
        .iter()
        .filter(|f| f.is_breaking_any_case() && !f.is_breaking())
        .map(|f| Finding {
            rule: rules.breaking_rule.clone(),
            severity: Severity::Violation,
            message: format!(
                "breaking-change footer token '{}' must be uppercase",
                f.token
            ),
            suggestion: Some("write it as 'BREAKING CHANGE:'".to_string()),
            line: Some(f.line),
            column: None,
        })
        .collect()
}

/// Check that footer tokens use `-` instead of spaces.
fn check_footer_tokens(message: &CommitMessage, rules: &RuleSet) -> Vec<Finding> {
    message
        .footers
        .iter()
        // Any-case breaking tokens are owned by the casing check.
        .filter(|f| f.token_uses_spaces() && !f.is_breaking_any_case())
        .map(|f| Finding {
            rule: rules.footer_rule.clone(),
            severity: Severity::Violation,
            message: format!("footer token '{}' contains spaces", f.token),
            suggestion: Some(format!(
                "use '-' instead: '{}'",
                f.token.replace(' ', "-")
            )),
            line: Some(f.line),
            column: None,
        })
        .collect()
}

/// Check that the description starts lowercase.
fn check_subject_case(message: &CommitMessage) -> Option<Finding> {
    let first_char = message.description.chars().next()?;

    if first_char.is_uppercase() {
        Some(Finding {
            rule: RULE_SUBJECT_CASE.to_string(),
            severity: Severity::Info,
            message: "description should start with lowercase".to_string(),
            suggestion: Some("start the description with a lowercase letter".to_string()),
            line: Some(1),
            column: None,
        })
    } else {
        None
    }
}

/// Check that the description does not end with a period.
fn check_trailing_period(message: &CommitMessage) -> Option<Finding> {
    if message.description.ends_with('.') {
        Some(Finding {
            rule: RULE_SUBJECT_PERIOD.to_string(),
            severity: Severity::Info,
            message: "description should not end with a period".to_string(),
            suggestion: Some("remove the trailing period".to_string()),
            line: Some(1),
            column: None,
        })
    } else {
        None
    }
}

/// Check that the description starts in imperative mood.
fn check_imperative_mood(message: &CommitMessage) -> Option<Finding> {
    let first_word = message.description.split_whitespace().next()?;
    let lower = first_word.to_lowercase();

    // Common non-imperative patterns
    let non_imperative = [
        "added",
        "adding",
        "adds",
        "fixed",
        "fixing",
        "fixes",
        "updated",
        "updating",
        "updates",
        "removed",
        "removing",
        "removes",
        "changed",
        "changing",
        "changes",
        "implemented",
        "implementing",
        "implements",
        "created",
        "creating",
        "creates",
    ];

    if non_imperative.contains(&lower.as_str()) {
        Some(Finding {
            rule: RULE_SUBJECT_IMPERATIVE.to_string(),
            severity: Severity::Info,
            message: format!(
                "description should use imperative mood (found '{}')",
                first_word
            ),
            suggestion: Some(format!(
                "use imperative form like 'add' instead of '{}'",
                first_word
            )),
            line: Some(1),
            column: None,
        })
    } else {
        None
    }
}

/// Check the header length against the configured maximum.
fn check_header_length(message: &CommitMessage, rules: &RuleSet) -> Option<Finding> {
    let len = message.header_len();

    if len > rules.max_subject_length {
        Some(Finding {
            rule: RULE_SUBJECT_LENGTH.to_string(),
            severity: Severity::Info,
            message: format!(
                "subject is {} characters (max: {})",
                len, rules.max_subject_length
            ),
            suggestion: Some(format!(
                "shorten the subject to {} characters or less",
                rules.max_subject_length
            )),
            line: Some(1),
            column: None,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintConfig;

    fn rules() -> RuleSet {
        RuleSet::from_config(&LintConfig::default()).unwrap()
    }

    #[test]
    fn test_allowed_type_passes() {
        let message = CommitMessage::new("feat", "add the scanner");
        let findings = apply_commit_checks(&message, &rules());
        assert!(findings.iter().all(|f| f.rule != rules().type_rule));
    }

    #[test]
    fn test_unknown_type_flagged() {
        let message = CommitMessage::new("wip", "half done");
        let findings = apply_commit_checks(&message, &rules());
        let finding = findings
            .iter()
            .find(|f| f.rule == rules().type_rule)
            .unwrap();
        assert_eq!(finding.severity, Severity::Violation);
        assert!(finding.message.contains("wip"));
    }

    #[test]
    fn test_justified_type_passes() {
        let mut config = LintConfig::default();
        config.commit.justified_types = vec!["infra".to_string()];
        let rules = RuleSet::from_config(&config).unwrap();

        let message = CommitMessage::new("infra", "rotate certs");
        assert!(check_type_token(&message, &rules).is_none());
    }

    #[test]
    fn test_lowercase_breaking_footer_flagged() {
        let message =
            CommitMessage::new("feat", "change config").with_footer("breaking change", "format");
        let findings = check_breaking_footer_case(&message, &rules());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("uppercase"));
    }

    #[test]
    fn test_uppercase_breaking_footer_passes() {
        let message =
            CommitMessage::new("feat", "change config").with_footer("BREAKING CHANGE", "format");
        assert!(check_breaking_footer_case(&message, &rules()).is_empty());
        assert!(check_footer_tokens(&message, &rules()).is_empty());
    }

    #[test]
    fn test_spaced_footer_token_flagged() {
        let message = CommitMessage::new("fix", "close reader").with_footer("Reviewed by", "Alice");
        let findings = check_footer_tokens(&message, &rules());
        assert_eq!(findings.len(), 1);
        assert!(findings[0]
            .suggestion
            .as_deref()
            .unwrap()
            .contains("Reviewed-by"));
    }

    #[test]
    fn test_subject_case() {
        let message = CommitMessage::new("feat", "Add the scanner");
        assert!(check_subject_case(&message).is_some());

        let message = CommitMessage::new("feat", "add the scanner");
        assert!(check_subject_case(&message).is_none());
    }

    #[test]
    fn test_trailing_period() {
        let message = CommitMessage::new("feat", "add the scanner.");
        assert!(check_trailing_period(&message).is_some());
    }

    #[test]
    fn test_imperative_mood() {
        let message = CommitMessage::new("feat", "added the scanner");
        let finding = check_imperative_mood(&message).unwrap();
        assert_eq!(finding.severity, Severity::Info);

        let message = CommitMessage::new("feat", "add the scanner");
        assert!(check_imperative_mood(&message).is_none());
    }

    #[test]
    fn test_header_length() {
        let message = CommitMessage::new("feat", "a".repeat(100));
        let finding = check_header_length(&message, &rules()).unwrap();
        assert_eq!(finding.severity, Severity::Info);
    }
}
