// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{CommitError, LintError, Result};
use lazy_static::lazy_static;
use regex::Regex;

use super::footer::{self, Footer};

lazy_static! {
    /// Regex for the subject line: `<type>[(scope)][!]: <description>`.
    static ref SUBJECT_REGEX: Regex = Regex::new(
        r"^(?P<type>[^\s():!]+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?: (?P<desc>.*)$"
    )
    .unwrap();
}

/// A structured commit message.
///
/// The type is kept as a raw token rather than a closed enum: unknown types
/// must survive parsing so the validator can flag them.
#[derive(Debug, Clone)]
pub struct CommitMessage {
    /// Commit type token (feat, fix, etc.).
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Whether the subject carries the `!` breaking marker.
    pub breaking: bool,
    /// Description (the text after `: ` on the subject line).
    pub description: String,
    /// Optional body.
    pub body: Option<String>,
    /// Ordered footer (token, value) pairs.
    pub footers: Vec<Footer>,
}

impl CommitMessage {
    /// Create a new commit message.
    pub fn new(commit_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            commit_type: commit_type.into(),
            scope: None,
            breaking: false,
            description: description.into(),
            body: None,
            footers: Vec::new(),
        }
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body_str = body.into();
        if !body_str.is_empty() {
            self.body = Some(body_str);
        }
        self
    }

    /// Set the `!` breaking marker.
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = breaking;
        self
    }

    /// Append a footer pair.
    pub fn with_footer(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        let line = self.footers.last().map(|f| f.line + 1).unwrap_or(3);
        self.footers.push(Footer {
            token: token.into(),
            value: value.into(),
            line,
        });
        self
    }

    /// Parse a commit message from a string.
    ///
    /// Three ordered phases: subject, body, footers. The subject is the first
    /// line; a blank line separates it from the body; the final paragraph is
    /// the footer block iff its first line introduces a `token: value` pair.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(LintError::EmptyInput);
        }

        let lines: Vec<&str> = text.lines().collect();
        let subject_line = lines[0];

        let caps = SUBJECT_REGEX.captures(subject_line).ok_or_else(|| {
            let reason = if !subject_line.contains(": ") {
                "no ': ' separator after the type prefix".to_string()
            } else {
                "leading token is not <type>[(scope)][!]".to_string()
            };
            LintError::Commit(CommitError::MalformedSubject { reason })
        })?;

        let commit_type = caps["type"].to_string();
        let scope = caps.name("scope").map(|m| m.as_str().to_string());
        let breaking = caps.name("breaking").is_some();
        let description = caps["desc"].to_string();

        // Paragraph blocks after the subject, with 1-based start lines.
        let mut blocks: Vec<(usize, Vec<&str>)> = Vec::new();
        let mut current: Option<(usize, Vec<&str>)> = None;
        for (idx, line) in lines.iter().enumerate().skip(1) {
            if line.trim().is_empty() {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            } else if let Some((_, block_lines)) = current.as_mut() {
                block_lines.push(line);
            } else {
                current = Some((idx + 1, vec![line]));
            }
        }
        if let Some(block) = current.take() {
            blocks.push(block);
        }

        let mut footers = Vec::new();
        if let Some((start, block_lines)) = blocks.last() {
            let block_text = block_lines.join("\n");
            if let Some(parsed) = footer::parse_block(&block_text, *start) {
                footers = parsed;
                blocks.pop();
            }
        }

        let body = if blocks.is_empty() {
            None
        } else {
            Some(
                blocks
                    .iter()
                    .map(|(_, block_lines)| block_lines.join("\n"))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            )
        };

        Ok(Self {
            commit_type,
            scope,
            breaking,
            description,
            body,
            footers,
        })
    }

    /// Whether a breaking change is signaled, by subject `!` or by an
    /// uppercase breaking-change footer token.
    pub fn is_breaking(&self) -> bool {
        self.breaking || self.footers.iter().any(|f| f.is_breaking())
    }

    /// Format the commit message as a string.
    pub fn format(&self) -> String {
        let mut result = self.header();

        if let Some(ref body) = self.body {
            result.push_str("\n\n");
            result.push_str(body);
        }

        if !self.footers.is_empty() {
            result.push_str("\n\n");
            let rendered: Vec<String> = self.footers.iter().map(Footer::format).collect();
            result.push_str(&rendered.join("\n"));
        }

        result
    }

    /// Get the subject line of the commit message.
    ///
    /// For any input that parsed successfully this reproduces the original
    /// subject line byte-for-byte.
    pub fn header(&self) -> String {
        let mut result = String::new();

        result.push_str(&self.commit_type);

        if let Some(ref scope) = self.scope {
            result.push('(');
            result.push_str(scope);
            result.push(')');
        }

        if self.breaking {
            result.push('!');
        }

        result.push_str(": ");
        result.push_str(&self.description);

        result
    }

    /// Get the header length.
    pub fn header_len(&self) -> usize {
        self.header().chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let msg = CommitMessage::parse("feat: add policy loader").unwrap();
        assert_eq!(msg.commit_type, "feat");
        assert!(msg.scope.is_none());
        assert_eq!(msg.description, "add policy loader");
        assert!(!msg.is_breaking());
    }

    #[test]
    fn test_parse_with_scope() {
        let msg = CommitMessage::parse("fix(parser): handle trailing comma").unwrap();
        assert_eq!(msg.commit_type, "fix");
        assert_eq!(msg.scope, Some("parser".to_string()));
        assert_eq!(msg.description, "handle trailing comma");
    }

    #[test]
    fn test_parse_breaking_marker() {
        let msg = CommitMessage::parse("feat!: drop the legacy flag").unwrap();
        assert!(msg.breaking);
        assert!(msg.is_breaking());
    }

    #[test]
    fn test_parse_breaking_footer() {
        let text = "feat: allow provided config object to extend other configs\n\nBREAKING CHANGE: extends key now used for extending other config files";
        let msg = CommitMessage::parse(text).unwrap();
        assert!(!msg.breaking);
        assert!(msg.is_breaking());
        assert!(msg.body.is_none());
        assert_eq!(msg.footers.len(), 1);
        assert_eq!(msg.footers[0].token, "BREAKING CHANGE");
    }

    #[test]
    fn test_parse_body_and_footers() {
        let text = "fix: close the reader on error\n\nThe reader leaked when parsing failed.\n\nRefs: #42\nReviewed-by: Alice";
        let msg = CommitMessage::parse(text).unwrap();
        assert_eq!(msg.body.as_deref(), Some("The reader leaked when parsing failed."));
        assert_eq!(msg.footers.len(), 2);
        assert_eq!(msg.footers[0].line, 5);
        assert_eq!(msg.footers[1].token, "Reviewed-by");
        assert_eq!(msg.footers[1].line, 6);
    }

    #[test]
    fn test_parse_body_only() {
        let text = "fix: close the reader\n\nPlain prose, no pairs here.";
        let msg = CommitMessage::parse(text).unwrap();
        assert!(msg.footers.is_empty());
        assert_eq!(msg.body.as_deref(), Some("Plain prose, no pairs here."));
    }

    #[test]
    fn test_parse_unknown_type_survives() {
        let msg = CommitMessage::parse("wip: not done yet").unwrap();
        assert_eq!(msg.commit_type, "wip");
    }

    #[test]
    fn test_parse_no_separator() {
        let err = CommitMessage::parse("update parser handling").unwrap_err();
        assert!(matches!(
            err,
            LintError::Commit(CommitError::MalformedSubject { .. })
        ));
    }

    #[test]
    fn test_parse_token_with_whitespace() {
        let err = CommitMessage::parse("my type: something").unwrap_err();
        assert!(err.to_string().contains("leading token"));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = CommitMessage::parse("   \n  ").unwrap_err();
        assert!(matches!(err, LintError::EmptyInput));
    }

    #[test]
    fn test_header_round_trip() {
        for subject in [
            "feat: add policy loader",
            "fix(parser): handle trailing comma",
            "feat!: drop the legacy flag",
            "refactor(core)!: rework the engine",
            "feat(): odd but parseable",
        ] {
            let msg = CommitMessage::parse(subject).unwrap();
            assert_eq!(msg.header(), subject);
        }
    }

    #[test]
    fn test_format_full_message() {
        let msg = CommitMessage::new("feat", "add scanner")
            .with_scope("scan")
            .with_body("Scans source trees.")
            .with_footer("Refs", "#7");
        assert_eq!(
            msg.format(),
            "feat(scan): add scanner\n\nScans source trees.\n\nRefs: #7"
        );
    }

    #[test]
    fn test_format_breaking() {
        let msg = CommitMessage::new("feat", "breaking change").with_breaking(true);
        assert!(msg.format().starts_with("feat!:"));
    }
}
