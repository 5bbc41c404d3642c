// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit footer (token, value) pairs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for a line that introduces a footer pair.
    ///
    /// Tokens containing spaces must parse here so the validator can flag
    /// them; the parser never rejects them.
    static ref FOOTER_LINE: Regex =
        Regex::new(r"^(?P<token>[A-Za-z][A-Za-z0-9 _-]*?): (?P<value>.*)$").unwrap();
}

/// Footer tokens that legally contain a space or signal a breaking change.
const BREAKING_TOKENS: &[&str] = &["BREAKING CHANGE", "BREAKING-CHANGE"];

/// A single footer entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Footer token (e.g. `Reviewed-by`, `BREAKING CHANGE`).
    pub token: String,
    /// Footer value; may span multiple lines.
    pub value: String,
    /// 1-based line number of the token line in the original message.
    pub line: usize,
}

impl Footer {
    /// Whether this footer signals a breaking change (uppercase form only).
    pub fn is_breaking(&self) -> bool {
        BREAKING_TOKENS.contains(&self.token.as_str())
    }

    /// Whether the token is a breaking-change token in any casing.
    ///
    /// Used by the casing rule: `breaking change:` parses, then gets flagged.
    pub fn is_breaking_any_case(&self) -> bool {
        let upper = self.token.to_ascii_uppercase();
        BREAKING_TOKENS.contains(&upper.as_str())
    }

    /// Whether the token uses spaces where `-` is required.
    pub fn token_uses_spaces(&self) -> bool {
        self.token.contains(' ') && !self.is_breaking()
    }

    /// Serialize the footer back to its source form.
    pub fn format(&self) -> String {
        format!("{}: {}", self.token, self.value)
    }
}

/// Parse a paragraph as a footer block.
///
/// Returns `None` when the first line does not introduce a `token: value`
/// pair (the paragraph is body text, not footers). Lines that do not start a
/// new pair are continuation lines of the preceding value.
pub fn parse_block(block: &str, first_line: usize) -> Option<Vec<Footer>> {
    let mut footers: Vec<Footer> = Vec::new();

    for (offset, line) in block.lines().enumerate() {
        if let Some(caps) = FOOTER_LINE.captures(line) {
            footers.push(Footer {
                token: caps["token"].to_string(),
                value: caps["value"].to_string(),
                line: first_line + offset,
            });
        } else if let Some(last) = footers.last_mut() {
            last.value.push('\n');
            last.value.push_str(line);
        } else {
            return None;
        }
    }

    if footers.is_empty() {
        None
    } else {
        Some(footers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_footer() {
        let footers = parse_block("Reviewed-by: Alice", 3).unwrap();
        assert_eq!(footers.len(), 1);
        assert_eq!(footers[0].token, "Reviewed-by");
        assert_eq!(footers[0].value, "Alice");
        assert_eq!(footers[0].line, 3);
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let footers = parse_block("BREAKING CHANGE: config format changed", 3).unwrap();
        assert!(footers[0].is_breaking());
        assert!(!footers[0].token_uses_spaces());
    }

    #[test]
    fn test_lowercase_breaking_token_parses() {
        let footers = parse_block("breaking change: oops", 3).unwrap();
        assert!(!footers[0].is_breaking());
        assert!(footers[0].is_breaking_any_case());
    }

    #[test]
    fn test_token_with_spaces_flaggable() {
        let footers = parse_block("Reviewed by: Alice", 3).unwrap();
        assert!(footers[0].token_uses_spaces());
    }

    #[test]
    fn test_continuation_lines() {
        let block = "BREAKING CHANGE: first line\nsecond line";
        let footers = parse_block(block, 5).unwrap();
        assert_eq!(footers.len(), 1);
        assert_eq!(footers[0].value, "first line\nsecond line");
    }

    #[test]
    fn test_body_paragraph_is_not_footers() {
        assert!(parse_block("This paragraph is prose.", 3).is_none());
        assert!(parse_block("", 3).is_none());
    }

    #[test]
    fn test_prose_with_leading_colon_pair_still_parses() {
        // `words: rest` at the start of a block is indistinguishable from a
        // footer; the space-token rule owns these at validation time.
        let footers = parse_block("see the docs: they explain it", 3).unwrap();
        assert!(footers[0].token_uses_spaces());
        // Tokens are word-shaped, so a leading parenthesis disqualifies.
        assert!(parse_block("(note): something", 3).is_none());
    }

    #[test]
    fn test_footer_format_round_trip() {
        let footers = parse_block("Refs: #42", 3).unwrap();
        assert_eq!(footers[0].format(), "Refs: #42");
    }
}
