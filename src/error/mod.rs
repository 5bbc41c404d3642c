// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the agentlint application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for agentlint operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Policy document errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    // Commit message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // Scan errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Artifact text was empty or whitespace-only
    #[error("Input is empty or whitespace-only")]
    EmptyInput,

    // Findings were reported; used by the CLI to set a non-zero exit code
    #[error("Validation failed: {violations} violation(s) found")]
    ValidationFailed { violations: usize },

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Policy-document errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Policy document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unknown rule category '{heading}' at line {line}")]
    UnknownRuleCategory { heading: String, line: usize },

    #[error("Policy document has no title heading")]
    MissingTitle,

    #[error("Failed to read policy document: {message}")]
    ReadFailed { message: String },
}

/// Commit-message errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Malformed subject: {reason}")]
    MalformedSubject { reason: String },
}

/// Scan-related errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Invalid exemption glob '{pattern}': {message}")]
    InvalidExemption { pattern: String, message: String },

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },
}

/// Result type alias for agentlint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_policy_error_display() {
        let err = PolicyError::UnknownRuleCategory {
            heading: "Optional".to_string(),
            line: 12,
        };
        let text = err.to_string();
        assert!(text.contains("Optional"));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_commit_error_display() {
        let err = CommitError::MalformedSubject {
            reason: "no ': ' separator".to_string(),
        };
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn test_empty_input_display() {
        assert!(LintError::EmptyInput.to_string().contains("empty"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.context("loading policy").unwrap_err();
        assert!(err.to_string().contains("loading policy"));
    }
}
