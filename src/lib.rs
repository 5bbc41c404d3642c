// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! agentlint - Policy-Compliance Checker
//!
//! A CLI tool and library for mechanically verifying artifacts against the
//! decision rules of an AGENTS.md-style policy document.
//!
//! # Features
//!
//! - **Commit Validation**: Conventional Commits parsing and rule checks
//! - **Prohibition Scanning**: pattern bans over source files and trees
//! - **Policy Documents**: Mandatory/Preferred/Restricted/Prohibited rules
//!   parsed from structured Markdown
//! - **Layered Configuration**: TOML configuration with sensible defaults
//!
//! # Example
//!
//! ```no_run
//! use agentlint::config::LintConfig;
//! use agentlint::rules::{RuleSet, Validator};
//!
//! // Load configuration
//! let config = LintConfig::load().unwrap();
//!
//! // Build the validator and check a commit message
//! let validator = Validator::new(RuleSet::from_config(&config).unwrap());
//! let report = validator
//!     .check_message_text("feat(parser): add footer handling")
//!     .unwrap();
//! assert!(report.is_clean());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod policy;
pub mod rules;
pub mod scan;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of agentlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
