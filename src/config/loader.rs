// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, LintError, Result};
use std::path::{Path, PathBuf};

use super::schema::LintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["agentlint.toml", ".agentlint.toml", ".config/agentlint.toml"];

/// Find a project configuration file upward from a starting directory.
pub fn find_project_config_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    None
}

/// Find the user-level configuration in the home or XDG config directory.
pub fn find_user_config_file() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let lint_config = config_dir.join("agentlint").join("config.toml");
        if lint_config.exists() {
            return Some(lint_config);
        }
    }

    None
}

/// Load configuration, merging the discovered layers.
///
/// The user-level home/XDG config (or the defaults) is the base; a project
/// file found upward from the working directory is the overlay.
pub fn load_config() -> Result<LintConfig> {
    let user = find_user_config_file();
    let project = std::env::current_dir()
        .ok()
        .and_then(|dir| find_project_config_from(&dir));

    let base = match user {
        Some(ref path) => load_config_from(path)?,
        None => {
            tracing::debug!("No user configuration found, using defaults");
            super::default::default_config()
        }
    };

    match project {
        // The upward walk can reach the home file itself; don't overlay a
        // layer onto itself.
        Some(ref path) if user.as_deref() != Some(path.as_path()) => {
            let overlay = load_config_from(path)?;
            Ok(merge_configs(base, overlay))
        }
        Some(_) => Ok(base),
        None => {
            tracing::debug!("No project configuration found");
            Ok(base)
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    toml::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Merge two configurations, with the overlay taking precedence.
pub fn merge_configs(base: LintConfig, overlay: LintConfig) -> LintConfig {
    let defaults = LintConfig::default();

    LintConfig {
        commit: super::schema::CommitConfig {
            allowed_types: if overlay.commit.allowed_types != defaults.commit.allowed_types {
                overlay.commit.allowed_types
            } else {
                base.commit.allowed_types
            },
            justified_types: if !overlay.commit.justified_types.is_empty() {
                overlay.commit.justified_types
            } else {
                base.commit.justified_types
            },
            max_subject_length: if overlay.commit.max_subject_length
                != defaults.commit.max_subject_length
            {
                overlay.commit.max_subject_length
            } else {
                base.commit.max_subject_length
            },
            style: overlay.commit.style,
        },
        scan: super::schema::ScanConfig {
            builtin: overlay.scan.builtin && base.scan.builtin,
            extensions: if overlay.scan.extensions != defaults.scan.extensions {
                overlay.scan.extensions
            } else {
                base.scan.extensions
            },
            patterns: {
                let mut merged = base.scan.patterns;
                merged.extend(overlay.scan.patterns);
                merged
            },
        },
        policy: if overlay.policy.path.is_some() {
            overlay.policy
        } else {
            base.policy
        },
        output: overlay.output,
    }
}
