// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// agentlint - Policy-compliance checker
///
/// Mechanically verifies commit messages and source text against the
/// decision rules of an AGENTS.md-style policy document.
#[derive(Parser, Debug)]
#[command(name = "agentlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Policy-compliance checker for AGENTS.md guides", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the policy document
    #[arg(short, long, global = true)]
    pub policy: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a commit message (default command)
    Check(CheckArgs),

    /// Scan source files against prohibition rules
    Scan(ScanArgs),

    /// List the rules parsed from the policy document
    Rules,

    /// Initialize agentlint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// The commit message to validate (reads stdin if omitted)
    pub message: Option<String>,

    /// Read the commit message from a file (e.g. .git/COMMIT_EDITMSG)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Strict mode: treat info findings as failures
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the scan command.
#[derive(Parser, Debug, Default, Clone)]
pub struct ScanArgs {
    /// Files or directories to scan (reads stdin if omitted)
    pub paths: Vec<PathBuf>,

    /// Strict mode: treat info findings as failures
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check(CheckArgs::default()))
    }
}
