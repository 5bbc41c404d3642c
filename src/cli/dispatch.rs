// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::PathBuf;

use console::style;

use crate::config::LintConfig;
use crate::error::{LintError, PolicyError, Result};
use crate::policy::{PolicyDocument, RuleCategory};
use crate::rules::{Report, RuleSet, Validator};
use crate::scan::Scanner;

use super::args::{Cli, Commands, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };

    if !config.output.color {
        console::set_colors_enabled(false);
    }

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Scan(args) => run_scan(&cli, &config, args),
        Commands::Rules => run_rules(&cli, &config),
        Commands::Init(args) => run_init(&cli, args),
        Commands::Version => run_version(),
    }
}

/// Resolve the policy document path, if any.
fn policy_path(cli: &Cli, config: &LintConfig) -> Option<PathBuf> {
    cli.policy.clone().or_else(|| config.policy.path.clone())
}

/// Build the validator from configuration plus the policy document.
fn build_validator(cli: &Cli, config: &LintConfig) -> Result<Validator> {
    let mut rules = RuleSet::from_config(config)?;

    if let Some(path) = policy_path(cli, config) {
        if path.exists() {
            let doc = PolicyDocument::load(&path)?;
            tracing::debug!("Applying policy document: {}", doc.title);
            rules.apply_document(&doc);
        } else if cli.policy.is_some() {
            // An explicitly requested document must exist.
            return Err(LintError::Policy(PolicyError::NotFound { path }));
        } else {
            tracing::debug!("Configured policy document not found: {:?}", path);
        }
    }

    Ok(Validator::new(rules))
}

/// Read the target artifact from stdin.
fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Decide the exit outcome from a batch of reports.
fn exit_status(reports: &[Report], strict: bool) -> Result<()> {
    let violations: usize = reports.iter().map(|r| r.violation_count()).sum();
    let infos: usize = reports.iter().map(|r| r.info_count()).sum();

    if violations > 0 || (strict && infos > 0) {
        Err(LintError::ValidationFailed {
            violations: violations + if strict { infos } else { 0 },
        })
    } else {
        Ok(())
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &LintConfig, args: super::args::CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let text = if let Some(message) = args.message {
        message
    } else if let Some(ref file) = args.file {
        std::fs::read_to_string(file)?
    } else {
        read_stdin()?
    };

    let validator = build_validator(cli, config)?;
    let report = validator.check_message_text(&text)?;
    report.print(cli.format);

    exit_status(std::slice::from_ref(&report), args.strict)
}

/// Run the scan command.
fn run_scan(cli: &Cli, config: &LintConfig, args: super::args::ScanArgs) -> Result<()> {
    tracing::debug!("Running scan command with args: {:?}", args);

    let validator = build_validator(cli, config)?;

    if args.paths.is_empty() {
        let text = read_stdin()?;
        let report = validator.check_source_text(&text)?;
        report.print(cli.format);
        return exit_status(std::slice::from_ref(&report), args.strict);
    }

    let scanner = Scanner::new(validator.rules().prohibitions.clone());
    let mut reports = Vec::new();

    for path in &args.paths {
        if path.is_dir() {
            for (file, findings) in scanner.scan_tree(path, &config.scan.extensions)? {
                let mut report = Report::new(file.display().to_string());
                report.findings = findings;
                validator.finalize(&mut report);
                reports.push(report);
            }
        } else {
            let mut report = Report::new(path.display().to_string());
            report.findings = scanner.scan_file(path)?;
            validator.finalize(&mut report);
            reports.push(report);
        }
    }

    for report in &reports {
        report.print(cli.format);
    }

    if cli.format != Some(OutputFormat::Json) {
        let violations: usize = reports.iter().map(|r| r.violation_count()).sum();
        println!(
            "{} target(s), {} violation(s)",
            reports.len(),
            violations
        );
    }

    exit_status(&reports, args.strict)
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &LintConfig) -> Result<()> {
    tracing::debug!("Running rules command");

    let path = policy_path(cli, config).ok_or_else(|| LintError::WithContext {
        context: "rules".to_string(),
        message: "no policy document specified (use --policy or set [policy] path)".to_string(),
    })?;

    let doc = PolicyDocument::load(&path)?;

    if cli.format == Some(OutputFormat::Json) {
        let json = serde_json::json!({
            "title": doc.title,
            "scope": doc.scope,
            "rules": doc.rules.iter().map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "category": r.category.as_str(),
                    "text": r.text,
                    "patterns": r.patterns,
                })
            }).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", style(&doc.title).bold());
    if let Some(ref scope) = doc.scope {
        println!("{}", style(scope).dim());
    }

    for category in RuleCategory::all() {
        let rules: Vec<_> = doc.rules_in(*category).collect();
        if rules.is_empty() {
            continue;
        }

        println!("\n{}", style(category.as_str()).cyan().bold());
        for rule in rules {
            println!("  {} {}", style(&rule.id).dim(), rule.text);
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(_cli: &Cli, args: super::args::InitArgs) -> Result<()> {
    use crate::config::default::example_config;
    use crate::error::ConfigError;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = std::path::Path::new("agentlint.toml");

    if config_path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).map_err(|e| LintError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created agentlint.toml");

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("agentlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
