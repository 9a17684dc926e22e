//! Install command implementation

use std::path::Path;

use colored::Colorize;
use rulekit_core::{InstallOptions, InstallSummary, Project};

use super::{package_label, print_no_config};
use crate::error::{CliError, Result};

/// Inputs of the install command.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallArgs {
    /// The environment marks this as a CI run
    pub ci_env: bool,
    /// `--ci`
    pub force_ci: bool,
    /// `--dry-run`
    pub dry_run: bool,
}

/// Run the install command in `path`.
pub fn run_install(path: &Path, args: InstallArgs) -> Result<()> {
    let Some(project) = Project::load(path)? else {
        print_no_config();
        return Ok(());
    };

    if let Some(reason) = project.skip_reason(args.ci_env, args.force_ci) {
        println!("{} Skipping install: {}", "=>".yellow().bold(), reason);
        return Ok(());
    }

    if args.dry_run {
        println!(
            "{} Dry run: resolving without writing files",
            "=>".blue().bold()
        );
    } else {
        println!("{} Installing rules...", "=>".blue().bold());
    }

    let report = project.install(InstallOptions {
        dry_run: args.dry_run,
    })?;

    if report.packages.is_empty() {
        println!("{} Nothing to install.", "=>".yellow().bold());
        return Ok(());
    }

    for outcome in &report.packages {
        let label = package_label(&outcome.relative_path);
        match &outcome.result {
            Ok(summary) => print_summary(&label, summary),
            Err(e) => println!("{} {}: {}", "FAILED".red().bold(), label, e),
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        let failed = report.failures().count();
        Err(CliError::user(format!(
            "{} of {} package(s) failed to install",
            failed,
            report.packages.len()
        )))
    }
}

fn print_summary(label: &str, summary: &InstallSummary) {
    let targets: Vec<&str> = summary.targets.iter().map(|t| t.as_str()).collect();
    let status = if summary.dry_run {
        "PLAN".cyan().bold()
    } else {
        "OK".green().bold()
    };
    println!(
        "{} {}: {} rule(s), {} MCP server(s) -> {}",
        status,
        label,
        summary.rules,
        summary.mcp_servers,
        targets.join(", ")
    );

    if summary.dry_run {
        for (ide, location) in &summary.locations {
            println!(
                "   {} {} ({})",
                "-".dimmed(),
                location.path.cyan(),
                ide.as_str().dimmed()
            );
        }
    }
}
