//! List command implementation

use std::path::Path;

use colored::Colorize;
use rulekit_core::{Project, ResolvedConfig};
use rulekit_meta::RuleOrigin;

use super::{package_label, print_no_config};
use crate::error::{CliError, Result};

/// Run the list command in `path`.
///
/// Prints every package that resolves and fails if any does not.
pub fn run_list(path: &Path) -> Result<()> {
    let Some(project) = Project::load(path)? else {
        print_no_config();
        return Ok(());
    };

    let resolutions = project.resolve_all()?;
    let show_headers = project.is_workspace();
    let mut failed = 0usize;

    for resolution in &resolutions {
        let label = package_label(&resolution.relative_path);
        match &resolution.result {
            Ok(resolved) => {
                if show_headers {
                    println!("{}", format!("[{}]", label).bold());
                }
                print_resolved(resolved);
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "FAILED".red().bold(), label, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::user(format!(
            "{} package(s) could not be resolved",
            failed
        )));
    }
    Ok(())
}

fn print_resolved(resolved: &ResolvedConfig) {
    let targets: Vec<&str> = resolved.targets.iter().map(|t| t.as_str()).collect();
    println!("{} {}", "Targets:".bold(), targets.join(", "));

    println!("{} ({})", "Rules".bold(), resolved.rules.len());
    let width = resolved
        .rules
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);
    for rule in &resolved.rules {
        let origin = match &rule.origin {
            RuleOrigin::Local => "local".to_string(),
            RuleOrigin::Preset { name } => format!("preset {}", name),
        };
        println!(
            "   {:<width$}  {}",
            rule.name,
            origin.dimmed(),
            width = width
        );
    }

    if !resolved.mcp_servers.is_empty() {
        println!("{} ({})", "MCP servers".bold(), resolved.mcp_servers.len());
        for name in resolved.mcp_servers.keys() {
            println!("   {}", name);
        }
    }
    println!();
}
