//! rulekit CLI
//!
//! Installs rule documents and MCP servers from a declarative configuration
//! into IDE-specific locations.

mod cli;
mod commands;
mod error;

use std::error::Error as _;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = rulekit_tools::logging::init(verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }

    if let Err(e) = run(cli) {
        report(&e, verbose);
        std::process::exit(1);
    }
}

fn report(e: &CliError, verbose: bool) {
    eprintln!("{}: {}", "error".red().bold(), e);
    if verbose {
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
            source = cause.source();
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!(
                "{} Install AI coding rules into your IDEs",
                "rulekit".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "rulekit --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Init { force } => commands::run_init(&cwd, force),
        Commands::Install { ci, dry_run } => {
            let ci_env = rulekit_core::is_ci(std::env::var("CI").ok().as_deref());
            commands::run_install(&cwd, commands::InstallArgs {
                ci_env,
                force_ci: ci,
                dry_run,
            })
        }
        Commands::List => commands::run_list(&cwd),
    }
}
