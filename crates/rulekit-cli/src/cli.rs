//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// rulekit - Install AI coding rules and MCP servers into your IDEs
#[derive(Parser, Debug)]
#[command(name = "rulekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (debug logs and full error chains)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a starter rulekit.json and rules directory
    Init {
        /// Overwrite an existing rulekit.json
        #[arg(long)]
        force: bool,
    },

    /// Resolve the configuration and write every target
    ///
    /// Examples:
    ///   rulekit install              # Install for this project
    ///   rulekit install --dry-run    # Show what would be written
    ///   rulekit install --ci         # Install even when CI is set
    Install {
        /// Install even when running in CI
        #[arg(long)]
        ci: bool,

        /// Resolve and report without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the resolved rules, MCP servers and targets
    List,
}
