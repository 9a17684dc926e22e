//! Command implementations for rulekit-cli

pub mod init;
pub mod install;
pub mod list;

pub use init::run_init;
pub use install::{InstallArgs, run_install};
pub use list::run_list;

use colored::Colorize;

/// Guidance printed when a directory has no configuration.
pub(crate) fn print_no_config() {
    println!(
        "{} No rulekit configuration found (rulekit.json or a \"rulekit\" key in package.json).",
        "=>".yellow().bold()
    );
    println!("Run {} to create one.", "rulekit init".cyan());
}

pub(crate) fn package_label(relative_path: &str) -> String {
    if relative_path == rulekit_core::ROOT_PACKAGE {
        "(root)".to_string()
    } else {
        relative_path.to_string()
    }
}
