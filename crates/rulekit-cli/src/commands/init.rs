//! Init command implementation
//!
//! Writes a starter `rulekit.json` and creates the rules directory.

use std::path::Path;

use colored::Colorize;
use rulekit_fs::{NormalizedPath, RulekitPath, io};
use serde_json::json;

use crate::error::{CliError, Result};

const DEFAULT_RULES_DIR: &str = "rules";

/// Run the init command in `path`.
///
/// Refuses to replace an existing `rulekit.json` unless `force` is set.
pub fn run_init(path: &Path, force: bool) -> Result<()> {
    let root = NormalizedPath::new(path);
    let config_path = root.join(RulekitPath::ConfigFile.as_str());

    if config_path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite it.",
            RulekitPath::ConfigFile
        )));
    }

    let config = json!({
        "rulesDir": DEFAULT_RULES_DIR,
        "targets": ["cursor"],
    });
    let mut content = serde_json::to_string_pretty(&config)?;
    content.push('\n');
    io::write_text(&config_path, &content)?;

    let rules_dir = root.join(DEFAULT_RULES_DIR);
    std::fs::create_dir_all(rules_dir.to_native())?;

    println!(
        "{} Initialized rulekit in {}",
        "OK".green().bold(),
        path.display()
    );
    println!(
        "Add {} files to {}/ and run {}.",
        ".mdc".cyan(),
        DEFAULT_RULES_DIR,
        "rulekit install".cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_starter_config() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path(), false).unwrap();

        let content = fs::read_to_string(temp.path().join("rulekit.json")).unwrap();
        assert_eq!(
            content,
            "{\n  \"rulesDir\": \"rules\",\n  \"targets\": [\n    \"cursor\"\n  ]\n}\n"
        );
        assert!(temp.path().join("rules").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rulekit.json"), "{}").unwrap();

        let err = run_init(temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(temp.path().join("rulekit.json")).unwrap(),
            "{}"
        );

        run_init(temp.path(), true).unwrap();
        assert!(
            fs::read_to_string(temp.path().join("rulekit.json"))
                .unwrap()
                .contains("rulesDir")
        );
    }
}
