//! Error types for rulekit-core

use std::fmt;
use std::path::PathBuf;

/// Result type for rulekit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A rule whose content could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSourceFailure {
    /// Rule name, or the declared key / rules directory the source came from
    pub rule: String,
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for RuleSourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.rule, self.path.display(), self.reason)
    }
}

fn list_failures(failures: &[RuleSourceFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n  - {}", failure))
        .collect()
}

/// Errors that can occur while resolving or installing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every rule source that could not be read, across the whole resolution
    #[error("{} rule source(s) could not be read:{}", .failures.len(), list_failures(.failures))]
    RuleSourcesMissing { failures: Vec<RuleSourceFailure> },

    #[error("Preset '{reference}' could not be found")]
    PresetNotFound { reference: String },

    #[error("Preset '{reference}' is invalid: {message}")]
    PresetInvalid { reference: String, message: String },

    #[error("Override '{name}' does not match any resolved rule")]
    OverrideTargetMissing { name: String },

    /// Two rules map to the same output file
    #[error("Rules {first} and {second} would both be written as '{output}'")]
    OutputCollision {
        output: String,
        first: String,
        second: String,
    },

    #[error("Invalid glob pattern '{pattern}' for rule '{key}': {message}")]
    GlobPattern {
        key: String,
        pattern: String,
        message: String,
    },

    #[error("Workspace discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] rulekit_fs::Error),

    #[error(transparent)]
    Meta(#[from] rulekit_meta::Error),

    #[error(transparent)]
    Tools(#[from] rulekit_tools::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sources_lists_every_failure() {
        let err = Error::RuleSourcesMissing {
            failures: vec![
                RuleSourceFailure {
                    rule: "a".into(),
                    path: PathBuf::from("rules/a.mdc"),
                    reason: "not found".into(),
                },
                RuleSourceFailure {
                    rule: "b".into(),
                    path: PathBuf::from("rules/b.mdc"),
                    reason: "not found".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "2 rule source(s) could not be read:\n  - a: rules/a.mdc (not found)\n  - b: rules/b.mdc (not found)"
        );
    }
}
