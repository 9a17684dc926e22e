//! Well-known file names used by rulekit.

use std::path::Path;

/// Extension (without the dot) of rule documents.
pub const RULE_EXTENSION: &str = "mdc";

/// Conventional paths rulekit reads from or owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulekitPath {
    /// Dedicated configuration file (`rulekit.json`)
    ConfigFile,
    /// Node package manifest that may carry a `rulekit` key
    PackageManifest,
    /// Installed packages directory searched for presets
    NodeModules,
    /// Shared directory holding rule bodies for manifest-style targets
    SharedRulesDir,
}

impl RulekitPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigFile => "rulekit.json",
            Self::PackageManifest => "package.json",
            Self::NodeModules => "node_modules",
            Self::SharedRulesDir => ".rulekit",
        }
    }
}

impl AsRef<Path> for RulekitPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for RulekitPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
