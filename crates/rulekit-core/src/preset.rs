//! Preset resolution.
//!
//! A preset reference is tried, in order, as:
//!
//! 1. a path to a configuration file,
//! 2. a directory holding `rulekit.json`,
//! 3. an installed package, probed as `node_modules/<reference>` in the base
//!    directory and each of its ancestors.
//!
//! Presets nest. Each preset is identified by the canonical path of its
//! configuration file and merged at most once, which also makes cycles safe.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use rulekit_fs::{RulekitPath, io};
use rulekit_meta::{McpServerEntry, RuleOrigin, RulekitConfig, load_config_file};

use crate::error::{Error, Result};
use crate::rules::RuleCollector;

/// A preset's configuration file and output namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetLocation {
    pub config_path: PathBuf,
    /// The package reference, or the configuration's directory name
    pub name: String,
}

/// A file that is a config itself, or a directory containing one.
fn config_at(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    let nested = candidate.join(RulekitPath::ConfigFile.as_str());
    nested.is_file().then_some(nested)
}

fn dir_name(config_path: &Path) -> String {
    config_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "preset".to_string())
}

/// Find the configuration for `reference`, resolving from `base`.
pub fn locate(reference: &str, base: &Path) -> Result<PresetLocation> {
    if let Some(config_path) = config_at(&base.join(reference)) {
        return Ok(PresetLocation {
            name: dir_name(&config_path),
            config_path,
        });
    }

    for dir in base.ancestors() {
        let candidate = dir.join(RulekitPath::NodeModules.as_str()).join(reference);
        if let Some(config_path) = config_at(&candidate) {
            tracing::debug!(reference, path = %config_path.display(), "resolved preset package");
            return Ok(PresetLocation {
                config_path,
                name: reference.trim_end_matches('/').to_string(),
            });
        }
    }

    Err(Error::PresetNotFound {
        reference: reference.to_string(),
    })
}

/// Loads presets into a shared rule collector.
#[derive(Debug, Default)]
pub struct PresetLoader {
    visited: HashSet<PathBuf>,
}

impl PresetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `reference` and its nested presets, appending their rules to
    /// `rules`.
    ///
    /// Returns the preset's MCP servers: its own declarations (including
    /// `false`) win over those of its nested presets, and an earlier nested
    /// preset wins over a later one. A preset that was already loaded
    /// contributes nothing a second time.
    pub fn load(
        &mut self,
        reference: &str,
        base: &Path,
        rules: &mut RuleCollector,
    ) -> Result<BTreeMap<String, McpServerEntry>> {
        let location = locate(reference, base)?;
        let identity = io::canonicalize(&location.config_path)?;
        if !self.visited.insert(identity) {
            tracing::debug!(reference, "preset already loaded, skipping");
            return Ok(BTreeMap::new());
        }

        let config = load_config_file(&location.config_path).map_err(|e| Error::PresetInvalid {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;
        let rules_dir = config.rules_dir.as_deref().ok_or_else(|| Error::PresetInvalid {
            reference: reference.to_string(),
            message: "a preset must declare `rulesDir`".to_string(),
        })?;
        warn_ignored_keys(reference, &config);

        let preset_dir = location
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let origin = RuleOrigin::Preset {
            name: location.name.clone(),
        };
        tracing::debug!(reference, name = %location.name, dir = %preset_dir.display(), "loading preset");

        rules.load_dir(&preset_dir.join(rules_dir), &origin)?;
        rules.load_sources(&config.rules, &preset_dir, &origin)?;

        let mut servers = config.mcp_servers.clone();
        for nested in &config.presets {
            let nested_servers = self.load(nested, &preset_dir, rules)?;
            merge_missing(&mut servers, nested_servers);
        }
        Ok(servers)
    }
}

/// Insert entries from `lower` whose names `servers` does not declare.
pub fn merge_missing(
    servers: &mut BTreeMap<String, McpServerEntry>,
    lower: BTreeMap<String, McpServerEntry>,
) {
    for (name, entry) in lower {
        servers.entry(name).or_insert(entry);
    }
}

fn warn_ignored_keys(reference: &str, config: &RulekitConfig) {
    if config.targets.is_some() {
        tracing::warn!(reference, "preset `targets` are ignored");
    }
    if !config.overrides.is_empty() {
        tracing::warn!(reference, "preset `overrides` are ignored");
    }
}
