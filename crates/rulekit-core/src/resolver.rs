//! Configuration resolution.
//!
//! Turns a package's configuration into a [`ResolvedConfig`]: local rules,
//! then the `rules` map, then presets in declaration order, followed by
//! overrides and the MCP merge.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rulekit_fs::io;
use rulekit_meta::{
    Ide, LoadedConfig, McpServerEntry, RuleFile, RuleOrigin, RuleOverride, RulekitConfig,
    load_config,
};

use crate::error::{Error, Result};
use crate::preset::{PresetLoader, merge_missing};
use crate::rules::RuleCollector;

/// The effective configuration of one package.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Package directory; every output is written below it
    pub root: PathBuf,
    /// File the configuration was read from
    pub config_path: PathBuf,
    pub config: RulekitConfig,
    /// Deduplicated, in declaration order
    pub targets: Vec<Ide>,
    /// Name-unique, in resolution order
    pub rules: Vec<RuleFile>,
    /// Active servers only; `false` entries have been applied and removed
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
    pub workspaces: bool,
}

/// Resolve the configuration found in `cwd`.
///
/// Returns `Ok(None)` when `cwd` has no configuration.
pub fn resolve(cwd: &Path) -> Result<Option<ResolvedConfig>> {
    let root = io::canonicalize(cwd)?;
    match load_config(&root)? {
        Some(loaded) => resolve_loaded(&root, loaded).map(Some),
        None => Ok(None),
    }
}

/// Resolve an already loaded configuration for the package at `root`.
pub fn resolve_loaded(root: &Path, loaded: LoadedConfig) -> Result<ResolvedConfig> {
    let workspaces = loaded.workspace_mode();
    let LoadedConfig {
        path: config_path,
        config,
        ..
    } = loaded;
    config.validate_sources(&config_path, workspaces)?;
    tracing::debug!(root = %root.display(), config = %config_path.display(), workspaces, "resolving");

    let mut rules = RuleCollector::new();
    if let Some(rules_dir) = &config.rules_dir {
        rules.load_dir(&root.join(rules_dir), &RuleOrigin::Local)?;
    }
    rules.load_sources(&config.rules, root, &RuleOrigin::Local)?;

    let mut mcp_servers = config.mcp_servers.clone();
    let mut presets = PresetLoader::new();
    for reference in &config.presets {
        let preset_servers = presets.load(reference, root, &mut rules)?;
        merge_missing(&mut mcp_servers, preset_servers);
    }

    apply_overrides(&mut rules, &config, root)?;
    mcp_servers.retain(|name, entry| {
        if entry.is_disabled() {
            tracing::debug!(server = %name, "server disabled by configuration");
        }
        !entry.is_disabled()
    });

    let rules = rules.finish()?;
    tracing::debug!(rules = rules.len(), servers = mcp_servers.len(), "resolved");

    Ok(ResolvedConfig {
        root: root.to_path_buf(),
        config_path,
        targets: config.targets_or_default(),
        rules,
        mcp_servers,
        workspaces,
        config,
    })
}

fn apply_overrides(rules: &mut RuleCollector, config: &RulekitConfig, root: &Path) -> Result<()> {
    for (name, rule_override) in &config.overrides {
        if !rules.contains(name) {
            return Err(Error::OverrideTargetMissing { name: name.clone() });
        }
        match rule_override {
            RuleOverride::Disable => {
                tracing::debug!(rule = %name, "rule disabled by override");
                rules.remove(name);
            }
            RuleOverride::Replace(path) => {
                tracing::debug!(rule = %name, path = %path, "rule replaced by override");
                rules.replace(name, &root.join(path))?;
            }
        }
    }
    Ok(())
}
