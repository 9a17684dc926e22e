//! Locating and reading configuration sources.
//!
//! A project is configured either by a dedicated `rulekit.json` or by a
//! `rulekit` object inside its `package.json`. The dedicated file wins when
//! both exist.

use std::path::{Path, PathBuf};

use rulekit_fs::{NormalizedPath, RulekitPath, io};
use serde_json::Value;

use crate::config::RulekitConfig;
use crate::error::{Error, Result};

/// Key inside `package.json` holding an embedded configuration.
pub const PACKAGE_KEY: &str = "rulekit";

/// A configuration found for a directory.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// File the configuration was read from
    pub path: PathBuf,
    pub config: RulekitConfig,
    /// Whether `package.json` declares `workspaces`
    pub manifest_workspaces: bool,
}

impl LoadedConfig {
    /// Explicit `workspaces` wins; otherwise inferred from `package.json`.
    pub fn workspace_mode(&self) -> bool {
        self.config.workspaces.unwrap_or(self.manifest_workspaces)
    }
}

/// Load the configuration for `dir`, or `None` if it has none.
pub fn load_config(dir: &Path) -> Result<Option<LoadedConfig>> {
    let package_path = dir.join(RulekitPath::PackageManifest.as_str());
    let package = read_json_optional(&package_path)?;
    let manifest_workspaces = package
        .as_ref()
        .and_then(|pkg| pkg.get("workspaces"))
        .is_some_and(|ws| !ws.is_null());

    let config_path = dir.join(RulekitPath::ConfigFile.as_str());
    if config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "loading dedicated config");
        return Ok(Some(LoadedConfig {
            config: load_config_file(&config_path)?,
            path: config_path,
            manifest_workspaces,
        }));
    }

    let Some(embedded) = package.as_ref().and_then(|pkg| pkg.get(PACKAGE_KEY)) else {
        return Ok(None);
    };
    tracing::debug!(path = %package_path.display(), "loading config from package manifest");
    Ok(Some(LoadedConfig {
        config: RulekitConfig::from_value(embedded, &package_path)?,
        path: package_path,
        manifest_workspaces,
    }))
}

/// Read and parse a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<RulekitConfig> {
    let value = read_json(path)?;
    RulekitConfig::from_value(&value, path)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = io::read_text(&NormalizedPath::new(path))?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json_optional(path: &Path) -> Result<Option<Value>> {
    match io::read_optional(&NormalizedPath::new(path))? {
        Some(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(None),
    }
}
