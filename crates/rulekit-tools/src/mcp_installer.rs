//! MCP manifest management.
//!
//! A project-level MCP manifest is shared with the user: rulekit only owns the
//! server entries it tagged with [`MANAGED_TAG`]. On every install the tagged
//! entries are dropped and the resolved set is written back, so servers that
//! left the configuration disappear while hand-written ones survive.

use std::collections::BTreeMap;

use rulekit_fs::{NormalizedPath, io};
use rulekit_meta::McpServerEntry;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key marking a server entry as written by rulekit.
pub const MANAGED_TAG: &str = "rulekit";

const SERVERS_KEY: &str = "mcpServers";

/// Writes resolved MCP servers into one JSON manifest.
#[derive(Debug, Clone)]
pub struct McpInstaller {
    path: NormalizedPath,
}

impl McpInstaller {
    pub fn new(path: NormalizedPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Read the manifest. A missing or blank file is an empty object.
    fn read_manifest(&self) -> Result<Option<Map<String, Value>>> {
        let Some(text) = io::read_optional(&self.path)? else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(Some(Map::new()));
        }
        let value: Value = serde_json::from_str(&text).map_err(|e| self.invalid(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(self.invalid("top-level value is not an object")),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::McpManifest {
            path: self.path.to_native(),
            message: message.into(),
        }
    }

    /// Replace the rulekit-managed entries with `servers`.
    ///
    /// Disabled entries are never written. A managed entry replaces a user
    /// entry of the same name. Keys outside the servers map keep their
    /// position. A file is neither created nor touched when rulekit has
    /// nothing to write and nothing to remove.
    ///
    /// Returns `true` if the file changed.
    pub fn sync(&self, servers: &BTreeMap<String, McpServerEntry>) -> Result<bool> {
        let existing = self.read_manifest()?;
        let active: Vec<(&String, Value)> = servers
            .iter()
            .filter_map(|(name, entry)| entry.to_json().map(|json| (name, json)))
            .collect();

        if existing.is_none() && active.is_empty() {
            return Ok(false);
        }
        let mut manifest = existing.unwrap_or_default();

        let mut merged: BTreeMap<String, Value> = BTreeMap::new();
        let mut dropped = 0;
        match manifest.get(SERVERS_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Object(current)) => {
                for (name, entry) in current {
                    if is_managed(entry) {
                        tracing::debug!(server = %name, "dropping previously managed MCP entry");
                        dropped += 1;
                        continue;
                    }
                    merged.insert(name.clone(), entry.clone());
                }
            }
            Some(_) => return Err(self.invalid(format!("`{}` is not an object", SERVERS_KEY))),
        }
        if dropped == 0 && active.is_empty() {
            return Ok(false);
        }

        for (name, json) in active {
            if merged.contains_key(name.as_str()) {
                tracing::warn!(
                    server = %name,
                    path = %self.path,
                    "replacing user-defined MCP server with the configured one"
                );
            }
            merged.insert(name.clone(), tag(json));
        }

        let servers_value: Map<String, Value> = merged.into_iter().collect();
        manifest.insert(SERVERS_KEY.to_string(), Value::Object(servers_value));

        let mut text = serde_json::to_string_pretty(&Value::Object(manifest))?;
        text.push('\n');
        Ok(io::write_text(&self.path, &text)?)
    }
}

fn is_managed(entry: &Value) -> bool {
    entry.get(MANAGED_TAG).and_then(Value::as_bool) == Some(true)
}

fn tag(mut json: Value) -> Value {
    if let Value::Object(map) = &mut json {
        map.insert(MANAGED_TAG.to_string(), Value::Bool(true));
    }
    json
}
