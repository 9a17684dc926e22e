//! The `rulekit.json` configuration schema.
//!
//! The same schema is used for a project's own configuration and for a
//! preset's configuration. Keys are checked against [`KNOWN_KEYS`] before any
//! typed parsing so that every unknown key can be reported at once.
//!
//! # Example
//!
//! ```json
//! {
//!   "rulesDir": "rules",
//!   "targets": ["cursor", "claude"],
//!   "presets": ["@acme/rulekit-preset", "./presets/internal"],
//!   "rules": { "docs": "docs/rules/*.mdc" },
//!   "overrides": { "legacy-style": false, "testing": "./rules/testing-v2.mdc" },
//!   "mcpServers": { "search": { "url": "http://localhost:4000" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ide::Ide;
use crate::mcp::McpServerEntry;

/// Every top-level key a configuration object may contain.
pub const KNOWN_KEYS: &[&str] = &[
    "rulesDir",
    "targets",
    "ides",
    "presets",
    "rules",
    "overrides",
    "mcpServers",
    "workspaces",
    "skipInstall",
    "installOnCI",
];

/// What an `overrides` entry does to an existing rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOverride {
    /// `false`: drop the rule
    Disable,
    /// A path: reload the rule's content from this file
    Replace(String),
}

impl<'de> Deserialize<'de> for RuleOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(Self::Disable),
            Value::String(path) if !path.is_empty() => Ok(Self::Replace(path)),
            _ => Err(de::Error::custom("must be a file path or `false`")),
        }
    }
}

/// A parsed configuration object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RulekitConfig {
    pub rules_dir: Option<String>,
    /// `None` when neither `targets` nor `ides` was declared
    pub targets: Option<Vec<Ide>>,
    pub presets: Vec<String>,
    /// Declared rule sources (file path or glob), in declaration order
    pub rules: Vec<(String, String)>,
    /// Per-rule overrides, in declaration order
    pub overrides: Vec<(String, RuleOverride)>,
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
    pub workspaces: Option<bool>,
    pub skip_install: bool,
    pub install_on_ci: bool,
}

/// Wire shape of a configuration object; checked further by [`RawConfig::validate`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    rules_dir: Option<String>,
    #[serde(alias = "ides")]
    targets: Option<Vec<String>>,
    #[serde(default)]
    presets: Vec<String>,
    #[serde(default, deserialize_with = "rule_sources")]
    rules: Vec<(String, String)>,
    #[serde(default, deserialize_with = "rule_overrides")]
    overrides: Vec<(String, RuleOverride)>,
    #[serde(default, deserialize_with = "mcp_servers")]
    mcp_servers: Vec<(String, McpServerEntry)>,
    workspaces: Option<bool>,
    #[serde(default)]
    skip_install: bool,
    #[serde(rename = "installOnCI", default)]
    install_on_ci: bool,
}

impl RawConfig {
    fn validate(self, path: &Path) -> Result<RulekitConfig> {
        if self.rules_dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
            return Err(Error::invalid(path, "`rulesDir` must be a non-empty string"));
        }
        if let Some((name, _)) = self.rules.iter().find(|(_, source)| source.is_empty()) {
            return Err(Error::invalid(
                path,
                format!("rule `{}` must map to a file path or glob pattern", name),
            ));
        }

        let targets = match self.targets {
            Some(names) => Some(parse_targets(&names, path)?),
            None => None,
        };

        Ok(RulekitConfig {
            rules_dir: self.rules_dir,
            targets,
            presets: self.presets,
            rules: self.rules,
            overrides: self.overrides,
            mcp_servers: self.mcp_servers.into_iter().collect(),
            workspaces: self.workspaces,
            skip_install: self.skip_install,
            install_on_ci: self.install_on_ci,
        })
    }
}

impl RulekitConfig {
    /// Parse and validate the shape of a configuration object.
    ///
    /// `path` is only used for error messages.
    pub fn from_value(value: &Value, path: &Path) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid(path, "configuration must be a JSON object"))?;

        let unknown: Vec<String> = obj
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(Error::UnknownKeys {
                path: path.to_path_buf(),
                keys: unknown,
            });
        }

        if obj.contains_key("targets") && obj.contains_key("ides") {
            return Err(Error::invalid(
                path,
                "`targets` and `ides` are aliases; declare only one",
            ));
        }

        RawConfig::deserialize(value)
            .map_err(|e| Error::invalid(path, e.to_string()))?
            .validate(path)
    }

    /// Whether any rule source is declared.
    pub fn has_sources(&self) -> bool {
        self.rules_dir.is_some() || !self.presets.is_empty() || !self.rules.is_empty()
    }

    /// Require a rule source unless this is a workspace root.
    pub fn validate_sources(&self, path: &Path, workspace_root: bool) -> Result<()> {
        if workspace_root || self.has_sources() {
            return Ok(());
        }
        Err(Error::invalid(
            path,
            "either `rulesDir` or a non-empty `presets` list is required",
        ))
    }

    /// Declared targets, or the single default IDE.
    pub fn targets_or_default(&self) -> Vec<Ide> {
        self.targets.clone().unwrap_or_else(|| vec![Ide::default()])
    }
}

fn parse_targets(names: &[String], path: &Path) -> Result<Vec<Ide>> {
    if names.is_empty() {
        return Err(Error::invalid(
            path,
            "`targets` must be a non-empty array of IDE names",
        ));
    }

    let mut targets = Vec::new();
    for name in names {
        let ide = name.parse::<Ide>().map_err(|target| Error::UnsupportedTarget {
            path: path.to_path_buf(),
            target,
        })?;
        if !targets.contains(&ide) {
            targets.push(ide);
        }
    }
    Ok(targets)
}

/// Visits a JSON object as `(name, value)` pairs in document order.
///
/// A failing value is reported with its name, e.g. ``MCP server `search`: ...``.
struct NamedEntries<T> {
    label: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedEntries<T> {
    type Value = Vec<(String, T)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object of {} entries", self.label)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(name) = map.next_key::<String>()? {
            let value = map
                .next_value::<T>()
                .map_err(|e| {
                    <A::Error as de::Error>::custom(format!("{} `{}`: {}", self.label, name, e))
                })?;
            entries.push((name, value));
        }
        Ok(entries)
    }
}

fn named_entries<'de, D, T>(
    deserializer: D,
    label: &'static str,
) -> std::result::Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(NamedEntries {
        label,
        marker: PhantomData,
    })
}

fn rule_sources<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<(String, String)>, D::Error> {
    named_entries(d, "rule")
}

fn rule_overrides<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<(String, RuleOverride)>, D::Error> {
    named_entries(d, "override")
}

fn mcp_servers<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<(String, McpServerEntry)>, D::Error> {
    named_entries(d, "MCP server")
}
