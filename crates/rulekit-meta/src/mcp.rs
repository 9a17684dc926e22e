//! MCP (Model Context Protocol) server definitions.
//!
//! A server entry in `mcpServers` takes exactly one of three shapes:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "local-tool": { "command": "./bin/tool", "args": ["--stdio"], "env": { "TOKEN": "x" } },
//!     "remote-tool": { "url": "https://mcp.example.com/sse" },
//!     "inherited": false
//!   }
//! }
//! ```
//!
//! `false` cancels a server of the same name contributed by a preset.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A server launched as a local process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandServer {
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// A server reached over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlServer {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// One entry of an `mcpServers` map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpServerEntry {
    Command(CommandServer),
    Url(UrlServer),
    /// Declared as `false`: suppresses a preset's server of the same name
    Disabled,
}

impl McpServerEntry {
    /// Interpret a raw JSON value as a server entry.
    ///
    /// The error string describes the shape problem; callers attach the
    /// server name and config path.
    pub fn from_json(value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::Bool(false) => Ok(Self::Disabled),
            Value::Object(obj) => match (obj.contains_key("command"), obj.contains_key("url")) {
                (true, false) => serde_json::from_value(value.clone())
                    .map(Self::Command)
                    .map_err(|e| e.to_string()),
                (false, true) => serde_json::from_value(value.clone())
                    .map(Self::Url)
                    .map_err(|e| e.to_string()),
                (true, true) => Err("declares both `command` and `url`".to_string()),
                (false, false) => Err("must declare either `command` or `url`".to_string()),
            },
            Value::Bool(true) => {
                Err("`true` is not a server definition; use an object or `false`".to_string())
            }
            _ => Err("expected an object or `false`".to_string()),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The JSON object written into an IDE's MCP manifest.
    ///
    /// Returns `None` for `Disabled`, which is never written.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Command(server) => serde_json::to_value(server).ok(),
            Self::Url(server) => serde_json::to_value(server).ok(),
            Self::Disabled => None,
        }
    }
}

impl<'de> Deserialize<'de> for McpServerEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(de::Error::custom)
    }
}
