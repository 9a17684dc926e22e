//! ToolIntegration trait for writing resolved rules to an IDE

use std::collections::BTreeMap;

use rulekit_fs::NormalizedPath;
use rulekit_meta::{Ide, McpServerEntry, RuleFile};

use crate::error::Result;

/// Context for a target write.
#[derive(Debug, Clone)]
pub struct SyncContext {
    /// Project root; every output path is relative to it
    pub root: NormalizedPath,
    /// Resolved MCP servers, keyed by name
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
}

impl SyncContext {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            mcp_servers: BTreeMap::new(),
        }
    }

    pub fn with_mcp_servers(mut self, servers: BTreeMap<String, McpServerEntry>) -> Self {
        self.mcp_servers = servers;
        self
    }
}

/// How much of an output location rulekit owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Directory cleared and rewritten on every run
    OwnedDirectory,
    /// User file with a rulekit-managed region
    ManagedRegion,
    /// JSON manifest with rulekit-tagged entries
    TaggedEntries,
}

/// An output path written by an integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Path relative to the project root
    pub path: String,
    pub kind: LocationKind,
}

impl ConfigLocation {
    pub fn new(path: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Trait for IDE integrations
pub trait ToolIntegration {
    /// The IDE this integration writes for.
    fn ide(&self) -> Ide;

    /// Returns the tool's identifier (e.g., "cursor", "claude")
    fn name(&self) -> &str {
        self.ide().as_str()
    }

    /// Every location this integration writes to.
    fn config_locations(&self) -> Vec<ConfigLocation>;

    /// Write `rules` (and MCP servers, where supported) under `context.root`.
    ///
    /// Must converge: stale output from earlier runs is removed, and running
    /// twice with the same input leaves byte-identical files.
    fn sync(&self, context: &SyncContext, rules: &[RuleFile]) -> Result<()>;
}
