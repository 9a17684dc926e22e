//! Manifest-style integrations.
//!
//! Windsurf, Codex and Claude read one Markdown file at the project root. For
//! these targets rule bodies are written to the shared `.rulekit/` directory
//! and the root file gets a managed region summarizing them. Everything in the
//! root file outside that region belongs to the user.

use rulekit_blocks::upsert_block;
use rulekit_fs::{NormalizedPath, RulekitPath, io};
use rulekit_meta::{Ide, RuleFile};

use crate::error::Result;
use crate::integration::{ConfigLocation, LocationKind, SyncContext, ToolIntegration};
use crate::mcp_installer::McpInstaller;
use crate::summary;

/// Identifier of the managed region in manifest files.
pub const BLOCK_ID: &str = "rules";

/// Integration writing a shared rules directory plus a root manifest.
#[derive(Debug, Clone)]
pub struct ManifestIntegration {
    ide: Ide,
    manifest: &'static str,
    mcp_path: Option<&'static str>,
}

impl ManifestIntegration {
    pub fn new(ide: Ide, manifest: &'static str) -> Self {
        Self {
            ide,
            manifest,
            mcp_path: None,
        }
    }

    /// Also write MCP servers to `path`.
    pub fn with_mcp(mut self, path: &'static str) -> Self {
        self.mcp_path = Some(path);
        self
    }

    pub fn manifest_path(&self) -> &str {
        self.manifest
    }

    fn write_bodies(shared: &NormalizedPath, rules: &[RuleFile]) -> Result<()> {
        io::clear_dir(shared)?;
        for rule in rules {
            let path = shared.join(&format!("{}.md", rule.output_stem()));
            io::write_atomic(&path, rule.body().as_bytes())?;
        }
        Ok(())
    }

    fn write_manifest(&self, root: &NormalizedPath, rules: &[RuleFile]) -> Result<bool> {
        let path = root.join(self.manifest);
        let existing = io::read_optional(&path)?.unwrap_or_default();
        let body = summary::render(RulekitPath::SharedRulesDir.as_str(), rules);
        let updated = upsert_block(&existing, BLOCK_ID, &body);
        Ok(io::write_text(&path, &updated)?)
    }
}

impl ToolIntegration for ManifestIntegration {
    fn ide(&self) -> Ide {
        self.ide
    }

    fn config_locations(&self) -> Vec<ConfigLocation> {
        let mut locations = vec![
            ConfigLocation::new(
                RulekitPath::SharedRulesDir.as_str(),
                LocationKind::OwnedDirectory,
            ),
            ConfigLocation::new(self.manifest, LocationKind::ManagedRegion),
        ];
        if let Some(mcp) = self.mcp_path {
            locations.push(ConfigLocation::new(mcp, LocationKind::TaggedEntries));
        }
        locations
    }

    fn sync(&self, context: &SyncContext, rules: &[RuleFile]) -> Result<()> {
        let shared = context.root.join(RulekitPath::SharedRulesDir.as_str());
        Self::write_bodies(&shared, rules)?;

        let changed = self.write_manifest(&context.root, rules)?;
        tracing::info!(
            tool = self.name(),
            rules = rules.len(),
            manifest = self.manifest,
            changed,
            "wrote rules"
        );

        if let Some(mcp) = self.mcp_path {
            McpInstaller::new(context.root.join(mcp)).sync(&context.mcp_servers)?;
        }
        Ok(())
    }
}
