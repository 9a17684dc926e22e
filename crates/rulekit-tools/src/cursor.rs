//! Cursor integration.
//!
//! Cursor reads one `.mdc` file per rule from `.cursor/rules/`. rulekit owns
//! the `.cursor/rules/rulekit/` subdirectory outright, so hand-written Cursor
//! rules next to it are never touched. MCP servers go to `.cursor/mcp.json`.

use rulekit_fs::{NormalizedPath, RULE_EXTENSION, io};
use rulekit_meta::{Ide, RuleFile};

use crate::error::Result;
use crate::integration::{ConfigLocation, LocationKind, SyncContext, ToolIntegration};
use crate::mcp_installer::McpInstaller;

const RULES_DIR: &str = ".cursor/rules/rulekit";
const MCP_PATH: &str = ".cursor/mcp.json";

/// Cursor integration: file-per-rule plus MCP manifest.
#[derive(Debug, Default)]
pub struct CursorIntegration;

impl CursorIntegration {
    pub fn new() -> Self {
        Self
    }

    fn rule_path(dir: &NormalizedPath, rule: &RuleFile) -> NormalizedPath {
        dir.join(&format!("{}.{}", rule.output_stem(), RULE_EXTENSION))
    }
}

impl ToolIntegration for CursorIntegration {
    fn ide(&self) -> Ide {
        Ide::Cursor
    }

    fn config_locations(&self) -> Vec<ConfigLocation> {
        vec![
            ConfigLocation::new(RULES_DIR, LocationKind::OwnedDirectory),
            ConfigLocation::new(MCP_PATH, LocationKind::TaggedEntries),
        ]
    }

    fn sync(&self, context: &SyncContext, rules: &[RuleFile]) -> Result<()> {
        let dir = context.root.join(RULES_DIR);
        io::clear_dir(&dir)?;

        for rule in rules {
            io::write_atomic(&Self::rule_path(&dir, rule), rule.content.as_bytes())?;
        }
        tracing::info!(tool = "cursor", rules = rules.len(), dir = %dir, "wrote rules");

        McpInstaller::new(context.root.join(MCP_PATH)).sync(&context.mcp_servers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulekit_meta::RuleOrigin;
    use tempfile::TempDir;

    #[test]
    fn test_name() {
        assert_eq!(CursorIntegration::new().name(), "cursor");
    }

    #[test]
    fn test_config_locations() {
        let locations = CursorIntegration::new().config_locations();
        assert_eq!(locations[0].path, ".cursor/rules/rulekit");
        assert_eq!(locations[1].kind, LocationKind::TaggedEntries);
    }

    #[test]
    fn test_sync_writes_full_document() {
        let temp = TempDir::new().unwrap();
        let context = SyncContext::new(NormalizedPath::new(temp.path()));
        let content = "---\nalwaysApply: true\n---\nBe terse.\n";
        let rule = RuleFile::new("style", content, "rules/style.mdc", RuleOrigin::Local).unwrap();

        CursorIntegration::new().sync(&context, &[rule]).unwrap();

        let written =
            std::fs::read_to_string(temp.path().join(".cursor/rules/rulekit/style.mdc")).unwrap();
        assert_eq!(written, content);
        assert!(!temp.path().join(".cursor/mcp.json").exists());
    }
}
