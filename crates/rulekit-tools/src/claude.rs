//! Claude integration.
//!
//! Claude Code reads `CLAUDE.md` at the project root and MCP servers from
//! `.mcp.json`.

use rulekit_meta::Ide;

use crate::manifest::ManifestIntegration;

pub fn claude_integration() -> ManifestIntegration {
    ManifestIntegration::new(Ide::Claude, "CLAUDE.md").with_mcp(".mcp.json")
}
