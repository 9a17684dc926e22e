//! Codex integration: `AGENTS.md` manifest.

use rulekit_meta::Ide;

use crate::manifest::ManifestIntegration;

pub fn codex_integration() -> ManifestIntegration {
    ManifestIntegration::new(Ide::Codex, "AGENTS.md")
}
