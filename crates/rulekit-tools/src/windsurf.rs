//! Windsurf integration: `.windsurfrules` manifest.

use rulekit_meta::Ide;

use crate::manifest::ManifestIntegration;

pub fn windsurf_integration() -> ManifestIntegration {
    ManifestIntegration::new(Ide::Windsurf, ".windsurfrules")
}
