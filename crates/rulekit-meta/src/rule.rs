//! Resolved rule files.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frontmatter::{ParsedDocument, RuleMetadata, UsageMode, parse_document};

/// Where a rule came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleOrigin {
    /// The project's own rules directory, `rules` map, or an override
    Local,
    /// A preset, identified by its name
    Preset { name: String },
}

impl RuleOrigin {
    pub fn preset_name(&self) -> Option<&str> {
        match self {
            RuleOrigin::Local => None,
            RuleOrigin::Preset { name } => Some(name),
        }
    }
}

/// A rule ready to be written to targets.
///
/// `name` is the identity: it is unique within a resolved configuration and
/// may contain `/` to namespace rules (e.g. `docs/api`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub name: String,
    /// Full document text, frontmatter included
    pub content: String,
    pub source_path: PathBuf,
    pub origin: RuleOrigin,
    document: ParsedDocument,
}

impl RuleFile {
    /// Build a rule from its document text, parsing the frontmatter.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        source_path: impl AsRef<Path>,
        origin: RuleOrigin,
    ) -> Result<Self> {
        let content = content.into();
        let source_path = source_path.as_ref().to_path_buf();
        let document = parse_document(&content, &source_path)?;
        Ok(Self {
            name: name.into(),
            content,
            source_path,
            origin,
            document,
        })
    }

    pub fn metadata(&self) -> &RuleMetadata {
        &self.document.metadata
    }

    /// Document text after the frontmatter block.
    pub fn body(&self) -> &str {
        &self.document.body
    }

    pub fn usage_mode(&self) -> UsageMode {
        self.document.metadata.usage_mode()
    }

    /// Relative output path without extension: preset rules are nested under
    /// their preset's name.
    pub fn output_stem(&self) -> String {
        match &self.origin {
            RuleOrigin::Local => self.name.clone(),
            RuleOrigin::Preset { name } => format!("{}/{}", name, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stem_nests_preset_rules() {
        let local = RuleFile::new("style", "body", "rules/style.mdc", RuleOrigin::Local).unwrap();
        assert_eq!(local.output_stem(), "style");

        let preset = RuleFile::new(
            "testing/unit",
            "body",
            "node_modules/@acme/rules/rules/testing/unit.mdc",
            RuleOrigin::Preset {
                name: "@acme/rules".to_string(),
            },
        )
        .unwrap();
        assert_eq!(preset.output_stem(), "@acme/rules/testing/unit");
        assert_eq!(preset.origin.preset_name(), Some("@acme/rules"));
    }

    #[test]
    fn test_new_rejects_bad_frontmatter() {
        let result = RuleFile::new("bad", "---\ndescription: [unclosed\n---\n", "bad.mdc", RuleOrigin::Local);
        assert!(result.is_err());
    }

    #[test]
    fn test_body_excludes_frontmatter() {
        let rule = RuleFile::new(
            "a",
            "---\ndescription: d\n---\nDo the thing.\n",
            "a.mdc",
            RuleOrigin::Local,
        )
        .unwrap();
        assert_eq!(rule.body(), "Do the thing.\n");
        assert_eq!(rule.metadata().description(), Some("d"));
    }
}
