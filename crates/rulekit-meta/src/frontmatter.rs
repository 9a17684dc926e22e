//! Rule document parsing.
//!
//! A rule document is Markdown with an optional leading metadata block:
//!
//! ```text
//! ---
//! description: TypeScript conventions
//! globs: ["*.ts", "*.tsx"]
//! alwaysApply: false
//! ---
//! Prefer `unknown` over `any`.
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};

const DELIMITER: &str = "---";

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

/// Metadata from a rule's frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleMetadata {
    values: BTreeMap<String, MetaValue>,
}

/// How an agent should pick a rule up, derived from its metadata.
///
/// Variants are declared in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UsageMode {
    /// `alwaysApply: true`
    Always,
    /// Non-empty `globs`
    PatternMatched,
    /// Non-empty `description`
    OnRequest,
    Manual,
}

impl UsageMode {
    pub const ALL: [UsageMode; 4] = [
        UsageMode::Always,
        UsageMode::PatternMatched,
        UsageMode::OnRequest,
        UsageMode::Manual,
    ];
}

impl RuleMetadata {
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn description(&self) -> Option<&str> {
        match self.get("description") {
            Some(MetaValue::Text(text)) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        }
    }

    /// File patterns, from either a list or a comma-separated string.
    pub fn globs(&self) -> Vec<String> {
        match self.get("globs") {
            Some(MetaValue::List(items)) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(MetaValue::Text(text)) => text
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn always_apply(&self) -> bool {
        match self.get("alwaysApply") {
            Some(MetaValue::Bool(b)) => *b,
            Some(MetaValue::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn usage_mode(&self) -> UsageMode {
        if self.always_apply() {
            UsageMode::Always
        } else if !self.globs().is_empty() {
            UsageMode::PatternMatched
        } else if self.description().is_some() {
            UsageMode::OnRequest
        } else {
            UsageMode::Manual
        }
    }
}

/// A rule document split into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDocument {
    pub metadata: RuleMetadata,
    pub body: String,
}

/// Split a rule document into its metadata block and body.
///
/// Without a leading `---` line, or when the block is never closed, the
/// metadata is empty and the whole text is the body. Metadata that is not a
/// YAML mapping of strings, booleans, and string lists is an error naming
/// `source`.
pub fn parse_document(text: &str, source: &Path) -> Result<ParsedDocument> {
    let text_no_bom = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text_no_bom.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(whole_body(text));
    };
    if first.trim_end() != DELIMITER || !first.ends_with('\n') {
        return Ok(whole_body(text));
    }

    let meta_start = first.len();
    let mut offset = meta_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let block = &text_no_bom[meta_start..offset];
            let body = &text_no_bom[offset + line.len()..];
            return Ok(ParsedDocument {
                metadata: parse_metadata(block, source)?,
                body: body.to_string(),
            });
        }
        offset += line.len();
    }

    tracing::debug!(source = %source.display(), "unterminated frontmatter, treating as body");
    Ok(whole_body(text))
}

fn whole_body(text: &str) -> ParsedDocument {
    ParsedDocument {
        metadata: RuleMetadata::default(),
        body: text.to_string(),
    }
}

fn parse_metadata(block: &str, source: &Path) -> Result<RuleMetadata> {
    let invalid = |message: String| Error::InvalidFrontmatter {
        path: source.to_path_buf(),
        message,
    };

    if block.trim().is_empty() {
        return Ok(RuleMetadata::default());
    }
    let parsed: YamlValue = serde_yaml::from_str(block).map_err(|e| invalid(e.to_string()))?;
    let mapping = match parsed {
        YamlValue::Null => return Ok(RuleMetadata::default()),
        YamlValue::Mapping(mapping) => mapping,
        _ => return Err(invalid("expected key-value pairs".to_string())),
    };

    let mut values = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            YamlValue::String(key) => key,
            other => return Err(invalid(format!("non-string key {:?}", other))),
        };
        let value = match value {
            YamlValue::Null => continue,
            YamlValue::Bool(b) => MetaValue::Bool(b),
            YamlValue::String(s) => MetaValue::Text(s),
            YamlValue::Number(n) => MetaValue::Text(n.to_string()),
            YamlValue::Sequence(items) => MetaValue::List(
                items
                    .into_iter()
                    .map(|item| scalar_text(item).ok_or_else(|| {
                        invalid(format!("`{}` must be a list of plain values", key))
                    }))
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => {
                return Err(invalid(format!(
                    "`{}` must be a string, boolean, or list of strings",
                    key
                )));
            }
        };
        values.insert(key, value);
    }

    Ok(RuleMetadata { values })
}

fn scalar_text(value: YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<ParsedDocument> {
        parse_document(text, Path::new("rules/test.mdc"))
    }

    #[test]
    fn test_no_frontmatter() {
        let doc = parse("# Title\n\nBody").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "# Title\n\nBody");
    }

    #[test]
    fn test_frontmatter_split() {
        let doc = parse("---\ndescription: Style guide\nalwaysApply: true\n---\nBody\n").unwrap();
        assert_eq!(doc.metadata.description(), Some("Style guide"));
        assert!(doc.metadata.always_apply());
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let text = "---\ndescription: x\nBody without end";
        let doc = parse(text).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_empty_block() {
        let doc = parse("---\n---\nBody").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_crlf_delimiters() {
        let doc = parse("---\r\ndescription: x\r\n---\r\nBody").unwrap();
        assert_eq!(doc.metadata.description(), Some("x"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_list_values() {
        let doc = parse("---\nglobs:\n  - \"*.ts\"\n  - \"*.tsx\"\n---\n").unwrap();
        assert_eq!(doc.metadata.globs(), vec!["*.ts", "*.tsx"]);
        assert_eq!(doc.metadata.usage_mode(), UsageMode::PatternMatched);
    }

    #[test]
    fn test_comma_separated_globs() {
        let doc = parse("---\nglobs: \"src/**, tests/**\"\n---\n").unwrap();
        assert_eq!(doc.metadata.globs(), vec!["src/**", "tests/**"]);
    }

    #[test]
    fn test_malformed_metadata_names_source() {
        let err = parse("---\ndescription: [unclosed\n---\nBody").unwrap_err();
        assert!(err.to_string().contains("rules/test.mdc"));
    }

    #[test]
    fn test_nested_mapping_rejected() {
        assert!(parse("---\nnested:\n  key: value\n---\n").is_err());
    }

    #[test]
    fn test_usage_mode_priority() {
        let always = parse("---\nalwaysApply: true\nglobs: \"*.rs\"\ndescription: d\n---\n").unwrap();
        assert_eq!(always.metadata.usage_mode(), UsageMode::Always);

        let on_request = parse("---\ndescription: When writing SQL\n---\n").unwrap();
        assert_eq!(on_request.metadata.usage_mode(), UsageMode::OnRequest);

        let manual = parse("Plain body").unwrap();
        assert_eq!(manual.metadata.usage_mode(), UsageMode::Manual);
    }
}
