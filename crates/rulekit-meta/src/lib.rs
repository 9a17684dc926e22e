//! Configuration schema, rule documents, and MCP definitions for rulekit.
//!
//! This crate holds the typed model shared by the resolver and the target
//! writers: the `rulekit.json` schema and its validation, the supported IDE
//! set, the MCP server entry union, and the rule document parser.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod ide;
pub mod loader;
pub mod mcp;
pub mod rule;

pub use config::{KNOWN_KEYS, RuleOverride, RulekitConfig};
pub use error::{Error, Result};
pub use frontmatter::{MetaValue, ParsedDocument, RuleMetadata, UsageMode, parse_document};
pub use ide::Ide;
pub use loader::{LoadedConfig, load_config, load_config_file};
pub use mcp::{CommandServer, McpServerEntry, UrlServer};
pub use rule::{RuleFile, RuleOrigin};
