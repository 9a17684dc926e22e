//! IDE target writers for rulekit.
//!
//! Each supported IDE has an integration that knows its on-disk layout:
//!
//! - **File-per-rule** (`cursor`): every rule becomes one file in a
//!   directory rulekit owns outright and clears on each run.
//! - **Manifest** (`windsurf`, `codex`, `claude`): rule bodies go to the
//!   shared `.rulekit/` directory and a summary is spliced into a managed
//!   region of a user-owned file at the project root.
//!
//! IDEs with a project-level MCP manifest additionally get their servers
//! written by [`McpInstaller`], which only ever replaces entries it tagged.
//!
//! The [`TargetDispatcher`] routes a resolved target list to these
//! integrations.

pub mod claude;
pub mod codex;
pub mod cursor;
pub mod dispatcher;
pub mod error;
pub mod integration;
pub mod logging;
pub mod manifest;
pub mod mcp_installer;
pub mod summary;
pub mod windsurf;

pub use claude::claude_integration;
pub use codex::codex_integration;
pub use cursor::CursorIntegration;
pub use dispatcher::TargetDispatcher;
pub use error::{Error, Result};
pub use integration::{ConfigLocation, LocationKind, SyncContext, ToolIntegration};
pub use manifest::ManifestIntegration;
pub use mcp_installer::{MANAGED_TAG, McpInstaller};
pub use windsurf::windsurf_integration;
