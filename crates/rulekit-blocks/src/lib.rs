//! Managed region handling for rulekit.
//!
//! Manifest files such as `AGENTS.md` or `CLAUDE.md` belong to the user, but
//! rulekit owns one marker-delimited region inside them:
//!
//! ```text
//! <!-- rulekit:block:rules -->
//! generated content
//! <!-- /rulekit:block:rules -->
//! ```
//!
//! The writer splices new content between the markers and never touches a
//! byte outside them. If the markers are absent the region is appended.

pub mod error;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{Block, closing_marker, find_block, opening_marker, parse_blocks};
pub use writer::{insert_block, update_block, upsert_block};
