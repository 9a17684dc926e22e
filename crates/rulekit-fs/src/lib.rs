//! Filesystem primitives for rulekit
//!
//! Provides forward-slash normalized paths, atomic writes, and clearing of
//! tool-owned output directories. Every function takes explicit paths; nothing
//! here reads the process working directory.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::{RULE_EXTENSION, RulekitPath};
pub use error::{Error, Result};
pub use path::NormalizedPath;
