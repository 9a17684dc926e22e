//! Shared test utilities for the rulekit workspace.
//!
//! Dev-dependency only. [`TestProject`] builds a throwaway project directory
//! with configuration, rules and presets, and asserts on what an install left
//! behind.

pub mod project;

pub use project::TestProject;
