//! Configuration resolution and install orchestration for rulekit.
//!
//! The pipeline for one package:
//!
//! ```text
//! rulekit.json ──> rules dir ──> rules map ──> presets ──> overrides ──> ResolvedConfig
//!                                                                             │
//!                                                              TargetDispatcher (rulekit-tools)
//! ```
//!
//! [`Project`] drives that pipeline for a single package or, in workspace
//! mode, for every configured package below the root.

pub mod error;
pub mod install;
pub mod preset;
pub mod resolver;
pub mod rule_glob;
pub mod rules;
pub mod workspace;

pub use error::{Error, Result, RuleSourceFailure};
pub use install::{
    InstallOptions, InstallReport, InstallSummary, PackageOutcome, PackageResolution, Project,
    ROOT_PACKAGE, SkipReason, install_resolved, is_ci,
};
pub use preset::{PresetLoader, PresetLocation};
pub use resolver::{ResolvedConfig, resolve, resolve_loaded};
pub use rules::RuleCollector;
pub use workspace::{PackageInfo, discover_packages};
