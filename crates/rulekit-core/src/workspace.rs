//! Workspace discovery.
//!
//! In workspace mode every directory below the root with its own rulekit
//! configuration is a package. The walk honours `.gitignore`, skips hidden
//! directories and never descends into `node_modules`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rulekit_fs::{NormalizedPath, RulekitPath};
use rulekit_meta::{LoadedConfig, load_config};

use crate::error::Result;

/// A package with its own configuration.
#[derive(Debug)]
pub struct PackageInfo {
    /// Path relative to the workspace root, `.` for the root itself
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Load failures stay attached to their package
    pub config: rulekit_meta::Result<LoadedConfig>,
}

fn has_dedicated_config(dir: &Path) -> bool {
    dir.join(RulekitPath::ConfigFile.as_str()).is_file()
}

fn may_have_config(dir: &Path) -> bool {
    has_dedicated_config(dir) || dir.join(RulekitPath::PackageManifest.as_str()).is_file()
}

/// Find configured packages below `root`, excluding `root` itself, in path
/// order.
pub fn discover_packages(root: &Path) -> Result<Vec<PackageInfo>> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != OsStr::new(RulekitPath::NodeModules.as_str()))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let base = NormalizedPath::new(root);
    let mut packages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        let dir = entry.path();
        if !may_have_config(dir) {
            continue;
        }

        let config = match load_config(dir) {
            Ok(Some(config)) => Ok(config),
            Ok(None) => continue,
            // An unreadable package.json alone says nothing about rulekit
            Err(rulekit_meta::Error::Json { path, .. }) if !has_dedicated_config(dir) => {
                tracing::warn!(path = %path.display(), "skipping unparsable package manifest");
                continue;
            }
            Err(e) => Err(e),
        };
        let relative_path = NormalizedPath::new(dir)
            .relative_to(&base)
            .unwrap_or_else(|| NormalizedPath::new(dir).to_string());
        tracing::debug!(package = %relative_path, "discovered package");
        packages.push(PackageInfo {
            relative_path,
            absolute_path: dir.to_path_buf(),
            config,
        });
    }
    Ok(packages)
}
