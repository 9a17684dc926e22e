//! Install orchestration.
//!
//! A [`Project`] is the configuration found in the working directory. In
//! workspace mode it fans out to every configured package; packages are
//! resolved and written one after another, and a failure in one is recorded
//! in the [`InstallReport`] without stopping the rest.

use std::fmt;
use std::path::{Path, PathBuf};

use rulekit_fs::{NormalizedPath, io};
use rulekit_meta::{Ide, LoadedConfig, load_config};
use rulekit_tools::{ConfigLocation, SyncContext, TargetDispatcher};

use crate::error::Result;
use crate::resolver::{ResolvedConfig, resolve_loaded};
use crate::workspace::{PackageInfo, discover_packages};

/// Relative path used for the project root package.
pub const ROOT_PACKAGE: &str = ".";

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Resolve and plan, but write nothing
    pub dry_run: bool,
}

/// Why an install did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `skipInstall: true`
    Disabled,
    /// Running under CI without `--ci` or `installOnCI`
    Ci,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "skipInstall is set in the configuration"),
            SkipReason::Ci => write!(
                f,
                "running in CI; pass --ci or set installOnCI to install anyway"
            ),
        }
    }
}

/// Whether a `CI` environment value marks a CI run.
pub fn is_ci(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("true") | Some("1"))
}

/// What one package install did (or would do, for a dry run).
#[derive(Debug, Clone)]
pub struct InstallSummary {
    pub targets: Vec<Ide>,
    pub rules: usize,
    pub mcp_servers: usize,
    pub locations: Vec<(Ide, ConfigLocation)>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct PackageOutcome {
    pub relative_path: String,
    pub result: Result<InstallSummary>,
}

/// Per-package results of an install.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub packages: Vec<PackageOutcome>,
}

impl InstallReport {
    pub fn is_success(&self) -> bool {
        self.packages.iter().all(|p| p.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.packages.iter().filter(|p| p.result.is_err())
    }
}

/// Resolution result for one package.
#[derive(Debug)]
pub struct PackageResolution {
    pub relative_path: String,
    pub result: Result<ResolvedConfig>,
}

/// Write a resolved package to all of its targets.
pub fn install_resolved(
    resolved: &ResolvedConfig,
    options: InstallOptions,
) -> Result<InstallSummary> {
    let dispatcher = TargetDispatcher::new();
    let locations = dispatcher.planned_locations(&resolved.targets);

    if !options.dry_run {
        let context = SyncContext::new(NormalizedPath::new(&resolved.root))
            .with_mcp_servers(resolved.mcp_servers.clone());
        dispatcher.sync_all(&context, &resolved.targets, &resolved.rules)?;
        tracing::info!(
            root = %resolved.root.display(),
            targets = resolved.targets.len(),
            "installed"
        );
    }

    Ok(InstallSummary {
        targets: resolved.targets.clone(),
        rules: resolved.rules.len(),
        mcp_servers: resolved.mcp_servers.len(),
        locations,
        dry_run: options.dry_run,
    })
}

/// The configuration found in a working directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    loaded: LoadedConfig,
}

impl Project {
    /// Load the project configured in `cwd`, or `None` if there is none.
    pub fn load(cwd: &Path) -> Result<Option<Self>> {
        let root = io::canonicalize(cwd)?;
        Ok(load_config(&root)?.map(|loaded| Self { root, loaded }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LoadedConfig {
        &self.loaded
    }

    pub fn is_workspace(&self) -> bool {
        self.loaded.workspace_mode()
    }

    /// Why installing should be skipped, if it should.
    ///
    /// `ci` is whether the environment is a CI run; `force_ci` is `--ci`.
    pub fn skip_reason(&self, ci: bool, force_ci: bool) -> Option<SkipReason> {
        let config = &self.loaded.config;
        if config.skip_install {
            return Some(SkipReason::Disabled);
        }
        if ci && !force_ci && !config.install_on_ci {
            return Some(SkipReason::Ci);
        }
        None
    }

    /// Packages to process, root first.
    ///
    /// A workspace root is included only when it declares rule sources of
    /// its own. Discovered packages with `skipInstall` are left out.
    pub fn packages(&self) -> Result<Vec<PackageInfo>> {
        let root_package = PackageInfo {
            relative_path: ROOT_PACKAGE.to_string(),
            absolute_path: self.root.clone(),
            config: Ok(self.loaded.clone()),
        };
        if !self.is_workspace() {
            return Ok(vec![root_package]);
        }

        let mut packages = Vec::new();
        if self.loaded.config.has_sources() {
            packages.push(root_package);
        }
        let discovered = discover_packages(&self.root)?;
        if discovered.is_empty() {
            tracing::warn!(root = %self.root.display(), "workspace has no configured packages");
        }
        packages.extend(discovered.into_iter().filter(|package| {
            let skipped = package
                .config
                .as_ref()
                .is_ok_and(|loaded| loaded.config.skip_install);
            if skipped {
                tracing::debug!(package = %package.relative_path, "skipInstall set, skipping package");
            }
            !skipped
        }));
        Ok(packages)
    }

    /// Resolve every package independently.
    pub fn resolve_all(&self) -> Result<Vec<PackageResolution>> {
        Ok(self
            .packages()?
            .into_iter()
            .map(|package| PackageResolution {
                result: package
                    .config
                    .map_err(Into::into)
                    .and_then(|loaded| resolve_loaded(&package.absolute_path, loaded)),
                relative_path: package.relative_path,
            })
            .collect())
    }

    /// Resolve and write every package, isolating failures per package.
    pub fn install(&self, options: InstallOptions) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        for resolution in self.resolve_all()? {
            let result = resolution
                .result
                .and_then(|resolved| install_resolved(&resolved, options));
            if let Err(e) = &result {
                tracing::warn!(
                    package = %resolution.relative_path,
                    error = %e,
                    "package install failed"
                );
            }
            report.packages.push(PackageOutcome {
                relative_path: resolution.relative_path,
                result,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("1"), true)]
    #[case(Some("false"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_is_ci(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_ci(value), expected);
    }

    fn project(json: &str) -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rulekit.json"), json).unwrap();
        let project = Project::load(temp.path()).unwrap().unwrap();
        (temp, project)
    }

    #[test]
    fn test_skip_reasons() {
        let (_temp, plain) = project(r#"{"rulesDir": "rules"}"#);
        assert_eq!(plain.skip_reason(false, false), None);
        assert_eq!(plain.skip_reason(true, false), Some(SkipReason::Ci));
        assert_eq!(plain.skip_reason(true, true), None);

        let (_temp, on_ci) = project(r#"{"rulesDir": "rules", "installOnCI": true}"#);
        assert_eq!(on_ci.skip_reason(true, false), None);

        let (_temp, skipped) = project(r#"{"rulesDir": "rules", "skipInstall": true}"#);
        assert_eq!(skipped.skip_reason(false, true), Some(SkipReason::Disabled));
    }

    #[test]
    fn test_single_package_project() {
        let (_temp, project) = project(r#"{"rulesDir": "rules"}"#);
        let packages = project.packages().unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].relative_path, ROOT_PACKAGE);
    }
}
