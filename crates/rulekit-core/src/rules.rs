//! Rule loading and collection.
//!
//! Rules are gathered from rules directories and `rules` maps into a
//! [`RuleCollector`]. Missing sources are recorded rather than returned, so a
//! single resolution reports every unreadable file at once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rulekit_fs::{NormalizedPath, RULE_EXTENSION, io};
use rulekit_meta::{RuleFile, RuleOrigin};

use crate::error::{Error, Result, RuleSourceFailure};
use crate::rule_glob::{expand, expand_rule_glob, is_glob};

/// Ordered, name-unique rule set under construction.
#[derive(Debug, Default)]
pub struct RuleCollector {
    rules: Vec<RuleFile>,
    failures: Vec<RuleSourceFailure>,
}

impl RuleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name == name)
    }

    /// Whether `name` is known, either loaded or recorded as a failure.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some() || self.failures.iter().any(|f| f.rule == name)
    }

    /// Add a rule. The first rule with a given name wins.
    pub fn push(&mut self, rule: RuleFile) {
        if let Some(idx) = self.position(&rule.name) {
            let kept = &self.rules[idx];
            tracing::warn!(
                rule = %rule.name,
                kept = %kept.source_path.display(),
                dropped = %rule.source_path.display(),
                "duplicate rule name, keeping the first definition"
            );
            return;
        }
        self.rules.push(rule);
    }

    pub fn record_failure(
        &mut self,
        rule: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) {
        self.failures.push(RuleSourceFailure {
            rule: rule.into(),
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// Load one rule file, recording a failure if it cannot be read.
    pub fn load_file(&mut self, name: &str, path: &Path, origin: &RuleOrigin) -> Result<()> {
        if let Some(rule) = self.read_rule(name, path, origin)? {
            self.push(rule);
        }
        Ok(())
    }

    fn read_rule(
        &mut self,
        name: &str,
        path: &Path,
        origin: &RuleOrigin,
    ) -> Result<Option<RuleFile>> {
        match io::read_text(&NormalizedPath::new(path)) {
            Ok(content) => Ok(Some(RuleFile::new(name, content, path, origin.clone())?)),
            Err(rulekit_fs::Error::Io { source, .. }) => {
                self.record_failure(name, path, source.to_string());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load every rule file below `dir`, named by relative path without
    /// extension, in lexicographic order.
    pub fn load_dir(&mut self, dir: &Path, origin: &RuleOrigin) -> Result<()> {
        if !dir.is_dir() {
            self.record_failure(
                format!("rulesDir {}", NormalizedPath::new(dir)),
                dir,
                "directory not found",
            );
            return Ok(());
        }

        let pattern = format!("**/*.{}", RULE_EXTENSION);
        let files = expand(&pattern, dir).map_err(|message| Error::GlobPattern {
            key: "rulesDir".to_string(),
            pattern: pattern.clone(),
            message,
        })?;
        tracing::debug!(dir = %dir.display(), count = files.len(), "scanned rules directory");

        let base = NormalizedPath::new(dir);
        for file in files {
            let Some(relative) = file.relative_to(&base) else {
                continue;
            };
            let name = NormalizedPath::new(relative).without_extension();
            self.load_file(&name, &file.to_native(), origin)?;
        }
        Ok(())
    }

    /// Load a `rules` map: plain paths keep their key, globs expand.
    pub fn load_sources(
        &mut self,
        sources: &[(String, String)],
        base_dir: &Path,
        origin: &RuleOrigin,
    ) -> Result<()> {
        for (key, source) in sources {
            if is_glob(source) {
                for (name, file) in expand_rule_glob(key, source, base_dir)? {
                    self.load_file(&name, &file.to_native(), origin)?;
                }
            } else {
                self.load_file(key, &base_dir.join(source), origin)?;
            }
        }
        Ok(())
    }

    /// Drop a rule (or its recorded failure). Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len() + self.failures.len();
        self.rules.retain(|rule| rule.name != name);
        self.failures.retain(|failure| failure.rule != name);
        before != self.rules.len() + self.failures.len()
    }

    /// Reload `name` from `path` in place as a local rule.
    pub fn replace(&mut self, name: &str, path: &Path) -> Result<()> {
        self.failures.retain(|failure| failure.rule != name);
        let replacement = self.read_rule(name, path, &RuleOrigin::Local)?;
        match (self.position(name), replacement) {
            (Some(idx), Some(rule)) => self.rules[idx] = rule,
            (Some(idx), None) => {
                self.rules.remove(idx);
            }
            (None, Some(rule)) => self.rules.push(rule),
            (None, None) => {}
        }
        Ok(())
    }

    /// The collected rules, or every recorded failure.
    ///
    /// Also fails when two rules would be written to the same output file,
    /// e.g. local `a/b` and rule `b` of a preset named `a`.
    pub fn finish(self) -> Result<Vec<RuleFile>> {
        if !self.failures.is_empty() {
            return Err(Error::RuleSourcesMissing {
                failures: self.failures,
            });
        }

        let mut outputs: HashMap<String, &RuleFile> = HashMap::new();
        for rule in &self.rules {
            let stem = rule.output_stem();
            if let Some(first) = outputs.get(&stem) {
                return Err(Error::OutputCollision {
                    output: stem,
                    first: describe(first),
                    second: describe(rule),
                });
            }
            outputs.insert(stem, rule);
        }
        Ok(self.rules)
    }
}

fn describe(rule: &RuleFile) -> String {
    format!("{} ({})", rule.name, rule.source_path.display())
}
