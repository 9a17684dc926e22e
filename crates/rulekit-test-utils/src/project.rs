//! [`TestProject`] builder for rulekit test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use rulekit_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::new();
/// project
///     .config(json!({"rulesDir": "rules", "targets": ["cursor"]}))
///     .rule("rules/style.mdc", "---\nalwaysApply: true\n---\nBe terse.\n");
/// project.assert_file_exists("rules/style.mdc");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create an empty directory.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    /// Write a rule document. Alias of [`file`](Self::file) for readability.
    pub fn rule(&self, relative: &str, content: &str) -> &Self {
        self.file(relative, content)
    }

    fn json(&self, relative: &str, value: &Value) -> &Self {
        self.file(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Write `rulekit.json` at the project root.
    pub fn config(&self, value: Value) -> &Self {
        self.json("rulekit.json", &value)
    }

    /// Write `rulekit.json` inside `dir` (a package or a preset).
    pub fn config_in(&self, dir: &str, value: Value) -> &Self {
        self.json(&format!("{}/rulekit.json", dir), &value)
    }

    /// Write `package.json` inside `dir` (`.` for the root).
    pub fn package_json(&self, dir: &str, value: Value) -> &Self {
        self.json(&format!("{}/package.json", dir), &value)
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).unwrap()
    }

    /// Sorted file names directly inside `relative`.
    pub fn list(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path(relative))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
