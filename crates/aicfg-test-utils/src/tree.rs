//! [`ConfigTree`] builder and [`TestProject`] for ai-config test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Declarative set of files to materialise under a root directory.
///
/// # Example
///
/// ```rust,no_run
/// use aicfg_test_utils::{ConfigTree, TestProject};
///
/// let project = TestProject::new();
/// ConfigTree::new()
///     .file(".cursor/rules/style.md", "use tabs")
///     .file(".claude/settings.json", "{}")
///     .write_to(project.root());
/// project.assert_file_exists(".cursor/rules/style.md");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigTree {
    files: BTreeMap<String, String>,
    dirs: Vec<String>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at `path` (forward slashes, relative to the root).
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Add an empty directory.
    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    /// The files as `(path, content)` pairs, sorted by path.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.files
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Materialise the tree under `root`, creating parents as needed.
    ///
    /// # Panics
    /// Panics if any filesystem operation fails.
    pub fn write_to(&self, root: &Path) {
        for dir in &self.dirs {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .unwrap_or_else(|e| panic!("ConfigTree: failed to create {}: {e}", path.display()));
        }
        for (relative, content) in &self.files {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content)
                .unwrap_or_else(|e| panic!("ConfigTree: failed to write {}: {e}", path.display()));
        }
    }
}

/// A temporary project directory with helper methods for setup and
/// assertion.
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a temporary project populated with `tree`.
    pub fn with_tree(tree: &ConfigTree) -> Self {
        let project = Self::new();
        tree.write_to(project.root());
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write (or overwrite) a file relative to the root.
    pub fn write(&self, relative: &str, content: &str) {
        ConfigTree::new().file(relative, content).write_to(self.root());
    }

    /// Remove a file or directory relative to the root.
    pub fn remove(&self, relative: &str) {
        let path = self.path(relative);
        if path.is_dir() {
            fs::remove_dir_all(&path).unwrap();
        } else {
            fs::remove_file(&path).unwrap();
        }
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` has exactly `content`.
    pub fn assert_file_eq(&self, path: &str, content: &str) {
        let actual = self.read(path);
        assert_eq!(
            actual,
            content,
            "File {} has unexpected content",
            self.path(path).display()
        );
    }
}
