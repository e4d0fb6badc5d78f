//! [`TestProject`] builder for cosmic-esbuild test scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary project directory with helpers for writing config files and
/// asserting on build output.
///
/// # Example
///
/// ```rust,no_run
/// use cosmic_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project
///     .write("esbuild.config.json", r#"{"entryPoints": ["src/index.ts"]}"#)
///     .write("src/index.ts", "export {};");
/// project.assert_file_exists("src/index.ts");
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
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` (relative to the root), creating parent
    /// directories as needed.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
        self
    }

    /// Write a `package.json` with the given `esbuild` property.
    pub fn package_json_with_esbuild(&self, esbuild: &str) -> &Self {
        self.write(
            "package.json",
            &format!("{{\n  \"name\": \"fixture\",\n  \"esbuild\": {esbuild}\n}}\n"),
        )
    }

    /// Create an output directory containing a stale file, for clean tests.
    pub fn with_stale_output(&self, outdir: &str) -> &Self {
        self.write(&format!("{outdir}/stale.js"), "// left over from a previous build")
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
