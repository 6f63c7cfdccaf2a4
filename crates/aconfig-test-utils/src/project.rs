//! [`FlagProject`] builder for resolver and generator test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default directory of the override tree inside a project.
pub const OVERRIDES_DIR: &str = "release";

/// A temporary project directory with helpers for writing flag inputs.
///
/// # Example
///
/// ```rust,no_run
/// use aconfig_test_utils::FlagProject;
///
/// let project = FlagProject::new();
/// project.declare("aconfig/config.aconfig", "com.example.flags", &["alpha_flag"]);
/// project.override_values("root", "com.example.flags", "a.textproto",
///     &[("alpha_flag", "ENABLED", "READ_ONLY")]);
/// project.assert_file_exists("release/aconfig/root/com.example.flags/a.textproto");
/// ```
pub struct FlagProject {
    temp_dir: TempDir,
}

impl Default for FlagProject {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagProject {
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

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Root of the override tree.
    pub fn overrides_root(&self) -> PathBuf {
        self.path(OVERRIDES_DIR)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a declaration file with one `flag` block per name.
    pub fn declare(&self, relative: &str, package: &str, flags: &[&str]) -> PathBuf {
        let mut content = format!("package: \"{package}\"\ncontainer: \"system\"\n");
        for name in flags {
            content.push_str(&format!(
                "\nflag {{\n    name: \"{name}\"\n    namespace: \"test\"\n    description: \"{name} for tests\"\n    bug: \"1\"\n}}\n"
            ));
        }
        self.write(relative, &content)
    }

    /// Write an override file with one `flag_value` block per
    /// `(name, state, permission)` into `layer` of the override tree.
    pub fn override_values(
        &self,
        layer: &str,
        package: &str,
        file_name: &str,
        values: &[(&str, &str, &str)],
    ) -> PathBuf {
        let mut content = String::new();
        for (name, state, permission) in values {
            content.push_str(&format!(
                "flag_value {{\n  package: \"{package}\"\n  name: \"{name}\"\n  state: {state}\n  permission: {permission}\n}}\n"
            ));
        }
        self.write(
            &format!("{OVERRIDES_DIR}/aconfig/{layer}/{package}/{file_name}"),
            &content,
        )
    }

    /// Write the require-all-read-only release value for `build`.
    pub fn require_all_read_only(&self, build: &str, value: bool) -> PathBuf {
        self.write(
            &format!(
                "{OVERRIDES_DIR}/flag_values/{build}/RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY.textproto"
            ),
            &format!(
                "name: \"RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY\"\nvalue: {{\n  bool_value: {value}\n}}\n"
            ),
        )
    }

    /// Write `aconfig.toml` at the project root.
    pub fn config(&self, content: &str) -> PathBuf {
        self.write("aconfig.toml", content)
    }

    /// Read a project file as text.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
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
