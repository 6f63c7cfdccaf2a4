//! Generator configuration
//!
//! Loaded from `aconfig.toml` (or `.json`). Relative paths are resolved
//! against the directory of the configuration file.
//!
//! ```toml
//! package = "com.example.flags"
//! declarations = ["aconfig/config.aconfig"]
//! overrides_root = "build/release"
//! output_dir = "build/generated/aconfig"
//! outputs = ["java", "json"]
//!
//! [layers]
//! debuggable = true
//! custom_debug = ["lab"]
//!
//! [permissions]
//! honor_read_write = true
//! release_build = "bp1a"
//!
//! [compat]
//! legacy_states = false
//! undeclared = "ignore"
//! ```

use crate::layer::LayerSettings;
use crate::policy::{ResolveOptions, StatePolicy, UndeclaredPolicy, WritablePolicy};
use crate::release::{self, REQUIRE_ALL_READ_ONLY};
use crate::state::Permission;
use crate::{Error, Result};
use aconfig_fs::{ConfigStore, OverrideTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "aconfig.toml";

/// Generated artifacts that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// `Flags.java` accessors and the `Keys.java` manifest
    Java,
    /// `aconfig-flags.json` manifest
    Json,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Java => write!(f, "java"),
            OutputKind::Json => write!(f, "json"),
        }
    }
}

/// Permission handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionSettings {
    /// Emit READ_WRITE flags as writable; otherwise downgrade them
    pub honor_read_write: bool,
    /// Permission of flags no layer assigns one to
    pub default: Permission,
    /// Release build folder holding the require-all-read-only value
    pub release_build: Option<String>,
}

impl Default for PermissionSettings {
    fn default() -> Self {
        Self {
            honor_read_write: true,
            default: Permission::ReadOnly,
            release_build: None,
        }
    }
}

/// Compatibility switches for historical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompatSettings {
    /// Coerce unrecognized `state` values to DISABLED instead of failing
    pub legacy_states: bool,
    pub undeclared: UndeclaredPolicy,
}

/// Java emitter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JavaSettings {
    /// Runtime flag store class queried by writable accessors
    pub store_class: String,
    /// Directory for `Keys.java`, defaults to the output directory
    pub keys_dir: Option<PathBuf>,
}

impl Default for JavaSettings {
    fn default() -> Self {
        Self {
            store_class: "writableFlag".to_string(),
            keys_dir: None,
        }
    }
}

/// Full generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Target flag package, required
    pub package: Option<String>,
    /// Declaration files, the first one is the primary file
    pub declarations: Vec<PathBuf>,
    /// Materialized override repository
    pub overrides_root: Option<PathBuf>,
    /// Extra override files applied after every layer
    pub override_files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub outputs: Vec<OutputKind>,
    pub layers: LayerSettings,
    pub permissions: PermissionSettings,
    pub compat: CompatSettings,
    pub java: JavaSettings,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: None,
            declarations: vec![PathBuf::from("aconfig/config.aconfig")],
            overrides_root: None,
            override_files: Vec::new(),
            output_dir: PathBuf::from("build/generated/aconfig"),
            outputs: vec![OutputKind::Java],
            layers: LayerSettings::default(),
            permissions: PermissionSettings::default(),
            compat: CompatSettings::default(),
            java: JavaSettings::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(path)?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        config.base_dir =
            std::path::absolute(parent).map_err(|e| aconfig_fs::Error::io(parent, e))?;
        tracing::debug!(path = %path.display(), "Loaded generator configuration");
        Ok(config)
    }

    /// A default configuration for `package`, rooted at `base_dir`.
    pub fn for_package(package: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            package: Some(package.into()),
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = base_dir.into();
    }

    /// Resolve `path` against the configuration directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The configured target package.
    pub fn target_package(&self) -> Result<&str> {
        self.package
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or(Error::MissingTargetPackage)
    }

    pub fn declaration_paths(&self) -> Vec<PathBuf> {
        self.declarations
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }

    pub fn override_file_paths(&self) -> Vec<PathBuf> {
        self.override_files
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }

    pub fn override_tree(&self) -> Option<OverrideTree> {
        self.overrides_root
            .as_deref()
            .map(|root| OverrideTree::new(self.resolve_path(root)))
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.output_dir)
    }

    pub fn keys_path(&self) -> PathBuf {
        match &self.java.keys_dir {
            Some(dir) => self.resolve_path(dir),
            None => self.output_path(),
        }
    }

    /// Build resolver options, reading the release configuration if set.
    pub fn resolve_options(&self) -> Result<ResolveOptions> {
        let package = self.target_package()?;

        let mut writable = WritablePolicy::from_honor(self.permissions.honor_read_write);
        if let Some(build) = &self.permissions.release_build {
            let tree = self.override_tree().ok_or_else(|| Error::InvalidReleaseConfig {
                path: PathBuf::from(build),
                message: "release_build is set but overrides_root is not".to_string(),
            })?;
            let path = tree.release_value(build, REQUIRE_ALL_READ_ONLY);
            if release::require_all_read_only(&path)? {
                tracing::info!(
                    path = %path.display(),
                    "Release requires all flags to be read-only"
                );
                writable = WritablePolicy::Reject;
            }
        }

        let states = if self.compat.legacy_states {
            StatePolicy::Legacy
        } else {
            StatePolicy::Strict
        };

        Ok(ResolveOptions::new(package)
            .with_writable(writable)
            .with_undeclared(self.compat.undeclared)
            .with_states(states)
            .with_default_permission(self.permissions.default))
    }
}
