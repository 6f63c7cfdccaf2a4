//! Override tree layout
//!
//! A materialized override source is laid out as
//! `<root>/aconfig/<layer>/<package>/*.textproto`, with release
//! configuration values under `<root>/flag_values/<build>/`.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding per-layer override folders.
pub const ACONFIG_DIR: &str = "aconfig";

/// Directory holding release configuration values.
pub const FLAG_VALUES_DIR: &str = "flag_values";

/// Extension of override files.
pub const OVERRIDE_EXTENSION: &str = "textproto";

/// A materialized override source on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTree {
    root: PathBuf,
}

impl OverrideTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the override files of `layer` for `package`.
    pub fn layer_dir(&self, layer: &str, package: &str) -> PathBuf {
        self.root.join(ACONFIG_DIR).join(layer).join(package)
    }

    /// Path of a release configuration value file.
    pub fn release_value(&self, build: &str, name: &str) -> PathBuf {
        self.root
            .join(FLAG_VALUES_DIR)
            .join(build)
            .join(format!("{name}.{OVERRIDE_EXTENSION}"))
    }

    /// List the override files of one layer, sorted by file name.
    ///
    /// A missing folder yields an empty list.
    pub fn layer_files(&self, layer: &str, package: &str) -> Result<Vec<PathBuf>> {
        let dir = self.layer_dir(layer, package);
        if !dir.is_dir() {
            tracing::debug!(layer, dir = %dir.display(), "No override folder for layer");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            if path.is_file() && has_override_extension(&path) {
                files.push(path);
            }
        }
        // read_dir order is platform dependent
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!(layer, count = files.len(), "Discovered override files");
        Ok(files)
    }
}

fn has_override_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(OVERRIDE_EXTENSION)
}
