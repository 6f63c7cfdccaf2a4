//! Override layers and their precedence
//!
//! Layers are applied in order; a later layer wins over an earlier one for
//! the same flag. The default order mirrors the release folders of a
//! platform release repository: common folders first, then build-type
//! folders, then caller-supplied custom folders.

use aconfig_fs::OverrideTree;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Result;

/// Common layers applied to every build, lowest precedence first.
pub const DEFAULT_COMMON_LAYERS: &[&str] =
    &["root", "ap2a", "ap3a", "ap4a", "bp1a", "bp2a", "bp3a", "bp4a"];

/// Layer applied to debuggable builds.
pub const USERDEBUG_LAYER: &str = "userdebug";

/// Most permissive layer, applied to debuggable builds unless disabled.
pub const ENG_LAYER: &str = "eng";

/// Layer applied to release builds.
pub const USER_LAYER: &str = "user";

/// Layer settings as found in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerSettings {
    /// Layers applied to every build
    pub common: Vec<String>,
    /// When non-empty, replaces the computed order entirely
    pub explicit: Vec<String>,
    /// Whether the build being generated is debuggable
    pub debuggable: bool,
    /// Apply the `eng` layer on debuggable builds
    pub use_eng_in_debug: bool,
    /// Extra layers for debuggable builds
    pub custom_debug: Vec<String>,
    /// Extra layers for release builds
    pub custom_release: Vec<String>,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            common: DEFAULT_COMMON_LAYERS.iter().map(|s| s.to_string()).collect(),
            explicit: Vec::new(),
            debuggable: false,
            use_eng_in_debug: true,
            custom_debug: Vec::new(),
            custom_release: Vec::new(),
        }
    }
}

/// The ordered list of layer folder names for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPlan {
    names: Vec<String>,
}

impl LayerPlan {
    /// Use `names` in the given order. Repeated names keep their first position.
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut plan = Self { names: Vec::new() };
        for name in names {
            plan.push(name.into());
        }
        plan
    }

    /// Compute the layer order from configuration.
    pub fn from_settings(settings: &LayerSettings) -> Self {
        if !settings.explicit.is_empty() {
            return Self::explicit(settings.explicit.iter().cloned());
        }

        let mut plan = Self::explicit(settings.common.iter().cloned());
        if settings.debuggable {
            plan.push(USERDEBUG_LAYER.to_string());
            if settings.use_eng_in_debug {
                plan.push(ENG_LAYER.to_string());
            }
            for name in &settings.custom_debug {
                plan.push(name.clone());
            }
        } else {
            plan.push(USER_LAYER.to_string());
            for name in &settings.custom_release {
                plan.push(name.clone());
            }
        }
        plan
    }

    fn push(&mut self, name: String) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Find the override files of every layer for `package` in `tree`.
    pub fn discover(&self, tree: &OverrideTree, package: &str) -> Result<Vec<OverrideLayer>> {
        self.names
            .iter()
            .map(|name| {
                let files = tree.layer_files(name, package)?;
                Ok(OverrideLayer::new(name.clone(), files))
            })
            .collect()
    }
}

/// One override source: a named layer and its files in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideLayer {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl OverrideLayer {
    pub fn new(name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}
