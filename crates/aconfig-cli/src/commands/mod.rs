//! Command implementations for aconfig-cli

pub mod check;
pub mod generate;
pub mod layers;
pub mod resolve;

pub use check::run_check;
pub use generate::run_generate;
pub use layers::run_layers;
pub use resolve::run_resolve;

use std::path::Path;

use aconfig_core::{CONFIG_FILE_NAME, GeneratorConfig};

use crate::cli::ConfigOverrides;
use crate::error::Result;

/// Load the configuration for a run started in `cwd`.
///
/// An explicit `config` path must exist. Without one, `aconfig.toml` in
/// `cwd` is used when present, otherwise defaults rooted at `cwd`.
/// Command-line overrides are applied last.
pub fn load_config(
    cwd: &Path,
    config: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<GeneratorConfig> {
    let mut loaded = match config {
        Some(path) => GeneratorConfig::load(&cwd.join(path))?,
        None => {
            let default_path = cwd.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                GeneratorConfig::load(&default_path)?
            } else {
                tracing::debug!(cwd = %cwd.display(), "No configuration file, using defaults");
                let mut config = GeneratorConfig::default();
                config.set_base_dir(cwd);
                config
            }
        }
    };

    apply_overrides(&mut loaded, overrides);
    Ok(loaded)
}

/// Apply command-line values on top of `config`.
///
/// Paths given on the command line are taken as-is, not relative to the
/// configuration file.
pub fn apply_overrides(config: &mut GeneratorConfig, overrides: &ConfigOverrides) {
    if let Some(package) = &overrides.package {
        config.package = Some(package.clone());
    }
    if let Some(debuggable) = overrides.debuggable {
        config.layers.debuggable = debuggable;
    }
    if !overrides.layers.is_empty() {
        config.layers.explicit = overrides.layers.clone();
    }
    if let Some(honor) = overrides.honor_read_write {
        config.permissions.honor_read_write = honor;
    }
    if let Some(root) = &overrides.overrides_root {
        config.overrides_root = Some(absolute_or_as_is(root));
    }
    if let Some(dir) = &overrides.output_dir {
        config.output_dir = absolute_or_as_is(dir);
    }
}

fn absolute_or_as_is(path: &Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
