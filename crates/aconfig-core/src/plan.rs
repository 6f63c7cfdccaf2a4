//! From configuration to a resolved table

use crate::config::GeneratorConfig;
use crate::declaration::DeclarationSet;
use crate::layer::{LayerPlan, OverrideLayer};
use crate::policy::ResolveOptions;
use crate::resolver::{ResolvedTable, Resolver};
use crate::Result;

/// Name of the layer formed by explicitly listed override files.
pub const EXPLICIT_FILES_LAYER: &str = "override-files";

/// Everything one resolution run reads, gathered before any parsing.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    pub options: ResolveOptions,
    pub declaration_paths: Vec<std::path::PathBuf>,
    pub layers: Vec<OverrideLayer>,
}

impl ResolutionPlan {
    /// Gather inputs from `config`.
    ///
    /// A missing target package fails here, before any file is parsed.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let options = config.resolve_options()?;

        let mut layers = match config.override_tree() {
            Some(tree) => LayerPlan::from_settings(&config.layers).discover(&tree, &options.package)?,
            None => {
                tracing::debug!("No overrides_root configured, only explicit override files apply");
                Vec::new()
            }
        };

        let explicit = config.override_file_paths();
        if !explicit.is_empty() {
            layers.push(OverrideLayer::new(EXPLICIT_FILES_LAYER, explicit));
        }

        Ok(Self {
            options,
            declaration_paths: config.declaration_paths(),
            layers,
        })
    }

    /// Parse declarations and resolve them against every layer.
    pub fn execute(&self) -> Result<ResolvedTable> {
        let declarations = DeclarationSet::load(&self.declaration_paths, &self.options.package)?;
        tracing::info!(
            package = %self.options.package,
            flags = declarations.len(),
            layers = self.layers.len(),
            "Resolving flags"
        );
        Resolver::new(&declarations, &self.options).resolve(&self.layers)
    }
}

/// Resolve the flags described by `config`.
pub fn resolve_config(config: &GeneratorConfig) -> Result<ResolvedTable> {
    ResolutionPlan::from_config(config)?.execute()
}
