//! Emitter trait and supporting types

use crate::error::Result;
use aconfig_core::{OutputKind, ResolvedTable};
use std::path::PathBuf;

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory, or absolute
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Trait for generated artifact emitters.
///
/// Emitters only render; writing is left to the
/// [`Generator`](crate::Generator) so that a failure in any emitter leaves
/// the output directory untouched.
pub trait Emitter: Send + Sync {
    /// The output kind this emitter renders.
    fn kind(&self) -> OutputKind;

    /// Render all files for `table`.
    fn render(&self, table: &ResolvedTable) -> Result<Vec<GeneratedFile>>;
}
