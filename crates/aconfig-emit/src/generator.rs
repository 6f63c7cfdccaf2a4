//! Generation run: resolve, render every output, then write
//!
//! Nothing is written until resolution and every emitter have succeeded,
//! and each file is replaced atomically, so a failed run leaves previous
//! output untouched.

use crate::check::{CheckReport, check_files};
use crate::registry::EmitterRegistry;
use crate::traits::GeneratedFile;
use crate::{Error, Result};
use aconfig_core::{GeneratorConfig, ResolvedTable, resolve_config};
use aconfig_fs::io::write_text;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Summary of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub package: String,
    pub flags: usize,
    pub writable: usize,
    pub written: Vec<PathBuf>,
}

/// Drives resolution and emission for one configuration.
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    registry: EmitterRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            registry: EmitterRegistry::from_config(config),
        }
    }

    /// Render every configured output for `table`, paths resolved against
    /// the output directory.
    pub fn render(&self, table: &ResolvedTable) -> Result<Vec<GeneratedFile>> {
        let output_dir = self.config.output_path();
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for emitter in self.registry.select(&self.config.outputs) {
            for file in emitter.render(table)? {
                let path = output_dir.join(&file.path);
                if !seen.insert(path.clone()) {
                    return Err(Error::DuplicateOutput { path });
                }
                files.push(GeneratedFile::new(path, file.contents));
            }
        }
        Ok(files)
    }

    /// Resolve flags and write every output.
    pub fn generate(&self) -> Result<GenerationReport> {
        let table = resolve_config(self.config)?;
        let files = self.render(&table)?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            write_text(&file.path, &file.contents)?;
            tracing::debug!(path = %file.path.display(), "Wrote generated file");
            written.push(file.path);
        }

        let report = GenerationReport {
            package: table.package.clone(),
            flags: table.flags.len(),
            writable: table.writable_keys().len(),
            written,
        };
        tracing::info!(
            package = %report.package,
            flags = report.flags,
            files = report.written.len(),
            "Generated flag sources"
        );
        Ok(report)
    }

    /// Resolve and render, then compare against files on disk.
    pub fn check(&self) -> Result<CheckReport> {
        let table = resolve_config(self.config)?;
        let files = self.render(&table)?;
        check_files(&files)
    }
}

/// Shorthand for `Generator::new(config).generate()`.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    Generator::new(config).generate()
}
