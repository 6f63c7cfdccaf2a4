//! Layers command implementation

use std::path::Path;

use colored::Colorize;

use aconfig_core::ResolutionPlan;

use super::load_config;
use crate::cli::ConfigOverrides;
use crate::error::Result;

/// Run the layers command
///
/// Lists layers lowest precedence first, with the files each contributes.
pub fn run_layers(cwd: &Path, config: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(cwd, config, overrides)?;
    let plan = ResolutionPlan::from_config(&config)?;

    println!(
        "{} {}",
        "Layers for".bold(),
        plan.options.package.cyan()
    );
    for (index, layer) in plan.layers.iter().enumerate() {
        if layer.files.is_empty() {
            println!("{:>3}. {} {}", index + 1, layer.name, "(empty)".dimmed());
            continue;
        }
        println!("{:>3}. {}", index + 1, layer.name.bold());
        for file in &layer.files {
            println!("       {}", file.display());
        }
    }
    Ok(())
}
