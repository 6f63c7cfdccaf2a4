//! Resolve command implementation

use std::path::Path;

use colored::Colorize;

use aconfig_core::{ResolvedTable, resolve_config};

use super::load_config;
use crate::cli::ConfigOverrides;
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(
    cwd: &Path,
    config: Option<&Path>,
    overrides: &ConfigOverrides,
    json: bool,
) -> Result<()> {
    let config = load_config(cwd, config, overrides)?;
    let table = resolve_config(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_table(&table);
    }
    Ok(())
}

fn print_table(table: &ResolvedTable) {
    println!("{} {}", "Package:".bold(), table.package.cyan());
    if table.flags.is_empty() {
        println!("   {}", "(no flags declared)".dimmed());
        return;
    }

    for flag in &table.flags {
        let value = if flag.value {
            "true".green()
        } else {
            "false".red()
        };
        let access = if flag.writable { "read-write" } else { "read-only" };
        let origin = match &flag.source {
            Some(origin) => format!("{} ({}:{})", origin.layer, origin.path.display(), origin.line),
            None => "default".to_string(),
        };
        println!(
            "   {} = {} [{}] {}",
            flag.name,
            value,
            access,
            origin.dimmed()
        );
    }
}
