//! Generate command implementation

use std::path::Path;

use colored::Colorize;

use aconfig_emit::Generator;

use super::load_config;
use crate::cli::ConfigOverrides;
use crate::error::Result;

/// Run the generate command
pub fn run_generate(cwd: &Path, config: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(cwd, config, overrides)?;
    let report = Generator::new(&config).generate()?;

    println!(
        "{} Generated {} flags ({} writable) for {}",
        "OK".green().bold(),
        report.flags,
        report.writable,
        report.package.cyan()
    );
    for path in &report.written {
        println!("   {} {}", "+".green(), path.display());
    }
    Ok(())
}
