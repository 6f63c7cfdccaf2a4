//! Check command implementation
//!
//! Renders generated sources in memory and compares them with what is on
//! disk, without writing anything.

use std::path::Path;

use colored::Colorize;

use aconfig_emit::{CheckStatus, Generator};

use super::load_config;
use crate::cli::ConfigOverrides;
use crate::error::{CliError, Result};

/// Run the check command
pub fn run_check(cwd: &Path, config: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(cwd, config, overrides)?;
    let report = Generator::new(&config).check()?;

    match report.status {
        CheckStatus::Healthy => {
            println!("{} Generated sources are up to date.", "OK".green().bold());
            return Ok(());
        }
        CheckStatus::Missing => {
            println!("{} Some generated files are missing:", "MISSING".yellow().bold());
        }
        CheckStatus::Drifted => {
            println!("{} Generated sources have drifted:", "DRIFTED".red().bold());
        }
    }

    for item in &report.drifted {
        println!("   {} {}", "!".red(), item.file.display());
    }
    for item in &report.missing {
        println!("   {} {}", "-".yellow(), item.file.display());
    }
    println!();
    println!("Run {} to regenerate.", "aconfig generate".cyan());

    Err(CliError::user("generated sources are out of date"))
}
