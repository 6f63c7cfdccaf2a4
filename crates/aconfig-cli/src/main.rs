//! aconfig CLI
//!
//! Resolves layered flag overrides and generates flag accessors.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} flag resolver", "aconfig".green().bold());
            println!();
            println!("Run {} for available commands.", "aconfig --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Generate { overrides } => commands::run_generate(&cwd, config, &overrides),
        Commands::Check { overrides } => commands::run_check(&cwd, config, &overrides),
        Commands::Resolve { json, overrides } => {
            commands::run_resolve(&cwd, config, &overrides, json)
        }
        Commands::Layers { overrides } => commands::run_layers(&cwd, config, &overrides),
    }
}
