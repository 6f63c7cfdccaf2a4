//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// aconfig - Resolve layered feature flag overrides and generate accessors
#[derive(Parser, Debug)]
#[command(name = "aconfig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./aconfig.toml when present)
    #[arg(short, long, global = true, env = "ACONFIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve flags and write the generated sources
    Generate {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Check generated sources for drift without writing
    ///
    /// Exits with status 1 when any generated file is missing or stale.
    Check {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Print the resolved flag table
    Resolve {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Print the effective layer order and the files found in each layer
    Layers {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

/// Command-line values that take precedence over the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Target flag package
    #[arg(long)]
    pub package: Option<String>,

    /// Generate for a debuggable build
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub debuggable: Option<bool>,

    /// Use exactly these layers, in order (repeatable)
    #[arg(long = "layer", value_name = "NAME")]
    pub layers: Vec<String>,

    /// Honor READ_WRITE permissions instead of downgrading them
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub honor_read_write: Option<bool>,

    /// Root of the materialized override tree
    #[arg(long)]
    pub overrides_root: Option<PathBuf>,

    /// Directory for generated sources
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_overrides() {
        let cli = Cli::parse_from([
            "aconfig",
            "generate",
            "--package",
            "com.example.flags",
            "--debuggable",
            "--layer",
            "root",
            "--layer",
            "eng",
            "--honor-read-write",
            "false",
        ]);

        let Some(Commands::Generate { overrides }) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(overrides.package.as_deref(), Some("com.example.flags"));
        assert_eq!(overrides.debuggable, Some(true));
        assert_eq!(overrides.layers, vec!["root", "eng"]);
        assert_eq!(overrides.honor_read_write, Some(false));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["aconfig", "resolve", "--json", "-v", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Resolve { json: true, .. })));
    }
}
