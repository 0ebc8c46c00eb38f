//! Command-line interface argument parsing and definitions
//!
//! Every input can also come from the environment, so the binary runs
//! unchanged as a CI action step.

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Generate a Draft-07 JSON Schema from an annotated YAML values file
///
/// Keys may carry `# @schema` comment blocks holding a YAML-encoded schema
/// fragment; everything else is inferred from the values themselves.
#[derive(Parser, Debug)]
#[command(name = "yaml-to-jsonschema", version, author, about, long_about = None)]
pub struct Cli {
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Path to YAML file
    #[arg(long, env = "INPUT_YAMLFILE", value_name = "FILE")]
    pub yaml_file: Option<PathBuf>,

    /// Destination directory (defaults to the directory of the YAML file)
    #[arg(long, env = "INPUT_DESTINATIONDIR", value_name = "DIR")]
    pub destination_dir: Option<PathBuf>,

    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}
