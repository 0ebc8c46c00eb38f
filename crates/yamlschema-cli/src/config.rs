//! Resolved run configuration
//!
//! Flags win over environment variables (clap handles that precedence); the
//! destination directory falls back to the directory of the YAML file.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::logging::redaction;
use std::fmt;
use std::path::{Path, PathBuf};
use yamlschema_core::output_file_name;

/// Inputs of one generation run
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Accepted for CI compatibility; generation never uses it
    pub github_token: Option<String>,
    pub yaml_file: PathBuf,
    pub destination_dir: PathBuf,
}

impl Config {
    /// Build the configuration from parsed arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let yaml_file = cli
            .yaml_file
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(Error::MissingYamlFile)?;

        let destination_dir = cli
            .destination_dir
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| default_destination(&yaml_file));

        Ok(Self {
            github_token: cli.github_token.clone().filter(|token| !token.is_empty()),
            yaml_file,
            destination_dir,
        })
    }

    /// Path of the schema file to write
    pub fn output_path(&self) -> PathBuf {
        self.destination_dir.join(output_file_name(&self.yaml_file))
    }
}

/// Directory holding `yaml_file`, `.` for bare file names
fn default_destination(yaml_file: &Path) -> PathBuf {
    match yaml_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_deref().map(redaction::mask),
            )
            .field("yaml_file", &self.yaml_file)
            .field("destination_dir", &self.destination_dir)
            .finish()
    }
}
