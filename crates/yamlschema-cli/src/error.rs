//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use crate::logging::redaction;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from yamlschema-core library
    #[error("{0}")]
    Core(#[from] yamlschema_core::Error),

    /// No input file configured
    #[error("missing source YAML file (set --yaml-file or INPUT_YAMLFILE)")]
    MissingYamlFile,

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Destination directory could not be created
    #[error("unable to create destination dir {}: {source}", path.display())]
    DestinationDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Schema file could not be written
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::MissingYamlFile => 5,
            Self::DestinationDir { .. } => 6,
            Self::Write { .. } => 7,
            Self::Json(_) => 12,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::MissingYamlFile)
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let message = redaction::redact_sensitive(&error.to_string());

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), message)
    } else {
        format!("Error: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "boom")),
            Error::Core(yamlschema_core::Error::structure("empty document")),
            Error::FileNotFound {
                path: PathBuf::from("values.yaml"),
            },
            Error::MissingYamlFile,
            Error::DestinationDir {
                path: PathBuf::from("out"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            Error::Write {
                path: PathBuf::from("out/values.schema.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            Error::other("other"),
        ];
        let mut codes: Vec<_> = errors.iter().map(Error::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|code| *code != 0));
    }

    #[test]
    fn test_format_error_plain() {
        let formatted = format_error(&Error::MissingYamlFile, false);
        assert_eq!(
            formatted,
            "Error: missing source YAML file (set --yaml-file or INPUT_YAMLFILE)"
        );
        assert!(Error::MissingYamlFile.should_show_help());
    }

    #[test]
    fn test_format_error_redacts_tokens() {
        let formatted = format_error(&Error::other("token=ghp_abcdefghijklmnop rejected"), false);
        assert!(!formatted.contains("ghp_abcdefghijklmnop"));
    }

    #[test]
    fn test_core_errors_keep_their_message() {
        let error = Error::from(yamlschema_core::Error::annotation("image", "unclosed"));
        assert_eq!(
            error.to_string(),
            "Error while parsing comment of key image: unclosed"
        );
        assert_eq!(error.exit_code(), 2);
    }
}
