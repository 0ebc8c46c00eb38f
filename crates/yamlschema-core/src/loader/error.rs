//! Error types for loading values files and referenced schemas
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading YAML sources and resolving `$ref` targets
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML syntax errors
    #[error("Failed to parse YAML file '{path}': {message}")]
    YamlParseError { path: PathBuf, message: String },

    /// JSON parsing errors in a referenced schema
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Reference resolution errors
    #[error("Failed to resolve reference '{reference}' in '{source_path}': {reason}")]
    ReferenceError {
        reference: String,
        source_path: PathBuf,
        reason: String,
    },

    /// Circular reference detection
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// Tags or node shapes the loader cannot represent
    #[error("Unsupported YAML construct in '{path}': {reason}")]
    UnsupportedConstruct { path: PathBuf, reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, message: impl Into<String>) -> Self {
        Self::YamlParseError {
            path,
            message: message.into(),
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create a reference resolution error
    pub fn reference_error(reference: String, source_path: PathBuf, reason: String) -> Self {
        Self::ReferenceError {
            reference,
            source_path,
            reason,
        }
    }

    /// Create a circular reference error
    pub fn circular_reference(chain: Vec<PathBuf>) -> Self {
        let chain_str = chain
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CircularReference { chain: chain_str }
    }

    /// Create an unsupported construct error
    pub fn unsupported(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            path,
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::ReferenceError { source_path, .. } => Some(source_path),
            Self::UnsupportedConstruct { path, .. } => Some(path),
            Self::CircularReference { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("values.yaml");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), Some(&path));

        let circular_err = LoaderError::circular_reference(vec![
            PathBuf::from("a.json"),
            PathBuf::from("b.json"),
            PathBuf::from("a.json"),
        ]);
        assert_eq!(
            circular_err.to_string(),
            "Circular reference detected: a.json -> b.json -> a.json"
        );
        assert_eq!(circular_err.path(), None);
    }
}
