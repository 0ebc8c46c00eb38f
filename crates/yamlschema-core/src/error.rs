//! Error types for schema generation
//!
//! Every failure aborts the whole run; nothing is emitted for a partially
//! processed document.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::loader::LoaderError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Main error type for schema generation
#[derive(Error, Debug)]
pub enum Error {
    /// The YAML document does not have the shape the engine expects
    #[error("Unexpected YAML structure: {message}")]
    Structure { message: String },

    /// A node carries a tag with no JSON Schema counterpart
    #[error("unsupported yaml tag found: {tag}")]
    UnsupportedTag { tag: String },

    /// A `# @schema` block could not be read
    #[error("Error while parsing comment of key {key}: {message}")]
    Annotation { key: String, message: String },

    /// A declared fragment broke a consistency rule
    #[error("Error while validating jsonschema of key {key}: {source}")]
    Validation {
        key: String,
        #[source]
        source: ValidationError,
    },

    /// A `patternProperties` key is not a valid regular expression
    #[error("Invalid pattern '{pattern}' in patternProperties of key {key}: {message}")]
    Pattern {
        key: String,
        pattern: String,
        message: String,
    },

    /// Source or referenced files could not be loaded
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// JSON encoding errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }

    pub fn annotation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Annotation {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn validation(key: impl Into<String>, source: ValidationError) -> Self {
        Self::Validation {
            key: key.into(),
            source,
        }
    }

    /// Name of the violated validation rule, when the error carries one
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Self::Validation { source, .. } => source.rule_name(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
