//! Base validation trait and context
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::validation::error::ValidationResult;

/// Location of the fragment currently being validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
}

impl ValidationContext {
    /// Context for the top of a fragment
    pub fn root() -> Self {
        Self {
            path: "$".to_string(),
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::root()
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input;

    /// Validate starting at the root context
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        self.validate_with_context(input, &ValidationContext::root())
    }

    /// Validate with an explicit location
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<()>;
}
