//! Validation error types for schema fragments
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use std::fmt;
use thiserror::Error;

/// A validation violation with detailed context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// Fragment validation error with the location inside the fragment
#[derive(Debug, Clone, Error)]
pub struct ValidationError {
    /// JSON path inside the fragment (`$`, `$.items`, `$.anyOf[0]`)
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Detailed schema violations
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.message)?;

        if !self.schema_violations.is_empty() {
            write!(f, "\nViolations:")?;
            for violation in &self.schema_violations {
                write!(f, "\n  - {}", violation)?;
            }
        }

        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Create a validation error carrying a single violated rule
    pub fn rule<P, M, R, E, A>(path: P, message: M, rule: R, expected: E, actual: A) -> Self
    where
        P: Into<String>,
        M: Into<String>,
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: vec![Self::create_violation(rule, expected, actual)],
        }
    }

    /// Create a violation for a specific rule
    pub fn create_violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Name of the first violated rule, if any
    pub fn rule_name(&self) -> Option<&str> {
        self.schema_violations.first().map(|v| v.rule.as_str())
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
