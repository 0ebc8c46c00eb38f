//! Validation of schema fragments declared in annotations
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod fragment;
pub mod syntax;

pub use base::{SchemaValidator, ValidationContext};
pub use error::{ValidationError, ValidationResult, Violation};
pub use fragment::{FragmentValidator, SUPPORTED_FORMATS};
pub use syntax::{Draft07MetaSchema, SyntaxChecker};
