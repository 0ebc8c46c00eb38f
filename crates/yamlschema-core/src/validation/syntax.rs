//! Syntactic acceptance of a serialized fragment
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// Decides whether a JSON document is an acceptable schema
pub trait SyntaxChecker {
    /// Check `document`, registered under `name`; the error is a readable reason
    fn check(&self, name: &str, document: &Value) -> Result<(), String>;
}

/// Checks documents against the Draft-07 meta-schema
#[derive(Debug, Clone, Copy, Default)]
pub struct Draft07MetaSchema;

impl SyntaxChecker for Draft07MetaSchema {
    fn check(&self, name: &str, document: &Value) -> Result<(), String> {
        jsonschema::draft7::meta::validate(document)
            .map_err(|error| format!("{}: {}", name, error))
    }
}
