//! yaml-to-jsonschema core - JSON Schema generation from annotated YAML
//!
//! This crate derives a Draft-07 JSON Schema from a YAML values file:
//! - **Type inference** from the YAML tag of every value
//! - **Annotations** declared in `# @schema` comment blocks
//! - **Titles, descriptions and defaults** taken from keys, comments and values
//! - **References** to schemas stored in files next to the values file
//!
//! ## Quick Start
//!
//! ```rust
//! use yamlschema_core::generate_from_str;
//!
//! let values = "\
//! ## @schema
//! ## type: integer
//! ## minimum: 1
//! ## @schema
//! ## Number of replicas
//! replicas: 3
//! image: nginx
//! ";
//!
//! let schema = generate_from_str(values, "values.yaml").unwrap();
//! assert_eq!(schema.required.names, vec!["image"]);
//! println!("{}", schema.to_json().unwrap());
//! ```
//!
//! ## Annotations
//!
//! Lines between two `# @schema` markers are read as a YAML schema fragment.
//! A fragment replaces the inferred type, `required: true` adds the key to
//! its parent's `required` list, and keys prefixed with `x-` are emitted
//! unchanged. Other comment lines become the description.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod annotation;
pub mod error;
pub mod inference;
pub mod loader;
pub mod normalize;
pub mod schema;
pub mod validation;

pub use annotation::{parse_comment, AnnotationError};
pub use error::{Error, Result};
pub use inference::{type_from_tag, SchemaInferrer};
pub use loader::{LoaderError, LoaderResult, ReferenceResolver, YamlNode};
pub use normalize::normalize_required;
pub use schema::{AdditionalProperties, Required, Schema, TypeList, DRAFT_07_SCHEMA_URI};
pub use validation::{FragmentValidator, SchemaValidator, ValidationError};

use std::path::Path;
use tracing::info;

/// Suffix of generated schema files
pub const OUTPUT_SUFFIX: &str = ".schema.json";

/// Generate the schema of YAML text read from `source_path`
///
/// `source_path` anchors relative `$ref` files; the file itself is not read.
pub fn generate_from_str(source: &str, source_path: impl AsRef<Path>) -> Result<Schema> {
    let source_path = source_path.as_ref();
    let document = loader::parse_yaml(source, source_path)?;
    generate_from_document(&document, source_path)
}

/// Read a values file and generate its schema
pub fn generate_from_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let document = loader::load_file(path)?;
    generate_from_document(&document, path)
}

fn generate_from_document(document: &YamlNode, source_path: &Path) -> Result<Schema> {
    let mut schema =
        SchemaInferrer::new(source_path).infer(document, &mut Required::default())?;
    normalize_required(&mut schema);

    info!(
        source = %source_path.display(),
        properties = schema.properties.len(),
        "generated schema"
    );
    Ok(schema)
}

/// Name of the schema file generated for `path`: the base name without its
/// extension, followed by `.schema.json`
pub fn output_file_name(path: impl AsRef<Path>) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("values.yaml"), "values.schema.json");
        assert_eq!(output_file_name("charts/app/values.yml"), "values.schema.json");
        assert_eq!(output_file_name("defaults.v2.yaml"), "defaults.v2.schema.json");
        assert_eq!(output_file_name("values"), "values.schema.json");
    }

    #[test]
    fn test_generate_from_str_normalizes() {
        let schema = generate_from_str("a:\n  b: 1\n", "values.yaml").unwrap();
        assert_eq!(schema.schema_type, TypeList::single("object"));
        assert_eq!(schema.properties["a"].schema_type, TypeList::single("object"));
        assert_eq!(schema.required.names, vec!["a"]);
    }

    #[test]
    fn test_generate_from_missing_file() {
        let err = generate_from_file("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Error::Loader(LoaderError::IoError { .. })));
    }
}
