//! `# @schema` comment annotations
//!
//! A key's comment may embed a YAML-encoded schema fragment between two
//! `# @schema` marker lines. Every other comment line is description text.
//!
//! ```yaml
//! # @schema
//! # type: integer
//! # minimum: 1
//! # @schema
//! # Number of replicas
//! replicas: 3
//! ```
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::schema::Schema;
use thiserror::Error;

/// Line that opens and closes an annotation block
pub const ANNOTATION_MARKER: &str = "# @schema";

/// Errors raised while reading an annotation block
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("unclosed schema block found in comment")]
    UnclosedBlock,

    #[error("invalid YAML in schema block: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("schema block is not a valid schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Split a comment into its declared fragment and description text
///
/// The fragment is marked as declared when at least one line sits inside a
/// block.
pub fn parse_comment(comment: &str) -> Result<(Schema, String), AnnotationError> {
    let mut inside_block = false;
    let mut declared = false;
    let mut block = Vec::new();
    let mut description = Vec::new();

    for line in comment.lines() {
        let line = line.trim_start();
        if line.starts_with(ANNOTATION_MARKER) {
            inside_block = !inside_block;
            continue;
        }

        if inside_block {
            let content = line.strip_prefix('#').unwrap_or(line);
            let content = content.strip_prefix('#').unwrap_or(content);
            let content = content.strip_prefix(' ').unwrap_or(content);
            block.push(content);
            declared = true;
        } else {
            description.push(line.strip_prefix('#').unwrap_or(line).trim());
        }
    }

    if inside_block {
        return Err(AnnotationError::UnclosedBlock);
    }

    let mut schema = decode_block(&block.join("\n"))?;
    schema.has_data = declared;

    Ok((schema, description.join("\n").trim().to_string()))
}

fn decode_block(text: &str) -> Result<Schema, AnnotationError> {
    if text.trim().is_empty() {
        return Ok(Schema::default());
    }

    match serde_yaml::from_str::<serde_json::Value>(text)? {
        serde_json::Value::Null => Ok(Schema::default()),
        value => Ok(Schema::from_value(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_comment_is_description() {
        let (schema, description) = parse_comment("# Number of replicas").unwrap();
        assert!(!schema.has_data);
        assert_eq!(schema, Schema::default());
        assert_eq!(description, "Number of replicas");
    }

    #[test]
    fn test_block_and_description() {
        let comment = "\
# @schema
# type: integer
# minimum: 1
# x-order: 2
# @schema
# Number of replicas";
        let (schema, description) = parse_comment(comment).unwrap();
        assert!(schema.has_data);
        assert!(schema.schema_type.matches("integer"));
        assert_eq!(schema.minimum, Some(1.into()));
        assert_eq!(schema.custom_annotations.get("x-order"), Some(&json!(2)));
        assert_eq!(description, "Number of replicas");
    }

    #[test]
    fn test_description_lines_are_joined() {
        let comment = "#\n# first line\n#   second line  \n#";
        let (_, description) = parse_comment(comment).unwrap();
        assert_eq!(description, "first line\nsecond line");
    }

    #[test]
    fn test_nested_block_indentation_survives() {
        let comment = "\
# @schema
# type: object
# properties:
#   name:
#     type: string
## required: [name]
# @schema";
        let (schema, _) = parse_comment(comment).unwrap();
        assert!(schema.properties["name"].schema_type.matches("string"));
        assert_eq!(schema.required.names, vec!["name"]);
    }

    #[test]
    fn test_required_marker() {
        let (schema, _) = parse_comment("# @schema\n# required: false\n# @schema").unwrap();
        assert_eq!(schema.required.flag, Some(false));
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_empty_block_still_declares() {
        let (schema, description) = parse_comment("# @schema\n#\n# @schema\n# text").unwrap();
        assert!(schema.has_data);
        assert_eq!(description, "text");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_comment("# @schema\n# type: string").unwrap_err();
        assert!(matches!(err, AnnotationError::UnclosedBlock));
    }

    #[test]
    fn test_invalid_block() {
        let err = parse_comment("# @schema\n# type: [string\n# @schema").unwrap_err();
        assert!(matches!(err, AnnotationError::Yaml(_)));

        let err = parse_comment("# @schema\n# required: yes please\n# @schema").unwrap_err();
        assert!(matches!(err, AnnotationError::Schema(_)));
    }

    #[test]
    fn test_empty_comment() {
        let (schema, description) = parse_comment("").unwrap();
        assert!(!schema.has_data);
        assert!(description.is_empty());
    }
}
