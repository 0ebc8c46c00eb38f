//! End-to-end schema generation tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use yamlschema_core::{
    generate_from_file, generate_from_str, Error, LoaderError, DRAFT_07_SCHEMA_URI,
};

fn generate(source: &str) -> Value {
    generate_from_str(source, "values.yaml")
        .unwrap()
        .to_value()
        .unwrap()
}

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

#[test]
fn test_scalar_with_line_comment() {
    assert_eq!(
        generate("foo: 1 # some comment\n"),
        json!({
            "$schema": DRAFT_07_SCHEMA_URI,
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "foo": {
                    "type": "integer",
                    "title": "foo",
                    "description": "some comment",
                    "default": 1
                }
            },
            "required": ["foo"]
        })
    );
}

#[test]
fn test_nested_object() {
    assert_eq!(
        generate("bar:\n  baz: \"x\"\n"),
        json!({
            "$schema": DRAFT_07_SCHEMA_URI,
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "bar": {
                    "type": "object",
                    "title": "bar",
                    "additionalProperties": false,
                    "properties": {
                        "baz": {"type": "string", "title": "baz", "default": "x"}
                    },
                    "required": ["baz"]
                }
            },
            "required": ["bar"]
        })
    );
}

#[test]
fn test_sequence_of_scalars() {
    let schema = generate("list:\n  - 1\n  - 2\n");
    assert_eq!(
        schema["properties"]["list"],
        json!({
            "type": "array",
            "title": "list",
            "items": {
                "anyOf": [{"type": "integer"}, {"type": "integer"}]
            }
        })
    );
}

#[test]
fn test_scalar_types_and_defaults() {
    let schema = generate(
        "enabled: true\nratio: 0.5\nname: app\nempty:\nwhen: 2024-01-31\nquoted: \"42\"\n",
    );
    let properties = &schema["properties"];
    assert_eq!(properties["enabled"]["type"], "boolean");
    assert_eq!(properties["enabled"]["default"], true);
    assert_eq!(properties["ratio"]["type"], "number");
    assert_eq!(properties["ratio"]["default"], 0.5);
    assert_eq!(properties["name"]["default"], "app");
    assert_eq!(properties["empty"]["type"], "null");
    assert_eq!(properties["when"]["type"], "string");
    assert_eq!(properties["when"]["default"], "2024-01-31");
    assert_eq!(properties["quoted"]["type"], "string");
    assert_eq!(properties["quoted"]["default"], "42");
}

#[test]
fn test_annotation_overrides_inference() {
    let source = "\
# @schema
# type: [integer, \"null\"]
# minimum: 0
# required: true
# x-ui-widget: slider
# @schema
# How many workers to start
workers: 4
";
    let schema = generate(source);
    assert_eq!(
        schema["properties"]["workers"],
        json!({
            "type": ["integer", "null"],
            "minimum": 0,
            "title": "workers",
            "description": "How many workers to start",
            "default": 4,
            "x-ui-widget": "slider"
        })
    );
    assert_eq!(schema["required"], json!(["workers"]));
}

#[test]
fn test_required_false_and_declared_keys_are_optional() {
    let source = "\
# @schema
# required: false
# @schema
a: 1
# @schema
# type: string
# @schema
b: x
c: 3
";
    let schema = generate(source);
    assert_eq!(schema["required"], json!(["c"]));
}

#[test]
fn test_declared_title_and_description_win() {
    let source = "\
# @schema
# title: Image tag
# description: Tag to deploy
# @schema
# ignored text
tag: latest
";
    let schema = generate(source);
    let tag = &schema["properties"]["tag"];
    assert_eq!(tag["title"], "Image tag");
    assert_eq!(tag["description"], "Tag to deploy");
}

#[test]
fn test_sequence_of_objects() {
    let source = "\
ports:
  - name: http
    port: 80
";
    let schema = generate(source);
    assert_eq!(
        schema["properties"]["ports"]["items"],
        json!({
            "anyOf": [{
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "name": {"type": "string", "title": "name", "default": "http"},
                    "port": {"type": "integer", "title": "port", "default": 80}
                },
                "required": ["name", "port"]
            }]
        })
    );
}

#[test]
fn test_invalid_annotation_reports_key() {
    let source = "\
# @schema
# type: string
# format: email
# pattern: \"^a\"
# @schema
contact: a@b.c
";
    let err = generate_from_str(source, "values.yaml").unwrap_err();
    assert_eq!(err.rule_name(), Some("format_pattern_exclusive"));
    assert!(err.to_string().contains("key contact"));
}

#[test]
fn test_const_and_enum_with_type_fail() {
    for block in ["# const: a", "# enum: [a, b]"] {
        let source = format!("# @schema\n# type: string\n{}\n# @schema\nmode: a\n", block);
        let err = generate_from_str(&source, "values.yaml").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "{}", block);
    }
}

#[test]
fn test_unclosed_annotation_fails() {
    let err = generate_from_str("# @schema\n# type: string\nname: x\n", "values.yaml").unwrap_err();
    assert!(matches!(err, Error::Annotation { ref key, .. } if key == "name"));
}

#[test]
fn test_yaml_syntax_error() {
    let err = generate_from_str("a: [1, 2\n", "values.yaml").unwrap_err();
    assert!(matches!(
        err,
        Error::Loader(LoaderError::YamlParseError { .. })
    ));
}

#[test]
fn test_empty_values_file_is_an_open_object() {
    for source in ["", "# only a comment\n"] {
        assert_eq!(generate(source), json!({"type": "object"}), "{:?}", source);
    }
}

#[test]
fn test_multiple_documents_fail() {
    let err = generate_from_str("a: 1\n---\nb: 2\n", "values.yaml").unwrap_err();
    assert!(matches!(err, Error::Structure { .. }));
}

#[test]
fn test_block_scalar_lines_are_not_annotations() {
    let source = "\
script: |
  echo hi
  # install deps
  # @schema
# Retries after failure
next: 1
";
    let schema = generate(source);
    assert_eq!(
        schema["properties"]["script"]["default"],
        "echo hi\n# install deps\n# @schema\n"
    );
    assert_eq!(
        schema["properties"]["next"],
        json!({
            "type": "integer",
            "title": "next",
            "description": "Retries after failure",
            "default": 1
        })
    );
    assert_eq!(schema["required"], json!(["script", "next"]));
}

#[test]
fn test_references_from_fixture() {
    let schema = generate_from_file(fixture("refs/values.yaml"))
        .unwrap()
        .to_value()
        .unwrap();

    assert_eq!(
        schema,
        json!({
            "$schema": DRAFT_07_SCHEMA_URI,
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "image": {
                    "type": "object",
                    "title": "image",
                    "additionalProperties": false,
                    "properties": {
                        "repository": {"type": "string"},
                        "tag": {"type": "string"}
                    },
                    "required": ["repository"]
                },
                "labels": {
                    "type": "object",
                    "title": "labels",
                    "additionalProperties": false,
                    "patternProperties": {
                        "^[a-z]+$": {"type": "string", "maxLength": 63}
                    },
                    "properties": {
                        "Env": {"type": "string", "title": "Env", "default": "prod"}
                    },
                    "required": ["team", "Env"]
                },
                "resources": {
                    "$ref": "https://example.com/schemas/resources.json"
                },
                "replicas": {
                    "type": "integer",
                    "title": "replicas",
                    "description": "Number of replicas",
                    "default": 2
                }
            },
            "required": ["replicas"]
        })
    );
}

#[test]
fn test_missing_relative_reference_is_kept() {
    let dir = tempdir().unwrap();
    let values = dir.path().join("values.yaml");
    fs::write(
        &values,
        "# @schema\n# $ref: ./missing.json#/definitions/x\n# @schema\nthing: 1\n",
    )
    .unwrap();

    let schema = generate_from_file(&values).unwrap();
    assert_eq!(
        schema.properties["thing"].reference.as_deref(),
        Some("./missing.json#/definitions/x")
    );
}

#[test]
fn test_circular_reference_is_reported() {
    let dir = tempdir().unwrap();
    let values = dir.path().join("values.yaml");
    fs::write(dir.path().join("a.json"), r#"{"$ref": "b.json"}"#).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"$ref": "a.json"}"#).unwrap();
    fs::write(&values, "# @schema\n# $ref: a.json\n# @schema\nloop: 1\n").unwrap();

    let err = generate_from_file(&values).unwrap_err();
    assert!(matches!(
        err,
        Error::Loader(LoaderError::CircularReference { .. })
    ));
}

#[test]
fn test_output_is_pretty_and_sorted() {
    let json = generate_from_str("b: 1\na: 2\n", "values.yaml")
        .unwrap()
        .to_json()
        .unwrap();

    assert!(json.starts_with("{\n  \"$schema\""));
    let a = json.find("\"a\": {").unwrap();
    let b = json.find("\"b\": {").unwrap();
    assert!(a < b);
    assert!(!json.contains("\"required\": []"));
}
