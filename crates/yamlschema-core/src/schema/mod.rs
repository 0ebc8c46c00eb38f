//! JSON Schema data model
//!
//! [`Schema`] is one node of the schema tree. Fragments are built while the
//! YAML document is walked, decoded from `# @schema` annotations, or loaded
//! from files named by `$ref`, and are finally serialized as Draft-07 JSON.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod types;

pub use types::{
    AdditionalProperties, CustomAnnotations, Required, TypeList, CUSTOM_ANNOTATION_PREFIX,
    PRIMITIVE_TYPES,
};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// URI of the meta-schema every generated document declares
pub const DRAFT_07_SCHEMA_URI: &str = "http://json-schema.org/draft-07/schema#";

/// A JSON Schema fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,

    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "TypeList::is_empty")]
    pub schema_type: TypeList,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_properties: BTreeMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Required::is_empty")]
    pub required: Required,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,

    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<Schema>>,

    #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<Schema>>,

    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub write_only: bool,

    /// Set when the fragment was declared by an annotation or loaded through
    /// `$ref`, as opposed to synthesized from the YAML structure.
    #[serde(skip)]
    pub has_data: bool,

    #[serde(flatten)]
    pub custom_annotations: CustomAnnotations,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Schema {
    /// Create an empty, unconstrained fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fragment constrained to a single type
    pub fn typed(type_name: &str) -> Self {
        Self {
            schema_type: TypeList::single(type_name),
            ..Self::default()
        }
    }

    /// Decode a fragment from a JSON value
    ///
    /// Unknown keywords are dropped unless they carry the custom annotation
    /// prefix.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Encode the fragment, custom annotations inlined
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value()?)
    }

    /// Mark the fragment as explicitly declared
    pub fn mark_declared(&mut self) {
        self.has_data = true;
    }

    pub fn has_numeric_constraints(&self) -> bool {
        self.minimum.is_some()
            || self.maximum.is_some()
            || self.exclusive_minimum.is_some()
            || self.exclusive_maximum.is_some()
            || self.multiple_of.is_some()
    }

    pub fn has_array_bounds(&self) -> bool {
        self.min_items.is_some() || self.max_items.is_some()
    }

    /// Whether `additionalProperties` was given any explicit value
    pub fn controls_additional_properties(&self) -> bool {
        self.additional_properties.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_prefixed_keys_only() {
        let schema = Schema::from_value(json!({
            "type": "string",
            "x-ui-hidden": true,
            "unrelated": 3,
        }))
        .unwrap();

        assert!(schema.schema_type.matches("string"));
        assert_eq!(schema.custom_annotations.get("x-ui-hidden"), Some(&json!(true)));
        assert!(!schema.custom_annotations.contains_key("unrelated"));
        assert!(!schema.has_data);
    }

    #[test]
    fn test_encode_inlines_annotations_and_omits_empty_required() {
        let mut schema = Schema::typed("object");
        schema
            .custom_annotations
            .insert("x-order".to_string(), json!(2));
        schema.additional_properties = Some(AdditionalProperties::Deny);
        schema.properties.insert("name".to_string(), Schema::typed("string"));

        assert_eq!(
            schema.to_value().unwrap(),
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {"name": {"type": "string"}},
                "x-order": 2,
            })
        );
    }

    #[test]
    fn test_nested_keywords_round_trip() {
        let source = json!({
            "type": ["integer", "null"],
            "minimum": 1,
            "multipleOf": 0.5,
            "if": {"const": 3},
            "then": {"description": "three"},
            "required": ["a"],
            "anyOf": [{"type": "integer"}, {"type": "null"}],
        });
        let schema = Schema::from_value(source.clone()).unwrap();
        assert_eq!(schema.required.names, vec!["a"]);
        assert_eq!(schema.any_of.len(), 2);
        assert_eq!(schema.to_value().unwrap(), source);
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let json = Schema::typed("string").to_json().unwrap();
        assert_eq!(json, "{\n  \"type\": \"string\"\n}");
    }
}
