//! Keywords whose JSON shape is a union
//!
//! `type` may be a string or an array, `required` a boolean marker or a list of
//! names, `additionalProperties` a boolean or a nested schema. Each union gets
//! its own type with hand-written serde so the shape is never guessed at.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use super::Schema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Key prefix reserved for custom annotations
pub const CUSTOM_ANNOTATION_PREFIX: &str = "x-";

/// The seven primitive JSON Schema type names
pub const PRIMITIVE_TYPES: [&str; 7] = [
    "null", "boolean", "object", "array", "number", "integer", "string",
];

/// Value of the `type` keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeList(Vec<String>);

impl TypeList {
    /// Create an empty (unconstrained) type list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a type list holding a single type name
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True when the list holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the list places no constraint on the instance: it is empty
    /// or carries a blank entry.
    pub fn is_unconstrained(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(|t| t.is_empty())
    }

    /// Check whether `name` is one of the listed types
    pub fn matches(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }

    /// Entries that are neither blank nor one of the primitive type names
    pub fn unknown_types(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty() && !PRIMITIVE_TYPES.contains(t))
            .collect()
    }
}

impl From<Vec<String>> for TypeList {
    fn from(types: Vec<String>) -> Self {
        Self(types)
    }
}

impl From<&str> for TypeList {
    fn from(name: &str) -> Self {
        Self::single(name)
    }
}

impl fmt::Display for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            many => write!(f, "[{}]", many.join(", ")),
        }
    }
}

impl Serialize for TypeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::new()),
            Value::String(single) => Ok(Self::single(single)),
            Value::Array(entries) => entries
                .into_iter()
                .map(|entry| match entry {
                    // `type: [string, null]` in YAML decodes the second entry as null
                    Value::Null => Ok("null".to_string()),
                    Value::String(name) => Ok(name),
                    other => Err(D::Error::custom(format!(
                        "type entries must be strings, found {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            other => Err(D::Error::custom(format!(
                "type must be a string or a list of strings, found {}",
                other
            ))),
        }
    }
}

/// Value of the `required` keyword while a schema is being built
///
/// `flag` carries the per-property `required: true|false` marker written in an
/// annotation; it only means something to the parent and is folded into the
/// parent's `names` by [`crate::normalize_required`]. Only `names` is ever
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Required {
    pub flag: Option<bool>,
    pub names: Vec<String>,
}

impl Required {
    /// Required list with the given names and no marker
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flag: None,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the property carrying this value asked to be required
    pub fn is_marked(&self) -> bool {
        self.flag == Some(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append `name` unless already listed; returns whether it was added
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// True when there are no names to emit
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Serialize for Required {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Required {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::Bool(flag) => Ok(Self {
                flag: Some(flag),
                names: Vec::new(),
            }),
            Value::Array(entries) => {
                let mut required = Self::default();
                for entry in entries {
                    match entry {
                        Value::String(name) => {
                            required.add(&name);
                        }
                        other => {
                            return Err(D::Error::custom(format!(
                                "required entries must be strings, found {}",
                                other
                            )))
                        }
                    }
                }
                Ok(required)
            }
            other => Err(D::Error::custom(format!(
                "could not decode {} as a list of strings or a boolean",
                other
            ))),
        }
    }
}

/// Value of the `additionalProperties` keyword
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Allow,
    Deny,
    Schema(Box<Schema>),
}

impl AdditionalProperties {
    pub fn as_schema_mut(&mut self) -> Option<&mut Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }
}

impl Serialize for AdditionalProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Allow => serializer.serialize_bool(true),
            Self::Deny => serializer.serialize_bool(false),
            Self::Schema(schema) => schema.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AdditionalProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(true) => Ok(Self::Allow),
            Value::Bool(false) => Ok(Self::Deny),
            value @ Value::Object(_) => Schema::from_value(value)
                .map(|schema| Self::Schema(Box::new(schema)))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "additionalProperties must be a boolean or a schema, found {}",
                other
            ))),
        }
    }
}

/// `x-` prefixed keys, emitted inline next to the standard keywords
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomAnnotations(BTreeMap<String, Value>);

impl Deref for CustomAnnotations {
    type Target = BTreeMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CustomAnnotations {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Serialize for CustomAnnotations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for CustomAnnotations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Receives every key the schema does not know; only prefixed ones are kept.
        let unknown = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            unknown
                .into_iter()
                .filter(|(key, _)| key.starts_with(CUSTOM_ANNOTATION_PREFIX))
                .collect(),
        ))
    }
}
