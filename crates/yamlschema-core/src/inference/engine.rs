//! Recursive schema inference over a YAML node tree
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::annotation::parse_comment;
use crate::error::{Error, Result};
use crate::inference::defaults::cast_default;
use crate::inference::types::type_from_tag;
use crate::loader::{NodeKind, ReferenceResolver, YamlNode};
use crate::normalize::normalize_required;
use crate::schema::{AdditionalProperties, Required, Schema, DRAFT_07_SCHEMA_URI};
use crate::validation::{FragmentValidator, SchemaValidator};
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Builds a schema from a YAML document and its comment annotations
#[derive(Debug, Clone)]
pub struct SchemaInferrer<V = FragmentValidator> {
    source_path: PathBuf,
    validator: V,
    resolver: ReferenceResolver,
}

impl SchemaInferrer<FragmentValidator> {
    /// Create an inferrer for a document read from `source_path`
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self::with_validator(source_path, FragmentValidator::new())
    }
}

impl<V> SchemaInferrer<V>
where
    V: SchemaValidator<Input = Schema>,
{
    /// Create an inferrer that checks declared fragments with `validator`
    pub fn with_validator(source_path: impl Into<PathBuf>, validator: V) -> Self {
        Self {
            source_path: source_path.into(),
            validator,
            resolver: ReferenceResolver::new(),
        }
    }

    /// Infer the schema of `node`
    ///
    /// Names of the mapping keys that must be required are added to
    /// `parent_required`. A document node yields the complete root schema.
    pub fn infer(&self, node: &YamlNode, parent_required: &mut Required) -> Result<Schema> {
        self.infer_node(node, parent_required, "")
    }

    fn infer_node(
        &self,
        node: &YamlNode,
        parent_required: &mut Required,
        path: &str,
    ) -> Result<Schema> {
        let mut schema = Schema::typed("object");

        match node.kind {
            NodeKind::Document => {
                let root = match node.children.as_slice() {
                    // No document at all (empty or comment-only source)
                    [] => {
                        debug!("empty YAML stream, emitting an unconstrained object");
                        return Ok(schema);
                    }
                    [root] => root,
                    roots => {
                        return Err(Error::structure(format!(
                            "expected a single YAML document, found {} roots",
                            roots.len()
                        )))
                    }
                };

                schema.schema_uri = Some(DRAFT_07_SCHEMA_URI.to_string());
                schema.properties = self.infer_node(root, &mut schema.required, path)?.properties;
                schema.additional_properties = Some(AdditionalProperties::Deny);
            }
            NodeKind::Mapping => {
                for (key, value) in node.pairs() {
                    let key_path = join_path(path, &key.value);
                    let property = self.infer_property(key, value, parent_required, &key_path)?;
                    schema.properties.insert(key.value.clone(), property);
                }
            }
            NodeKind::Sequence | NodeKind::Scalar | NodeKind::Alias => {}
        }

        Ok(schema)
    }

    /// Schema for one mapping entry
    fn infer_property(
        &self,
        key: &YamlNode,
        value: &YamlNode,
        parent_required: &mut Required,
        key_path: &str,
    ) -> Result<Schema> {
        let value = value.resolve_alias();

        let (mut declared, description) =
            parse_comment(&key.comment()).map_err(|e| Error::annotation(key_path, e.to_string()))?;

        if declared.reference.is_some() || !declared.pattern_properties.is_empty() {
            self.resolver.resolve(&mut declared, &self.source_path)?;
        }

        if declared.has_data {
            self.validator
                .validate(&declared)
                .map_err(|e| Error::validation(key_path, e))?;
        } else {
            declared.schema_type = type_from_tag(&value.tag)?;
        }

        if let Some(reference) = &declared.reference {
            trace!(key = %key_path, reference = %reference, "keeping unresolved reference");
            return Ok(declared);
        }

        if declared.required.is_marked() || (declared.required.is_empty() && !declared.has_data) {
            parent_required.add(&key.value);
        }

        if value.is_mapping() && (!declared.has_data || !declared.controls_additional_properties())
        {
            declared.additional_properties = Some(AdditionalProperties::Deny);
        }

        if is_blank(&declared.title) && !key.value.is_empty() {
            declared.title = Some(key.value.clone());
        }

        if is_blank(&declared.description) && !description.is_empty() {
            declared.description = Some(description);
        }

        if declared.default.is_none() && value.is_scalar() {
            declared.default = Some(cast_default(&value.value, &declared.schema_type));
        }

        if value.is_mapping() && declared.properties.is_empty() {
            self.infer_object_properties(&mut declared, value, key_path)?;
        } else if value.is_sequence() && declared.items.is_none() {
            declared.items = Some(Box::new(self.infer_items(value, key_path)?));
            normalize_required(&mut declared);
        }

        debug!(key = %key_path, schema_type = %declared.schema_type, "inferred property");
        Ok(declared)
    }

    /// Fill `declared.properties` from a mapping value, leaving out keys
    /// covered by `patternProperties`
    fn infer_object_properties(
        &self,
        declared: &mut Schema,
        value: &YamlNode,
        key_path: &str,
    ) -> Result<()> {
        let mut generated = self
            .infer_node(value, &mut declared.required, key_path)?
            .properties;

        let patterns = declared
            .pattern_properties
            .keys()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| Error::Pattern {
                    key: key_path.to_string(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (property_key, _) in value.pairs() {
            let name = &property_key.value;
            if patterns.iter().any(|pattern| pattern.is_match(name)) {
                trace!(key = %key_path, property = %name, "covered by patternProperties");
                continue;
            }
            if let Some(property) = generated.remove(name) {
                declared.properties.insert(name.clone(), property);
            }
        }

        Ok(())
    }

    /// `items` schema for a sequence value: one `anyOf` alternative per element
    fn infer_items(&self, value: &YamlNode, key_path: &str) -> Result<Schema> {
        let mut items = Schema::new();

        for (index, element) in value.children.iter().enumerate() {
            let element = element.resolve_alias();

            if element.is_scalar() {
                items.any_of.push(Schema {
                    schema_type: type_from_tag(&element.tag)?,
                    ..Schema::default()
                });
                continue;
            }

            let element_path = format!("{}[{}]", key_path, index);
            let mut element_required = Required::default();
            let mut element_schema =
                self.infer_node(element, &mut element_required, &element_path)?;
            for name in &element_required.names {
                element_schema.required.add(name);
            }

            if element.is_mapping()
                && (!element_schema.has_data || !element_schema.controls_additional_properties())
            {
                element_schema.additional_properties = Some(AdditionalProperties::Deny);
            }

            items.any_of.push(element_schema);
        }

        Ok(items)
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().map_or(true, str::is_empty)
}
