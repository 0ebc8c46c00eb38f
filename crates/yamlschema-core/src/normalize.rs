//! Folding of per-property `required: true` markers into `required` arrays
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::schema::{Schema, TypeList};

/// Turn child `required` markers into the parent's `required` list
///
/// Applied recursively and in place. Children are normalized before their
/// parent, markers are cleared once folded, and a fragment with properties is
/// forced to the `object` type. Running it twice changes nothing.
pub fn normalize_required(schema: &mut Schema) {
    if !schema.properties.is_empty() {
        for (name, property) in schema.properties.iter_mut() {
            normalize_required(property);
            if property.required.is_marked() {
                schema.required.add(name);
            }
            property.required.flag = None;
        }
        schema.schema_type = TypeList::single("object");
    }

    for nested in [
        &mut schema.if_schema,
        &mut schema.then_schema,
        &mut schema.else_schema,
        &mut schema.items,
        &mut schema.not,
    ]
    .into_iter()
    .flatten()
    {
        normalize_required(nested);
    }

    for member in schema
        .any_of
        .iter_mut()
        .chain(schema.all_of.iter_mut())
        .chain(schema.one_of.iter_mut())
        .chain(schema.pattern_properties.values_mut())
    {
        normalize_required(member);
    }

    if let Some(additional) = schema
        .additional_properties
        .as_mut()
        .and_then(|a| a.as_schema_mut())
    {
        normalize_required(additional);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AdditionalProperties, Required};
    use serde_json::json;

    fn marked(flag: bool) -> Schema {
        Schema {
            required: Required {
                flag: Some(flag),
                names: Vec::new(),
            },
            ..Schema::typed("string")
        }
    }

    #[test]
    fn test_folds_markers_into_parent() {
        let mut schema = Schema::new();
        schema.properties.insert("a".to_string(), marked(true));
        schema.properties.insert("b".to_string(), marked(false));
        schema.properties.insert("c".to_string(), Schema::typed("string"));

        normalize_required(&mut schema);

        assert_eq!(schema.required.names, vec!["a"]);
        assert_eq!(schema.schema_type, TypeList::single("object"));
        assert!(schema.properties.values().all(|p| p.required.flag.is_none()));
    }

    #[test]
    fn test_does_not_duplicate_names() {
        let mut schema = Schema::typed("object");
        schema.required = Required::with_names(["a"]);
        schema.properties.insert("a".to_string(), marked(true));

        normalize_required(&mut schema);
        assert_eq!(schema.required.names, vec!["a"]);
    }

    #[test]
    fn test_forces_object_type() {
        let mut schema = Schema::from_value(json!({
            "type": ["object", "null"],
            "properties": {"a": {"type": "string"}}
        }))
        .unwrap();

        normalize_required(&mut schema);
        assert_eq!(schema.schema_type, TypeList::single("object"));
    }

    #[test]
    fn test_reaches_nested_fragments() {
        let mut inner = Schema::new();
        inner.properties.insert("deep".to_string(), marked(true));

        let mut schema = Schema::new();
        schema.items = Some(Box::new(Schema {
            any_of: vec![inner.clone()],
            ..Schema::default()
        }));
        schema.not = Some(Box::new(inner.clone()));
        schema.additional_properties = Some(AdditionalProperties::Schema(Box::new(inner.clone())));
        schema.pattern_properties.insert("^x".to_string(), inner);

        normalize_required(&mut schema);

        let items = schema.items.as_ref().unwrap();
        assert_eq!(items.any_of[0].required.names, vec!["deep"]);
        assert_eq!(schema.not.as_ref().unwrap().required.names, vec!["deep"]);
        assert_eq!(schema.pattern_properties["^x"].required.names, vec!["deep"]);
        match &mut schema.additional_properties {
            Some(additional) => {
                let nested = additional.as_schema_mut().unwrap();
                assert_eq!(nested.required.names, vec!["deep"]);
            }
            None => panic!("additionalProperties lost"),
        }
    }

    #[test]
    fn test_empty_properties_leave_type_alone() {
        let mut schema = Schema::typed("string");
        normalize_required(&mut schema);
        assert_eq!(schema, Schema::typed("string"));
    }
}
