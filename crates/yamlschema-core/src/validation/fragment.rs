//! Consistency rules for declared schema fragments
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::schema::{Schema, PRIMITIVE_TYPES};
use crate::validation::base::{SchemaValidator, ValidationContext};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::syntax::{Draft07MetaSchema, SyntaxChecker};

/// Values accepted for the `format` keyword
pub const SUPPORTED_FORMATS: [&str; 19] = [
    "date-time",
    "time",
    "date",
    "duration",
    "email",
    "idn-email",
    "hostname",
    "idn-hostname",
    "ipv4",
    "ipv6",
    "uuid",
    "uri",
    "uri-reference",
    "iri",
    "iri-reference",
    "uri-template",
    "json-pointer",
    "relative-json-pointer",
    "regex",
];

/// Name under which fragments are handed to the syntax checker
const RESOURCE_NAME: &str = "schema.json";

/// Validates a fragment and everything nested in it
#[derive(Debug, Clone, Default)]
pub struct FragmentValidator<C = Draft07MetaSchema> {
    checker: C,
}

impl FragmentValidator<Draft07MetaSchema> {
    pub fn new() -> Self {
        Self {
            checker: Draft07MetaSchema,
        }
    }
}

impl<C: SyntaxChecker> FragmentValidator<C> {
    /// Validator using a custom syntax checker
    pub fn with_checker(checker: C) -> Self {
        Self { checker }
    }

    fn validate_syntax(&self, schema: &Schema, ctx: &ValidationContext) -> ValidationResult<()> {
        let document = schema.to_value().map_err(|e| {
            ValidationError::new(&ctx.path, format!("failed to convert schema to JSON: {}", e))
        })?;

        self.checker.check(RESOURCE_NAME, &document).map_err(|reason| {
            ValidationError::rule(
                &ctx.path,
                format!("invalid schema syntax: {}", reason),
                "schema_syntax",
                "a Draft-07 compatible schema",
                reason,
            )
        })?;

        let unknown = schema.schema_type.unknown_types();
        if let Some(first) = unknown.first() {
            return Err(ValidationError::rule(
                &ctx.path,
                format!("unsupported type {}", schema.schema_type),
                "type_name",
                format!("one of: {}", PRIMITIVE_TYPES.join(", ")),
                first.to_string(),
            ));
        }

        Ok(())
    }

    fn validate_type_constraints(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        let has_type = !schema.schema_type.is_unconstrained();

        if schema.const_value.is_some() && has_type {
            return Err(ValidationError::rule(
                &ctx.path,
                "cannot use both 'const' and 'type' in the same schema",
                "const_type_exclusive",
                "either const or type",
                format!("const with type {}", schema.schema_type),
            ));
        }

        if schema.enum_values.is_some() && has_type {
            return Err(ValidationError::rule(
                &ctx.path,
                "cannot use both 'enum' and 'type' in the same schema",
                "enum_type_exclusive",
                "either enum or type",
                format!("enum with type {}", schema.schema_type),
            ));
        }

        Ok(())
    }

    fn validate_numeric_constraints(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        if !schema.has_numeric_constraints() {
            return Ok(());
        }

        let types = &schema.schema_type;
        if !types.is_unconstrained() && !types.matches("number") && !types.matches("integer") {
            return Err(ValidationError::rule(
                &ctx.path,
                format!(
                    "numeric constraints can only be used with number or integer types, got {}",
                    types
                ),
                "numeric_type",
                "number or integer",
                types.to_string(),
            ));
        }

        if let Some(multiple_of) = &schema.multiple_of {
            if multiple_of.as_f64().map_or(true, |value| value <= 0.0) {
                return Err(ValidationError::rule(
                    &ctx.path,
                    "multipleOf must be greater than 0",
                    "multiple_of_positive",
                    "a number greater than 0",
                    multiple_of.to_string(),
                ));
            }
        }

        if schema.minimum.is_some() && schema.exclusive_minimum.is_some() {
            return Err(ValidationError::rule(
                &ctx.path,
                "cannot use both minimum and exclusiveMinimum",
                "minimum_exclusive",
                "either minimum or exclusiveMinimum",
                "both",
            ));
        }

        if schema.maximum.is_some() && schema.exclusive_maximum.is_some() {
            return Err(ValidationError::rule(
                &ctx.path,
                "cannot use both maximum and exclusiveMaximum",
                "maximum_exclusive",
                "either maximum or exclusiveMaximum",
                "both",
            ));
        }

        Ok(())
    }

    fn validate_string_constraints(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        let types = &schema.schema_type;
        let string_allowed = types.is_unconstrained() || types.matches("string");

        if let Some(format) = &schema.format {
            if !string_allowed {
                return Err(ValidationError::rule(
                    &ctx.path,
                    format!("format can only be used with string type, got {}", types),
                    "format_type",
                    "string",
                    types.to_string(),
                ));
            }

            if !SUPPORTED_FORMATS.contains(&format.as_str()) {
                return Err(ValidationError::rule(
                    &ctx.path,
                    format!("unsupported format: {}", format),
                    "format_supported",
                    format!("one of: {}", SUPPORTED_FORMATS.join(", ")),
                    format.clone(),
                ));
            }
        }

        if schema.pattern.is_some() && !string_allowed {
            return Err(ValidationError::rule(
                &ctx.path,
                format!("pattern can only be used with string type, got {}", types),
                "pattern_type",
                "string",
                types.to_string(),
            ));
        }

        if schema.format.is_some() && schema.pattern.is_some() {
            return Err(ValidationError::rule(
                &ctx.path,
                "cannot use both format and pattern in the same schema",
                "format_pattern_exclusive",
                "either format or pattern",
                "both",
            ));
        }

        if let (Some(min), Some(max)) = (schema.min_length, schema.max_length) {
            if min > max {
                return Err(ValidationError::rule(
                    &ctx.path,
                    format!("minLength ({}) cannot be greater than maxLength ({})", min, max),
                    "length_bounds",
                    "minLength <= maxLength",
                    format!("{} > {}", min, max),
                ));
            }
        }

        Ok(())
    }

    fn validate_array_constraints(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        let types = &schema.schema_type;
        let array_allowed = types.is_unconstrained() || types.matches("array");

        if schema.items.is_some() && !array_allowed {
            return Err(ValidationError::rule(
                &ctx.path,
                format!("items can only be used with array type, got {}", types),
                "items_type",
                "array",
                types.to_string(),
            ));
        }

        if schema.has_array_bounds() {
            if !array_allowed {
                return Err(ValidationError::rule(
                    &ctx.path,
                    format!(
                        "minItems/maxItems can only be used with array type, got {}",
                        types
                    ),
                    "item_bounds_type",
                    "array",
                    types.to_string(),
                ));
            }

            if let (Some(min), Some(max)) = (schema.min_items, schema.max_items) {
                if max < min {
                    return Err(ValidationError::rule(
                        &ctx.path,
                        format!("maxItems ({}) cannot be less than minItems ({})", max, min),
                        "item_bounds",
                        "minItems <= maxItems",
                        format!("{} > {}", min, max),
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_nested_schemas(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        if let Some(items) = &schema.items {
            self.validate_with_context(items, &ctx.child("items"))?;
        }

        for (keyword, members) in [
            ("allOf", &schema.all_of),
            ("anyOf", &schema.any_of),
            ("oneOf", &schema.one_of),
        ] {
            let keyword_ctx = ctx.child(keyword);
            for (index, member) in members.iter().enumerate() {
                self.validate_with_context(member, &keyword_ctx.child_index(index))?;
            }
        }

        for (keyword, nested) in [
            ("if", &schema.if_schema),
            ("then", &schema.then_schema),
            ("else", &schema.else_schema),
            ("not", &schema.not),
        ] {
            if let Some(nested) = nested {
                self.validate_with_context(nested, &ctx.child(keyword))?;
            }
        }

        Ok(())
    }
}

impl<C: SyntaxChecker> SchemaValidator for FragmentValidator<C> {
    type Input = Schema;

    fn validate_with_context(
        &self,
        schema: &Schema,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        self.validate_syntax(schema, ctx)?;
        self.validate_type_constraints(schema, ctx)?;
        self.validate_numeric_constraints(schema, ctx)?;
        self.validate_string_constraints(schema, ctx)?;
        self.validate_array_constraints(schema, ctx)?;
        self.validate_nested_schemas(schema, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    fn fragment(value: Value) -> Schema {
        Schema::from_value(value).unwrap()
    }

    fn violated_rule(value: Value) -> String {
        let error = FragmentValidator::new()
            .validate(&fragment(value))
            .unwrap_err();
        error.rule_name().unwrap_or_default().to_string()
    }

    #[test]
    fn test_accepts_consistent_fragment() {
        let validator = FragmentValidator::new();
        let schema = fragment(json!({
            "type": "string",
            "format": "email",
            "minLength": 3,
            "maxLength": 64,
        }));
        assert!(validator.validate(&schema).is_ok());
    }

    #[test]
    fn test_const_and_enum_exclude_type() {
        assert_eq!(
            violated_rule(json!({"type": "string", "const": "a"})),
            "const_type_exclusive"
        );
        assert_eq!(
            violated_rule(json!({"type": "string", "enum": ["a", "b"]})),
            "enum_type_exclusive"
        );
        assert!(FragmentValidator::new()
            .validate(&fragment(json!({"enum": ["a", "b"]})))
            .is_ok());
    }

    #[test]
    fn test_numeric_rules() {
        assert_eq!(
            violated_rule(json!({"type": "string", "minimum": 1})),
            "numeric_type"
        );
        assert_eq!(
            violated_rule(json!({"type": "integer", "minimum": 1, "exclusiveMinimum": 0})),
            "minimum_exclusive"
        );
        assert_eq!(
            violated_rule(json!({"type": "number", "maximum": 1, "exclusiveMaximum": 2})),
            "maximum_exclusive"
        );
    }

    #[test]
    fn test_string_rules() {
        assert_eq!(
            violated_rule(json!({"type": "integer", "format": "email"})),
            "format_type"
        );
        assert_eq!(
            violated_rule(json!({"type": "string", "format": "phone"})),
            "format_supported"
        );
        assert_eq!(
            violated_rule(json!({"type": "string", "format": "email", "pattern": "^a"})),
            "format_pattern_exclusive"
        );
        assert_eq!(
            violated_rule(json!({"type": "string", "minLength": 5, "maxLength": 2})),
            "length_bounds"
        );
    }

    #[test]
    fn test_array_rules() {
        assert_eq!(
            violated_rule(json!({"type": "object", "items": {"type": "string"}})),
            "items_type"
        );
        assert_eq!(
            violated_rule(json!({"type": "array", "minItems": 3, "maxItems": 1})),
            "item_bounds"
        );
    }

    #[test]
    fn test_nested_violation_reports_location() {
        let error = FragmentValidator::new()
            .validate(&fragment(json!({
                "type": "array",
                "items": {
                    "anyOf": [
                        {"type": "string"},
                        {"type": "string", "const": "x"}
                    ]
                }
            })))
            .unwrap_err();
        assert_eq!(error.path, "$.items.anyOf[1]");
        assert_eq!(error.rule_name(), Some("const_type_exclusive"));
    }

    #[derive(Default)]
    struct RecordingChecker {
        seen: RefCell<Vec<Value>>,
    }

    impl SyntaxChecker for RecordingChecker {
        fn check(&self, _name: &str, document: &Value) -> Result<(), String> {
            self.seen.borrow_mut().push(document.clone());
            Ok(())
        }
    }

    #[test]
    fn test_visits_each_nested_fragment_once() {
        let validator = FragmentValidator::with_checker(RecordingChecker::default());
        let schema = fragment(json!({
            "allOf": [{"type": "string"}, {"type": "integer"}],
            "if": {"type": "null"},
            "then": {"type": "null"},
            "not": {"type": "boolean"},
        }));
        validator.validate(&schema).unwrap();
        assert_eq!(validator.checker.seen.borrow().len(), 6);
    }

    #[test]
    fn test_syntax_rejection_is_reported() {
        assert_eq!(violated_rule(json!({"type": "text"})), "schema_syntax");
    }

    struct AcceptAll;

    impl SyntaxChecker for AcceptAll {
        fn check(&self, _name: &str, _document: &Value) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_type_name_rejected_without_meta_schema() {
        let error = FragmentValidator::with_checker(AcceptAll)
            .validate(&fragment(json!({"type": ["string", "text"]})))
            .unwrap_err();
        assert_eq!(error.rule_name(), Some("type_name"));
        assert_eq!(error.schema_violations[0].actual, "text");
    }
}
