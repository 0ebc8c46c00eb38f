//! Default values derived from scalar text
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::schema::TypeList;
use serde_json::{Number, Value};

/// Convert the raw text of a scalar into a default value
///
/// Types are tried in order and the first one that parses wins. Types other
/// than `boolean`, `integer` and `number` never convert, so the raw text is
/// returned when nothing matches.
pub fn cast_default(raw: &str, types: &TypeList) -> Value {
    for type_name in types.as_slice() {
        match type_name.as_str() {
            "boolean" => match raw {
                "true" => return Value::Bool(true),
                "false" => return Value::Bool(false),
                _ => {}
            },
            "integer" => {
                if let Ok(value) = raw.parse::<i64>() {
                    return Value::Number(value.into());
                }
            }
            "number" => {
                if let Some(number) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                    return Value::Number(number);
                }
            }
            _ => {}
        }
    }

    Value::String(raw.to_string())
}
