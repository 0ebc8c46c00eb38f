//! YAML tag to JSON Schema type mapping
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::schema::TypeList;

/// Prefix of the long form of core schema tags
pub const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Map a resolved YAML tag to its JSON Schema type
///
/// Accepts the short (`!!int`) and long (`tag:yaml.org,2002:int`) forms.
pub fn type_from_tag(tag: &str) -> Result<TypeList> {
    let name = tag
        .strip_prefix("!!")
        .or_else(|| tag.strip_prefix(YAML_TAG_PREFIX))
        .ok_or_else(|| unsupported(tag))?;

    let type_name = match name {
        "null" => "null",
        "bool" => "boolean",
        "str" | "timestamp" => "string",
        "int" => "integer",
        "float" => "number",
        "seq" => "array",
        "map" => "object",
        _ => return Err(unsupported(tag)),
    };

    Ok(TypeList::single(type_name))
}

fn unsupported(tag: &str) -> Error {
    Error::UnsupportedTag {
        tag: tag.to_string(),
    }
}
