//! Schema inference from YAML structure, tags and values
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod defaults;
pub mod engine;
pub mod types;

pub use defaults::cast_default;
pub use engine::SchemaInferrer;
pub use types::{type_from_tag, YAML_TAG_PREFIX};
