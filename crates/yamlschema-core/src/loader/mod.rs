//! Loading of values files and referenced schemas
//!
//! This module provides:
//! - YAML parsing into a node tree with tags and comments
//! - `$ref` resolution against files next to the values file
//! - Circular reference detection
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod node;
pub mod parser;
pub mod resolver;

pub use error::{LoaderError, LoaderResult};
pub use node::{NodeKind, YamlNode};
pub use parser::{parse_yaml, resolve_plain_tag};
pub use resolver::{relative_file, split_reference, ReferenceResolver, ResolverContext};

use std::fs;
use std::path::Path;

/// Read and parse a values file
pub fn load_file(path: &Path) -> LoaderResult<YamlNode> {
    let source =
        fs::read_to_string(path).map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
    parse_yaml(&source, path)
}
