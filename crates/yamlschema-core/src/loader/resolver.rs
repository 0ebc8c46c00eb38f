//! `$ref` resolution for declared fragments
//!
//! A fragment whose `$ref` names an existing file next to the values file is
//! replaced by the schema stored there, optionally narrowed by a JSON pointer.
//! References that do not name such a file are left for the consumer of the
//! generated schema.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::schema::Schema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Context for resolution operations
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Stack for circular reference detection
    pub resolution_stack: Vec<PathBuf>,
    /// Maximum resolution depth
    pub max_depth: usize,
}

impl ResolverContext {
    pub fn new() -> Self {
        Self {
            resolution_stack: Vec::new(),
            max_depth: 32,
        }
    }

    /// Push a target onto the resolution stack
    pub fn push_path(&mut self, path: PathBuf) -> LoaderResult<()> {
        if self.resolution_stack.contains(&path) || self.resolution_stack.len() >= self.max_depth {
            let mut chain = self.resolution_stack.clone();
            chain.push(path);
            return Err(LoaderError::circular_reference(chain));
        }

        self.resolution_stack.push(path);
        Ok(())
    }

    pub fn pop_path(&mut self) -> Option<PathBuf> {
        self.resolution_stack.pop()
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `candidate` against the directory of `base`
///
/// Returns `None` when the candidate is empty or absolute, or when it does not
/// name an existing regular file.
pub fn relative_file(base: &Path, candidate: &str) -> Option<PathBuf> {
    if candidate.is_empty() || Path::new(candidate).is_absolute() {
        return None;
    }

    let directory = base.parent().unwrap_or_else(|| Path::new(""));
    let path = directory.join(candidate);
    path.is_file().then_some(path)
}

/// Split a reference into its file part and JSON pointer
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        Some((file, pointer)) => (file, Some(pointer)),
        None => (reference, None),
    }
}

/// Resolves relative-file references in place
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver;

impl ReferenceResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the fragment's own `$ref` and those of its pattern properties
    ///
    /// `source_path` is the file the fragment was declared in.
    pub fn resolve(&self, schema: &mut Schema, source_path: &Path) -> LoaderResult<()> {
        let mut context = ResolverContext::new();
        self.resolve_with_context(schema, source_path, &mut context)
    }

    fn resolve_with_context(
        &self,
        schema: &mut Schema,
        source_path: &Path,
        context: &mut ResolverContext,
    ) -> LoaderResult<()> {
        if let Some(reference) = schema.reference.clone() {
            if let Some((target, target_path)) = self.load_reference(&reference, source_path)? {
                trace!(reference = %reference, file = %target_path.display(), "resolved reference");

                *schema = target;
                schema.mark_declared();

                // Nested references are relative to the file that holds them
                context.push_path(resolution_key(&target_path, &reference)?)?;
                let result = self.resolve_with_context(schema, &target_path, context);
                context.pop_path();
                return result;
            }
        }

        for (pattern, sub_schema) in schema.pattern_properties.iter_mut() {
            if sub_schema.reference.is_some() {
                trace!(pattern = %pattern, "resolving pattern property reference");
                self.resolve_with_context(sub_schema, source_path, context)?;
            }
        }

        Ok(())
    }

    /// Load the fragment a reference points to, if it names a local file
    fn load_reference(
        &self,
        reference: &str,
        source_path: &Path,
    ) -> LoaderResult<Option<(Schema, PathBuf)>> {
        let (file_part, pointer) = split_reference(reference);

        let Some(target_path) = relative_file(source_path, file_part) else {
            debug!(
                reference = %reference,
                source = %source_path.display(),
                "reference does not name a relative file, leaving it unresolved"
            );
            return Ok(None);
        };

        let content = fs::read_to_string(&target_path)
            .map_err(|e| LoaderError::io_error(target_path.clone(), e))?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| LoaderError::json_parse_error(target_path.clone(), e))?;

        let value = match pointer {
            Some(pointer) => self.apply_json_pointer(&document, pointer, reference, &target_path)?,
            None => document,
        };

        let schema = Schema::from_value(value)
            .map_err(|e| LoaderError::json_parse_error(target_path.clone(), e))?;

        Ok(Some((schema, target_path)))
    }

    /// Apply a JSON pointer to extract a specific part of the document
    fn apply_json_pointer(
        &self,
        document: &Value,
        pointer: &str,
        reference: &str,
        source_path: &Path,
    ) -> LoaderResult<Value> {
        document.pointer(pointer).cloned().ok_or_else(|| {
            LoaderError::reference_error(
                reference.to_string(),
                source_path.to_path_buf(),
                format!("JSON pointer '{}' does not resolve", pointer),
            )
        })
    }
}

/// Identity of a resolved target on the resolution stack
fn resolution_key(target_path: &Path, reference: &str) -> LoaderResult<PathBuf> {
    let canonical = target_path
        .canonicalize()
        .map_err(|e| LoaderError::io_error(target_path.to_path_buf(), e))?;

    Ok(match split_reference(reference).1 {
        Some(pointer) if !pointer.is_empty() => {
            PathBuf::from(format!("{}#{}", canonical.display(), pointer))
        }
        _ => canonical,
    })
}
