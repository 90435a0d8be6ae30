use serde_json::{Map, Value};

use crate::compile::response::MAX_SCHEMA_DEPTH;
use crate::error::ResolveError;

/// How many references may be nested inside one another before expansion
/// stops. Covers the response walk's levels plus the root schema and an
/// enclosing response or parameter reference.
pub const MAX_REF_DEPTH: usize = MAX_SCHEMA_DEPTH + 3;

/// Inlines local `$ref` pointers (`#/...`) with their JSON Pointer targets.
///
/// Expansion is bounded by nesting depth rather than by cycle detection: a
/// self-referential schema unrolls [`MAX_REF_DEPTH`] times, and a schema that
/// references the next one several times costs at most that many levels of
/// fan-out. A reference past the bound is left in place; it carries no `type`
/// and reads as an untyped schema downstream.
pub struct RefResolver<'a> {
    root: &'a Value,
    depth: usize,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root, depth: 0 }
    }

    /// Return a copy of the document whose `paths` contain no resolvable `$ref`.
    pub fn resolve_document(&mut self) -> Result<Value, ResolveError> {
        let mut resolved = self.root.clone();
        if let Some(paths) = self.root.get("paths") {
            let paths = self.resolve(paths)?;
            if let Value::Object(ref mut doc) = resolved {
                doc.insert("paths".to_string(), paths);
            }
        }
        Ok(resolved)
    }

    /// Resolve every reference reachable from `node`.
    pub fn resolve(&mut self, node: &Value) -> Result<Value, ResolveError> {
        match node {
            Value::Object(map) => {
                if let Some(Value::String(ref_path)) = map.get("$ref") {
                    return self.expand(ref_path, node);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    out.insert(key.clone(), self.resolve(child)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn expand(&mut self, ref_path: &str, node: &Value) -> Result<Value, ResolveError> {
        if self.depth >= MAX_REF_DEPTH {
            log::trace!("reference {ref_path} left unresolved at depth {}", self.depth);
            return Ok(node.clone());
        }
        let target = self.lookup(ref_path)?;
        self.depth += 1;
        let resolved = self.resolve(target);
        self.depth -= 1;
        resolved
    }

    fn lookup(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        let pointer = ref_path
            .strip_prefix('#')
            .ok_or_else(|| ResolveError::ExternalRef(ref_path.to_string()))?;
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
        }
        self.root
            .pointer(pointer)
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}
