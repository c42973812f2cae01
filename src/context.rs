//! Read-only rendering context

use std::collections::BTreeMap;

use thiserror::Error;

use crate::value::Value;

/// Errors raised by context lookups
#[derive(Debug, Error)]
pub enum ContextError {
    /// The context has no entry for the key
    #[error("context has no entry for key `{key}`")]
    NotFound { key: String },

    /// The lookup itself failed (backing store error, bad key, ...)
    #[error("context lookup for key `{key}` failed: {message}")]
    Lookup { key: String, message: String },
}

/// A read-only key/value store consulted during rendering.
///
/// The context is owned by the caller and never mutated by the engine; a
/// single context may safely back multiple concurrent renders.
pub trait Context: Send + Sync {
    /// Whether the context holds a value for `key`, without retrieving it
    fn has(&self, key: &str) -> bool;

    /// Retrieve the value for `key`
    fn get(&self, key: &str) -> Result<Value, ContextError>;
}

/// Map-backed [`Context`] implementation
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    entries: BTreeMap<String, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder-style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add an entry in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Context for MapContext {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Value, ContextError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| ContextError::NotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_and_get() {
        let ctx = MapContext::new().with("greeting", "hi").with("count", 3i64);
        assert!(ctx.has("greeting"));
        assert!(!ctx.has("missing"));
        assert_eq!(ctx.get("greeting").unwrap(), Value::from("hi"));
        assert_eq!(ctx.get("count").unwrap(), Value::Int(3));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let ctx = MapContext::new();
        let err = ctx.get("nope").unwrap_err();
        assert!(matches!(err, ContextError::NotFound { ref key } if key == "nope"));
    }

    #[test]
    fn test_from_iterator() {
        let ctx: MapContext = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert!(ctx.has("a"));
        assert_eq!(ctx.get("b").unwrap(), Value::Int(2));
    }
}
