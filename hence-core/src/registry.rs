//! The derived property registry.
//!
//! A [`PropertyRegistry`] is the ordered, duplicate-free sequence of a
//! component's declared property names, computed exactly once at composition
//! time from the merged property set and immutable thereafter. The
//! initialization behaviour captures it by value, and instances expose it
//! read-only for introspection and debugging.

use serde_json::Value;
use std::sync::Arc;

/// An immutable, ordered sequence of declared property names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRegistry {
    names: Arc<[String]>,
}

impl PropertyRegistry {
    /// Derive a registry from an ordered sequence of property names,
    /// preserving first-occurrence order and dropping duplicates.
    pub fn derive<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !seen.iter().any(|n: &String| n == name) {
                seen.push(name.to_owned());
            }
        }
        Self { names: seen.into() }
    }

    /// An empty registry.
    pub fn empty() -> Self {
        let names: Vec<String> = Vec::new();
        Self {
            names: names.into(),
        }
    }

    /// The registered names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a registered property.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate the registered names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The registry as a loose array value, for the read-only `_propList`
    /// metadata property.
    pub fn as_value(&self) -> Value {
        Value::Array(self.names.iter().map(|n| Value::String(n.clone())).collect())
    }
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
