#![forbid(unsafe_code)]

//! Element keys and elements.
//!
//! An [`Element`] is one node of a generated UI tree: a type name drawn from
//! a catalog, a bag of JSON props, and an ordered list of child keys. Child
//! keys are references, not owned subtrees, so a parent may legally name
//! children that have not arrived on the stream yet.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;

/// Key identifying one element within a generation session.
///
/// Keys are opaque strings chosen by the generator (`"main-card"`,
/// `"metric-1"`). Uniqueness is per session; re-sending a key overwrites the
/// prior definition of the same logical element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(String);

impl ElementKey {
    /// Create a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ElementKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for ElementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered child references. Most generated elements have a handful of
/// children, so the list is inline up to four keys.
pub type ChildKeys = SmallVec<[ElementKey; 4]>;

/// One node of the generated UI tree.
///
/// The wire shape is `{"key": ..., "type": ..., "props": {...},
/// "children": [...]}` with `props` and `children` optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Session-unique key.
    pub key: ElementKey,
    /// Catalog type name (`"Card"`, `"Metric"`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Props, validated against the catalog schema on admission.
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
    /// Ordered child keys. May reference elements that have not arrived yet.
    #[serde(default)]
    pub children: ChildKeys,
}

impl Element {
    /// Create an element with no props and no children.
    #[must_use]
    pub fn new(key: impl Into<ElementKey>, type_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_name: type_name.into(),
            props: serde_json::Map::new(),
            children: ChildKeys::new(),
        }
    }

    /// Set a prop value.
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Append a child key.
    #[must_use]
    pub fn with_child(mut self, key: impl Into<ElementKey>) -> Self {
        self.children.push(key.into());
        self
    }

    /// Look up a prop by name.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&serde_json::Value> {
        self.props.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_deserializes_with_defaults() {
        let el: Element =
            serde_json::from_value(serde_json::json!({"key": "a", "type": "Card"})).unwrap();
        assert_eq!(el.key.as_str(), "a");
        assert_eq!(el.type_name, "Card");
        assert!(el.props.is_empty());
        assert!(el.children.is_empty());
    }

    #[test]
    fn element_deserializes_children_as_keys() {
        let el: Element = serde_json::from_value(serde_json::json!({
            "key": "card",
            "type": "Card",
            "props": {"title": "Hi"},
            "children": ["a", "b"],
        }))
        .unwrap();
        assert_eq!(el.children.len(), 2);
        assert_eq!(el.children[0], ElementKey::from("a"));
        assert_eq!(el.prop("title"), Some(&serde_json::json!("Hi")));
    }

    #[test]
    fn key_borrows_as_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(ElementKey::from("k"), 1);
        assert_eq!(map.get("k"), Some(&1));
    }
}
