#![forbid(unsafe_code)]

//! Lazy data binding.
//!
//! Elements never carry data; they carry pointers. A prop whose key ends in
//! `Path` (`valuePath`, `dataPath`, `bindPath`) holds a slash-delimited
//! pointer into an external data document, and the pointer is resolved fresh
//! on every render pass against the *current* document. Nothing is baked in
//! at patch-apply time, which is what makes two-way binding work: mutate the
//! store, re-render, and the UI reflects it with no new patch record.
//!
//! Resolution failure is "not yet available", never an error — the render
//! layer shows a loading affordance for unresolved bindings.

pub mod store;

pub use store::DataStore;

use genui_core::{Element, Pointer};
use serde_json::Value;
use std::collections::BTreeMap;

/// `true` if a prop key follows the binding-reference naming convention.
#[must_use]
pub fn is_binding_key(key: &str) -> bool {
    key.ends_with("Path")
}

/// Resolution state of one binding reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The pointer resolved; the value is a snapshot taken this pass.
    Resolved(Value),
    /// The pointer did not resolve against the current document.
    Pending {
        /// The pointer that missed, for loading affordances and logs.
        pointer: Pointer,
    },
}

impl Binding {
    /// The resolved value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Pending { .. } => None,
        }
    }

    /// `true` if the pointer has not resolved yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// The binding references of one element, resolved for one render pass.
///
/// Keyed by the original prop name (`"valuePath"`), so renderers read
/// `bindings.get("valuePath")` next to `element.prop("label")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: BTreeMap<String, Binding>,
}

impl Bindings {
    /// Resolve every binding-reference prop of `element` against `store`.
    ///
    /// Props with a `*Path` key whose value is not a string are ignored
    /// here; the catalog schema is the place that rejects them.
    #[must_use]
    pub fn resolve(element: &Element, store: &DataStore) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in &element.props {
            if !is_binding_key(key) {
                continue;
            }
            let Some(raw) = value.as_str() else { continue };
            let pointer = Pointer::parse(raw);
            let binding = match store.get(&pointer) {
                Some(v) => Binding::Resolved(v.clone()),
                None => Binding::Pending { pointer },
            };
            entries.insert(key.clone(), binding);
        }
        Self { entries }
    }

    /// The resolved value for a binding prop, `None` while pending or when
    /// the element carries no such prop.
    #[must_use]
    pub fn get(&self, prop_key: &str) -> Option<&Value> {
        self.entries.get(prop_key).and_then(Binding::value)
    }

    /// The binding state for a prop, if the element declared one.
    #[must_use]
    pub fn binding(&self, prop_key: &str) -> Option<&Binding> {
        self.entries.get(prop_key)
    }

    /// `true` if any binding reference on this element is still pending.
    #[must_use]
    pub fn any_pending(&self) -> bool {
        self.entries.values().any(Binding::is_pending)
    }

    /// Iterate over `(prop key, binding)` pairs in prop-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Number of binding references on the element.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the element declared no binding references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
