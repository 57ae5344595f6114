#![forbid(unsafe_code)]

//! The generated UI tree.
//!
//! A [`Tree`] is an arena of elements keyed by string id plus an ordered
//! list of root keys. Within one generation session the tree only grows:
//! keys are inserted or overwritten with a newer definition of the same
//! logical element, never deleted. Referential completeness is not required
//! while a stream is in flight — a parent's child list may name keys that
//! have no entry yet.

use crate::element::{Element, ElementKey};
use std::collections::HashMap;

/// Key-indexed element store with ordered roots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    roots: Vec<ElementKey>,
    elements: HashMap<ElementKey, Element>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root keys, in arrival order.
    #[must_use]
    pub fn roots(&self) -> &[ElementKey] {
        &self.roots
    }

    /// Look up an element by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.get(key)
    }

    /// `true` if an element has been admitted under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    /// Number of admitted elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` if no element has been admitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all admitted elements in arbitrary order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Record `key` as a root. Idempotent per key; order of first arrival is
    /// preserved. The element need not exist yet.
    pub fn push_root(&mut self, key: ElementKey) {
        if !self.roots.contains(&key) {
            self.roots.push(key);
        }
    }

    /// Insert or overwrite the element under its own key.
    ///
    /// This is the reconciler's seam; callers are expected to have validated
    /// the element against the catalog first.
    pub fn upsert(&mut self, element: Element) {
        self.elements.insert(element.key.clone(), element);
    }

    /// Mutable access to an admitted element, for field updates.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.elements.get_mut(key)
    }
}
