#![forbid(unsafe_code)]

//! Per-element visibility rules.
//!
//! A rule is a predicate over the data store, registered against an element
//! key — the only stable identity a generated tree offers. An element whose
//! predicate returns `false` is skipped along with its entire subtree; an
//! element with no rule is visible.

use genui_bind::DataStore;
use std::collections::HashMap;
use std::fmt;

/// Predicate over the current data store.
pub type VisibilityPredicate = Box<dyn Fn(&DataStore) -> bool>;

/// Table of per-key visibility predicates.
#[derive(Default)]
pub struct VisibilityRules {
    rules: HashMap<String, VisibilityPredicate>,
}

impl VisibilityRules {
    /// No rules: everything is visible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the element at `key` only while the predicate holds.
    #[must_use]
    pub fn show_if(
        mut self,
        key: impl Into<String>,
        predicate: impl Fn(&DataStore) -> bool + 'static,
    ) -> Self {
        self.rules.insert(key.into(), Box::new(predicate));
        self
    }

    /// Evaluate the rule for `key` against the current store.
    #[must_use]
    pub fn visible(&self, key: &str, store: &DataStore) -> bool {
        self.rules.get(key).is_none_or(|rule| rule(store))
    }
}

impl fmt::Debug for VisibilityRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("VisibilityRules").field("keys", &keys).finish()
    }
}
