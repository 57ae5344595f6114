#![forbid(unsafe_code)]

//! Tree reconciliation.
//!
//! The [`Reconciler`] applies decoded patch records to an in-memory element
//! store, strictly in arrival order. Every element passes through the
//! catalog before admission; rejected elements leave the prior definition of
//! their key untouched. Field updates that arrive before their target
//! element are buffered and retried after every subsequent admission, since
//! models commonly emit parent-then-children but the ordering does vary.
//!
//! # Design
//!
//! Forward references are an ordering-tolerance requirement, not a graph
//! problem: the store is an arena keyed by string id plus an explicit
//! pending-update queue, never pointer links. Applying a record can
//! therefore never fail "hard" — every failure class degrades to a
//! [`Diagnostic`] and the session keeps streaming.

use genui_catalog::schema::CODE_TYPE_MISMATCH;
use genui_catalog::{Catalog, ValidateError};
use genui_core::{
    Diagnostic, Element, ElementKey, FieldAddr, FieldTarget, FieldViolation, PatchRecord, Tree,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A field update waiting for its target element to be admitted.
#[derive(Debug, Clone)]
struct PendingUpdate {
    target: FieldTarget,
    value: Value,
}

/// Applies patch records to a monotonically growing tree.
pub struct Reconciler {
    catalog: Arc<Catalog>,
    tree: Tree,
    pending: Vec<PendingUpdate>,
    diagnostics: Vec<Diagnostic>,
}

impl Reconciler {
    /// Create a reconciler validating against `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            tree: Tree::new(),
            pending: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The current tree state.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Number of field updates still waiting for their target.
    #[must_use]
    pub fn pending_updates(&self) -> usize {
        self.pending.len()
    }

    /// Drain the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Apply one record. Returns `true` if the tree changed.
    ///
    /// Records are applied strictly in the order they were decoded; callers
    /// must not reorder or batch in a way that changes observable
    /// intermediate states.
    pub fn apply(&mut self, record: PatchRecord) -> bool {
        match record {
            PatchRecord::SetRoot(key) => {
                if self.tree.roots().contains(&key) {
                    false
                } else {
                    debug!(root = %key, "root recorded");
                    self.tree.push_root(key);
                    true
                }
            }
            PatchRecord::Upsert { key, element } => self.admit(key, element),
            PatchRecord::UpdateField { target, value } => {
                if self.tree.contains(target.key.as_str()) {
                    self.commit_update(target, value)
                } else {
                    debug!(target = %target, "buffering update for unseen element");
                    self.pending.push(PendingUpdate { target, value });
                    false
                }
            }
        }
    }

    /// Flush at end-of-stream: still-pending updates can never resolve and
    /// are dropped with a [`Diagnostic::DanglingReference`] each.
    pub fn finalize(&mut self) {
        for update in std::mem::take(&mut self.pending) {
            self.diagnostics.push(Diagnostic::DanglingReference {
                key: update.target.key.clone(),
                detail: format!("buffered update {} never found its element", update.target),
            });
        }
    }

    fn admit(&mut self, key: ElementKey, element: Element) -> bool {
        match self.catalog.validate_element(
            &element.type_name,
            &element.props,
            !element.children.is_empty(),
        ) {
            Ok(()) => {
                self.tree.upsert(element);
                // The new element may be the target the model referenced
                // ahead of time.
                self.retry_pending();
                true
            }
            Err(err) => {
                debug!(key = %key, error = %err, "element rejected");
                self.diagnostics.push(reject_diagnostic(key, &element, err));
                false
            }
        }
    }

    fn retry_pending(&mut self) {
        let queued = std::mem::take(&mut self.pending);
        for update in queued {
            if self.tree.contains(update.target.key.as_str()) {
                self.commit_update(update.target, update.value);
            } else {
                self.pending.push(update);
            }
        }
    }

    /// Apply a field update to a scratch copy, re-validate, then commit.
    /// A `replace` can never smuggle an invalid prop past the admission
    /// guardrail.
    fn commit_update(&mut self, target: FieldTarget, value: Value) -> bool {
        let Some(current) = self.tree.get(target.key.as_str()) else {
            return false;
        };
        let mut scratch = current.clone();
        if let Err(diagnostic) = apply_field(&mut scratch, &target, value) {
            self.diagnostics.push(diagnostic);
            return false;
        }
        match self.catalog.validate_element(
            &scratch.type_name,
            &scratch.props,
            !scratch.children.is_empty(),
        ) {
            Ok(()) => {
                self.tree.upsert(scratch);
                true
            }
            Err(err) => {
                debug!(target = %target, error = %err, "update rejected, element preserved");
                let key = target.key.clone();
                self.diagnostics.push(reject_diagnostic(key, &scratch, err));
                false
            }
        }
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("elements", &self.tree.len())
            .field("pending", &self.pending.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

fn reject_diagnostic(key: ElementKey, element: &Element, err: ValidateError) -> Diagnostic {
    match err {
        ValidateError::UnknownType { type_name } => Diagnostic::UnknownType { key, type_name },
        ValidateError::Schema { violations } => Diagnostic::SchemaViolation {
            key,
            type_name: element.type_name.clone(),
            violations,
        },
    }
}

fn apply_field(element: &mut Element, target: &FieldTarget, value: Value) -> Result<(), Diagnostic> {
    match &target.field {
        FieldAddr::Prop(name) => {
            element.props.insert(name.clone(), value);
            Ok(())
        }
        FieldAddr::Child(index) => {
            let key = child_key(target, &element.type_name, &value)?;
            if *index < element.children.len() {
                element.children[*index] = key;
                Ok(())
            } else if *index == element.children.len() {
                element.children.push(key);
                Ok(())
            } else {
                Err(Diagnostic::DanglingReference {
                    key: target.key.clone(),
                    detail: format!(
                        "child index {index} out of range (len {})",
                        element.children.len()
                    ),
                })
            }
        }
        FieldAddr::ChildAppend => {
            let key = child_key(target, &element.type_name, &value)?;
            element.children.push(key);
            Ok(())
        }
    }
}

fn child_key(
    target: &FieldTarget,
    type_name: &str,
    value: &Value,
) -> Result<ElementKey, Diagnostic> {
    value
        .as_str()
        .map(ElementKey::from)
        .ok_or_else(|| Diagnostic::SchemaViolation {
            key: target.key.clone(),
            type_name: type_name.to_string(),
            violations: vec![FieldViolation::new(
                "/children",
                CODE_TYPE_MISMATCH,
                "child slots hold string keys, not nested objects",
            )],
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genui_catalog::schema::{Field, Schema};
    use genui_catalog::{ActionEntry, ComponentEntry};
    use serde_json::json;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::builder()
                .component(
                    ComponentEntry::new(
                        "Card",
                        Schema::object([Field::optional("title", Schema::string())]),
                    )
                    .accepts_children(),
                )
                .component(ComponentEntry::new(
                    "Metric",
                    Schema::object([
                        Field::required("label", Schema::string()),
                        Field::required("valuePath", Schema::string()),
                    ]),
                ))
                .action(ActionEntry::new("refresh_data"))
                .build(),
        )
    }

    fn upsert(key: &str, value: serde_json::Value) -> PatchRecord {
        PatchRecord::from_wire(&json!({
            "op": "add", "path": format!("/elements/{key}"), "value": value,
        }))
        .unwrap()
    }

    fn replace(path: &str, value: serde_json::Value) -> PatchRecord {
        PatchRecord::from_wire(&json!({"op": "replace", "path": path, "value": value})).unwrap()
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut r = Reconciler::new(catalog());
        let rec = upsert("a", json!({"key": "a", "type": "Card", "props": {"title": "Hi"}}));
        r.apply(rec.clone());
        let once = r.tree().clone();
        r.apply(rec);
        assert_eq!(r.tree(), &once);
    }

    #[test]
    fn unknown_type_never_admitted() {
        let mut r = Reconciler::new(catalog());
        r.apply(upsert("w", json!({"key": "w", "type": "Widget", "props": {}})));
        assert!(!r.tree().contains("w"));
        let diagnostics = r.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), "unknown_type");
    }

    #[test]
    fn rejected_redefinition_preserves_previous_state() {
        let mut r = Reconciler::new(catalog());
        r.apply(upsert("a", json!({"key": "a", "type": "Card", "props": {"title": "one"}})));
        r.apply(upsert("a", json!({"key": "a", "type": "Card", "props": {"title": 7}})));
        assert_eq!(r.tree().get("a").unwrap().prop("title"), Some(&json!("one")));
        assert_eq!(r.take_diagnostics().len(), 1);
    }

    #[test]
    fn update_before_admission_is_buffered_then_applied() {
        let mut r = Reconciler::new(catalog());
        let a = upsert(
            "m",
            json!({"key": "m", "type": "Metric", "props": {"label": "x", "valuePath": "/v"}}),
        );
        let b = replace("/elements/m/props/label", json!("Total"));

        // [B, A]: B buffers, A admits, B commits on retry.
        r.apply(b.clone());
        assert_eq!(r.pending_updates(), 1);
        assert!(!r.tree().contains("m"));
        r.apply(a.clone());
        assert_eq!(r.pending_updates(), 0);
        let buffered_order = r.tree().clone();

        // [A, B] produces the identical final tree.
        let mut r2 = Reconciler::new(catalog());
        r2.apply(a);
        r2.apply(b);
        assert_eq!(r2.tree(), &buffered_order);
    }

    #[test]
    fn never_resolving_update_drops_at_finalize() {
        let mut r = Reconciler::new(catalog());
        r.apply(replace("/elements/ghost/props/label", json!("x")));
        r.finalize();
        assert_eq!(r.pending_updates(), 0);
        let diagnostics = r.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), "dangling_reference");
    }

    #[test]
    fn invalid_update_leaves_element_untouched() {
        let mut r = Reconciler::new(catalog());
        r.apply(upsert(
            "m",
            json!({"key": "m", "type": "Metric", "props": {"label": "x", "valuePath": "/v"}}),
        ));
        r.apply(replace("/elements/m/props/label", json!(42)));
        assert_eq!(r.tree().get("m").unwrap().prop("label"), Some(&json!("x")));
        assert_eq!(r.take_diagnostics().len(), 1);
    }

    #[test]
    fn children_append_and_slot_updates() {
        let mut r = Reconciler::new(catalog());
        r.apply(upsert(
            "card",
            json!({"key": "card", "type": "Card", "props": {}, "children": ["a"]}),
        ));
        r.apply(replace("/elements/card/children/-", json!("b")));
        r.apply(replace("/elements/card/children/0", json!("a2")));
        let children = &r.tree().get("card").unwrap().children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].as_str(), "a2");
        assert_eq!(children[1].as_str(), "b");
    }

    #[test]
    fn forward_child_references_are_legal() {
        let mut r = Reconciler::new(catalog());
        r.apply(PatchRecord::SetRoot(ElementKey::from("card")));
        r.apply(upsert(
            "card",
            json!({"key": "card", "type": "Card", "props": {}, "children": ["later"]}),
        ));
        assert!(r.tree().contains("card"));
        assert!(!r.tree().contains("later"));
        assert!(r.take_diagnostics().is_empty());
    }
}
