//! Ordering tolerance.
//!
//! A generation stream may interleave roots, elements, and field updates in
//! any order; buffering makes the final tree a function of the record *set*
//! whenever the records touch independent fields. Every permutation of such
//! a set must converge on the same tree after finalization.

use genui_catalog::schema::{Field, Schema};
use genui_catalog::{Catalog, ComponentEntry};
use genui_core::PatchRecord;
use genui_tree::Reconciler;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

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
            .build(),
    )
}

fn records() -> Vec<PatchRecord> {
    [
        json!({"op": "set", "path": "/root", "value": "card"}),
        json!({"op": "add", "path": "/elements/card",
               "value": {"key": "card", "type": "Card", "props": {}, "children": ["m"]}}),
        json!({"op": "add", "path": "/elements/m",
               "value": {"key": "m", "type": "Metric",
                          "props": {"label": "x", "valuePath": "/v"}}}),
        json!({"op": "replace", "path": "/elements/m/props/label", "value": "Total"}),
        json!({"op": "replace", "path": "/elements/card/props/title", "value": "Revenue"}),
        json!({"op": "replace", "path": "/elements/card/children/-", "value": "extra"}),
    ]
    .iter()
    .map(|v| PatchRecord::from_wire(v).unwrap())
    .collect()
}

proptest! {
    #[test]
    fn permutations_converge_on_the_same_tree(
        shuffled in Just(records()).prop_shuffle(),
    ) {
        let mut reference = Reconciler::new(catalog());
        for record in records() {
            reference.apply(record);
        }
        reference.finalize();

        let mut permuted = Reconciler::new(catalog());
        for record in shuffled {
            permuted.apply(record);
        }
        permuted.finalize();

        prop_assert_eq!(permuted.tree(), reference.tree());
    }
}
