//! Snapshot publication under concurrent reads.
//!
//! A renderer thread loads snapshots through a `TreeHandle` while the
//! session thread keeps feeding. Every loaded snapshot must be internally
//! consistent (no tearing) and the element count must never move backwards
//! within one generation.

use genui_catalog::schema::{Field, Schema};
use genui_catalog::{Catalog, ComponentEntry};
use genui_runtime::Session;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

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

const ELEMENTS: usize = 40;

fn stream() -> Vec<u8> {
    let mut lines = vec![json!({"op": "set", "path": "/root", "value": "card"}).to_string()];
    let children: Vec<String> = (0..ELEMENTS).map(|i| format!("m{i}")).collect();
    lines.push(
        json!({"op": "add", "path": "/elements/card",
               "value": {"key": "card", "type": "Card", "props": {}, "children": children}})
        .to_string(),
    );
    for i in 0..ELEMENTS {
        lines.push(
            json!({"op": "add", "path": format!("/elements/m{i}"),
                   "value": {"key": format!("m{i}"), "type": "Metric",
                              "props": {"label": format!("metric {i}"), "valuePath": "/v"}}})
            .to_string(),
        );
    }
    (lines.join("\n") + "\n").into_bytes()
}

#[test]
fn reader_never_observes_torn_or_shrinking_snapshots() {
    let mut session = Session::new(catalog());
    let handle = session.handle();
    let done = Arc::new(AtomicBool::new(false));

    let reader_done = done.clone();
    let reader = thread::spawn(move || {
        let mut last_len = 0;
        let mut observed = 0;
        while !reader_done.load(Ordering::Acquire) {
            let tree = handle.load();
            assert!(tree.len() >= last_len, "element count moved backwards");
            last_len = tree.len();
            // Consistency: every admitted element is a Metric or the card,
            // and the card's child list only ever names m* keys.
            if let Some(card) = tree.get("card") {
                assert_eq!(card.children.len(), ELEMENTS);
            }
            for element in tree.elements() {
                assert!(element.type_name == "Card" || element.type_name == "Metric");
            }
            observed += 1;
            thread::yield_now();
        }
        (last_len, observed)
    });

    session.begin().unwrap();
    for chunk in stream().chunks(13) {
        session.feed(chunk).unwrap();
    }
    session.finish().unwrap();
    done.store(true, Ordering::Release);

    let (last_len, _) = reader.join().unwrap();
    assert!(last_len <= session.tree().len());
    assert_eq!(session.tree().len(), ELEMENTS + 1);
    assert!(session.take_diagnostics().is_empty());
}
