//! End-to-end streaming scenarios.
//!
//! Each test drives the full pipeline: bytes → decoder → reconciler →
//! snapshot → render dispatch, with bindings resolved against a live data
//! store.

use genui::prelude::*;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn dashboard_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::builder()
            .component(
                ComponentEntry::new(
                    "Card",
                    Schema::object([
                        Field::optional("title", Schema::string()),
                        Field::optional("padding", Schema::one_of(["sm", "md", "lg"])),
                    ]),
                )
                .accepts_children()
                .describe("A card container with optional title"),
            )
            .component(
                ComponentEntry::new(
                    "Metric",
                    Schema::object([
                        Field::required("label", Schema::string()),
                        Field::required("valuePath", Schema::string()),
                        Field::optional("format", Schema::one_of(["number", "currency", "percent"])),
                    ]),
                )
                .describe("Display a single metric"),
            )
            .action(ActionEntry::new("refresh_data").describe("Refresh all metrics"))
            .build(),
    )
}

fn text_registry() -> Registry<String> {
    Registry::new(
        |key| format!("<loading:{key}>"),
        |el| format!("<gap:{}>", el.type_name),
    )
    .with("Card", |scope: RenderScope<'_, String>| {
        let title = scope
            .element
            .prop("title")
            .and_then(Value::as_str)
            .unwrap_or("");
        format!("Card[{title}]({})", scope.children.join(","))
    })
    .with("Metric", |scope: RenderScope<'_, String>| {
        match scope.bindings.get("valuePath") {
            Some(value) => format!("Metric={value}"),
            None => "Metric=…".to_string(),
        }
    })
}

fn no_actions(catalog: &Arc<Catalog>) -> ActionDispatcher {
    ActionDispatcher::new(catalog.clone(), ActionHandlers::new())
}

const MAIN_CARD_STREAM: &[u8] = b"\
{\"op\":\"set\",\"path\":\"/root\",\"value\":\"main-card\"}\n\
{\"op\":\"add\",\"path\":\"/elements/main-card\",\"value\":{\"key\":\"main-card\",\"type\":\"Card\",\"props\":{\"title\":\"Revenue Dashboard\"},\"children\":[\"metric-1\"]}}\n\
{\"op\":\"add\",\"path\":\"/elements/metric-1\",\"value\":{\"key\":\"metric-1\",\"type\":\"Metric\",\"props\":{\"label\":\"Total Revenue\",\"valuePath\":\"/analytics/revenue\"}}}\n";

#[test]
fn three_record_scenario_renders_the_resolved_metric() {
    let catalog = dashboard_catalog();
    let mut session = Session::new(catalog.clone());
    session.begin().unwrap();
    session.feed(MAIN_CARD_STREAM).unwrap();
    session.finish().unwrap();

    let tree = session.tree();
    assert_eq!(tree.roots(), &[ElementKey::from("main-card")]);
    assert_eq!(tree.len(), 2);

    let store = DataStore::new(json!({"analytics": {"revenue": 125000}}));
    let pass = render(
        &tree,
        &text_registry(),
        &store,
        &no_actions(&catalog),
        &VisibilityRules::new(),
    );
    assert_eq!(pass.roots, vec!["Card[Revenue Dashboard](Metric=125000)"]);
    assert!(pass.diagnostics.is_empty());
    assert!(session.take_diagnostics().is_empty());
}

#[test]
fn rejected_type_leaves_placeholder_and_diagnostic() {
    let catalog = dashboard_catalog();
    let mut session = Session::new(catalog.clone());
    session.begin().unwrap();
    session
        .feed(b"{\"op\":\"set\",\"path\":\"/root\",\"value\":\"main-card\"}\n")
        .unwrap();
    session
        .feed(b"{\"op\":\"add\",\"path\":\"/elements/main-card\",\"value\":{\"key\":\"main-card\",\"type\":\"Card\",\"props\":{},\"children\":[\"metric-1\"]}}\n")
        .unwrap();
    session
        .feed(b"{\"op\":\"add\",\"path\":\"/elements/metric-1\",\"value\":{\"key\":\"metric-1\",\"type\":\"Widget\",\"props\":{}}}\n")
        .unwrap();
    session.finish().unwrap();

    let tree = session.tree();
    // The parent still lists the child; the child was never admitted.
    assert_eq!(
        tree.get("main-card").unwrap().children[0],
        ElementKey::from("metric-1")
    );
    assert!(!tree.contains("metric-1"));

    let store = DataStore::default();
    let pass = render(
        &tree,
        &text_registry(),
        &store,
        &no_actions(&catalog),
        &VisibilityRules::new(),
    );
    assert_eq!(pass.roots, vec!["Card[](<loading:metric-1>)"]);

    let diagnostics = session.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), "unknown_type");
}

#[test]
fn binding_freshness_tracks_store_mutation_without_new_records() {
    let catalog = dashboard_catalog();
    let mut session = Session::new(catalog.clone());
    session.begin().unwrap();
    session.feed(MAIN_CARD_STREAM).unwrap();
    session.finish().unwrap();
    let tree = session.tree();

    let mut store = DataStore::new(json!({"analytics": {"revenue": 125000}}));
    let registry = text_registry();
    let actions = no_actions(&catalog);
    let rules = VisibilityRules::new();

    let before = render(&tree, &registry, &store, &actions, &rules);
    store.set_path("/analytics/revenue", json!(130000));
    let after = render(&tree, &registry, &store, &actions, &rules);

    assert_eq!(before.roots, vec!["Card[Revenue Dashboard](Metric=125000)"]);
    assert_eq!(after.roots, vec!["Card[Revenue Dashboard](Metric=130000)"]);
}

#[test]
fn action_handler_drives_two_way_binding() {
    let catalog = dashboard_catalog();
    let mut session = Session::new(catalog.clone());
    session.begin().unwrap();
    session.feed(MAIN_CARD_STREAM).unwrap();
    session.finish().unwrap();
    let tree = session.tree();

    let store = Rc::new(RefCell::new(DataStore::new(
        json!({"analytics": {"revenue": 1}}),
    )));
    let writer = store.clone();
    let actions = ActionDispatcher::new(
        catalog,
        ActionHandlers::new().on("refresh_data", move |_| {
            writer.borrow_mut().set_path("/analytics/revenue", json!(2));
        }),
    );
    let registry = text_registry();
    let rules = VisibilityRules::new();

    let before = render(&tree, &registry, &store.borrow(), &actions, &rules);
    assert_eq!(before.roots, vec!["Card[Revenue Dashboard](Metric=1)"]);

    assert!(actions.dispatch("refresh_data", Value::Null));

    let after = render(&tree, &registry, &store.borrow(), &actions, &rules);
    assert_eq!(after.roots, vec!["Card[Revenue Dashboard](Metric=2)"]);
}

#[test]
fn update_before_element_converges_with_either_order() {
    let catalog = dashboard_catalog();
    let add = b"{\"op\":\"add\",\"path\":\"/elements/m\",\"value\":{\"key\":\"m\",\"type\":\"Metric\",\"props\":{\"label\":\"x\",\"valuePath\":\"/v\"}}}\n";
    let update = b"{\"op\":\"replace\",\"path\":\"/elements/m/props/label\",\"value\":\"Total\"}\n";

    let mut forward = Session::new(catalog.clone());
    forward.begin().unwrap();
    forward.feed(add).unwrap();
    forward.feed(update).unwrap();
    forward.finish().unwrap();

    let mut reversed = Session::new(catalog);
    reversed.begin().unwrap();
    reversed.feed(update).unwrap();
    // Not applied yet: the target element has not arrived.
    assert!(reversed.tree().is_empty());
    reversed.feed(add).unwrap();
    reversed.finish().unwrap();

    assert_eq!(forward.tree().as_ref(), reversed.tree().as_ref());
    assert_eq!(
        reversed.tree().get("m").unwrap().prop("label"),
        Some(&json!("Total"))
    );
}
