#![forbid(unsafe_code)]

//! Plain-text renderer registry.
//!
//! Renders the dashboard catalog to indented text lines — enough to watch a
//! generation materialize in a terminal without pulling in a UI toolkit.
//! Every renderer reads validated props, resolved bindings, and pre-rendered
//! children from its scope; none of them can crash on partial trees.

use genui_render::{Registry, RenderScope};
use serde_json::Value;

/// Indent every line of `block` by two spaces.
fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prop_str<'a>(scope: &'a RenderScope<'_, String>, name: &str) -> &'a str {
    scope.element.prop(name).and_then(Value::as_str).unwrap_or("")
}

fn join_children(scope: &RenderScope<'_, String>) -> String {
    scope.children.join("\n")
}

/// Format a metric value per its `format` prop.
fn format_value(value: &Value, format: &str) -> String {
    match (format, value.as_f64()) {
        ("currency", Some(n)) => format!("${n}"),
        ("percent", Some(n)) => format!("{n}%"),
        _ => value.to_string(),
    }
}

/// Build the registry for the dashboard catalog.
#[must_use]
pub fn text_registry() -> Registry<String> {
    Registry::new(
        |key| format!("⏳ {key}"),
        |element| format!("⚠ no renderer for {}", element.type_name),
    )
    .with("Card", |scope: RenderScope<'_, String>| {
        let title = prop_str(&scope, "title");
        let mut out = format!("┌ {title}");
        let body = join_children(&scope);
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&indent(&body));
        }
        out
    })
    .with("Grid", |scope: RenderScope<'_, String>| {
        let columns = scope
            .element
            .prop("columns")
            .and_then(Value::as_u64)
            .unwrap_or(1);
        format!("grid×{columns}\n{}", indent(&join_children(&scope)))
    })
    .with("Stack", |scope: RenderScope<'_, String>| join_children(&scope))
    .with("Metric", |scope: RenderScope<'_, String>| {
        let label = prop_str(&scope, "label");
        let format = prop_str(&scope, "format");
        let value = match scope.bindings.get("valuePath") {
            Some(v) => format_value(v, format),
            None => "…".to_string(),
        };
        let trend = match prop_str(&scope, "trend") {
            "up" => " ↑",
            "down" => " ↓",
            _ => "",
        };
        format!("{label}: {value}{trend}")
    })
    .with("Chart", |scope: RenderScope<'_, String>| {
        let kind = prop_str(&scope, "type");
        let title = prop_str(&scope, "title");
        let points = scope
            .bindings
            .get("dataPath")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        format!("[{kind} chart: {points} points] {title}")
    })
    .with("Table", |scope: RenderScope<'_, String>| {
        let header: Vec<&str> = scope
            .element
            .prop("columns")
            .and_then(Value::as_array)
            .map(|cols| {
                cols.iter()
                    .filter_map(|c| c.get("label").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        let rows = scope
            .bindings
            .get("dataPath")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        format!("| {} | ({rows} rows)", header.join(" | "))
    })
    .with("List", |scope: RenderScope<'_, String>| {
        let items = scope
            .bindings
            .get("dataPath")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if items == 0 {
            let empty = prop_str(&scope, "emptyMessage");
            if !empty.is_empty() {
                return format!("({empty})");
            }
        }
        join_children(&scope)
    })
    .with("Button", |scope: RenderScope<'_, String>| {
        format!("[{}]", prop_str(&scope, "label"))
    })
    .with("Select", |scope: RenderScope<'_, String>| {
        let label = prop_str(&scope, "label");
        let current = scope
            .bindings
            .get("bindPath")
            .and_then(Value::as_str)
            .unwrap_or("—");
        format!("{label} ⌄ {current}")
    })
    .with("DatePicker", |scope: RenderScope<'_, String>| {
        let label = prop_str(&scope, "label");
        let current = scope
            .bindings
            .get("bindPath")
            .and_then(Value::as_str)
            .unwrap_or("—");
        format!("{label} 📅 {current}")
    })
    .with("Heading", |scope: RenderScope<'_, String>| {
        format!("# {}", prop_str(&scope, "text"))
    })
    .with("Text", |scope: RenderScope<'_, String>| {
        prop_str(&scope, "content").to_string()
    })
    .with("Badge", |scope: RenderScope<'_, String>| {
        format!("({})", prop_str(&scope, "text"))
    })
    .with("Alert", |scope: RenderScope<'_, String>| {
        format!(
            "!{}: {} {}",
            prop_str(&scope, "type"),
            prop_str(&scope, "title"),
            prop_str(&scope, "message"),
        )
    })
    .with("Divider", |scope: RenderScope<'_, String>| {
        let label = prop_str(&scope, "label");
        if label.is_empty() {
            "────────".to_string()
        } else {
            format!("── {label} ──")
        }
    })
    .with("Empty", |scope: RenderScope<'_, String>| {
        format!("∅ {}", prop_str(&scope, "title"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::dashboard_catalog;
    use genui_bind::DataStore;
    use genui_core::{Element, ElementKey, Tree};
    use genui_render::{ActionDispatcher, ActionHandlers, VisibilityRules, render};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn registry_covers_every_catalog_type() {
        let catalog = dashboard_catalog();
        let registry = text_registry();
        for type_name in catalog.type_names() {
            assert!(registry.contains(type_name), "no renderer for {type_name}");
        }
    }

    #[test]
    fn metric_formats_currency_from_binding() {
        let mut tree = Tree::new();
        tree.push_root(ElementKey::from("m"));
        tree.upsert(
            Element::new("m", "Metric")
                .with_prop("label", "Revenue")
                .with_prop("valuePath", "/analytics/revenue")
                .with_prop("format", "currency")
                .with_prop("trend", "up"),
        );
        let store = DataStore::new(json!({"analytics": {"revenue": 125000}}));
        let actions =
            ActionDispatcher::new(Arc::new(dashboard_catalog()), ActionHandlers::new());
        let pass = render(&tree, &text_registry(), &store, &actions, &VisibilityRules::new());
        assert_eq!(pass.roots, vec!["Revenue: $125000 ↑"]);
    }
}
