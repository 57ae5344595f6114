#![forbid(unsafe_code)]

//! Scripted generation replay.
//!
//! Replays a canned revenue-dashboard generation through a real session in
//! uneven chunks, rendering after every feed, so the progressive-reveal
//! behavior is visible without a live model: parents appear first with
//! loading placeholders, then fill in as their children arrive.

use crate::catalog::dashboard_catalog;
use crate::text_render::text_registry;
use genui_bind::DataStore;
use genui_core::Diagnostic;
use genui_render::{ActionDispatcher, ActionHandlers, VisibilityRules, render};
use genui_runtime::{Session, SessionError};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Chunk lengths cycled during replay; uneven on purpose so records split
/// mid-line and mid-UTF-8.
const CHUNK_LENGTHS: [usize; 5] = [7, 19, 3, 41, 11];

/// The canned generation stream, in wire format.
#[must_use]
pub fn demo_stream() -> String {
    [
        json!({"op":"set","path":"/root","value":"main-card"}),
        json!({"op":"add","path":"/elements/main-card","value":{
            "key":"main-card","type":"Card",
            "props":{"title":"Revenue Dashboard","padding":"md"},
            "children":["metrics-grid","sales-chart","orders-table","refresh-btn"]}}),
        json!({"op":"add","path":"/elements/metrics-grid","value":{
            "key":"metrics-grid","type":"Grid","props":{"columns":2,"gap":"md"},
            "children":["revenue-metric","growth-metric"]}}),
        json!({"op":"add","path":"/elements/revenue-metric","value":{
            "key":"revenue-metric","type":"Metric",
            "props":{"label":"Total Revenue","valuePath":"/analytics/revenue",
                      "format":"currency","trend":"up","trendValue":"+15%"}}}),
        json!({"op":"add","path":"/elements/growth-metric","value":{
            "key":"growth-metric","type":"Metric",
            "props":{"label":"Growth Rate","valuePath":"/analytics/growth","format":"percent"}}}),
        json!({"op":"add","path":"/elements/sales-chart","value":{
            "key":"sales-chart","type":"Chart",
            "props":{"type":"bar","dataPath":"/analytics/salesByRegion","title":"Sales by Region"}}}),
        json!({"op":"add","path":"/elements/orders-table","value":{
            "key":"orders-table","type":"Table",
            "props":{"dataPath":"/analytics/recentOrders","columns":[
                {"key":"id","label":"Order"},
                {"key":"region","label":"Region"},
                {"key":"amount","label":"Amount","format":"currency"}]}}}),
        json!({"op":"replace","path":"/elements/main-card/props/description",
               "value":"Updated live while streaming"}),
        json!({"op":"add","path":"/elements/refresh-btn","value":{
            "key":"refresh-btn","type":"Button",
            "props":{"label":"Refresh","action":"refresh_data","variant":"primary"}}}),
    ]
    .iter()
    .map(|record| format!("{record}\n"))
    .collect()
}

/// Host data the stream binds against.
#[must_use]
pub fn demo_data() -> DataStore {
    DataStore::new(json!({
        "analytics": {
            "revenue": 125000,
            "growth": 15,
            "salesByRegion": [
                {"region": "EMEA", "sales": 52000},
                {"region": "APAC", "sales": 38000},
                {"region": "AMER", "sales": 35000},
            ],
            "recentOrders": [
                {"id": "A-1041", "region": "EMEA", "amount": 1290},
                {"id": "A-1042", "region": "AMER", "amount": 880},
            ],
        },
    }))
}

/// Wire records surfacing a transport interruption as a renderable alert,
/// the way a backend would inject one into the stream on failure. The alert
/// becomes an additional root so it renders even when the generation never
/// linked it.
#[must_use]
pub fn alert_record(title: &str, message: &str) -> String {
    format!(
        "{}\n{}\n",
        json!({"op":"add","path":"/elements/stream-alert","value":{
            "key":"stream-alert","type":"Alert",
            "props":{"type":"error","title":title,"message":message}}}),
        json!({"op":"set","path":"/root","value":"stream-alert"}),
    )
}

/// One progressive render captured mid-stream.
#[derive(Debug)]
pub struct ReplayFrame {
    /// Records applied by the feed that produced this frame.
    pub applied: usize,
    /// Rendered output at that point.
    pub output: String,
}

/// Feed the canned stream in uneven chunks, rendering after every chunk
/// that changed the tree. Returns the frames and the session diagnostics.
pub fn run_replay() -> Result<(Vec<ReplayFrame>, Vec<Diagnostic>), SessionError> {
    let catalog = Arc::new(dashboard_catalog());
    let mut session = Session::new(catalog.clone());
    let registry = text_registry();
    let store = demo_data();
    let actions = ActionDispatcher::new(catalog, ActionHandlers::new());
    let rules = VisibilityRules::new();

    session.begin()?;
    let bytes = demo_stream().into_bytes();
    let mut frames = Vec::new();
    let mut offset = 0;
    let mut cycle = CHUNK_LENGTHS.iter().cycle();
    while offset < bytes.len() {
        let len = (*cycle.next().unwrap_or(&1)).min(bytes.len() - offset);
        let applied = session.feed(&bytes[offset..offset + len])?;
        offset += len;
        if applied > 0 {
            let pass = render(&session.tree(), &registry, &store, &actions, &rules);
            frames.push(ReplayFrame {
                applied,
                output: pass.roots.join("\n"),
            });
        }
    }
    session.finish()?;
    let pass = render(&session.tree(), &registry, &store, &actions, &rules);
    frames.push(ReplayFrame {
        applied: 0,
        output: pass.roots.join("\n"),
    });
    info!(frames = frames.len(), "replay complete");
    Ok((frames, session.take_diagnostics()))
}
