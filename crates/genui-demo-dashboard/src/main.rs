#![forbid(unsafe_code)]

//! Dashboard demo binary.
//!
//! Replays a canned generation stream through the engine and prints each
//! progressive render, then demonstrates an interrupted stream surfacing as
//! an alert element. Set `RUST_LOG=debug` to watch the engine's tracing.

use genui_demo_dashboard::catalog::dashboard_catalog;
use genui_demo_dashboard::replay::{alert_record, demo_data, demo_stream, run_replay};
use genui_demo_dashboard::text_render::text_registry;
use genui_render::{ActionDispatcher, ActionHandlers, VisibilityRules, render};
use genui_runtime::Session;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run_replay() {
        Ok((frames, diagnostics)) => {
            for (i, frame) in frames.iter().enumerate() {
                println!("── frame {i} (+{} records) ──", frame.applied);
                println!("{}\n", frame.output);
            }
            if !diagnostics.is_empty() {
                println!("diagnostics:");
                for d in &diagnostics {
                    println!("  [{}] {d}", d.code());
                }
            }
        }
        Err(err) => eprintln!("replay failed: {err}"),
    }

    println!("── interrupted stream ──");
    interrupted_demo();
}

/// Feed half the stream, inject the transport-failure alert, and finish:
/// everything reconciled so far stays renderable.
fn interrupted_demo() {
    let catalog = Arc::new(dashboard_catalog());
    let mut session = Session::new(catalog.clone());
    let bytes = demo_stream().into_bytes();

    let outcome = session.begin().and_then(|()| {
        session.feed(&bytes[..bytes.len() / 2])?;
        // Terminate the truncated record before injecting the alert; the
        // partial line degrades to one decode diagnostic.
        session.feed(b"\n")?;
        session.feed(alert_record("Generation interrupted", "transport closed").as_bytes())?;
        session.finish()
    });
    if let Err(err) = outcome {
        eprintln!("interrupted replay failed: {err}");
        return;
    }

    let registry = text_registry();
    let store = demo_data();
    let actions = ActionDispatcher::new(catalog, ActionHandlers::new());
    let pass = render(&session.tree(), &registry, &store, &actions, &VisibilityRules::new());
    println!("{}", pass.roots.join("\n"));
    for d in session.take_diagnostics() {
        println!("  [{}] {d}", d.code());
    }
}
