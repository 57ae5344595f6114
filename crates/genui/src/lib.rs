#![forbid(unsafe_code)]

//! genui public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts. It
//! re-exports the common types from the engine crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Overview
//!
//! A generative model emits newline-delimited JSON patch records; a
//! [`Session`] decodes and reconciles them into a growing [`Tree`] under the
//! guardrails of a [`Catalog`]; [`render`] walks a snapshot through a
//! host-supplied [`Registry`], resolving `*Path` data bindings against a
//! [`DataStore`] at render time.
//!
//! ```
//! use genui::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(
//!     Catalog::builder()
//!         .component(
//!             ComponentEntry::new(
//!                 "Card",
//!                 Schema::object([Field::optional("title", Schema::string())]),
//!             )
//!             .accepts_children(),
//!         )
//!         .build(),
//! );
//!
//! let mut session = Session::new(catalog.clone());
//! session.begin().unwrap();
//! session.feed(br#"{"op":"set","path":"/root","value":"card"}
//! {"op":"add","path":"/elements/card","value":{"key":"card","type":"Card","props":{"title":"Hi"}}}
//! "#).unwrap();
//! session.finish().unwrap();
//!
//! let registry: Registry<String> = Registry::new(
//!     |key| format!("<loading {key}>"),
//!     |el| format!("<{}?>", el.type_name),
//! )
//! .with("Card", |scope: RenderScope<'_, String>| {
//!     scope.element.prop("title").and_then(|v| v.as_str()).unwrap_or("").to_string()
//! });
//!
//! let store = DataStore::new(json!({}));
//! let actions = ActionDispatcher::new(catalog, ActionHandlers::new());
//! let pass = render(&session.tree(), &registry, &store, &actions, &VisibilityRules::new());
//! assert_eq!(pass.roots, vec!["Hi".to_string()]);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use genui_core::{
    Diagnostic, Element, ElementKey, FieldAddr, FieldTarget, FieldViolation, PatchRecord, Pointer,
    Tree, WireError,
};

// --- Catalog re-exports ----------------------------------------------------

pub use genui_catalog::schema::{Field, Schema, ValidationMode};
pub use genui_catalog::{ActionEntry, ActionError, Catalog, ComponentEntry, ValidateError};

// --- Stream re-exports -----------------------------------------------------

pub use genui_stream::{DecoderOptions, StreamDecoder};

// --- Tree re-exports -------------------------------------------------------

pub use genui_tree::Reconciler;

// --- Binding re-exports ----------------------------------------------------

pub use genui_bind::{Binding, Bindings, DataStore, is_binding_key};

// --- Render re-exports -----------------------------------------------------

pub use genui_render::{
    ActionDispatcher, ActionHandlers, ElementRenderer, Registry, RenderPass, RenderScope,
    VisibilityRules, render,
};

// --- Runtime re-exports ----------------------------------------------------

pub use genui_runtime::{Session, SessionError, SessionPhase, TreeHandle};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionDispatcher, ActionEntry, ActionHandlers, Catalog, ComponentEntry, DataStore,
        Diagnostic, Element, ElementKey, Field, Pointer, Registry, RenderPass, RenderScope, Schema,
        Session, SessionError, SessionPhase, Tree, TreeHandle, VisibilityRules, render,
    };

    pub use crate::{bind, catalog, core, renderer, runtime, stream, tree};
}

pub use genui_bind as bind;
pub use genui_catalog as catalog;
pub use genui_core as core;
pub use genui_render as renderer;
pub use genui_runtime as runtime;
pub use genui_stream as stream;
pub use genui_tree as tree;
