#![forbid(unsafe_code)]

//! Render dispatch.
//!
//! Turns a tree snapshot plus a data store into host-defined output via a
//! capability table: the host registers one rendering capability per catalog
//! type, and the dispatcher walks the tree depth-first, resolving bindings,
//! evaluating visibility, and substituting placeholders for children that
//! have not arrived yet. Dynamic dispatch is by type name through the table,
//! never an inheritance hierarchy.

pub mod actions;
pub mod dispatch;
pub mod registry;
pub mod visibility;

pub use actions::{ActionDispatcher, ActionHandlers};
pub use dispatch::{RenderPass, render};
pub use registry::{ElementRenderer, Registry, RenderScope};
pub use visibility::VisibilityRules;
