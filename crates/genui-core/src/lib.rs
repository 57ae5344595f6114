#![forbid(unsafe_code)]

//! Core data model for the genui streaming UI-tree engine.
//!
//! Defines the types every other crate speaks: element keys and elements,
//! the monotonically growing tree, patch records and their wire parsing,
//! slash-delimited pointers, and the soft-failure diagnostic taxonomy.

pub mod diagnostics;
pub mod element;
pub mod patch;
pub mod pointer;
pub mod tree;

pub use diagnostics::{Diagnostic, FieldViolation};
pub use element::{ChildKeys, Element, ElementKey};
pub use patch::{FieldAddr, FieldTarget, PatchRecord, WireError};
pub use pointer::Pointer;
pub use tree::Tree;
