#![forbid(unsafe_code)]

//! The external data document.
//!
//! A [`DataStore`] wraps one JSON document with pointer-addressed `get` and
//! `set`. The host owns the store and may mutate it between render passes;
//! the engine only reads it at render time. `set` writes structurally,
//! creating intermediate objects along the way, so action handlers can bind
//! values at paths that do not exist yet.

use genui_core::Pointer;
use serde_json::{Map, Value};

/// Mutable JSON document with pointer access.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStore {
    doc: Value,
}

impl Default for DataStore {
    fn default() -> Self {
        Self {
            doc: Value::Object(Map::new()),
        }
    }
}

impl DataStore {
    /// Wrap an existing document.
    #[must_use]
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// The whole document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.doc
    }

    /// Resolve a pointer against the current document.
    #[must_use]
    pub fn get(&self, pointer: &Pointer) -> Option<&Value> {
        pointer.resolve(&self.doc)
    }

    /// Resolve a pointer given in string form.
    #[must_use]
    pub fn get_path(&self, pointer: &str) -> Option<&Value> {
        Pointer::parse(pointer).resolve(&self.doc)
    }

    /// Write `value` at `pointer`, creating intermediate objects as needed.
    ///
    /// Arrays accept in-range indices, the one-past-the-end index, and the
    /// `-` append segment; any other segment on an array (or any segment on
    /// a scalar) replaces that slot with a fresh object before descending.
    pub fn set(&mut self, pointer: &Pointer, value: Value) {
        assign(&mut self.doc, pointer.segments(), value);
    }

    /// Write at a pointer given in string form.
    pub fn set_path(&mut self, pointer: &str, value: Value) {
        self.set(&Pointer::parse(pointer), value);
    }
}

fn assign(slot: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    match slot {
        Value::Object(map) => {
            assign(map.entry(head.clone()).or_insert(Value::Null), rest, value);
        }
        Value::Array(items) => {
            let index = if head == "-" {
                Some(items.len())
            } else {
                head.parse::<usize>().ok().filter(|&i| i <= items.len())
            };
            match index {
                Some(i) => {
                    if i == items.len() {
                        items.push(Value::Null);
                    }
                    assign(&mut items[i], rest, value);
                }
                None => {
                    *slot = Value::Object(Map::new());
                    assign(slot, segments, value);
                }
            }
        }
        _ => {
            *slot = Value::Object(Map::new());
            assign(slot, segments, value);
        }
    }
}
