#![forbid(unsafe_code)]

//! Patch records and wire parsing.
//!
//! The wire protocol is a stream of newline-delimited JSON records, each a
//! single operation against the tree:
//!
//! ```text
//! {"op":"set","path":"/root","value":"<key>"}
//! {"op":"add","path":"/elements/<key>","value":{"key":...,"type":...,"props":{...},"children":[...]}}
//! {"op":"replace","path":"/elements/<key>/props/<prop>","value":<any>}
//! {"op":"replace","path":"/elements/<key>/children/<index|->","value":"<key>"}
//! ```
//!
//! Addressing is flat and key-indexed: every element lives under
//! `/elements/<key>` and parents reference children by key. Pointer-into-tree
//! paths (`/root/children/0/...`) are not part of the protocol and parse as
//! [`WireError::UnsupportedPath`].

use crate::element::{Element, ElementKey};
use crate::pointer::Pointer;
use serde_json::Value;
use std::fmt;

/// One decoded operation against the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchRecord {
    /// Record `key` as (one of) the tree's root(s). The element need not
    /// exist yet.
    SetRoot(ElementKey),
    /// Insert or overwrite the element at `key`, pending catalog validation.
    Upsert {
        /// Authoritative key, taken from the record path.
        key: ElementKey,
        /// The raw, not-yet-validated element.
        element: Element,
    },
    /// Mutate one prop or one child slot of an already-admitted element.
    UpdateField {
        /// Addressed element and field.
        target: FieldTarget,
        /// Replacement value.
        value: Value,
    },
}

/// Address of a single mutable field within an admitted element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTarget {
    /// Key of the element being updated.
    pub key: ElementKey,
    /// Which field of that element.
    pub field: FieldAddr,
}

/// Field selector within an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAddr {
    /// A top-level prop, by name.
    Prop(String),
    /// An existing child slot, by index.
    Child(usize),
    /// Append to the children list (`-` index).
    ChildAppend,
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            FieldAddr::Prop(name) => write!(f, "/elements/{}/props/{name}", self.key),
            FieldAddr::Child(i) => write!(f, "/elements/{}/children/{i}", self.key),
            FieldAddr::ChildAppend => write!(f, "/elements/{}/children/-", self.key),
        }
    }
}

/// Failure to interpret a decoded JSON value as a patch record.
///
/// Wire errors are soft: the record is skipped with a diagnostic and the
/// stream continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The record is not a JSON object.
    NotAnObject,
    /// A required field (`op`, `path`, `value`) is absent or mistyped.
    MissingField(&'static str),
    /// The `op` value is not one of `set`/`add`/`replace`.
    UnknownOp(String),
    /// The path does not address `/root` or the flat `/elements/...` space.
    UnsupportedPath(String),
    /// The `add` value could not be deserialized as an element.
    BadElement(String),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("record is not a JSON object"),
            Self::MissingField(name) => write!(f, "record field {name:?} missing or mistyped"),
            Self::UnknownOp(op) => write!(f, "unknown op {op:?}"),
            Self::UnsupportedPath(path) => write!(f, "unsupported path {path:?}"),
            Self::BadElement(detail) => write!(f, "malformed element value: {detail}"),
        }
    }
}

impl std::error::Error for WireError {}

impl PatchRecord {
    /// Parse one decoded JSON record into a patch operation.
    pub fn from_wire(record: &Value) -> Result<Self, WireError> {
        let obj = record.as_object().ok_or(WireError::NotAnObject)?;
        let op = obj
            .get("op")
            .and_then(Value::as_str)
            .ok_or(WireError::MissingField("op"))?;
        let path = obj
            .get("path")
            .and_then(Value::as_str)
            .ok_or(WireError::MissingField("path"))?;
        let value = obj.get("value").ok_or(WireError::MissingField("value"))?;
        let segments = Pointer::parse(path);
        let segments = segments.segments();

        match op {
            "set" => match segments {
                [root] if root == "root" => {
                    let key = value.as_str().ok_or(WireError::MissingField("value"))?;
                    Ok(Self::SetRoot(ElementKey::from(key)))
                }
                _ => Err(WireError::UnsupportedPath(path.to_string())),
            },
            "add" => match segments {
                [elements, key] if elements == "elements" => {
                    let mut element: Element = serde_json::from_value(value.clone())
                        .map_err(|e| WireError::BadElement(e.to_string()))?;
                    // The path key is authoritative; normalize a divergent
                    // embedded key rather than admitting two spellings.
                    let key = ElementKey::from(key.as_str());
                    element.key = key.clone();
                    Ok(Self::Upsert { key, element })
                }
                _ => Err(WireError::UnsupportedPath(path.to_string())),
            },
            "replace" => match segments {
                [elements, key, props, prop] if elements == "elements" && props == "props" => {
                    Ok(Self::UpdateField {
                        target: FieldTarget {
                            key: ElementKey::from(key.as_str()),
                            field: FieldAddr::Prop(prop.clone()),
                        },
                        value: value.clone(),
                    })
                }
                [elements, key, children, slot]
                    if elements == "elements" && children == "children" =>
                {
                    let field = if slot == "-" {
                        FieldAddr::ChildAppend
                    } else {
                        let index = slot
                            .parse::<usize>()
                            .map_err(|_| WireError::UnsupportedPath(path.to_string()))?;
                        FieldAddr::Child(index)
                    };
                    Ok(Self::UpdateField {
                        target: FieldTarget {
                            key: ElementKey::from(key.as_str()),
                            field,
                        },
                        value: value.clone(),
                    })
                }
                _ => Err(WireError::UnsupportedPath(path.to_string())),
            },
            other => Err(WireError::UnknownOp(other.to_string())),
        }
    }
}
