#![forbid(unsafe_code)]

//! Slash-delimited pointers.
//!
//! A [`Pointer`] is a sequence of property/index accessors rooted at a JSON
//! document: `/analytics/revenue`, `/quotes/0/price`. Resolution walks the
//! document structurally; failure at any segment yields `None`, never an
//! error, so callers can treat an unresolved pointer as "not yet available".
//!
//! The syntax is deliberately plainer than RFC 6901: no `~`-escapes, and
//! empty segments are ignored, matching the paths generative models actually
//! emit.

use serde_json::Value;
use std::fmt;

/// Parsed pointer into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    segments: Vec<String>,
}

impl Pointer {
    /// Parse a pointer from its string form.
    ///
    /// `""` and `"/"` both name the document root.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Pointer naming the document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// `true` if this pointer names the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The accessor segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve this pointer against a document.
    ///
    /// Objects are indexed by property name, arrays by decimal index. Any
    /// miss (absent property, out-of-range or non-numeric index, scalar in
    /// the middle of the path) yields `None`.
    #[must_use]
    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        let mut current = doc;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
