#![forbid(unsafe_code)]

//! Soft-failure diagnostics.
//!
//! Nothing in the streaming path is fatal to a session: malformed records,
//! unknown types, schema violations, and dangling references are all
//! recorded as [`Diagnostic`] values and surfaced to the host, while the
//! engine keeps rendering everything that *is* valid. Each variant carries a
//! stable code for programmatic handling.

use crate::element::ElementKey;
use std::fmt;

/// One field-level schema violation, with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Slash-delimited path of the offending field within the props object
    /// (`/title`, `/columns/0/key`).
    pub path: String,
    /// Stable violation code (`"missing"`, `"type_mismatch"`, ...).
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldViolation {
    /// Create a violation for the given field path.
    #[must_use]
    pub fn new(path: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Advisory record of a soft failure somewhere in the streaming path.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A record could not be decoded from the stream and was skipped.
    DecodeFailure {
        /// What went wrong.
        detail: String,
        /// Excerpt of the offending text, truncated for logging.
        excerpt: String,
    },
    /// An element named a type absent from the catalog and was dropped.
    UnknownType {
        /// Key of the rejected element.
        key: ElementKey,
        /// The unrecognized type name.
        type_name: String,
    },
    /// An element's props failed catalog validation and it was dropped.
    SchemaViolation {
        /// Key of the rejected element.
        key: ElementKey,
        /// Catalog type the props were validated against.
        type_name: String,
        /// Field-level detail.
        violations: Vec<FieldViolation>,
    },
    /// A buffered field update never found its target element.
    DanglingReference {
        /// Key the update was addressed to.
        key: ElementKey,
        /// Description of the orphaned operation.
        detail: String,
    },
    /// An admitted type has no renderer registered; a fallback was shown.
    RegistryGap {
        /// Key of the element that hit the gap.
        key: ElementKey,
        /// The unregistered type name.
        type_name: String,
    },
    /// An action was dispatched under a name absent from the catalog.
    UnknownAction {
        /// The unrecognized action name.
        name: String,
    },
    /// Action params failed validation against the catalog schema.
    ActionParamsViolation {
        /// The action name.
        name: String,
        /// Field-level detail.
        violations: Vec<FieldViolation>,
    },
}

impl Diagnostic {
    /// Stable code identifying the failure class.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DecodeFailure { .. } => "decode_failure",
            Self::UnknownType { .. } => "unknown_type",
            Self::SchemaViolation { .. } => "schema_violation",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::RegistryGap { .. } => "registry_gap",
            Self::UnknownAction { .. } => "unknown_action",
            Self::ActionParamsViolation { .. } => "action_params_violation",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailure { detail, excerpt } => {
                write!(f, "record skipped: {detail} ({excerpt:?})")
            }
            Self::UnknownType { key, type_name } => {
                write!(f, "element {key:?} dropped: unknown type {type_name:?}")
            }
            Self::SchemaViolation {
                key,
                type_name,
                violations,
            } => {
                write!(
                    f,
                    "element {key:?} ({type_name}) dropped: {} violation(s)",
                    violations.len()
                )?;
                for v in violations {
                    write!(f, "; {v}")?;
                }
                Ok(())
            }
            Self::DanglingReference { key, detail } => {
                write!(f, "update for {key:?} never resolved: {detail}")
            }
            Self::RegistryGap { key, type_name } => {
                write!(f, "no renderer for {type_name:?} (element {key:?})")
            }
            Self::UnknownAction { name } => write!(f, "unknown action {name:?}"),
            Self::ActionParamsViolation { name, violations } => {
                write!(f, "action {name:?} params invalid: {} violation(s)", violations.len())
            }
        }
    }
}
