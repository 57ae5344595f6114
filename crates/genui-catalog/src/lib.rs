#![forbid(unsafe_code)]

//! Closed catalog of element types and actions.
//!
//! The catalog is the guardrail between a generative model and the tree: an
//! element is admitted only if its type is registered here and its props
//! validate against the registered schema, and an action fires only if its
//! name and params pass the symmetric check. A catalog is immutable after
//! construction and is shared across sessions as a plain value (usually
//! behind an `Arc`) — never ambient global state, so independent sessions
//! can use different catalogs concurrently.
//!
//! # Example
//!
//! ```
//! use genui_catalog::{ActionEntry, Catalog, ComponentEntry};
//! use genui_catalog::schema::{Field, Schema};
//! use serde_json::json;
//!
//! let catalog = Catalog::builder()
//!     .component(
//!         ComponentEntry::new("Card", Schema::object([Field::optional("title", Schema::string())]))
//!             .accepts_children()
//!             .describe("A card container with optional title"),
//!     )
//!     .action(ActionEntry::new("refresh_data").describe("Refresh all metrics"))
//!     .build();
//!
//! let props = json!({"title": "Revenue"}).as_object().unwrap().clone();
//! assert!(catalog.validate_element("Card", &props, false).is_ok());
//! assert!(catalog.validate_element("Widget", &props, false).is_err());
//! ```

pub mod schema;

pub use schema::{Field, Schema, ValidationMode};

use genui_core::FieldViolation;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Violation code: children declared for a childless type.
pub const CODE_CHILDREN_FORBIDDEN: &str = "children_forbidden";

/// One registered component type.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentEntry {
    type_name: String,
    props: Schema,
    accepts_children: bool,
    description: String,
}

impl ComponentEntry {
    /// Register a type with its props schema. Children are rejected unless
    /// [`accepts_children`](Self::accepts_children) is called.
    #[must_use]
    pub fn new(type_name: impl Into<String>, props: Schema) -> Self {
        Self {
            type_name: type_name.into(),
            props,
            accepts_children: false,
            description: String::new(),
        }
    }

    /// Permit child elements under this type.
    #[must_use]
    pub fn accepts_children(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    /// Human-readable description (surfaced to prompt builders, not used by
    /// validation).
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The registered type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The props schema.
    #[must_use]
    pub fn props_schema(&self) -> &Schema {
        &self.props
    }

    /// Whether elements of this type may carry children.
    #[must_use]
    pub fn allows_children(&self) -> bool {
        self.accepts_children
    }

    /// The description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One registered action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEntry {
    name: String,
    params: Option<Schema>,
    description: String,
}

impl ActionEntry {
    /// Register an action that takes no params (any params are rejected in
    /// strict mode; see [`ActionEntry::params`]).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            description: String::new(),
        }
    }

    /// Declare a params schema for the action.
    #[must_use]
    pub fn params(mut self, schema: Schema) -> Self {
        self.params = Some(schema);
        self
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The registered action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Element validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidateError {
    /// The type is absent from the catalog.
    UnknownType {
        /// The unrecognized type name.
        type_name: String,
    },
    /// Props (or a forbidden children list) failed validation.
    Schema {
        /// Field-level detail.
        violations: Vec<FieldViolation>,
    },
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { type_name } => write!(f, "unknown element type {type_name:?}"),
            Self::Schema { violations } => {
                write!(f, "{} schema violation(s)", violations.len())?;
                for v in violations {
                    write!(f, "; {v}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidateError {}

/// Action validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The action name is absent from the catalog.
    UnknownAction {
        /// The unrecognized name.
        name: String,
    },
    /// Params failed validation against the declared schema.
    Params {
        /// Field-level detail.
        violations: Vec<FieldViolation>,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction { name } => write!(f, "unknown action {name:?}"),
            Self::Params { violations } => {
                write!(f, "action params: {} violation(s)", violations.len())
            }
        }
    }
}

impl std::error::Error for ActionError {}

/// Immutable registry of permitted element types and actions.
#[derive(Debug, Clone)]
pub struct Catalog {
    components: HashMap<String, ComponentEntry>,
    component_order: Vec<String>,
    actions: HashMap<String, ActionEntry>,
    action_order: Vec<String>,
    mode: ValidationMode,
}

impl Catalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Validate an element's type and props; `has_children` reports whether
    /// the raw element declared any child keys.
    ///
    /// Pure function of its inputs; the sole gate before tree admission.
    pub fn validate_element(
        &self,
        type_name: &str,
        props: &Map<String, Value>,
        has_children: bool,
    ) -> Result<(), ValidateError> {
        let entry = self
            .components
            .get(type_name)
            .ok_or_else(|| ValidateError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let mut violations = entry
            .props
            .validate(&Value::Object(props.clone()), self.mode);
        if has_children && !entry.accepts_children {
            violations.push(FieldViolation::new(
                "/children",
                CODE_CHILDREN_FORBIDDEN,
                format!("type {type_name:?} does not accept children"),
            ));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::Schema { violations })
        }
    }

    /// Validate an action dispatch; the second guardrail layer, symmetric
    /// with element-type guarding.
    pub fn validate_action(&self, name: &str, params: &Value) -> Result<(), ActionError> {
        let entry = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::UnknownAction {
                name: name.to_string(),
            })?;
        let violations = match &entry.params {
            Some(schema) => schema.validate(params, self.mode),
            // No declared schema: accept absent/null/empty-object params only.
            None => match params {
                Value::Null => Vec::new(),
                Value::Object(map) if map.is_empty() => Vec::new(),
                other => vec![FieldViolation::new(
                    "/",
                    schema::CODE_TYPE_MISMATCH,
                    format!("action takes no params, got {other}"),
                )],
            },
        };
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ActionError::Params { violations })
        }
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.component_order.iter().map(String::as_str)
    }

    /// Registered action names, in registration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.action_order.iter().map(String::as_str)
    }

    /// Look up a component entry.
    #[must_use]
    pub fn component(&self, type_name: &str) -> Option<&ComponentEntry> {
        self.components.get(type_name)
    }

    /// Look up an action entry.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&ActionEntry> {
        self.actions.get(name)
    }

    /// The unknown-field policy this catalog validates under.
    #[must_use]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }
}

/// Builder for [`Catalog`]. Registering a name twice keeps the last entry.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    components: Vec<ComponentEntry>,
    actions: Vec<ActionEntry>,
    mode: ValidationMode,
}

impl CatalogBuilder {
    /// Register a component type.
    #[must_use]
    pub fn component(mut self, entry: ComponentEntry) -> Self {
        self.components.push(entry);
        self
    }

    /// Register an action.
    #[must_use]
    pub fn action(mut self, entry: ActionEntry) -> Self {
        self.actions.push(entry);
        self
    }

    /// Tolerate undeclared prop fields instead of rejecting them.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.mode = ValidationMode::Lenient;
        self
    }

    /// Freeze the catalog.
    #[must_use]
    pub fn build(self) -> Catalog {
        let mut components = HashMap::new();
        let mut component_order = Vec::new();
        for entry in self.components {
            if components
                .insert(entry.type_name.clone(), entry.clone())
                .is_none()
            {
                component_order.push(entry.type_name);
            }
        }
        let mut actions = HashMap::new();
        let mut action_order = Vec::new();
        for entry in self.actions {
            if actions.insert(entry.name.clone(), entry.clone()).is_none() {
                action_order.push(entry.name);
            }
        }
        Catalog {
            components,
            component_order,
            actions,
            action_order,
            mode: self.mode,
        }
    }
}
