#![forbid(unsafe_code)]

//! Validated action dispatch.
//!
//! The second guardrail layer, symmetric with element-type guarding: an
//! action invoked from rendered output is checked against the catalog's
//! action table before it reaches the host handler. An unknown name or
//! failing params is a no-op plus a diagnostic, never a panic and never an
//! unvetted callback.

use genui_catalog::{ActionError, Catalog};
use genui_core::Diagnostic;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Host callback for one action name.
pub type ActionHandler = Box<dyn Fn(&Value)>;

/// Caller-supplied handler table, keyed by catalog action name.
#[derive(Default)]
pub struct ActionHandlers {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionHandlers {
    /// An empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the handler for an action name. Last registration wins.
    #[must_use]
    pub fn on(mut self, name: impl Into<String>, handler: impl Fn(&Value) + 'static) -> Self {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    fn get(&self, name: &str) -> Option<&ActionHandler> {
        self.handlers.get(name)
    }
}

impl fmt::Debug for ActionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ActionHandlers").field("names", &names).finish()
    }
}

/// The `onAction` capability handed down through every render scope.
///
/// Dispatch happens from rendered output after a pass (a button press, a
/// select change), so diagnostics accumulate behind a `RefCell` and are
/// drained by the host alongside the streaming diagnostics.
pub struct ActionDispatcher {
    catalog: Arc<Catalog>,
    handlers: ActionHandlers,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl ActionDispatcher {
    /// Create a dispatcher validating against `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, handlers: ActionHandlers) -> Self {
        Self {
            catalog,
            handlers,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Invoke an action by name.
    ///
    /// Params are validated against the catalog action schema; on success
    /// the host handler for that name runs. Returns `true` only if a
    /// handler actually ran.
    pub fn dispatch(&self, name: &str, params: Value) -> bool {
        match self.catalog.validate_action(name, &params) {
            Ok(()) => match self.handlers.get(name) {
                Some(handler) => {
                    handler(&params);
                    true
                }
                None => {
                    debug!(action = name, "no handler attached, action ignored");
                    false
                }
            },
            Err(ActionError::UnknownAction { name }) => {
                debug!(action = %name, "unknown action rejected");
                self.diagnostics
                    .borrow_mut()
                    .push(Diagnostic::UnknownAction { name });
                false
            }
            Err(ActionError::Params { violations }) => {
                debug!(action = name, "action params rejected");
                self.diagnostics
                    .borrow_mut()
                    .push(Diagnostic::ActionParamsViolation {
                        name: name.to_string(),
                        violations,
                    });
                false
            }
        }
    }

    /// Drain the diagnostics recorded by rejected dispatches.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("handlers", &self.handlers)
            .finish()
    }
}
