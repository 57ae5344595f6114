#![forbid(unsafe_code)]

//! The component capability table.
//!
//! A [`Registry`] maps catalog type names to rendering capabilities that
//! produce host-defined output `R` — strings for a text host, DOM handles
//! for a web host, widget trees for a terminal host. The registry also
//! carries the two mandatory fallback capabilities the progressive-reveal
//! contract needs: a loading placeholder for children that have not arrived
//! and a typed fallback for admitted types with no renderer.

use crate::actions::ActionDispatcher;
use genui_bind::Bindings;
use genui_core::{Element, ElementKey};
use std::collections::HashMap;
use std::fmt;

/// Everything a rendering capability receives for one element.
pub struct RenderScope<'a, R> {
    /// The admitted element.
    pub element: &'a Element,
    /// Its binding references, resolved against the current data store.
    pub bindings: &'a Bindings,
    /// Already-rendered children, in child-key order. Skipped-invisible
    /// children are absent; not-yet-admitted children arrive as loading
    /// placeholders.
    pub children: Vec<R>,
    /// Validated action dispatch, for interactive components.
    pub actions: &'a ActionDispatcher,
}

/// A rendering capability for one catalog type.
///
/// Closures register directly:
///
/// ```
/// use genui_render::{Registry, RenderScope};
///
/// let registry: Registry<String> = Registry::new(
///     |key| format!("<loading {key}>"),
///     |element| format!("<no renderer for {}>", element.type_name),
/// )
/// .with("Text", |scope: RenderScope<'_, String>| {
///     scope.element.prop("content").and_then(|v| v.as_str()).unwrap_or("").to_string()
/// });
/// assert!(registry.contains("Text"));
/// ```
pub trait ElementRenderer<R> {
    /// Produce output for one element.
    fn render(&self, scope: RenderScope<'_, R>) -> R;
}

impl<R, F> ElementRenderer<R> for F
where
    F: Fn(RenderScope<'_, R>) -> R,
{
    fn render(&self, scope: RenderScope<'_, R>) -> R {
        self(scope)
    }
}

/// Capability table from type name to renderer, plus fallbacks.
pub struct Registry<R> {
    components: HashMap<String, Box<dyn ElementRenderer<R>>>,
    loading: Box<dyn Fn(&ElementKey) -> R>,
    gap: Box<dyn Fn(&Element) -> R>,
}

impl<R> Registry<R> {
    /// Create a registry from its two fallback capabilities: `loading`
    /// renders the stable placeholder for a referenced-but-absent child key,
    /// and `gap` renders the fallback for an admitted element whose type has
    /// no registered renderer.
    #[must_use]
    pub fn new(
        loading: impl Fn(&ElementKey) -> R + 'static,
        gap: impl Fn(&Element) -> R + 'static,
    ) -> Self {
        Self {
            components: HashMap::new(),
            loading: Box::new(loading),
            gap: Box::new(gap),
        }
    }

    /// Register the rendering capability for a type name. Last registration
    /// per name wins.
    #[must_use]
    pub fn with(
        mut self,
        type_name: impl Into<String>,
        renderer: impl ElementRenderer<R> + 'static,
    ) -> Self {
        self.components.insert(type_name.into(), Box::new(renderer));
        self
    }

    /// `true` if a renderer is registered for `type_name`.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.components.contains_key(type_name)
    }

    /// Look up the capability for a type name.
    #[must_use]
    pub fn renderer(&self, type_name: &str) -> Option<&dyn ElementRenderer<R>> {
        self.components.get(type_name).map(Box::as_ref)
    }

    /// Render the loading placeholder for a missing child key.
    #[must_use]
    pub fn loading(&self, key: &ElementKey) -> R {
        (self.loading)(key)
    }

    /// Render the fallback for an element with no registered renderer.
    #[must_use]
    pub fn gap(&self, element: &Element) -> R {
        (self.gap)(element)
    }
}

// Closures have no useful Debug; show the registered names only.
impl<R> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("components", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionHandlers;
    use genui_catalog::Catalog;
    use std::sync::Arc;

    fn actions() -> ActionDispatcher {
        ActionDispatcher::new(Arc::new(Catalog::builder().build()), ActionHandlers::new())
    }

    #[test]
    fn closures_register_and_render() {
        let registry: Registry<String> = Registry::new(
            |key| format!("…{key}"),
            |el| format!("?{}", el.type_name),
        )
        .with("Text", |scope: RenderScope<'_, String>| {
            format!("text:{}", scope.children.len())
        });

        let element = Element::new("t", "Text");
        let bindings = Bindings::default();
        let actions = actions();
        let scope = RenderScope {
            element: &element,
            bindings: &bindings,
            children: vec!["a".to_string()],
            actions: &actions,
        };
        let out = registry.renderer("Text").unwrap().render(scope);
        assert_eq!(out, "text:1");
    }

    #[test]
    fn fallbacks_are_typed() {
        let registry: Registry<String> =
            Registry::new(|key| format!("…{key}"), |el| format!("?{}", el.type_name));
        assert_eq!(registry.loading(&ElementKey::from("m")), "…m");
        assert_eq!(registry.gap(&Element::new("x", "Chart")), "?Chart");
        assert!(!registry.contains("Chart"));
    }
}
