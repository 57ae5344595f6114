#![forbid(unsafe_code)]

//! The render walk.
//!
//! Depth-first from each root key over an immutable tree snapshot. The walk
//! is a pure function of its inputs and never mutates the tree, so it is
//! safe to run on every applied record or on a throttled cadence while the
//! stream is still arriving.
//!
//! Progressive reveal: a child key with no admitted element renders as the
//! registry's stable loading placeholder — never an error — so a parent can
//! appear one record before its children. A key that re-enters its own walk
//! path (a malformed self-referential generation) also renders as a
//! placeholder instead of recursing forever.

use crate::actions::ActionDispatcher;
use crate::registry::{Registry, RenderScope};
use crate::visibility::VisibilityRules;
use genui_bind::{Bindings, DataStore};
use genui_core::{Diagnostic, ElementKey, Tree};
use tracing::{trace, warn};

/// The output of one render pass: one value per visible root, plus the
/// diagnostics collected during the walk.
#[derive(Debug)]
pub struct RenderPass<R> {
    /// Rendered roots, in root order. Invisible roots are absent.
    pub roots: Vec<R>,
    /// Soft failures hit during the walk (registry gaps).
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything the walk reads; owned by the caller, never mutated.
struct Ctx<'a, R> {
    tree: &'a Tree,
    registry: &'a Registry<R>,
    store: &'a DataStore,
    actions: &'a ActionDispatcher,
    visibility: &'a VisibilityRules,
}

/// Everything the walk writes.
#[derive(Default)]
struct WalkState {
    path: Vec<ElementKey>,
    diagnostics: Vec<Diagnostic>,
}

/// Render a tree snapshot.
///
/// Idempotent and read-only over all of its inputs; call it as often as the
/// host likes, including concurrently with ongoing reconciliation on a
/// snapshot handle.
#[must_use]
pub fn render<R>(
    tree: &Tree,
    registry: &Registry<R>,
    store: &DataStore,
    actions: &ActionDispatcher,
    visibility: &VisibilityRules,
) -> RenderPass<R> {
    let ctx = Ctx {
        tree,
        registry,
        store,
        actions,
        visibility,
    };
    let mut state = WalkState::default();
    let roots: Vec<R> = tree
        .roots()
        .iter()
        .filter_map(|key| render_key(&ctx, &mut state, key))
        .collect();
    trace!(roots = roots.len(), elements = tree.len(), "render pass complete");
    RenderPass {
        roots,
        diagnostics: state.diagnostics,
    }
}

/// `None` means "skipped by a visibility rule"; every other outcome produces
/// output, placeholders included.
fn render_key<R>(ctx: &Ctx<'_, R>, state: &mut WalkState, key: &ElementKey) -> Option<R> {
    let Some(element) = ctx.tree.get(key.as_str()) else {
        return Some(ctx.registry.loading(key));
    };
    if !ctx.visibility.visible(key.as_str(), ctx.store) {
        return None;
    }
    if state.path.contains(key) {
        warn!(key = %key, "element references itself along the walk path");
        return Some(ctx.registry.loading(key));
    }

    state.path.push(key.clone());
    let children: Vec<R> = element
        .children
        .iter()
        .filter_map(|child| render_key(ctx, state, child))
        .collect();
    state.path.pop();

    let bindings = Bindings::resolve(element, ctx.store);
    match ctx.registry.renderer(&element.type_name) {
        Some(renderer) => Some(renderer.render(RenderScope {
            element,
            bindings: &bindings,
            children,
            actions: ctx.actions,
        })),
        None => {
            state.diagnostics.push(Diagnostic::RegistryGap {
                key: key.clone(),
                type_name: element.type_name.clone(),
            });
            Some(ctx.registry.gap(element))
        }
    }
}
