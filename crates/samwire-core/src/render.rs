//! Renderer seam and the fixed capability set injected into components.
//!
//! The loop is provider-agnostic: [`Renderer`] is an opaque capability
//! threaded through [`Props`], and the loop never inspects what a render
//! call produces. Components receive the full capability set — state
//! snapshot, actions, renderer, dispatch emitter, wire identity — and the
//! `connect` operation re-injects the same set into child components.

use std::sync::Arc;

use samwire_hydrate::DispatchEmitter;

use crate::model::Dispatcher;

/// Opaque templating capability.
///
/// Implementations wrap whatever templating engine the application uses.
/// The loop requires nothing of the produced value beyond moving it around,
/// which is why both associated types are unconstrained here: `Anchor` is
/// the mount-point handle (`()` server-side, a node handle in a browser
/// host) and `Output` is whatever a render call returns.
pub trait Renderer: Send + Sync + 'static {
    /// Mount-point handle the root view renders against.
    type Anchor: Send + Sync;
    /// Whatever a render call produces; never inspected by the loop.
    type Output;
}

/// Render identity of a component instance.
///
/// A connect call may carry a reference and namespace so the renderer can
/// keep node identity stable across re-renders. Purely a rendering-identity
/// concern; the loop itself never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireId {
    /// Stable reference key, if any.
    pub reference: Option<String>,
    /// Namespace qualifying the reference, if any.
    pub namespace: Option<String>,
}

impl WireId {
    /// Identity from an optional reference and namespace.
    pub fn new(reference: Option<&str>, namespace: Option<&str>) -> Self {
        Self { reference: reference.map(Into::into), namespace: namespace.map(Into::into) }
    }
}

/// The fixed capability set injected into every component render.
///
/// An explicit struct rather than an open prop bag: `state` (a snapshot
/// taken for this render pass), `actions`, the renderer, the dispatch
/// emitter, and the wire identity.
pub struct Props<S, P, R: Renderer> {
    /// State snapshot for this render pass.
    pub state: S,
    /// Handle for invoking named actions (empty server-side).
    pub actions: Dispatcher<S, P>,
    /// The templating capability.
    pub renderer: Arc<R>,
    /// Emitter for deferred-dispatch markup attributes.
    pub dispatch: DispatchEmitter,
    /// Render identity of this component instance.
    pub wire: WireId,
}

impl<S: Clone, P, R: Renderer> Clone for Props<S, P, R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            actions: self.actions.clone(),
            renderer: Arc::clone(&self.renderer),
            dispatch: self.dispatch.clone(),
            wire: self.wire.clone(),
        }
    }
}

impl<S, P, R: Renderer> Props<S, P, R> {
    /// Connect a child component: render it with this capability set, its
    /// own extra props, and an optional identity to stabilize its nodes
    /// across re-renders.
    pub fn connect<C: Component<S, P, R>>(
        &self,
        component: &C,
        extra: &C::Extra,
        reference: Option<&str>,
        namespace: Option<&str>,
    ) -> R::Output
    where
        S: Clone,
    {
        let child = Props {
            state: self.state.clone(),
            actions: self.actions.clone(),
            renderer: Arc::clone(&self.renderer),
            dispatch: self.dispatch.clone(),
            wire: WireId::new(reference, namespace),
        };
        component.render(&child, extra)
    }
}

/// A renderable component below the root.
///
/// `Extra` is the component's own child props, merged with the injected
/// capability set by [`Props::connect`].
pub trait Component<S, P, R: Renderer>: Send + Sync {
    /// Application-defined child props.
    type Extra;

    /// Produce this component's render output.
    fn render(&self, props: &Props<S, P, R>, extra: &Self::Extra) -> R::Output;
}

/// An app's root render function.
///
/// Invoked by the runtimes with the mount anchor and the injected
/// capability set; on the server the anchor is `()` and the output must be
/// convertible into the page string.
pub trait RootView<S, P, R: Renderer>: Send + Sync {
    /// Render the whole view for the given state snapshot.
    fn render(&self, anchor: &R::Anchor, props: &Props<S, P, R>) -> R::Output;
}
