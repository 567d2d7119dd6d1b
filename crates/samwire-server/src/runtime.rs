//! The server runtime: accept plus string rendering.

use std::sync::Arc;

use samwire_core::{
    Accept, LoopError, Model, Props, Renderer, RootView, StateHandle, WireId,
};
use samwire_hydrate::{DispatchEmitter, payload};
use serde::Serialize;

use crate::error::ServerError;

/// Configuration for a server runtime instance.
///
/// Missing pieces are unrepresentable: a runtime cannot be constructed
/// without its state, accept, renderer, and root view.
pub struct ServerConfig<S, A, R, V> {
    /// Initial state for this request.
    pub state: S,
    /// The accept function, shared with the client variant of the app.
    pub accept: A,
    /// Templating capability handed to render passes.
    pub renderer: R,
    /// The app's root render function.
    pub root: V,
}

/// Server-side rendering runtime.
///
/// Internally this is a [`Model`] with an empty actions map and no
/// next-action hook: the accept exposed here is the same bound function the
/// core loop uses, while automatic chains stay client-only. Calling an
/// action-dependent code path from a server render is a documented
/// limitation of the pattern, not something this runtime can reach — the
/// injected dispatcher simply has nothing registered.
pub struct ServerRuntime<S, P, R: Renderer, V> {
    model: Model<S, P>,
    renderer: Arc<R>,
    root: V,
    dispatch: DispatchEmitter,
}

impl<S, P, R, V> ServerRuntime<S, P, R, V>
where
    S: Clone + Serialize + Send + Sync + 'static,
    P: Send + 'static,
    R: Renderer<Anchor = ()>,
    R::Output: Into<String>,
    V: RootView<S, P, R>,
{
    /// Build the runtime from its configuration.
    pub fn new<A>(config: ServerConfig<S, A, R, V>) -> Self
    where
        A: Accept<S, P> + 'static,
    {
        let model = Model::builder(config.state, config.accept).build();
        Self {
            model,
            renderer: Arc::new(config.renderer),
            root: config.root,
            dispatch: DispatchEmitter::new(),
        }
    }

    /// Forward a proposal to the bound accept function.
    ///
    /// Exposed so the caller can mutate state (e.g. inject fetched data)
    /// before rendering. No next-action hook runs server-side.
    pub async fn accept(&self, proposal: P) -> Result<(), LoopError> {
        self.model.accept(proposal).await
    }

    /// Handle to the server-held state.
    pub fn state(&self) -> StateHandle<S> {
        self.model.state()
    }

    /// Produce a self-contained markup string for the current state.
    ///
    /// Renders the root view with the default injected props (state
    /// snapshot, empty actions, dispatch emitter, renderer), then embeds
    /// the serialized snapshot for the client to restore from. No side
    /// effects beyond string production.
    pub async fn render_html_string(&self) -> Result<String, ServerError> {
        let snapshot = self.model.state().snapshot().await;
        let props = Props {
            state: snapshot.clone(),
            actions: self.model.actions(),
            renderer: Arc::clone(&self.renderer),
            dispatch: self.dispatch.clone(),
            wire: WireId::default(),
        };

        let markup: String = self.root.render(&(), &props).into();
        tracing::debug!(markup_len = markup.len(), "rendered root view");

        Ok(payload::embed_state(&markup, &snapshot)?)
    }
}
