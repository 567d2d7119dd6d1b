//! The client runtime: restore, construct, render, replay.

use std::sync::Arc;

use samwire_core::{
    Accept, Actions, Model, NextAction, Props, Renderer, RootView, WireId,
};
use samwire_hydrate::{DispatchEmitter, ReplayQueue, payload};
use serde::de::DeserializeOwned;

use crate::{
    error::ClientError,
    host::Host,
    replay::{ReplayHandlers, drain_replay},
};

/// Configuration for starting the client runtime.
///
/// `state` is optional — when absent, state is restored from the payload
/// the server embedded in the host's document. Everything else is
/// mandatory by construction.
pub struct ClientConfig<S, P, R: Renderer, V, H> {
    /// Explicit state, used verbatim when supplied.
    pub state: Option<S>,
    /// The accept function, shared with the server variant of the app.
    pub accept: Box<dyn Accept<S, P>>,
    /// The app's named actions.
    pub actions: Actions<S, P>,
    /// Optional hook fired after every accepted mutation.
    pub next_action: Option<Box<dyn NextAction<S, P>>>,
    /// The app's root render function.
    pub root: V,
    /// Templating capability handed to render passes.
    pub renderer: R,
    /// Platform seam for the document and mount anchor.
    pub host: H,
    /// The queue interactions were recorded into before this runtime
    /// existed. Shared with the page bootstrap; drained here exactly once.
    pub queue: ReplayQueue,
    /// Handlers for replay entries that name one.
    pub handlers: ReplayHandlers<S, P>,
}

/// Client hydration entry point.
pub struct ClientRuntime;

impl ClientRuntime {
    /// Start the client: restore state, construct the loop, render once,
    /// run the next-action hook against the restored state, and drain the
    /// replay queue.
    ///
    /// Returns the live [`Model`], exposing `accept` and `actions`. On any
    /// failure the whole construction is abandoned — no half-initialized
    /// app state escapes.
    ///
    /// # Errors
    ///
    /// [`ClientError::Restore`]/[`ClientError::Host`] if state restoration
    /// fails, and the replay configuration errors of
    /// [`drain_replay`](crate::ReplayHandlers) if the queue references
    /// unregistered names.
    pub async fn start<S, P, R, V, H>(
        config: ClientConfig<S, P, R, V, H>,
    ) -> Result<Model<S, P>, ClientError>
    where
        S: Clone + DeserializeOwned + Send + Sync + 'static,
        P: Send + 'static,
        R: Renderer,
        V: RootView<S, P, R>,
        H: Host<R>,
    {
        // Step 1: restore state, explicit value first.
        let state = match config.state {
            Some(state) => state,
            None => {
                let document = config.host.document().map_err(ClientError::host)?;
                payload::restore_state(&document)?
            },
        };

        // Step 2: construct the core loop.
        let model = Model::builder(state, config.accept)
            .actions(config.actions)
            .maybe_next_action(config.next_action)
            .build();

        // A state shape that warrants automatic actions triggers them here:
        // the server never runs the hook, the restored client does.
        model.run_next_action().await?;

        // Step 3: initial render against the host anchor.
        let anchor = config.host.anchor().map_err(ClientError::host)?;
        let props = Props {
            state: model.state().snapshot().await,
            actions: model.actions(),
            renderer: Arc::new(config.renderer),
            dispatch: DispatchEmitter::new(),
            wire: WireId::default(),
        };
        let _ = config.root.render(&anchor, &props);

        // Step 4: replay interactions recorded before the loop existed.
        tracing::debug!(queued = config.queue.len(), "draining replay queue");
        drain_replay(&config.queue, &model.actions(), &config.handlers).await?;

        Ok(model)
    }
}
