//! Draining the replay queue into the live loop.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use samwire_core::{ActionInput, Dispatcher, LoopError};
use samwire_hydrate::ReplayQueue;
use serde_json::Value;

use crate::error::ClientError;

/// A deferred action, handed to a [`ReplayHandler`] as a callable.
///
/// Forwards to the real action named by the replay entry, applied against
/// the originally captured target, event, and arguments. The handler
/// decides whether and when to call it.
pub struct ReplayAction<'a, S, P> {
    dispatcher: &'a Dispatcher<S, P>,
    name: String,
    input: ActionInput,
}

impl<S, P> ReplayAction<'_, S, P>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    /// Name of the action this will invoke.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the real action with the captured invocation data.
    pub async fn call(&self) -> Result<(), LoopError> {
        self.dispatcher.invoke(&self.name, self.input.clone()).await
    }
}

impl<S, P> std::fmt::Debug for ReplayAction<'_, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayAction").field("name", &self.name).finish()
    }
}

/// Hook run for replay entries that name a handler.
///
/// The handler receives the captured event and the action as a callable,
/// exactly as an inline `handler(event, action)` would have, so it decides
/// whether, when, and how the action runs.
#[async_trait]
pub trait ReplayHandler<S, P>: Send + Sync {
    /// Handle one replayed interaction.
    async fn handle(
        &self,
        event: Option<Value>,
        action: ReplayAction<'_, S, P>,
    ) -> Result<(), LoopError>;
}

/// Mapping from handler name to registered [`ReplayHandler`].
pub struct ReplayHandlers<S, P> {
    map: HashMap<String, Arc<dyn ReplayHandler<S, P>>>,
}

impl<S, P> Default for ReplayHandlers<S, P> {
    fn default() -> Self {
        Self { map: HashMap::new() }
    }
}

impl<S, P> ReplayHandlers<S, P> {
    /// Empty handler map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name (builder style).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        handler: impl ReplayHandler<S, P> + 'static,
    ) -> Self {
        self.map.insert(name.into(), Arc::new(handler));
        self
    }

    fn get(&self, name: &str) -> Option<Arc<dyn ReplayHandler<S, P>>> {
        self.map.get(name).cloned()
    }
}

impl<S, P> std::fmt::Debug for ReplayHandlers<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayHandlers")
            .field("names", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Drain the queue into the live loop, oldest entry first.
///
/// Pops one entry at a time, so entries pushed while the drain runs are
/// still observed; popping removes the entry, so nothing runs twice.
/// Draining an already-empty queue is a no-op. An entry naming an
/// unregistered action or handler aborts the drain loudly.
pub(crate) async fn drain_replay<S, P>(
    queue: &ReplayQueue,
    dispatcher: &Dispatcher<S, P>,
    handlers: &ReplayHandlers<S, P>,
) -> Result<(), ClientError>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    while let Some(entry) = queue.pop_front() {
        if !dispatcher.contains(&entry.action) {
            return Err(ClientError::UnknownReplayAction { name: entry.action });
        }

        let input = ActionInput::from(&entry);
        match entry.handler {
            Some(ref name) => {
                let Some(handler) = handlers.get(name) else {
                    return Err(ClientError::UnknownReplayHandler { name: name.clone() });
                };
                let action =
                    ReplayAction { dispatcher, name: entry.action.clone(), input };
                handler.handle(entry.event.clone(), action).await?;
            },
            None => dispatcher.invoke(&entry.action, input).await?,
        }
    }
    Ok(())
}
