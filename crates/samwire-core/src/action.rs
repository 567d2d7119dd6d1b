//! Actions, the actions map, and the next-action hook.

use std::{collections::HashMap, future::Future, sync::Arc};

use async_trait::async_trait;
use samwire_hydrate::ReplayEntry;
use serde_json::Value;

use crate::{
    StateHandle,
    error::LoopError,
    model::{ActionCx, Dispatcher},
};

/// Invocation payload handed to an action.
///
/// Carries the replayable argument shape: whatever a hydration
/// [`ReplayEntry`] captures can be forwarded to an action unchanged, and
/// direct programmatic invocations use the same shape (usually just
/// [`with_args`](Self::with_args), or [`default`](Self::default) for
/// nothing at all).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInput {
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Identity of the interacted element, when replayed from hydration.
    pub target: Option<String>,
    /// Serialized interaction event, when replayed from hydration.
    pub event: Option<Value>,
}

impl ActionInput {
    /// Empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input carrying positional arguments.
    #[must_use]
    pub fn with_args(args: Vec<Value>) -> Self {
        Self { args, ..Self::default() }
    }
}

impl From<&ReplayEntry> for ActionInput {
    fn from(entry: &ReplayEntry) -> Self {
        Self { args: entry.args.clone(), target: entry.target.clone(), event: entry.event.clone() }
    }
}

/// A named, possibly-asynchronous operation that produces proposals.
///
/// The loop never mutates an action, only invokes it with injected
/// capabilities: an [`ActionCx`] whose `propose` is exactly the bound
/// accept, and the current [`ActionInput`]. An action may either call
/// [`ActionCx::propose`] itself (any number of times) or return
/// `Some(proposal)` and let the loop forward it — both styles are
/// supported, and a `None` return after explicit proposes is not treated
/// as an extra proposal.
#[async_trait]
pub trait Action<S, P>: Send + Sync {
    /// Run the action. A returned proposal is forwarded to accept
    /// automatically.
    async fn run(&self, cx: ActionCx<S, P>, input: ActionInput) -> Result<Option<P>, LoopError>;
}

/// Adapter implementing [`Action`] for an async closure.
///
/// See [`action_fn`].
pub struct ActionFn<F> {
    f: F,
}

/// Wrap an async closure `Fn(ActionCx<S, P>, ActionInput) ->
/// Future<Result<Option<P>, LoopError>>` as an [`Action`].
pub fn action_fn<F>(f: F) -> ActionFn<F> {
    ActionFn { f }
}

#[async_trait]
impl<S, P, F, Fut> Action<S, P> for ActionFn<F>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
    F: Fn(ActionCx<S, P>, ActionInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<P>, LoopError>> + Send,
{
    async fn run(&self, cx: ActionCx<S, P>, input: ActionInput) -> Result<Option<P>, LoopError> {
        (self.f)(cx, input).await
    }
}

/// Mapping from unique action name to action.
///
/// Owned by the app definition; insertion order is irrelevant. Inserting
/// under an existing name replaces the previous action.
pub struct Actions<S, P> {
    map: HashMap<String, Arc<dyn Action<S, P>>>,
}

impl<S, P> Default for Actions<S, P> {
    fn default() -> Self {
        Self { map: HashMap::new() }
    }
}

impl<S, P> Actions<S, P> {
    /// Empty actions map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under a name (builder style).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, action: impl Action<S, P> + 'static) -> Self {
        self.insert(name, action);
        self
    }

    /// Register an action under a name.
    pub fn insert(&mut self, name: impl Into<String>, action: impl Action<S, P> + 'static) {
        self.map.insert(name.into(), Arc::new(action));
    }

    /// Whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<dyn Action<S, P>>> {
        self.map.get(name).cloned()
    }
}

impl<S, P> std::fmt::Debug for Actions<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions").field("names", &self.map.keys().collect::<Vec<_>>()).finish()
    }
}

/// Hook invoked after every accepted mutation.
///
/// Receives the shared state and a [`Dispatcher`] for firing further
/// actions; those re-enter accept at the next chain depth, so a divergent
/// chain is cut off at [`MAX_CHAIN_DEPTH`](crate::MAX_CHAIN_DEPTH) rather
/// than looping forever.
#[async_trait]
pub trait NextAction<S, P>: Send + Sync {
    /// Inspect the freshly mutated state and possibly fire actions.
    async fn next(&self, state: StateHandle<S>, actions: Dispatcher<S, P>)
    -> Result<(), LoopError>;
}

#[async_trait]
impl<S, P> NextAction<S, P> for Box<dyn NextAction<S, P>>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    async fn next(
        &self,
        state: StateHandle<S>,
        actions: Dispatcher<S, P>,
    ) -> Result<(), LoopError> {
        self.as_ref().next(state, actions).await
    }
}

/// Adapter implementing [`NextAction`] for an async closure.
///
/// See [`next_action_fn`].
pub struct NextActionFn<F> {
    f: F,
}

/// Wrap an async closure `Fn(StateHandle<S>, Dispatcher<S, P>) ->
/// Future<Result<(), LoopError>>` as a [`NextAction`].
pub fn next_action_fn<F>(f: F) -> NextActionFn<F> {
    NextActionFn { f }
}

#[async_trait]
impl<S, P, F, Fut> NextAction<S, P> for NextActionFn<F>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
    F: Fn(StateHandle<S>, Dispatcher<S, P>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), LoopError>> + Send,
{
    async fn next(
        &self,
        state: StateHandle<S>,
        actions: Dispatcher<S, P>,
    ) -> Result<(), LoopError> {
        (self.f)(state, actions).await
    }
}
