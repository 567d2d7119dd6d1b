//! The model: orchestration of accept and next-action.
//!
//! [`Model`] binds the shared state, the single accept function, the named
//! actions, and the optional next-action hook into one loop. Every proposal
//! path — a direct [`Model::accept`], an action's explicit
//! [`ActionCx::propose`], or a proposal returned from an action body — runs
//! through the same internal entry point, which invokes accept and then the
//! next-action hook, tracking chain depth across re-entrant invocations.
//!
//! The loop is cooperative: it never spawns tasks, and it never serializes
//! overlapping `accept` calls against each other beyond the write guard an
//! accept function itself takes. Ordering across concurrently in-flight
//! accepts is the application's own concern.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::{
    StateHandle,
    accept::Accept,
    action::{Action, ActionInput, Actions, NextAction},
    error::LoopError,
};

/// Maximum number of times a next-action chain may re-enter accept.
///
/// The application is responsible for convergence of its action chains;
/// this bound exists so a divergent chain surfaces as
/// [`LoopError::ChainOverflow`] instead of looping forever.
pub const MAX_CHAIN_DEPTH: u32 = 32;

struct ModelInner<S, P> {
    state: StateHandle<S>,
    accept: Box<dyn Accept<S, P>>,
    actions: Actions<S, P>,
    next_action: Option<Box<dyn NextAction<S, P>>>,
}

/// Run one accept round at the given chain depth: invoke accept, then the
/// next-action hook with a dispatcher one level deeper.
///
/// Boxed because next-action may re-enter through [`Dispatcher::invoke`],
/// making the future type recursive.
fn accept_at<S, P>(
    inner: Arc<ModelInner<S, P>>,
    proposal: P,
    depth: u32,
) -> Pin<Box<dyn Future<Output = Result<(), LoopError>> + Send>>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    Box::pin(async move {
        if depth >= MAX_CHAIN_DEPTH {
            return Err(LoopError::ChainOverflow { depth });
        }
        inner.accept.accept(inner.state.clone(), proposal).await?;
        if let Some(next) = &inner.next_action {
            let actions = Dispatcher { inner: Arc::clone(&inner), depth: depth + 1 };
            next.next(inner.state.clone(), actions).await?;
        }
        Ok(())
    })
}

/// The control loop: accept plus actions bound to one shared state.
///
/// Cheap to clone; all clones drive the same loop instance.
pub struct Model<S, P> {
    inner: Arc<ModelInner<S, P>>,
}

impl<S, P> Clone for Model<S, P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S, P> std::fmt::Debug for Model<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("actions", &self.inner.actions.len())
            .field("next_action", &self.inner.next_action.is_some())
            .finish()
    }
}

impl<S, P> Model<S, P>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    /// Start building a model from the state instance and its accept
    /// function. Both are mandatory by construction; a model without an
    /// accept cannot exist.
    pub fn builder(state: S, accept: impl Accept<S, P> + 'static) -> ModelBuilder<S, P> {
        ModelBuilder {
            state: StateHandle::new(state),
            accept: Box::new(accept),
            actions: Actions::new(),
            next_action: None,
        }
    }

    /// Forward a proposal to accept; on success, run the next-action hook.
    ///
    /// Side effect on state only. Failures in accept or the hook surface
    /// here unmodified; nothing is rolled back or retried.
    pub async fn accept(&self, proposal: P) -> Result<(), LoopError> {
        accept_at(Arc::clone(&self.inner), proposal, 0).await
    }

    /// Handle for invoking the named actions.
    pub fn actions(&self) -> Dispatcher<S, P> {
        Dispatcher { inner: Arc::clone(&self.inner), depth: 0 }
    }

    /// Handle to the shared state.
    pub fn state(&self) -> StateHandle<S> {
        self.inner.state.clone()
    }

    /// Run the next-action hook once against current state, outside any
    /// accept round.
    ///
    /// The client runtime uses this after restoring server state, so a
    /// state shape that warrants automatic actions triggers them on the
    /// client even though the server never ran the hook. Actions fired
    /// from here chain at depth 1, exactly as if an accept had completed.
    pub async fn run_next_action(&self) -> Result<(), LoopError> {
        if let Some(next) = &self.inner.next_action {
            let actions = Dispatcher { inner: Arc::clone(&self.inner), depth: 1 };
            next.next(self.inner.state.clone(), actions).await?;
        }
        Ok(())
    }
}

/// Builder for [`Model`].
pub struct ModelBuilder<S, P> {
    state: StateHandle<S>,
    accept: Box<dyn Accept<S, P>>,
    actions: Actions<S, P>,
    next_action: Option<Box<dyn NextAction<S, P>>>,
}

impl<S, P> ModelBuilder<S, P>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    /// Register a single named action.
    #[must_use]
    pub fn action(mut self, name: impl Into<String>, action: impl Action<S, P> + 'static) -> Self {
        self.actions.insert(name, action);
        self
    }

    /// Replace the actions map wholesale.
    #[must_use]
    pub fn actions(mut self, actions: Actions<S, P>) -> Self {
        self.actions = actions;
        self
    }

    /// Set the next-action hook.
    #[must_use]
    pub fn next_action(mut self, hook: impl NextAction<S, P> + 'static) -> Self {
        self.next_action = Some(Box::new(hook));
        self
    }

    /// Set the next-action hook from an optional boxed value, as runtime
    /// configs carry it.
    #[must_use]
    pub fn maybe_next_action(mut self, hook: Option<Box<dyn NextAction<S, P>>>) -> Self {
        self.next_action = hook;
        self
    }

    /// Finish the model.
    pub fn build(self) -> Model<S, P> {
        Model {
            inner: Arc::new(ModelInner {
                state: self.state,
                accept: self.accept,
                actions: self.actions,
                next_action: self.next_action,
            }),
        }
    }
}

/// Handle for invoking named actions, carrying the chain depth of the
/// accept round it was issued from.
pub struct Dispatcher<S, P> {
    inner: Arc<ModelInner<S, P>>,
    depth: u32,
}

impl<S, P> Clone for Dispatcher<S, P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), depth: self.depth }
    }
}

impl<S, P> std::fmt::Debug for Dispatcher<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("actions", &self.inner.actions.len())
            .field("depth", &self.depth)
            .finish()
    }
}

impl<S, P> Dispatcher<S, P>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    /// Invoke the action registered under `name`.
    ///
    /// The action receives an [`ActionCx`] whose `propose` is the bound
    /// accept; a proposal returned from the action body is forwarded to
    /// accept automatically.
    ///
    /// # Errors
    ///
    /// [`LoopError::UnknownAction`] if `name` is not registered, otherwise
    /// whatever the action or the accept rounds it triggers return.
    pub async fn invoke(&self, name: &str, input: ActionInput) -> Result<(), LoopError> {
        let Some(action) = self.inner.actions.get(name) else {
            return Err(LoopError::UnknownAction { name: name.to_owned() });
        };
        let cx = ActionCx { inner: Arc::clone(&self.inner), depth: self.depth };
        if let Some(proposal) = action.run(cx, input).await? {
            accept_at(Arc::clone(&self.inner), proposal, self.depth).await?;
        }
        Ok(())
    }

    /// Forward a proposal directly to accept at this handle's depth.
    pub async fn accept(&self, proposal: P) -> Result<(), LoopError> {
        accept_at(Arc::clone(&self.inner), proposal, self.depth).await
    }

    /// Whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.actions.contains(name)
    }

    /// Whether the actions map is empty (as it always is server-side).
    pub fn is_empty(&self) -> bool {
        self.inner.actions.is_empty()
    }

    /// Handle to the shared state.
    pub fn state(&self) -> StateHandle<S> {
        self.inner.state.clone()
    }
}

/// Capabilities injected into a running action.
pub struct ActionCx<S, P> {
    inner: Arc<ModelInner<S, P>>,
    depth: u32,
}

impl<S, P> Clone for ActionCx<S, P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), depth: self.depth }
    }
}

impl<S, P> std::fmt::Debug for ActionCx<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionCx").field("depth", &self.depth).finish()
    }
}

impl<S, P> ActionCx<S, P>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    /// Propose a state delta. This is exactly the loop's accept entry
    /// point: the proposal runs through accept and then the next-action
    /// hook.
    pub async fn propose(&self, proposal: P) -> Result<(), LoopError> {
        accept_at(Arc::clone(&self.inner), proposal, self.depth).await
    }

    /// Read access to the shared state.
    pub fn state(&self) -> StateHandle<S> {
        self.inner.state.clone()
    }

    /// Dispatcher for invoking sibling actions at this chain depth.
    pub fn actions(&self) -> Dispatcher<S, P> {
        Dispatcher { inner: Arc::clone(&self.inner), depth: self.depth }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use serde_json::{Value, json};

    use super::*;
    use crate::{accept_fn, action_fn, next_action_fn};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        n: u32,
    }

    /// Accept that adds the proposed delta.
    fn adder() -> impl Accept<Counter, u32> {
        accept_fn(|state: StateHandle<Counter>, delta: u32| async move {
            state.write().await.n += delta;
            Ok(())
        })
    }

    #[tokio::test]
    async fn accept_applies_the_proposal() {
        let model = Model::builder(Counter::default(), adder()).build();
        model.accept(3).await.expect("accept succeeds");
        assert_eq!(model.state().read().await.n, 3);
    }

    #[tokio::test]
    async fn unrecognized_proposal_fields_leave_state_unchanged() {
        // Accept only applies the field it recognizes.
        let accept = accept_fn(|state: StateHandle<Counter>, proposal: Value| async move {
            if let Some(n) = proposal.get("n").and_then(Value::as_u64) {
                state.write().await.n = n as u32;
            }
            Ok(())
        });
        let model = Model::builder(Counter { n: 7 }, accept).build();

        model.accept(json!({ "bogus": true })).await.expect("no-op proposal is safe");
        assert_eq!(model.state().read().await.n, 7);

        model.accept(json!({ "n": 9 })).await.expect("accept succeeds");
        assert_eq!(model.state().read().await.n, 9);
    }

    #[tokio::test]
    async fn next_action_fires_once_per_accept_after_mutation_is_visible() {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let next =
            next_action_fn(move |state: StateHandle<Counter>, _: Dispatcher<Counter, u32>| {
                let sink = Arc::clone(&sink);
                async move {
                    let n = state.read().await.n;
                    sink.lock().expect("sink lock").push(n);
                    Ok(())
                }
            });
        let model = Model::builder(Counter::default(), adder()).next_action(next).build();

        for _ in 0..4 {
            model.accept(1).await.expect("accept succeeds");
        }

        // One firing per accept, each seeing that accept's mutation.
        assert_eq!(*observed.lock().expect("sink lock"), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn returned_proposal_is_forwarded_to_accept() {
        let model = Model::builder(Counter::default(), adder())
            .action(
                "bump",
                action_fn(|_cx: ActionCx<Counter, u32>, input: ActionInput| async move {
                    let delta = input.args.first().and_then(Value::as_u64).unwrap_or(1) as u32;
                    Ok(Some(delta))
                }),
            )
            .build();

        let actions = model.actions();
        actions.invoke("bump", ActionInput::with_args(vec![json!(5)])).await.expect("invoke");
        assert_eq!(model.state().read().await.n, 5);
    }

    #[tokio::test]
    async fn explicit_propose_inside_an_action_is_supported() {
        let model = Model::builder(Counter::default(), adder())
            .action(
                "bump_twice",
                action_fn(|cx: ActionCx<Counter, u32>, _input: ActionInput| async move {
                    cx.propose(2).await?;
                    cx.propose(3).await?;
                    Ok(None)
                }),
            )
            .build();

        model.actions().invoke("bump_twice", ActionInput::new()).await.expect("invoke");
        assert_eq!(model.state().read().await.n, 5);
    }

    #[tokio::test]
    async fn unknown_action_is_a_loud_configuration_error() {
        let model = Model::builder(Counter::default(), adder()).build();
        let err = model.actions().invoke("missing", ActionInput::new()).await;
        assert!(matches!(err, Err(LoopError::UnknownAction { name }) if name == "missing"));
    }

    #[tokio::test]
    async fn accept_failure_propagates_to_the_caller() {
        let accept = accept_fn(|state: StateHandle<Counter>, delta: u32| async move {
            if delta % 2 == 1 {
                return Err(crate::AcceptError::message("odd deltas are rejected"));
            }
            state.write().await.n += delta;
            Ok(())
        });
        let model = Model::builder(Counter::default(), accept).build();

        assert!(matches!(model.accept(3).await, Err(LoopError::Accept(_))));
        assert_eq!(model.state().read().await.n, 0);
    }

    #[tokio::test]
    async fn action_failure_propagates_to_the_caller() {
        let model = Model::builder(Counter::default(), adder())
            .action(
                "boom",
                action_fn(|_cx: ActionCx<Counter, u32>, _input: ActionInput| async move {
                    Err(LoopError::action("exploded"))
                }),
            )
            .build();

        let err = model.actions().invoke("boom", ActionInput::new()).await;
        assert!(matches!(err, Err(LoopError::Action(_))));
    }

    #[tokio::test]
    async fn convergent_chain_runs_to_quiescence() {
        let next = next_action_fn(
            |state: StateHandle<Counter>, actions: Dispatcher<Counter, u32>| async move {
                if state.read().await.n < 3 {
                    actions.invoke("grow", ActionInput::new()).await?;
                }
                Ok(())
            },
        );
        let model = Model::builder(Counter::default(), adder())
            .action(
                "grow",
                action_fn(|_cx: ActionCx<Counter, u32>, _input: ActionInput| async move {
                    Ok(Some(1))
                }),
            )
            .next_action(next)
            .build();

        model.accept(1).await.expect("chain converges");
        assert_eq!(model.state().read().await.n, 3);
    }

    #[tokio::test]
    async fn divergent_chain_is_cut_off_with_an_error() {
        let next = next_action_fn(
            |_state: StateHandle<Counter>, actions: Dispatcher<Counter, u32>| async move {
                actions.invoke("grow", ActionInput::new()).await
            },
        );
        let model = Model::builder(Counter::default(), adder())
            .action(
                "grow",
                action_fn(|_cx: ActionCx<Counter, u32>, _input: ActionInput| async move {
                    Ok(Some(1))
                }),
            )
            .next_action(next)
            .build();

        let err = model.accept(1).await;
        assert!(matches!(err, Err(LoopError::ChainOverflow { depth: MAX_CHAIN_DEPTH })));
    }

    #[tokio::test]
    async fn next_action_failure_propagates_to_the_caller() {
        let next = next_action_fn(
            |_state: StateHandle<Counter>, _actions: Dispatcher<Counter, u32>| async move {
                Err(LoopError::next_action("hook exploded"))
            },
        );
        let model = Model::builder(Counter::default(), adder()).next_action(next).build();

        assert!(matches!(model.accept(1).await, Err(LoopError::NextAction(_))));
        // The mutation itself stands; the loop does not roll back.
        assert_eq!(model.state().read().await.n, 1);
    }

    #[tokio::test]
    async fn overlapping_accepts_are_tolerated() {
        // Accept yields mid-flight, so two concurrent accepts interleave.
        let accept = accept_fn(|state: StateHandle<Counter>, delta: u32| async move {
            let before = state.read().await.n;
            tokio::task::yield_now().await;
            // Read-then-write defensively: re-read rather than trust `before`.
            let mut guard = state.write().await;
            guard.n = guard.n.max(before) + delta;
            Ok(())
        });
        let model = Model::builder(Counter::default(), accept).build();

        let (a, b) = tokio::join!(model.accept(1), model.accept(2));
        a.expect("first accept succeeds");
        b.expect("second accept succeeds");
        assert_eq!(model.state().read().await.n, 3);
    }

    #[tokio::test]
    async fn run_next_action_fires_the_hook_without_an_accept() {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let next =
            next_action_fn(move |_state: StateHandle<Counter>, _: Dispatcher<Counter, u32>| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        let model = Model::builder(Counter::default(), adder()).next_action(next).build();

        model.run_next_action().await.expect("hook runs");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(model.state().read().await.n, 0);
    }

    #[tokio::test]
    async fn model_without_hook_treats_run_next_action_as_noop() {
        let model = Model::builder(Counter::default(), adder()).build();
        model.run_next_action().await.expect("no hook, no-op");
    }
}
