//! The accept seam: the sole writer of state.

use std::future::Future;

use async_trait::async_trait;

use crate::{StateHandle, error::AcceptError};

/// Decides which proposal fields are legal given current state and applies
/// them.
///
/// Exactly one accept function exists per running app, closed over the
/// shared state: it receives the [`StateHandle`] rather than a bare
/// reference so it can choose its own lock granularity and read-then-write
/// defensively across its own await points. No proposal reaches state any
/// other way.
#[async_trait]
pub trait Accept<S, P>: Send + Sync {
    /// Apply (or reject) a proposal against current state.
    async fn accept(&self, state: StateHandle<S>, proposal: P) -> Result<(), AcceptError>;
}

#[async_trait]
impl<S, P> Accept<S, P> for Box<dyn Accept<S, P>>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
{
    async fn accept(&self, state: StateHandle<S>, proposal: P) -> Result<(), AcceptError> {
        self.as_ref().accept(state, proposal).await
    }
}

/// Adapter implementing [`Accept`] for an async closure.
///
/// See [`accept_fn`].
pub struct AcceptFn<F> {
    f: F,
}

/// Wrap an async closure `Fn(StateHandle<S>, P) -> Future<Result<(),
/// AcceptError>>` as an [`Accept`].
pub fn accept_fn<F>(f: F) -> AcceptFn<F> {
    AcceptFn { f }
}

#[async_trait]
impl<S, P, F, Fut> Accept<S, P> for AcceptFn<F>
where
    S: Send + Sync + 'static,
    P: Send + 'static,
    F: Fn(StateHandle<S>, P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), AcceptError>> + Send,
{
    async fn accept(&self, state: StateHandle<S>, proposal: P) -> Result<(), AcceptError> {
        (self.f)(state, proposal).await
    }
}
