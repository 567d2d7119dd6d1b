//! The single shared state cell.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle to the one mutable state instance of a running app.
///
/// Every collaborator — accept, actions, the next-action hook, render
/// passes — sees the same instance through cheap clones of this handle; no
/// two components ever hold independently-mutable copies.
///
/// Discipline is "accept is the sole writer, everyone else reads". The
/// handle cannot enforce who calls [`write`](Self::write), but the loop
/// only ever routes proposals through accept, and accept takes the write
/// guard only for the span of its own mutation. Concurrent in-flight
/// accepts are not serialized against each other beyond that: an accept
/// that reads, awaits, then writes must re-check what it read, because the
/// state may have moved underneath it.
#[derive(Debug)]
pub struct StateHandle<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for StateHandle<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S> StateHandle<S> {
    /// Wrap a state value in a shared handle.
    pub fn new(state: S) -> Self {
        Self { inner: Arc::new(RwLock::new(state)) }
    }

    /// Acquire shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read().await
    }

    /// Acquire exclusive write access. Reserved for accept functions.
    pub async fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write().await
    }

    /// Clone the current state value, e.g. for a render pass.
    pub async fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.inner.read().await.clone()
    }
}
