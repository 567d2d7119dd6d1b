//! Error type for the client runtime.

use samwire_core::{BoxError, LoopError};
use samwire_hydrate::PayloadError;
use thiserror::Error;

/// Errors surfaced while starting the client or draining the replay queue.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The embedded state payload was missing or malformed.
    #[error("failed to restore embedded state: {0}")]
    Restore(#[from] PayloadError),

    /// The host platform failed to provide the document or mount anchor.
    #[error("host platform error: {0}")]
    Host(#[source] BoxError),

    /// A replay entry names an action that is not registered. A recorded
    /// interaction must never be silently dropped, so this is fatal.
    #[error("replay entry names unknown action {name:?}")]
    UnknownReplayAction {
        /// The unresolvable action name.
        name: String,
    },

    /// A replay entry names a handler that is not registered.
    #[error("replay entry names unknown handler {name:?}")]
    UnknownReplayHandler {
        /// The unresolvable handler name.
        name: String,
    },

    /// A loop failure during the drain or initial next-action run.
    #[error(transparent)]
    Loop(#[from] LoopError),
}

impl ClientError {
    /// Wrap a host platform error.
    pub fn host(source: impl Into<BoxError>) -> Self {
        Self::Host(source.into())
    }
}
