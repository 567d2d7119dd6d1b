//! Error type for the server runtime.

use samwire_core::LoopError;
use samwire_hydrate::PayloadError;
use thiserror::Error;

/// Errors surfaced while rendering or accepting server-side.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Accept rejected or failed while applying a proposal.
    #[error(transparent)]
    Loop(#[from] LoopError),

    /// The state snapshot could not be embedded into the page.
    #[error("failed to embed state payload: {0}")]
    Payload(#[from] PayloadError),
}
