//! Error types for the control loop.
//!
//! Strongly-typed errors for the loop's two failure layers: application
//! failures surfaced by accept ([`AcceptError`]) and loop-level failures
//! ([`LoopError`]: unresolvable action names, chain overflow, propagated
//! accept/action/next-action errors). The loop never logs, retries, or
//! hides an error behind a default value; everything propagates to the
//! caller of `accept` or the action invocation.

use thiserror::Error;

/// Boxed error type used at the application seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised by an accept function.
///
/// Accept decides which proposal fields are legal given current state;
/// whatever error value the application uses to say "no" travels here as
/// an opaque source. The loop does not roll back partial mutation — accept
/// is responsible for the transactional consistency of its own writes.
#[derive(Error, Debug)]
#[error("accept rejected the proposal: {source}")]
pub struct AcceptError {
    #[source]
    source: BoxError,
}

impl AcceptError {
    /// Wrap an application error.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self { source: source.into() }
    }

    /// Build from a bare message.
    pub fn message(message: impl Into<String>) -> Self {
        Self { source: message.into().into() }
    }
}

/// Errors surfaced by the control loop.
#[derive(Error, Debug)]
pub enum LoopError {
    /// An action name did not resolve in the actions map. This is a
    /// configuration error: fatal, surfaced immediately, never retried.
    #[error("no action named {name:?} is registered")]
    UnknownAction {
        /// The name that failed to resolve.
        name: String,
    },

    /// A next-action chain re-entered accept more than
    /// [`MAX_CHAIN_DEPTH`](crate::MAX_CHAIN_DEPTH) times. The application
    /// is responsible for convergence; this bound turns a divergent chain
    /// into a reported error instead of an unbounded loop.
    #[error("automatic action chain exceeded depth {depth}")]
    ChainOverflow {
        /// Depth at which the chain was cut off.
        depth: u32,
    },

    /// Accept rejected a proposal or failed while applying it.
    #[error(transparent)]
    Accept(#[from] AcceptError),

    /// An action body failed before producing a proposal.
    #[error("action failed: {0}")]
    Action(#[source] BoxError),

    /// The next-action hook failed.
    #[error("next-action hook failed: {0}")]
    NextAction(#[source] BoxError),
}

impl LoopError {
    /// Wrap an application error raised inside an action body.
    pub fn action(source: impl Into<BoxError>) -> Self {
        Self::Action(source.into())
    }

    /// Wrap an application error raised inside the next-action hook.
    pub fn next_action(source: impl Into<BoxError>) -> Self {
        Self::NextAction(source.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_names_the_missing_action() {
        let err = LoopError::UnknownAction { name: "save".into() };
        assert_eq!(err.to_string(), "no action named \"save\" is registered");
    }

    #[test]
    fn accept_errors_surface_the_application_source() {
        let err = LoopError::from(AcceptError::message("value must be a string"));
        assert!(err.to_string().contains("value must be a string"));
    }
}
