//! Core control loop for samwire.
//!
//! Implements the State-Action-Model propagation loop: an action proposes a
//! state delta, the loop forwards the proposal to the single accept
//! function, accept mutates the shared state, and an optional next-action
//! hook inspects the result and may fire further actions. The loop is
//! generic over the application's state and proposal types and over the
//! rendering provider; it never inspects what a render call produces.
//!
//! # Components
//!
//! - [`Model`]: the loop itself, built from state, accept, actions, and an
//!   optional next-action hook
//! - [`Accept`] / [`Action`] / [`NextAction`]: the user-supplied seams,
//!   with [`accept_fn`] / [`action_fn`] / [`next_action_fn`] adapters for
//!   async closures
//! - [`Dispatcher`]: handle for invoking named actions, re-entrantly safe
//! - [`StateHandle`]: the single shared state cell; accept is its only
//!   writer
//! - [`Props`] / [`Renderer`] / [`Component`] / [`RootView`]: the fixed
//!   capability set injected into every render pass

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accept;
mod action;
mod error;
mod model;
mod render;
mod state;

pub use accept::{Accept, AcceptFn, accept_fn};
pub use action::{
    Action, ActionFn, ActionInput, Actions, NextAction, NextActionFn, action_fn, next_action_fn,
};
pub use error::{AcceptError, BoxError, LoopError};
pub use model::{ActionCx, Dispatcher, MAX_CHAIN_DEPTH, Model, ModelBuilder};
pub use render::{Component, Props, Renderer, RootView, WireId};
pub use state::StateHandle;
