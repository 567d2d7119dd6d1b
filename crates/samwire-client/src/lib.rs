//! Client hydration runtime for samwire.
//!
//! Attaches a live control loop to a server-rendered page: restores state
//! from the embedded payload (or uses a supplied one verbatim), constructs
//! the core loop with the app's accept, actions, and next-action hook,
//! performs the initial render against the host's mount anchor, and drains
//! the replay queue so interactions recorded before the loop existed are
//! not lost.
//!
//! Construction is all-or-nothing: either [`ClientRuntime::start`] returns
//! the full `{accept, actions}` pair (as a [`Model`](samwire_core::Model))
//! or it returns an error with nothing half-initialized.
//!
//! # Components
//!
//! - [`Host`]: platform seam for the document text and mount anchor
//! - [`ClientConfig`] / [`ClientRuntime`]: hydration entry point
//! - [`ReplayHandler`] / [`ReplayHandlers`]: optional per-entry hooks run
//!   during the drain
//! - [`ClientError`]: restoration, host, and replay configuration failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod host;
mod replay;
mod runtime;

pub use error::ClientError;
pub use host::Host;
pub use replay::{ReplayAction, ReplayHandler, ReplayHandlers};
pub use runtime::{ClientConfig, ClientRuntime};
