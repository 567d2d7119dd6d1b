//! Server-side rendering runtime for samwire.
//!
//! Builds the render and accept halves of an app for one request: the same
//! accept function the client will use, bound to a server-held state, and a
//! [`ServerRuntime::render_html_string`] operation that produces a
//! self-contained page with the state snapshot embedded for hydration.
//!
//! Actions are absent on the server by design — the actions map injected
//! into render passes is empty, and no next-action hook exists, so
//! automatic action chains never run server-side. Callers mutate state
//! through [`ServerRuntime::accept`] (e.g. to inject fetched data) before
//! rendering.
//!
//! # Components
//!
//! - [`ServerConfig`]: state, accept, renderer, and root view for one page
//! - [`ServerRuntime`]: `{render_html_string, accept}` per the loop contract

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod runtime;

pub use error::ServerError;
pub use runtime::{ServerConfig, ServerRuntime};
