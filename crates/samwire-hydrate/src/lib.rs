//! Hydration wire layer for samwire.
//!
//! Between the moment server-rendered markup becomes interactive and the
//! moment the client loop finishes constructing its actions, user intents
//! must not be silently lost. This crate defines the data that crosses that
//! gap: the serializable [`ReplayEntry`] describing a deferred action
//! invocation, the FIFO [`ReplayQueue`] those entries wait in, the
//! [`DispatchEmitter`] that encodes entries as markup-embeddable attribute
//! text, and the embedded-state payload the server plants for the client to
//! restore from.
//!
//! Everything here is pure data and encoding. No executable text is ever
//! produced for embedding in markup: a dispatch attribute carries only an
//! action name and argument list, and the browser bootstrap that evaluates
//! it does nothing but push a completed entry onto the queue.
//!
//! # Components
//!
//! - [`ReplayEntry`]: a recorded user interaction awaiting a live action
//! - [`ReplayQueue`]: process-wide FIFO, pushed before hydration, drained once
//! - [`DispatchEmitter`]: encodes entries for `data-dispatch` attributes
//! - [`payload`]: embeds and restores the serialized state in markup

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dispatch;
mod entry;
pub mod payload;
mod queue;

pub use dispatch::{DISPATCH_ATTRIBUTE, DispatchEmitter, DispatchError, QUEUE_GLOBAL};
pub use entry::ReplayEntry;
pub use payload::PayloadError;
pub use queue::ReplayQueue;
