//! Host trait for abstracting the client platform.
//!
//! The [`Host`] trait decouples the hydration runtime from the environment
//! the page lives in. A browser host reads the real document and hands out
//! a DOM node as the anchor; test hosts hold a rendered string. The runtime
//! itself never touches a platform API directly.

use samwire_core::Renderer;

/// Platform seam the client runtime starts against.
pub trait Host<R: Renderer>: Send + Sync {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The server-rendered document text, read to restore embedded state.
    ///
    /// Only consulted when no explicit state was supplied to
    /// [`ClientConfig`](crate::ClientConfig).
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn document(&self) -> Result<String, Self::Error>;

    /// Mount anchor the root view renders against.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor cannot be resolved.
    fn anchor(&self) -> Result<R::Anchor, Self::Error>;
}
