//! Markup-side encoding of deferred dispatches.

use serde_json::Value;
use thiserror::Error;

use crate::ReplayEntry;

/// Attribute name the emitter's output is conventionally placed under.
///
/// The templating collaborator writes `data-dispatch="<emitter output>"` on
/// each interactive element; the browser bootstrap reads it back from the
/// event target.
pub const DISPATCH_ATTRIBUTE: &str = "data-dispatch";

/// Well-known global path the browser bootstrap pushes completed entries
/// onto before any client code has run.
///
/// The bootstrap is the only inline script the page needs, and all it does
/// is (at module load) create this array-like queue, and (per interaction)
/// parse the element's [`DISPATCH_ATTRIBUTE`], complete the entry with the
/// target and event, and push it. It never executes a handler itself.
pub const QUEUE_GLOBAL: &str = "samwire.toReplay";

/// Errors from encoding a dispatch attribute.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// An argument value could not be serialized to JSON.
    #[error("dispatch arguments are not JSON-serializable: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encodes deferred action invocations as markup-embeddable text.
///
/// This is the two-argument-capturing factory of the hydration design: given
/// an action name, an optional handler name, and captured arguments, it
/// produces the literal text a `data-dispatch` attribute carries. The text
/// is pure JSON data, never executable code. Quoting and HTML-attribute
/// escaping are the templating collaborator's responsibility, like all other
/// escaping concerns.
#[derive(Debug, Clone, Default)]
pub struct DispatchEmitter {
    _private: (),
}

impl DispatchEmitter {
    /// Create an emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode the static half of a [`ReplayEntry`] as attribute text.
    ///
    /// The produced JSON omits `target` and `event`; the browser bootstrap
    /// fills those in at interaction time via [`ReplayEntry::complete`].
    /// `<` is escaped as `\u003c` so the text is inert inside markup.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Encode`] if the arguments cannot be
    /// serialized.
    pub fn attr(
        &self,
        action: &str,
        handler: Option<&str>,
        args: &[Value],
    ) -> Result<String, DispatchError> {
        let mut entry = ReplayEntry::new(action).with_args(args.to_vec());
        if let Some(handler) = handler {
            entry = entry.with_handler(handler);
        }
        let json = serde_json::to_string(&entry)?;
        Ok(json.replace('<', "\\u003c"))
    }
}
