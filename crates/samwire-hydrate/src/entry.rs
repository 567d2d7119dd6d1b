//! Serialized description of a deferred action invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recorded user interaction awaiting a live action.
///
/// Entries are created in two steps. The server-side [`DispatchEmitter`]
/// encodes the static half (`action`, `handler`, `args`) into markup; the
/// browser bootstrap completes it with the interaction half (`target`,
/// `event`) at the moment the user acts, then pushes it onto the
/// [`ReplayQueue`]. The client runtime consumes each entry exactly once
/// during the hydration drain.
///
/// # Invariants
///
/// - `action` names an action that must exist in the client's action map by
///   drain time; an unresolvable name is a configuration error and fails the
///   drain loudly.
/// - Entries carry only data, never serialized code. Replay can only reach
///   actions and handlers registered by name, which keeps eval out of the
///   page.
///
/// [`DispatchEmitter`]: crate::DispatchEmitter
/// [`ReplayQueue`]: crate::ReplayQueue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEntry {
    /// Name of the action to invoke once the client loop exists.
    pub action: String,

    /// Optional name of a client-registered replay handler. When present,
    /// the drain hands the captured event and an action thunk to that
    /// handler instead of invoking the action directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    /// Arguments captured at emit time, forwarded to the action verbatim.
    #[serde(default)]
    pub args: Vec<Value>,

    /// Identity of the interacted element, captured by the bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Serialized interaction event, captured by the bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Value>,
}

impl ReplayEntry {
    /// Create an entry naming an action, with no handler, args, or capture.
    pub fn new(action: impl Into<String>) -> Self {
        Self { action: action.into(), handler: None, args: Vec::new(), target: None, event: None }
    }

    /// Set the handler name.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Set the captured arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Complete the entry with the interaction half, as the browser
    /// bootstrap does right before pushing it onto the queue.
    #[must_use]
    pub fn complete(mut self, target: Option<String>, event: Option<Value>) -> Self {
        self.target = target;
        self.event = event;
        self
    }
}
