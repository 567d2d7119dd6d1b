//! Embedded-state payload: how the server plants its state in markup and
//! how the client reads it back.
//!
//! The server serializes its state snapshot into a well-known `<script>`
//! element appended to the rendered page. The client, when started without
//! an explicit state, parses exactly that location to restore. The payload
//! is plain JSON with `<` escaped as `\u003c`, which keeps a state value
//! containing `</script>` from terminating the element early.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Element id the payload is stored under.
pub const STATE_ELEMENT_ID: &str = "samwire-state";

const OPEN_TAG: &str = r#"<script type="application/json" id="samwire-state">"#;
const CLOSE_TAG: &str = "</script>";

/// Errors from embedding or restoring the state payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The document carries no embedded state element.
    #[error("document has no embedded state payload (script element #samwire-state)")]
    MissingState,

    /// The state element opens but never closes.
    #[error("embedded state payload is unterminated")]
    UnterminatedState,

    /// The payload text is not valid JSON for the expected state type.
    #[error("embedded state payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialize `state` in the exact form the payload element carries.
///
/// # Errors
///
/// Returns [`PayloadError::Malformed`] if the state cannot be serialized.
pub fn encode_state<S: Serialize>(state: &S) -> Result<String, PayloadError> {
    let json = serde_json::to_string(state)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Append the embedded payload element for `state` to `markup`.
///
/// # Errors
///
/// Returns [`PayloadError::Malformed`] if the state cannot be serialized.
pub fn embed_state<S: Serialize>(markup: &str, state: &S) -> Result<String, PayloadError> {
    let payload = encode_state(state)?;
    Ok(format!("{markup}{OPEN_TAG}{payload}{CLOSE_TAG}"))
}

/// Locate the embedded payload text in a rendered document.
///
/// # Errors
///
/// Returns [`PayloadError::MissingState`] if the document has no payload
/// element and [`PayloadError::UnterminatedState`] if the element never
/// closes.
pub fn extract_state(document: &str) -> Result<&str, PayloadError> {
    let start = document.find(OPEN_TAG).ok_or(PayloadError::MissingState)? + OPEN_TAG.len();
    let rest = &document[start..];
    let end = rest.find(CLOSE_TAG).ok_or(PayloadError::UnterminatedState)?;
    Ok(&rest[..end])
}

/// Restore a state value from the payload embedded in `document`.
///
/// # Errors
///
/// Returns the extraction errors of [`extract_state`], or
/// [`PayloadError::Malformed`] if the payload does not parse as `S`.
pub fn restore_state<S: DeserializeOwned>(document: &str) -> Result<S, PayloadError> {
    let payload = extract_state(document)?;
    Ok(serde_json::from_str(payload)?)
}
