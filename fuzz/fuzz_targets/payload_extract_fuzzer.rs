//! Fuzz target for embedded-state extraction.
//!
//! Feeds arbitrary documents through `extract_state` and `restore_state`:
//! - Documents with no payload element at all
//! - Truncated or unterminated script elements
//! - Payloads that are not valid JSON
//! - Valid JSON of an unexpected shape
//!
//! The extractor should NEVER panic. All invalid inputs must return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use samwire_hydrate::payload;

fuzz_target!(|data: &[u8]| {
    let Ok(document) = std::str::from_utf8(data) else {
        return;
    };

    let _ = payload::extract_state(document);
    let _ = payload::restore_state::<serde_json::Value>(document);
});
