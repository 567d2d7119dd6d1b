//! Fuzz target for replay entry decoding.
//!
//! Replay entries arrive as JSON written by the page bootstrap before the
//! runtime exists, so decoding must tolerate arbitrary bytes. Valid entries
//! must also survive a re-encode without loss.
//!
//! The decoder should NEVER panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use samwire_hydrate::ReplayEntry;

fuzz_target!(|data: &[u8]| {
    let Ok(entry) = serde_json::from_slice::<ReplayEntry>(data) else {
        return;
    };

    let encoded = serde_json::to_string(&entry).expect("decoded entry re-encodes");
    let again: ReplayEntry = serde_json::from_str(&encoded).expect("re-encoded entry decodes");
    assert_eq!(entry, again);
});
