//! Fuzz target for Envelope::decode
//!
//! This fuzzer tests the envelope codec with:
//! - Arbitrary non-base64 input
//! - Truncated and oversized layouts
//! - Unknown algorithm ids
//!
//! The decoder should NEVER panic. All invalid inputs should return a
//! MalformedEnvelope error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealbox_crypto::Envelope;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Attempt to decode the envelope
        // This should never panic, only return Err for invalid input
        let _ = Envelope::decode(text);
    }
});
