//! Fuzz target for the full unprotect pipeline
//!
//! Runs decode followed by unprotect against a fixed ring. Two
//! properties:
//! - The pipeline never panics on arbitrary input
//! - Fuzzer-generated envelopes never verify: forging a valid Poly1305
//!   tag from random bytes is computationally infeasible, so any
//!   success here is a bug in the verification path

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use sealbox_crypto::{Envelope, Key, KeyId, KeyMaterial, KeyRing, Protector};

fuzz_target!(|data: &[u8]| {
    let key = Key::new(
        KeyId::from_bytes([7; 16]),
        KeyMaterial::new([42; 32]),
        0,
        0,
        u64::MAX,
    );
    let protector = Protector::new(Arc::new(KeyRing::from_keys([key])));

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(envelope) = Envelope::decode(text) {
            assert!(protector.unprotect(&envelope, "fuzz").is_err());
        }
    }
});
