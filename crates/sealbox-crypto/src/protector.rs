//! Authenticated protect/unprotect operations.
//!
//! [`seal`] and [`open`] are pure - callers provide the nonce, which
//! enables deterministic testing. [`Protector`] is the production
//! front: it selects the ring's current key, draws fresh nonces from
//! the OS CSPRNG, and resolves envelopes back to the key that produced
//! them.
//!
//! # Security
//!
//! - The AEAD associated data binds {algorithm id, key id, purpose} to
//!   the ciphertext; changing any of them fails verification
//! - The purpose used for unprotect is always the caller's, never one
//!   stored in the envelope - a purpose mismatch is an authentication
//!   failure, not a silent success
//! - Nonces are 24 random bytes per protect call; at that length,
//!   collision probability for one derived key is negligible

use std::sync::Arc;

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit, Payload},
};

use crate::{
    derivation::derive_purpose_key,
    envelope::{AlgorithmId, Envelope, NONCE_SIZE},
    error::ProtectError,
    keyring::{KEY_ID_SIZE, Key, KeyId, KeyRing},
    rng,
};

/// Protect `plaintext` under `(key, purpose)` with an explicit nonce.
///
/// Callers MUST provide a fresh, cryptographically random nonce in
/// production; [`Protector::protect`] does so automatically.
pub fn seal(plaintext: &[u8], key: &Key, purpose: &str, nonce: [u8; NONCE_SIZE]) -> Envelope {
    let algorithm = AlgorithmId::XChaCha20Poly1305;
    let derived = derive_purpose_key(key, purpose);
    let aad = build_aad(key.id(), algorithm, purpose);

    let cipher = XChaCha20Poly1305::new(derived.key().into());
    let Ok(ciphertext) =
        cipher.encrypt(XNonce::from_slice(&nonce), Payload { msg: plaintext, aad: &aad })
    else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    Envelope { key_id: key.id(), algorithm, nonce, ciphertext }
}

/// Verify and decrypt an envelope under `(key, purpose)`.
///
/// # Errors
///
/// `AuthenticationFailed` if the tag does not verify - wrong purpose,
/// tampered envelope, and wrong key material are indistinguishable by
/// design.
pub fn open(envelope: &Envelope, key: &Key, purpose: &str) -> Result<Vec<u8>, ProtectError> {
    let derived = derive_purpose_key(key, purpose);
    let aad = build_aad(envelope.key_id, envelope.algorithm, purpose);

    let cipher = XChaCha20Poly1305::new(derived.key().into());
    cipher
        .decrypt(
            XNonce::from_slice(&envelope.nonce),
            Payload { msg: envelope.ciphertext.as_slice(), aad: &aad },
        )
        .map_err(|_| ProtectError::AuthenticationFailed)
}

/// Associated data: algorithm id || key id || len(purpose) || purpose.
///
/// The purpose is length-prefixed for the same reason as in key
/// derivation - no two distinct (key id, purpose) pairs may serialize
/// to the same byte string.
fn build_aad(key_id: KeyId, algorithm: AlgorithmId, purpose: &str) -> Vec<u8> {
    let mut aad = Vec::with_capacity(1 + KEY_ID_SIZE + 8 + purpose.len());
    aad.push(algorithm.to_byte());
    aad.extend_from_slice(key_id.as_bytes());
    aad.extend_from_slice(&(purpose.len() as u64).to_be_bytes());
    aad.extend_from_slice(purpose.as_bytes());
    aad
}

#[allow(clippy::expect_used)]
fn wall_clock_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("invariant: system clock is after Unix epoch (1970-01-01)")
        .as_secs()
}

/// Ring-aware protection front.
///
/// Holds a read-only snapshot of the key ring. Calls are independent
/// and lock-free; the only shared effect is CSPRNG consumption.
pub struct Protector {
    ring: Arc<KeyRing>,
}

impl Protector {
    /// Create a protector over a ring snapshot.
    pub fn new(ring: Arc<KeyRing>) -> Self {
        Self { ring }
    }

    /// The ring this protector resolves keys from.
    pub fn ring(&self) -> &KeyRing {
        &self.ring
    }

    /// Protect `plaintext` for `purpose` under the ring's current key.
    ///
    /// # Errors
    ///
    /// `NoActiveKey` if no key's activation window covers now.
    pub fn protect(&self, plaintext: &[u8], purpose: &str) -> Result<Envelope, ProtectError> {
        let key = self.ring.current_key(wall_clock_secs())?;

        let mut nonce = [0u8; NONCE_SIZE];
        rng::fill(&mut nonce);

        Ok(seal(plaintext, key, purpose, nonce))
    }

    /// Unprotect an envelope for `purpose`.
    ///
    /// # Errors
    ///
    /// `UnknownKey` if the envelope's key id is not in the ring;
    /// `AuthenticationFailed` if verification fails for any reason.
    pub fn unprotect(&self, envelope: &Envelope, purpose: &str) -> Result<Vec<u8>, ProtectError> {
        let key = self.ring.lookup(&envelope.key_id)?;
        open(envelope, key, purpose)
    }
}
