//! Error types for the protection engine.
//!
//! Every failure in the protect/unprotect path is a value of
//! [`ProtectError`]; nothing in this crate panics on untrusted input.
//! Callers at a network boundary are expected to collapse
//! [`UnknownKey`](ProtectError::UnknownKey),
//! [`AuthenticationFailed`](ProtectError::AuthenticationFailed), and
//! [`MalformedEnvelope`](ProtectError::MalformedEnvelope) into a single
//! client-visible message so a failed unprotect does not reveal why it
//! failed.

use thiserror::Error;

use crate::keyring::KeyId;

/// Errors that can occur while protecting or unprotecting data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtectError {
    /// The key ring has no key whose activation window covers the
    /// current instant. Fatal to the protect path.
    #[error("no key in the ring is active for encryption")]
    NoActiveKey,

    /// An envelope references a key id that is not present in the ring.
    #[error("no key with id {id} in the ring")]
    UnknownKey {
        /// Key id the envelope was produced under
        id: KeyId,
    },

    /// The authentication tag did not verify. Covers wrong purpose,
    /// tampered ciphertext, and wrong key material alike; the variant
    /// deliberately carries no detail about which.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The envelope could not be decoded before any cryptographic
    /// verification was attempted.
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope {
        /// Structural reason the decode was rejected
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_message_is_generic() {
        let msg = ProtectError::AuthenticationFailed.to_string();
        assert_eq!(msg, "authentication failed");
    }

    #[test]
    fn unknown_key_names_the_id() {
        let id = KeyId::from_bytes([0xAB; 16]);
        let msg = ProtectError::UnknownKey { id }.to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
