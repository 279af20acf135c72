//! Envelope codec: the serialized unit a protect call hands back.
//!
//! An envelope carries everything needed to verify and decrypt a
//! protected value except the purpose string and the key material
//! itself. The binary layout is fixed-width - no separators, nothing a
//! hostile encoder could confuse the parser with:
//!
//! ```text
//! offset  size  field
//! 0       1     algorithm id
//! 1       16    key id
//! 17      24    nonce
//! 41      ..    ciphertext including 16-byte Poly1305 tag
//! ```
//!
//! The whole layout is encoded as base64url without padding, making it
//! safe to pass in URLs and query strings.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{
    error::ProtectError,
    keyring::{KEY_ID_SIZE, KeyId},
};

/// XChaCha20 nonce size in bytes.
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Fixed-width header: algorithm id, key id, nonce.
const HEADER_SIZE: usize = 1 + KEY_ID_SIZE + NONCE_SIZE;

/// Smallest structurally valid envelope (empty plaintext).
const MIN_ENVELOPE_SIZE: usize = HEADER_SIZE + TAG_SIZE;

/// Registry of supported AEAD algorithms.
///
/// One entry today; the id byte in the envelope header leaves room for
/// migration without breaking existing ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmId {
    /// XChaCha20-Poly1305 with a 24-byte nonce and 16-byte tag
    XChaCha20Poly1305,
}

impl AlgorithmId {
    /// Wire representation of the algorithm id.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::XChaCha20Poly1305 => 0x01,
        }
    }

    /// Parse a wire algorithm id. `None` for unknown values.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::XChaCha20Poly1305),
            _ => None,
        }
    }
}

/// A protected value with the metadata needed to unprotect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Id of the master key the value was protected under
    pub key_id: KeyId,
    /// AEAD algorithm used
    pub algorithm: AlgorithmId,
    /// The 24-byte XChaCha20 nonce
    pub nonce: [u8; NONCE_SIZE],
    /// The ciphertext including 16-byte Poly1305 tag
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Plaintext length (ciphertext length minus authentication tag).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }

    /// Encode as transport-safe base64url without padding.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_bytes())
    }

    /// Decode a base64url envelope.
    ///
    /// # Errors
    ///
    /// `MalformedEnvelope` for invalid base64, truncated layouts, and
    /// unknown algorithm ids. Decoding performs no cryptographic
    /// verification; a decoded envelope may still fail to unprotect.
    pub fn decode(encoded: &str) -> Result<Self, ProtectError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| ProtectError::MalformedEnvelope { reason: "invalid base64url data" })?;
        Self::from_bytes(&bytes)
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.ciphertext.len());
        bytes.push(self.algorithm.to_byte());
        bytes.extend_from_slice(self.key_id.as_bytes());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ProtectError> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            return Err(ProtectError::MalformedEnvelope { reason: "envelope too short" });
        }

        let algorithm = AlgorithmId::from_byte(bytes[0])
            .ok_or(ProtectError::MalformedEnvelope { reason: "unsupported algorithm id" })?;

        let mut key_id = [0u8; KEY_ID_SIZE];
        key_id.copy_from_slice(&bytes[1..1 + KEY_ID_SIZE]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[1 + KEY_ID_SIZE..HEADER_SIZE]);

        Ok(Self {
            key_id: KeyId::from_bytes(key_id),
            algorithm,
            nonce,
            ciphertext: bytes[HEADER_SIZE..].to_vec(),
        })
    }
}
