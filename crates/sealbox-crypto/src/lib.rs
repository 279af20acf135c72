//! Sealbox Protection Engine
//!
//! Purpose-scoped authenticated encryption for opaque strings. The
//! engine protects (encrypts and signs) and unprotects (verifies and
//! decrypts) caller-supplied data under keys held in a ring, with a
//! caller-chosen purpose string cryptographically isolating independent
//! uses of the same master key.
//!
//! # Key Hierarchy
//!
//! ```text
//! Key Ring (master keys, activation windows)
//!        │
//!        ▼
//! HKDF → Purpose Key (per master key, per purpose)
//!        │
//!        ▼
//! AEAD Encryption → Envelope
//!        │
//!        ▼
//! base64url → transport-safe string
//! ```
//!
//! Purpose keys are derived fresh for every call and zeroized
//! immediately afterwards; nothing derived is ever persisted.
//!
//! # Security
//!
//! Purpose Isolation:
//! - Each purpose gets its own HKDF-derived key; a derived key for one
//!   purpose reveals nothing about any other, nor about the master key
//! - Unprotect re-derives from the caller's purpose, so a purpose
//!   mismatch is an authentication failure
//!
//! Authenticity:
//! - XChaCha20-Poly1305 AEAD with associated data binding
//!   {algorithm id, key id, purpose} to the ciphertext
//! - Failed authentication tag -> reject, with no indication of cause
//!
//! Rotation:
//! - New protect calls use the ring's current key; expired keys remain
//!   resolvable by id, so earlier envelopes stay recoverable until a
//!   key is explicitly revoked

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod derivation;
pub mod envelope;
pub mod error;
pub mod keyring;
pub mod protector;
mod rng;

pub use derivation::{DERIVED_KEY_SIZE, DerivedKey, derive_purpose_key};
pub use envelope::{AlgorithmId, Envelope, NONCE_SIZE, TAG_SIZE};
pub use error::ProtectError;
pub use keyring::{KEY_ID_SIZE, KEY_MATERIAL_SIZE, Key, KeyId, KeyMaterial, KeyRing};
pub use protector::{Protector, open, seal};
