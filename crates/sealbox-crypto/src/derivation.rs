//! Purpose-scoped key derivation using HKDF.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::keyring::Key;

/// Label used for purpose-key derivation
const PURPOSE_LABEL: &[u8] = b"sealboxPurposeV1";

/// Size of a derived purpose key in bytes.
pub const DERIVED_KEY_SIZE: usize = 32;

/// An ephemeral purpose-scoped key derived from a master key.
///
/// Lives for a single protect/unprotect call and is never persisted.
pub struct DerivedKey {
    /// The 32-byte symmetric key for XChaCha20-Poly1305
    key: [u8; DERIVED_KEY_SIZE],
}

impl DerivedKey {
    /// 32-byte symmetric key for XChaCha20-Poly1305 AEAD.
    pub fn key(&self) -> &[u8; DERIVED_KEY_SIZE] {
        &self.key
    }
}

// Implement Drop to zeroize key material
impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive the purpose-scoped key for `(key, purpose)`.
///
/// The purpose string is included verbatim, length-prefixed, in the
/// HKDF info input so distinct purposes can never produce colliding
/// derivation inputs.
///
/// # Security
///
/// - Deterministic: same (key, purpose) always yields the same output
/// - Different purposes produce unrelated keys (purpose isolation)
/// - One-way: a derived key reveals nothing about the master key or
///   about derived keys for other purposes
pub fn derive_purpose_key(key: &Key, purpose: &str) -> DerivedKey {
    // Extract first so the master key material is properly distributed
    let hkdf = Hkdf::<Sha256>::new(None, key.material().as_bytes());

    // Build the info parameter: label || len(purpose) || purpose
    let mut info = Vec::with_capacity(PURPOSE_LABEL.len() + 8 + purpose.len());
    info.extend_from_slice(PURPOSE_LABEL);
    info.extend_from_slice(&(purpose.len() as u64).to_be_bytes());
    info.extend_from_slice(purpose.as_bytes());

    let mut derived = [0u8; DERIVED_KEY_SIZE];
    let Ok(()) = hkdf.expand(&info, &mut derived) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    DerivedKey { key: derived }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyring::{KEY_ID_SIZE, KEY_MATERIAL_SIZE, KeyId, KeyMaterial};

    fn test_key(material_byte: u8) -> Key {
        Key::new(
            KeyId::from_bytes([1; KEY_ID_SIZE]),
            KeyMaterial::new([material_byte; KEY_MATERIAL_SIZE]),
            0,
            0,
            u64::MAX,
        )
    }

    #[test]
    fn derive_is_deterministic() {
        let key = test_key(7);

        let a = derive_purpose_key(&key, "SamplePurpose");
        let b = derive_purpose_key(&key, "SamplePurpose");

        assert_eq!(a.key(), b.key(), "same inputs must produce same output");
    }

    #[test]
    fn different_purposes_produce_different_keys() {
        let key = test_key(7);

        let a = derive_purpose_key(&key, "purpose-a");
        let b = derive_purpose_key(&key, "purpose-b");

        assert_ne!(a.key(), b.key(), "different purposes must produce different keys");
    }

    #[test]
    fn prefix_purposes_produce_different_keys() {
        let key = test_key(7);

        let short = derive_purpose_key(&key, "Sample");
        let long = derive_purpose_key(&key, "SamplePurpose");

        assert_ne!(short.key(), long.key());
    }

    #[test]
    fn different_master_keys_produce_different_keys() {
        let a = derive_purpose_key(&test_key(1), "SamplePurpose");
        let b = derive_purpose_key(&test_key(2), "SamplePurpose");

        assert_ne!(a.key(), b.key(), "different master keys must produce different keys");
    }

    #[test]
    fn derived_key_differs_from_master_material() {
        let key = test_key(7);
        let derived = derive_purpose_key(&key, "SamplePurpose");

        assert_ne!(derived.key(), key.material().as_bytes());
    }

    #[test]
    fn empty_purpose_is_valid() {
        let key = test_key(7);

        let empty = derive_purpose_key(&key, "");
        let named = derive_purpose_key(&key, "x");

        assert_ne!(empty.key(), named.key());
    }

    #[test]
    fn unicode_purpose_is_valid() {
        let key = test_key(7);

        let a = derive_purpose_key(&key, "zwecküberschrift");
        let b = derive_purpose_key(&key, "zweckuberschrift");

        assert_ne!(a.key(), b.key());
    }
}
